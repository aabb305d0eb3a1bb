use crate::{
    config,
    validate::{self, FieldErrors, SignInFields, SignUpFields, field},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignUpFocus {
    FullName,
    StudentId,
    Email,
    Password,
    AcceptTerms,
}

impl SignUpFocus {
    pub const ORDER: [SignUpFocus; 5] = [
        SignUpFocus::FullName,
        SignUpFocus::StudentId,
        SignUpFocus::Email,
        SignUpFocus::Password,
        SignUpFocus::AcceptTerms,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn field_key(self) -> &'static str {
        match self {
            SignUpFocus::FullName => field::FULL_NAME,
            SignUpFocus::StudentId => field::STUDENT_ID,
            SignUpFocus::Email => field::EMAIL,
            SignUpFocus::Password => field::PASSWORD,
            SignUpFocus::AcceptTerms => field::ACCEPT_TERMS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignUpFocus::FullName => "FULL NAME",
            SignUpFocus::StudentId => "STUDENT ID",
            SignUpFocus::Email => "EMAIL",
            SignUpFocus::Password => "PASSWORD",
            SignUpFocus::AcceptTerms => "TERMS",
        }
    }
}

pub struct SignUpForm {
    pub fields: SignUpFields,
    pub errors: FieldErrors,
    pub focus: SignUpFocus,
    pub show_password: bool,
}

impl SignUpForm {
    pub fn new() -> Self {
        Self {
            fields: SignUpFields::default(),
            errors: FieldErrors::new(),
            focus: SignUpFocus::FullName,
            show_password: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        if self.focus == SignUpFocus::AcceptTerms {
            if ch == ' ' {
                self.toggle_terms();
            }
            return;
        }
        let edited = match self.focused_text_mut() {
            Some(value) if value.chars().count() < config::INPUT_MAX => {
                value.push(ch);
                true
            }
            _ => false,
        };
        if edited {
            self.errors.clear_field(self.focus.field_key());
        }
    }

    pub fn backspace(&mut self) {
        let edited = match self.focused_text_mut() {
            Some(value) => {
                value.pop();
                true
            }
            None => false,
        };
        if edited {
            self.errors.clear_field(self.focus.field_key());
        }
    }

    pub fn toggle_terms(&mut self) {
        self.fields.accept_terms = !self.fields.accept_terms;
        self.errors.clear_field(field::ACCEPT_TERMS);
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn submit(&mut self) -> bool {
        self.errors = validate::validate_sign_up(&self.fields);
        self.errors.is_empty()
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            SignUpFocus::FullName => Some(&mut self.fields.full_name),
            SignUpFocus::StudentId => Some(&mut self.fields.student_id),
            SignUpFocus::Email => Some(&mut self.fields.email),
            SignUpFocus::Password => Some(&mut self.fields.password),
            SignUpFocus::AcceptTerms => None,
        }
    }
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInFocus {
    Identifier,
    Password,
    Remember,
}

impl SignInFocus {
    pub const ORDER: [SignInFocus; 3] = [
        SignInFocus::Identifier,
        SignInFocus::Password,
        SignInFocus::Remember,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn field_key(self) -> &'static str {
        match self {
            SignInFocus::Identifier => field::IDENTIFIER,
            SignInFocus::Password => field::PASSWORD,
            SignInFocus::Remember => "remember",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignInFocus::Identifier => "STUDENT ID OR EMAIL",
            SignInFocus::Password => "PASSWORD",
            SignInFocus::Remember => "REMEMBER ME",
        }
    }
}

pub struct SignInForm {
    pub fields: SignInFields,
    pub errors: FieldErrors,
    pub focus: SignInFocus,
    pub show_password: bool,
}

impl SignInForm {
    pub fn new() -> Self {
        Self {
            fields: SignInFields::default(),
            errors: FieldErrors::new(),
            focus: SignInFocus::Identifier,
            show_password: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        if self.focus == SignInFocus::Remember {
            if ch == ' ' {
                self.fields.remember = !self.fields.remember;
            }
            return;
        }
        let edited = match self.focused_text_mut() {
            Some(value) if value.chars().count() < config::INPUT_MAX => {
                value.push(ch);
                true
            }
            _ => false,
        };
        if edited {
            self.errors.clear_field(self.focus.field_key());
        }
    }

    pub fn backspace(&mut self) {
        let edited = match self.focused_text_mut() {
            Some(value) => {
                value.pop();
                true
            }
            None => false,
        };
        if edited {
            self.errors.clear_field(self.focus.field_key());
        }
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn submit(&mut self) -> bool {
        self.errors = validate::validate_sign_in(&self.fields);
        self.errors.is_empty()
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            SignInFocus::Identifier => Some(&mut self.fields.identifier),
            SignInFocus::Password => Some(&mut self.fields.password),
            SignInFocus::Remember => None,
        }
    }
}

impl Default for SignInForm {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sign_up_focus {
        use super::*;

        #[test]
        fn next_cycles_through_all_fields_and_wraps() {
            let mut focus = SignUpFocus::FullName;
            for expected in SignUpFocus::ORDER.iter().skip(1) {
                focus = focus.next();
                assert_eq!(focus, *expected);
            }
            assert_eq!(focus.next(), SignUpFocus::FullName);
        }

        #[test]
        fn prev_is_inverse_of_next() {
            for focus in SignUpFocus::ORDER {
                assert_eq!(focus.next().prev(), focus);
            }
        }
    }

    mod sign_up_form {
        use super::*;

        #[test]
        fn typing_appends_to_the_focused_field() {
            let mut form = SignUpForm::new();
            form.insert_char('A');
            form.insert_char('d');
            form.insert_char('a');
            assert_eq!(form.fields.full_name, "Ada");
        }

        #[test]
        fn control_characters_are_ignored() {
            let mut form = SignUpForm::new();
            form.insert_char('\t');
            form.insert_char('\u{1b}');
            assert_eq!(form.fields.full_name, "");
        }

        #[test]
        fn input_is_bounded() {
            let mut form = SignUpForm::new();
            for _ in 0..200 {
                form.insert_char('a');
            }
            assert_eq!(form.fields.full_name.chars().count(), crate::config::INPUT_MAX);
        }

        #[test]
        fn backspace_removes_last_character() {
            let mut form = SignUpForm::new();
            form.insert_char('A');
            form.insert_char('b');
            form.backspace();
            assert_eq!(form.fields.full_name, "A");
        }

        #[test]
        fn editing_clears_that_fields_error() {
            let mut form = SignUpForm::new();
            assert!(!form.submit());
            assert!(form.errors.get(field::FULL_NAME).is_some());
            assert!(form.errors.get(field::EMAIL).is_some());
            form.insert_char('A');
            assert!(form.errors.get(field::FULL_NAME).is_none());
            assert!(form.errors.get(field::EMAIL).is_some());
        }

        #[test]
        fn space_on_terms_toggles_the_checkbox() {
            let mut form = SignUpForm::new();
            form.focus = SignUpFocus::AcceptTerms;
            form.insert_char(' ');
            assert!(form.fields.accept_terms);
            form.insert_char(' ');
            assert!(!form.fields.accept_terms);
        }

        #[test]
        fn toggling_terms_clears_its_error() {
            let mut form = SignUpForm::new();
            assert!(!form.submit());
            assert!(form.errors.get(field::ACCEPT_TERMS).is_some());
            form.toggle_terms();
            assert!(form.errors.get(field::ACCEPT_TERMS).is_none());
        }

        #[test]
        fn valid_submission_reports_success_and_no_errors() {
            let mut form = SignUpForm::new();
            form.fields = crate::validate::SignUpFields {
                full_name: "Ada Lovelace".to_string(),
                student_id: "20240012345".to_string(),
                email: "ada@university.edu".to_string(),
                password: "longenough1".to_string(),
                accept_terms: true,
            };
            assert!(form.submit());
            assert!(form.errors.is_empty());
        }
    }

    mod sign_in_form_state {
        use super::*;

        #[test]
        fn focus_wraps_in_both_directions() {
            assert_eq!(SignInFocus::Remember.next(), SignInFocus::Identifier);
            assert_eq!(SignInFocus::Identifier.prev(), SignInFocus::Remember);
        }

        #[test]
        fn space_on_remember_toggles_it() {
            let mut form = SignInForm::new();
            form.focus = SignInFocus::Remember;
            form.insert_char(' ');
            assert!(form.fields.remember);
        }

        #[test]
        fn failed_submission_keeps_errors_until_edited() {
            let mut form = SignInForm::new();
            assert!(!form.submit());
            assert!(form.errors.get(field::IDENTIFIER).is_some());
            form.insert_char('a');
            assert!(form.errors.get(field::IDENTIFIER).is_none());
            assert!(form.errors.get(field::PASSWORD).is_some());
        }

        #[test]
        fn valid_submission_succeeds() {
            let mut form = SignInForm::new();
            form.fields.identifier = "ada@university.edu".to_string();
            form.fields.password = "123456".to_string();
            assert!(form.submit());
        }
    }

    mod mask_fn {
        use super::*;

        #[test]
        fn masks_every_character() {
            assert_eq!(mask("secret"), "••••••");
        }

        #[test]
        fn empty_value_masks_to_empty() {
            assert_eq!(mask(""), "");
        }
    }
}
