use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config;

pub mod field {
    pub const FULL_NAME: &str = "fullName";
    pub const STUDENT_ID: &str = "studentId";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const ACCEPT_TERMS: &str = "acceptTerms";
    pub const IDENTIFIER: &str = "identifier";
}

/// One validation pass's violations, keyed by wire field name. Fields that
/// pass are absent. At most one message per field; the first violated rule
/// for a field wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    entries: BTreeMap<&'static str, &'static str>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.entries.insert(field, message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.entries.get(field).copied()
    }

    pub fn clear_field(&mut self, field: &str) {
        self.entries.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

/// Signup request body as it arrives over the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignUpFields {
    pub full_name: String,
    pub student_id: String,
    pub email: String,
    pub password: String,
    pub accept_terms: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignInFields {
    pub identifier: String,
    pub password: String,
    pub remember: bool,
}

fn full_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap())
}

fn email_schema_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .unwrap()
    })
}

fn email_form_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

// The local part must not open with a dot or contain a doubled dot; the
// anchored pattern covers the rest of the shape.
fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && email_schema_pattern().is_match(email)
}

fn starts_with_digit_prefix(s: &str) -> bool {
    s.chars()
        .take(config::STUDENT_ID_PREFIX_DIGITS)
        .take_while(char::is_ascii_digit)
        .count()
        == config::STUDENT_ID_PREFIX_DIGITS
}

/// Validates the signup wire payload. All fields are checked independently;
/// every violation is reported in one pass.
pub fn validate_signup_payload(payload: &SignupPayload) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name_len = payload.full_name.chars().count();
    if name_len < config::FULL_NAME_MIN {
        errors.insert(field::FULL_NAME, "Full name must be at least 3 characters");
    } else if name_len > config::FULL_NAME_MAX {
        errors.insert(field::FULL_NAME, "Full name is too long");
    } else if !full_name_pattern().is_match(&payload.full_name) {
        errors.insert(
            field::FULL_NAME,
            "Full name can only contain letters and spaces",
        );
    }

    if !is_valid_email(&payload.email) {
        errors.insert(field::EMAIL, "Invalid email address");
    }

    if let Some(student_id) = &payload.student_id {
        if student_id.chars().count() < config::STUDENT_ID_MIN {
            errors.insert(
                field::STUDENT_ID,
                "Student ID must be at least 11 characters",
            );
        }
    }

    let password_len = payload.password.chars().count();
    if password_len < config::PASSWORD_MIN {
        errors.insert(
            field::PASSWORD,
            "Password must be at least 8 characters long",
        );
    } else if password_len > config::PASSWORD_MAX {
        errors.insert(field::PASSWORD, "Password is too long");
    }

    errors
}

/// Validates the sign-up form's fields. A separate contract from the wire
/// payload schema; the two rule sets overlap but are not interchangeable.
pub fn validate_sign_up(fields: &SignUpFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name = fields.full_name.trim();
    if name.is_empty() {
        errors.insert(field::FULL_NAME, "Full name is required.");
    } else if name.chars().count() < config::FORM_NAME_MIN {
        errors.insert(field::FULL_NAME, "Name must be at least 2 characters.");
    }

    if fields.student_id.trim().is_empty() {
        errors.insert(field::STUDENT_ID, "Student ID is required.");
    } else if !starts_with_digit_prefix(&fields.student_id) {
        errors.insert(field::STUDENT_ID, "Invalid student ID format.");
    }

    if fields.email.trim().is_empty() {
        errors.insert(field::EMAIL, "Email is required.");
    } else if !email_form_pattern().is_match(&fields.email) {
        errors.insert(field::EMAIL, "Invalid email format.");
    }

    if fields.password.is_empty() {
        errors.insert(field::PASSWORD, "Password is required.");
    } else if fields.password.chars().count() < config::PASSWORD_MIN {
        errors.insert(field::PASSWORD, "Password must be at least 8 characters.");
    }

    if !fields.accept_terms {
        errors.insert(
            field::ACCEPT_TERMS,
            "You must accept the terms and privacy policy.",
        );
    }

    errors
}

pub fn validate_sign_in(fields: &SignInFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if fields.identifier.trim().is_empty() {
        errors.insert(field::IDENTIFIER, "Student ID or email is required.");
    }

    if fields.password.is_empty() {
        errors.insert(field::PASSWORD, "Password is required.");
    } else if fields.password.chars().count() < config::SIGNIN_PASSWORD_MIN {
        errors.insert(field::PASSWORD, "Password must be at least 6 characters.");
    }

    errors
}
