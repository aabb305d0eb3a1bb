mod forms;

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    config,
    core::StarField,
    render,
    types::{ColorId, StarSnapshot},
};

use forms::{SignInForm, SignUpForm, mask};

const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 3;

pub fn run() -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal);

    // The terminal is restored on every exit path, error propagation included.
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    let (body_w, body_h) = body_size(size.width, size.height);
    let mut field = StarField::new(body_w, body_h);

    let mut state = UiState::new();
    let mut snapshot: Vec<StarSnapshot> = Vec::with_capacity(config::STAR_COUNT);
    let mut framebuf = render::FrameBuffer::new(0, 0);

    let mut accumulator = 0.0_f32;
    let mut last_tick = std::time::Instant::now();
    let mut last_render = std::time::Instant::now();
    let render_interval = Duration::from_secs_f32(1.0 / config::RENDER_HZ);
    let mut sim_counter = 0_u32;
    let mut render_counter = 0_u32;
    let mut last_fps_sample = std::time::Instant::now();
    let mut sim_fps = 0.0_f32;
    let mut render_fps = 0.0_f32;

    loop {
        let now = std::time::Instant::now();
        let dt = (now - last_tick).as_secs_f32();
        last_tick = now;
        accumulator += dt;

        while accumulator >= config::DT {
            field.tick();
            accumulator -= config::DT;
            sim_counter += 1;
        }

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                CrosstermEvent::Key(key) => {
                    if handle_key(key, &mut state) == Action::Quit {
                        return Ok(());
                    }
                }
                CrosstermEvent::Resize(width, height) => {
                    let (body_w, body_h) = body_size(width, height);
                    field.resize(body_w, body_h);
                }
                _ => {}
            }
        }

        if last_render.elapsed() >= render_interval {
            field.snapshot(&mut snapshot);
            if last_fps_sample.elapsed() >= Duration::from_secs(1) {
                let secs = last_fps_sample.elapsed().as_secs_f32();
                sim_fps = sim_counter as f32 / secs;
                render_fps = render_counter as f32 / secs;
                sim_counter = 0;
                render_counter = 0;
                last_fps_sample = std::time::Instant::now();
            }
            terminal.draw(|frame| {
                draw_ui(
                    frame,
                    &state,
                    &snapshot,
                    &mut framebuf,
                    field.len(),
                    sim_fps,
                    render_fps,
                );
            })?;
            last_render = std::time::Instant::now();
            render_counter += 1;
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn body_size(width: u16, height: u16) -> (f32, f32) {
    (
        width as f32,
        height.saturating_sub(HEADER_ROWS + FOOTER_ROWS) as f32,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Landing,
    SignIn,
    SignUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
}

struct UiState {
    screen: Screen,
    signin: SignInForm,
    signup: SignUpForm,
    starfield_visible: bool,
    status: Option<String>,
}

impl UiState {
    fn new() -> Self {
        Self {
            screen: Screen::Landing,
            signin: SignInForm::new(),
            signup: SignUpForm::new(),
            starfield_visible: true,
            status: None,
        }
    }

    fn switch_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.status = None;
    }
}

fn handle_key(key: KeyEvent, state: &mut UiState) -> Action {
    match state.screen {
        Screen::Landing => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('s') => state.switch_to(Screen::SignIn),
            KeyCode::Char('u') => state.switch_to(Screen::SignUp),
            KeyCode::Char('b') => state.starfield_visible = !state.starfield_visible,
            _ => {}
        },
        Screen::SignIn => match key.code {
            KeyCode::Esc => state.switch_to(Screen::Landing),
            KeyCode::Right => state.switch_to(Screen::SignUp),
            KeyCode::Tab | KeyCode::Down => state.signin.focus_next(),
            KeyCode::BackTab | KeyCode::Up => state.signin.focus_prev(),
            KeyCode::Enter => {
                state.status = if state.signin.submit() {
                    Some(format!(
                        "Signed in as {} (simulated)",
                        state.signin.fields.identifier
                    ))
                } else {
                    None
                };
            }
            KeyCode::F(1) => state.signin.toggle_show_password(),
            KeyCode::F(2) => state.status = Some("OAuth sign-in initiated: google".to_string()),
            KeyCode::F(3) => state.status = Some("OAuth sign-in initiated: github".to_string()),
            KeyCode::Backspace => state.signin.backspace(),
            KeyCode::Char(ch) => state.signin.insert_char(ch),
            _ => {}
        },
        Screen::SignUp => match key.code {
            KeyCode::Esc => state.switch_to(Screen::Landing),
            KeyCode::Left => state.switch_to(Screen::SignIn),
            KeyCode::Tab | KeyCode::Down => state.signup.focus_next(),
            KeyCode::BackTab | KeyCode::Up => state.signup.focus_prev(),
            KeyCode::Enter => {
                state.status = if state.signup.submit() {
                    Some(format!(
                        "Account created for {} (simulated)",
                        state.signup.fields.full_name.trim()
                    ))
                } else {
                    None
                };
            }
            KeyCode::F(1) => state.signup.toggle_show_password(),
            KeyCode::F(2) => state.status = Some("OAuth sign-up initiated: google".to_string()),
            KeyCode::F(3) => state.status = Some("OAuth sign-up initiated: github".to_string()),
            KeyCode::Backspace => state.signup.backspace(),
            KeyCode::Char(ch) => state.signup.insert_char(ch),
            _ => {}
        },
    }
    Action::Continue
}

fn draw_ui(
    frame: &mut Frame,
    state: &UiState,
    snapshot: &[StarSnapshot],
    framebuf: &mut render::FrameBuffer,
    star_count: usize,
    sim_fps: f32,
    render_fps: f32,
) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(3),
            Constraint::Length(FOOTER_ROWS),
        ])
        .split(size);

    draw_header(frame, chunks[0], state, star_count, sim_fps, render_fps);

    if state.starfield_visible {
        draw_starfield(frame, chunks[1], snapshot, framebuf);
    }

    match state.screen {
        Screen::Landing => draw_landing(frame, chunks[1]),
        Screen::SignIn => draw_sign_in(frame, chunks[1], &state.signin),
        Screen::SignUp => draw_sign_up(frame, chunks[1], &state.signup),
    }

    draw_footer(frame, chunks[2], state);
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    star_count: usize,
    sim_fps: f32,
    render_fps: f32,
) {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };
    let line = Line::from(vec![
        tab(" HOME ", state.screen == Screen::Landing),
        tab(" SIGN IN ", state.screen == Screen::SignIn),
        tab(" SIGN UP ", state.screen == Screen::SignUp),
        Span::raw(format!(
            "   stars: {} | sim fps: {:.1} | render fps: {:.1}",
            star_count, sim_fps, render_fps
        )),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("CUHP DEVS | clubportal"),
    );
    frame.render_widget(header, area);
}

fn draw_starfield(
    frame: &mut Frame,
    area: Rect,
    snapshot: &[StarSnapshot],
    framebuf: &mut render::FrameBuffer,
) {
    let viewport = render::Viewport {
        width: area.width,
        height: area.height,
    };
    render::draw(snapshot, viewport, framebuf);

    let mut lines: Vec<Line> = Vec::with_capacity(framebuf.height() as usize);
    for y in 0..framebuf.height() {
        let mut spans: Vec<Span> = Vec::with_capacity(framebuf.width() as usize);
        for x in 0..framebuf.width() {
            let cell = framebuf.get(x, y);
            let glyph = render::glyph_for(cell.intensity);
            spans.push(Span::styled(
                glyph.to_string(),
                Style::default().fg(color_for(cell.color)),
            ));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_landing(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            "CUHP DEVS",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "Join the next generation of software engineers.",
            Style::default().fg(Color::Gray),
        ),
        Line::styled(
            "Department of Computer Science and Informatics",
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(""),
        Line::styled("[s] Sign In    [u] Sign Up", Style::default().fg(Color::Blue)),
    ];
    let rect = centered_rect(area, 52, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

fn draw_sign_in(frame: &mut Frame, area: Rect, form: &SignInForm) {
    let mut lines: Vec<Line> = Vec::new();
    for focus in forms::SignInFocus::ORDER {
        let focused = form.focus == focus;
        lines.push(label_line(focus.label(), focused));
        let value = match focus {
            forms::SignInFocus::Identifier => form.fields.identifier.clone(),
            forms::SignInFocus::Password => {
                if form.show_password {
                    form.fields.password.clone()
                } else {
                    mask(&form.fields.password)
                }
            }
            forms::SignInFocus::Remember => checkbox(form.fields.remember, "Remember me"),
        };
        lines.push(value_line(value, focused));
        lines.push(error_line(form.errors.get(focus.field_key())));
    }
    lines.extend(oauth_lines());
    render_form_box(frame, area, "Welcome Back", lines);
}

fn draw_sign_up(frame: &mut Frame, area: Rect, form: &SignUpForm) {
    let mut lines: Vec<Line> = Vec::new();
    for focus in forms::SignUpFocus::ORDER {
        let focused = form.focus == focus;
        lines.push(label_line(focus.label(), focused));
        let value = match focus {
            forms::SignUpFocus::FullName => form.fields.full_name.clone(),
            forms::SignUpFocus::StudentId => form.fields.student_id.clone(),
            forms::SignUpFocus::Email => form.fields.email.clone(),
            forms::SignUpFocus::Password => {
                if form.show_password {
                    form.fields.password.clone()
                } else {
                    mask(&form.fields.password)
                }
            }
            forms::SignUpFocus::AcceptTerms => checkbox(
                form.fields.accept_terms,
                "I agree to the Terms of Service and Privacy Policy",
            ),
        };
        lines.push(value_line(value, focused));
        lines.push(error_line(form.errors.get(focus.field_key())));
    }
    lines.extend(oauth_lines());
    render_form_box(frame, area, "Create Your Account", lines);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &UiState) {
    let content = match &state.status {
        Some(status) => Line::styled(status.clone(), Style::default().fg(Color::Green)),
        None => {
            let hints = match state.screen {
                Screen::Landing => "s: sign in | u: sign up | b: background | q: quit",
                Screen::SignIn => {
                    "Tab: next | Enter: submit | F1: password | F2/F3: oauth | →: sign up | Esc: back"
                }
                Screen::SignUp => {
                    "Tab: next | Enter: submit | F1: password | F2/F3: oauth | ←: sign in | Esc: back"
                }
            };
            Line::styled(hints, Style::default().fg(Color::DarkGray))
        }
    };
    let footer =
        Paragraph::new(content).block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(footer, area);
}

fn label_line(label: &'static str, focused: bool) -> Line<'static> {
    if focused {
        Line::styled(
            format!("▸ {label}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Line::styled(format!("  {label}"), Style::default().fg(Color::DarkGray))
    }
}

fn value_line(value: String, focused: bool) -> Line<'static> {
    let cursor = if focused { "_" } else { "" };
    Line::styled(
        format!("  {value}{cursor}"),
        Style::default().fg(Color::White),
    )
}

fn error_line(message: Option<&'static str>) -> Line<'static> {
    match message {
        Some(message) => Line::styled(
            format!("  ✗ {message}"),
            Style::default().fg(Color::Red),
        ),
        None => Line::raw(""),
    }
}

fn checkbox(checked: bool, label: &str) -> String {
    if checked {
        format!("[x] {label}")
    } else {
        format!("[ ] {label}")
    }
}

fn oauth_lines() -> Vec<Line<'static>> {
    vec![
        Line::styled(
            "─── or continue with ───",
            Style::default().fg(Color::DarkGray),
        ),
        Line::styled(
            "[F2] Google    [F3] GitHub",
            Style::default().fg(Color::Blue),
        ),
    ]
}

fn render_form_box(frame: &mut Frame, area: Rect, title: &'static str, lines: Vec<Line<'static>>) {
    let rect = centered_rect(area, 56, lines.len() as u16 + 2);
    let body = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(body, rect);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn color_for(color: ColorId) -> Color {
    match color {
        ColorId::White => Color::White,
        ColorId::Blue => Color::Blue,
    }
}
