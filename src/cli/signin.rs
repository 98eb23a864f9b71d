use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::effects::{self, Particle, LOGO};
use crate::error::Result;
use crate::form::SigninForm;
use crate::roles::{Destination, Role};
use crate::settings::{self, Settings};
use crate::signin::SigninFlow;
use crate::tui::{self, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const TICK_INTERVAL: Duration = Duration::from_millis(50);

const FIELD_USERNAME: usize = 0;
const FIELD_PASSWORD: usize = 1;
const FIELD_ROLE: usize = 2;
const FIELD_BUTTON: usize = 3;

const LABEL_WIDTH: u16 = 12;
const FORM_WIDTH: u16 = 46;

/// Companion glyphs for the password reveal toggle.
const REVEAL_ICON_MASKED: char = '◡';
const REVEAL_ICON_SHOWN: char = '◉';

enum Screen {
    Form,
    Console {
        destination: Destination,
        username: String,
    },
    CallBoard,
}

enum Step {
    Continue,
    Quit,
}

struct SigninApp {
    form: SigninForm,
    flow: SigninFlow,
    screen: Screen,
    active_field: usize,
    cursor_pos: usize,
    /// Index into Role::ALL; None until the user picks something.
    role_index: Option<usize>,
    reveal_password: bool,
    settings: Settings,
    phase: f64,
    particles: Vec<Particle>,
    width: u16,
    height: u16,
}

impl SigninApp {
    fn new(settings: Settings) -> Self {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        let particles = if settings.effects {
            effects::pre_seed_particles(width, height)
        } else {
            Vec::new()
        };
        Self {
            form: SigninForm::new(),
            flow: SigninFlow::new(settings.submit_delay(), settings.banner_ttl()),
            screen: Screen::Form,
            active_field: FIELD_USERNAME,
            cursor_pos: 0,
            role_index: None,
            reveal_password: false,
            settings,
            phase: 0.0,
            particles,
            width,
            height,
        }
    }

    /// Flip the password between masked and plaintext rendering (and the
    /// companion icon between its two glyphs).
    fn toggle_reveal(&mut self) {
        self.reveal_password = !self.reveal_password;
    }

    fn active_value(&self) -> &str {
        match self.active_field {
            FIELD_USERNAME => &self.form.username.value,
            _ => &self.form.password.value,
        }
    }

    fn active_value_mut(&mut self) -> &mut String {
        match self.active_field {
            FIELD_USERNAME => &mut self.form.username.value,
            _ => &mut self.form.password.value,
        }
    }

    /// Convert a char-index cursor position to a byte offset in the string.
    fn cursor_byte_pos(&self) -> usize {
        self.active_value()
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.active_value().len())
    }

    /// Leaving a field is its blur: validate it before focus moves on.
    fn blur_active_field(&mut self) {
        match self.active_field {
            FIELD_USERNAME => {
                self.form.username.validate_on_blur();
            }
            FIELD_PASSWORD => {
                self.form.password.validate_on_blur();
            }
            FIELD_ROLE => {
                self.form.role.validate_on_blur();
            }
            _ => {}
        }
    }

    fn move_to_field(&mut self, field: usize) {
        if field != self.active_field {
            self.blur_active_field();
        }
        self.active_field = field;
        if field == FIELD_USERNAME || field == FIELD_PASSWORD {
            self.cursor_pos = self.active_value().chars().count();
        }
    }

    /// Cycle the role selection. Any change counts as an edit, so the
    /// field's error clears eagerly.
    fn cycle_role(&mut self, step: isize) {
        let len = Role::ALL.len() as isize;
        let next = match self.role_index {
            None => {
                if step >= 0 {
                    0
                } else {
                    len - 1
                }
            }
            Some(i) => (i as isize + step).rem_euclid(len),
        };
        self.role_index = Some(next as usize);
        self.form.role.clear_error();
        self.form.role.value = Role::ALL[next as usize].slug().to_string();
    }

    fn submit(&mut self, now: Instant) {
        if self.flow.is_submitting() {
            return;
        }
        if self.form.validate() {
            self.flow.begin(&self.form.role.value, now);
        }
    }

    fn navigate(&mut self, destination: Destination) {
        let username = self.form.username.value.trim().to_string();
        self.screen = Screen::Console {
            destination,
            username,
        };
        // Navigation tears the form down
        self.form.reset();
        self.role_index = None;
        self.reveal_password = false;
        self.active_field = FIELD_USERNAME;
        self.cursor_pos = 0;
    }

    fn tick(&mut self, now: Instant) {
        self.phase += 1.0 / 70.0;
        if self.settings.effects {
            effects::tick_particles(&mut self.particles, self.width, self.height);
        }
        if let Some(destination) = self.flow.tick(now) {
            self.navigate(destination);
        }
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant) -> Step {
        match self.screen {
            Screen::Form => self.handle_form_key(code, now),
            Screen::Console { .. } => self.handle_console_key(code),
            Screen::CallBoard => self.handle_call_board_key(code),
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, now: Instant) -> Step {
        // While the simulated round trip runs, the form is frozen; Esc
        // cancels the pending submit.
        if self.flow.is_submitting() {
            if code == KeyCode::Esc {
                self.flow.cancel();
            }
            return Step::Continue;
        }

        // Keys that work regardless of focus
        match code {
            KeyCode::F(2) => {
                self.toggle_reveal();
                return Step::Continue;
            }
            KeyCode::F(3) => {
                self.screen = Screen::CallBoard;
                return Step::Continue;
            }
            KeyCode::Esc => return Step::Quit,
            _ => {}
        }

        if self.active_field == FIELD_BUTTON {
            match code {
                KeyCode::Enter => self.submit(now),
                KeyCode::Up | KeyCode::BackTab => self.move_to_field(FIELD_ROLE),
                _ => {}
            }
            return Step::Continue;
        }

        if self.active_field == FIELD_ROLE {
            match code {
                KeyCode::Left => self.cycle_role(-1),
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_role(1),
                KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                    self.move_to_field(FIELD_BUTTON)
                }
                KeyCode::Up | KeyCode::BackTab => self.move_to_field(FIELD_PASSWORD),
                _ => {}
            }
            return Step::Continue;
        }

        // Text input fields
        match code {
            KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                self.move_to_field(self.active_field + 1);
            }
            KeyCode::Up | KeyCode::BackTab => {
                if self.active_field > 0 {
                    self.move_to_field(self.active_field - 1);
                }
            }
            KeyCode::Char(c) => {
                let byte_pos = self.cursor_byte_pos();
                self.active_field_state_mut().clear_error();
                let field = self.active_value_mut();
                field.insert(byte_pos, c);
                self.cursor_pos += 1;
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let byte_pos = self.cursor_byte_pos();
                    self.active_field_state_mut().clear_error();
                    let field = self.active_value_mut();
                    field.remove(byte_pos);
                }
            }
            KeyCode::Delete => {
                let char_len = self.active_value().chars().count();
                if self.cursor_pos < char_len {
                    let byte_pos = self.cursor_byte_pos();
                    self.active_field_state_mut().clear_error();
                    let field = self.active_value_mut();
                    field.remove(byte_pos);
                }
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
            }
            KeyCode::Right => {
                let char_len = self.active_value().chars().count();
                self.cursor_pos = (self.cursor_pos + 1).min(char_len);
            }
            KeyCode::Home => self.cursor_pos = 0,
            KeyCode::End => self.cursor_pos = self.active_value().chars().count(),
            _ => {}
        }
        Step::Continue
    }

    fn active_field_state_mut(&mut self) -> &mut crate::form::Field {
        match self.active_field {
            FIELD_USERNAME => &mut self.form.username,
            _ => &mut self.form.password,
        }
    }

    fn handle_console_key(&mut self, code: KeyCode) -> Step {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Step::Quit,
            KeyCode::Char('s') => {
                // Sign out: back to a fresh form
                self.screen = Screen::Form;
                Step::Continue
            }
            _ => Step::Continue,
        }
    }

    fn handle_call_board_key(&mut self, code: KeyCode) -> Step {
        match code {
            KeyCode::Char('q') => Step::Quit,
            KeyCode::Esc => {
                self.screen = Screen::Form;
                Step::Continue
            }
            _ => Step::Continue,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.width = area.width;
        self.height = area.height;

        if self.settings.effects {
            effects::render_particles(&self.particles, frame, area);
        }

        match &self.screen {
            Screen::Form => self.draw_form(frame, area),
            Screen::Console {
                destination,
                username,
            } => draw_console(frame, area, self.phase, *destination, username),
            Screen::CallBoard => draw_call_board(frame, area, self.phase),
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let logo_height = LOGO.len() as u16;
        let u_err = self.form.username.error.is_some() as u16;
        let p_err = self.form.password.error.is_some() as u16;
        let r_err = self.form.role.error.is_some() as u16;
        let banner_height = if self.flow.banner().is_some() { 2 } else { 0 };

        let [_top_pad, logo_area, _gap1, title_area, _gap2, username_row, u_err_area, password_row, p_err_area, role_row, r_err_area, _gap3, button_area, banner_area, _gap4, hints_area, _bottom_pad] =
            Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(logo_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(u_err),
                Constraint::Length(1),
                Constraint::Length(p_err),
                Constraint::Length(1),
                Constraint::Length(r_err),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(banner_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);

        effects::render_logo(self.phase, frame, logo_area);

        frame.render_widget(
            Paragraph::new(Span::styled("Sign in to your station", HEADER_STYLE))
                .alignment(Alignment::Center),
            title_area,
        );

        let username_row = centered(username_row, area);
        let u_err_area = centered(u_err_area, area);
        let password_row = centered(password_row, area);
        let p_err_area = centered(p_err_area, area);
        let role_row = centered(role_row, area);
        let r_err_area = centered(r_err_area, area);

        self.draw_text_field(frame, username_row, &self.form.username, FIELD_USERNAME, false);
        self.draw_field_error(frame, u_err_area, self.form.username.error.as_deref());

        self.draw_text_field(
            frame,
            password_row,
            &self.form.password,
            FIELD_PASSWORD,
            !self.reveal_password,
        );
        self.draw_field_error(frame, p_err_area, self.form.password.error.as_deref());

        self.draw_role_field(frame, role_row);
        self.draw_field_error(frame, r_err_area, self.form.role.error.as_deref());

        self.draw_button(frame, button_area);
        self.draw_banner(frame, banner_area);

        let hints = if self.flow.is_submitting() {
            " Esc=cancel"
        } else {
            " Enter=next  F2=show/hide password  F3=call board  Esc=quit"
        };
        frame.render_widget(
            Paragraph::new(hints)
                .style(FOOTER_STYLE)
                .alignment(Alignment::Center),
            hints_area,
        );
    }

    fn draw_text_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: &crate::form::Field,
        field_idx: usize,
        masked: bool,
    ) {
        let is_password = field_idx == FIELD_PASSWORD;
        let icon_width = if is_password { 2 } else { 0 };
        let [label_area, input_area, icon_area] = Layout::horizontal([
            Constraint::Length(LABEL_WIDTH),
            Constraint::Fill(1),
            Constraint::Length(icon_width),
        ])
        .areas(area);

        let is_active = self.active_field == field_idx;
        let label_style = if is_active {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{:<width$}", field.label, width = LABEL_WIDTH as usize),
                label_style,
            )),
            label_area,
        );

        let display = if is_active && !self.flow.is_submitting() {
            insert_cursor(&field.value, self.cursor_pos, masked)
        } else if masked {
            "\u{25cf}".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };

        let input_style = if field.error.is_some() {
            SELECTED_STYLE.patch(ERROR_STYLE)
        } else if is_active {
            SELECTED_STYLE
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let padded = format!("{:<width$}", display, width = input_area.width as usize);
        frame.render_widget(Paragraph::new(Span::styled(padded, input_style)), input_area);

        if is_password {
            let icon = if masked {
                REVEAL_ICON_MASKED
            } else {
                REVEAL_ICON_SHOWN
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {icon}"), FOOTER_STYLE)),
                icon_area,
            );
        }
    }

    fn draw_role_field(&self, frame: &mut Frame, area: Rect) {
        let [label_area, input_area] = Layout::horizontal([
            Constraint::Length(LABEL_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(area);

        let is_active = self.active_field == FIELD_ROLE;
        let label_style = if is_active {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("{:<width$}", self.form.role.label, width = LABEL_WIDTH as usize),
                label_style,
            )),
            label_area,
        );

        let selection = match self.role_index {
            Some(i) => Role::ALL[i].title().to_string(),
            None => "Select your role".to_string(),
        };
        let display = if is_active {
            format!("\u{25c2} {selection} \u{25b8}")
        } else {
            selection
        };

        let input_style = if self.form.role.error.is_some() {
            SELECTED_STYLE.patch(ERROR_STYLE)
        } else if is_active {
            SELECTED_STYLE
        } else if self.role_index.is_none() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let padded = format!("{:<width$}", display, width = input_area.width as usize);
        frame.render_widget(Paragraph::new(Span::styled(padded, input_style)), input_area);
    }

    fn draw_field_error(&self, frame: &mut Frame, area: Rect, error: Option<&str>) {
        let Some(message) = error else { return };
        if area.height == 0 {
            return;
        }
        let [_indent, msg_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)]).areas(area);
        frame.render_widget(
            Paragraph::new(Span::styled(message.to_string(), ERROR_STYLE)),
            msg_area,
        );
    }

    fn draw_button(&self, frame: &mut Frame, area: Rect) {
        let label = if self.flow.is_submitting() {
            format!(
                "[ {} {} ]",
                tui::spinner_char(self.phase),
                self.flow.button_label()
            )
        } else {
            format!("[ {} ]", self.flow.button_label())
        };
        let style = if self.flow.is_submitting() {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else if self.active_field == FIELD_BUTTON {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center),
            area,
        );
    }

    fn draw_banner(&self, frame: &mut Frame, area: Rect) {
        let Some(banner) = self.flow.banner() else { return };
        if area.height == 0 {
            return;
        }
        let width = FORM_WIDTH.min(area.width.saturating_sub(4)) as usize;
        let (wrapped, _lines) = tui::wrap_text(&banner.message, width);

        // Fade the banner in over its first few ticks
        let age_ms = banner.age(Instant::now()).as_secs_f64() * 1000.0;
        let f = effects::fade_in(age_ms);
        let color = Color::Rgb((239.0 * f) as u8, (68.0 * f) as u8, (68.0 * f) as u8);

        frame.render_widget(
            Paragraph::new(wrapped)
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            area,
        );
    }
}

/// Center a full-width row to the fixed form width.
fn centered(row: Rect, screen: Rect) -> Rect {
    let width = FORM_WIDTH.min(screen.width.saturating_sub(4));
    let x = screen.x + (screen.width.saturating_sub(width)) / 2;
    Rect::new(x, row.y, width, row.height)
}

/// Build a display string with a block cursor inserted at `cursor_pos`.
fn insert_cursor(value: &str, cursor_pos: usize, masked: bool) -> String {
    let mut display = if masked {
        "\u{25cf}".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let byte_pos = display
        .char_indices()
        .nth(cursor_pos)
        .map(|(i, _)| i)
        .unwrap_or(display.len());
    display.insert(byte_pos, '\u{2588}');
    display
}

fn draw_console(
    frame: &mut Frame,
    area: Rect,
    phase: f64,
    destination: Destination,
    username: &str,
) {
    let logo_height = LOGO.len() as u16;
    let [_top_pad, logo_area, _gap1, title_area, who_area, _gap2, hints_area, _bottom_pad] =
        Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(logo_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

    effects::render_logo(phase, frame, logo_area);

    frame.render_widget(
        Paragraph::new(Span::styled(destination.title(), HEADER_STYLE))
            .alignment(Alignment::Center),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(format!("Signed in as {username}"))
            .alignment(Alignment::Center),
        who_area,
    );
    frame.render_widget(
        Paragraph::new(" s=sign out  q=quit")
            .style(FOOTER_STYLE)
            .alignment(Alignment::Center),
        hints_area,
    );
}

fn draw_call_board(frame: &mut Frame, area: Rect, phase: f64) {
    let logo_height = LOGO.len() as u16;
    let [_top_pad, logo_area, _gap1, title_area, note_area, _gap2, hints_area, _bottom_pad] =
        Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(logo_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

    effects::render_logo(phase, frame, logo_area);

    frame.render_widget(
        Paragraph::new(Span::styled(Destination::Call.title(), HEADER_STYLE))
            .alignment(Alignment::Center),
        title_area,
    );
    frame.render_widget(
        Paragraph::new("Live call intake, no sign-in required")
            .style(FOOTER_STYLE)
            .alignment(Alignment::Center),
        note_area,
    );
    frame.render_widget(
        Paragraph::new(" Esc=back to sign-in  q=quit")
            .style(FOOTER_STYLE)
            .alignment(Alignment::Center),
        hints_area,
    );
}

/// Run the sign-in TUI. Sets up the terminal, event loop, and panic hook,
/// then restores the terminal on exit.
pub fn run() -> Result<()> {
    let settings = settings::load_settings();
    let mut app = SigninApp::new(settings);

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        app.tick(Instant::now());

        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match event::poll(TICK_INTERVAL) {
            Err(e) => break Err(e.into()),
            Ok(false) => continue,
            Ok(true) => {}
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match app.handle_key(key.code, Instant::now()) {
                    Step::Continue => {}
                    Step::Quit => break Ok(()),
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}
