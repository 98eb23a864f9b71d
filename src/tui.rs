use ratatui::style::{Color, Modifier, Style};

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const ERROR_STYLE: Style = Style::new().fg(Color::Rgb(239, 68, 68));

pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner glyph for the current animation phase (one frame per tick).
pub fn spinner_char(phase: f64) -> char {
    let idx = (phase * 10.0) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_text_counts_lines() {
        let (wrapped, lines) = wrap_text("one two three four five six", 10);
        assert!(lines > 1);
        assert!(wrapped.lines().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_text_zero_width_passthrough() {
        let (wrapped, lines) = wrap_text("hello", 0);
        assert_eq!(wrapped, "hello");
        assert_eq!(lines, 1);
    }

    #[test]
    fn spinner_cycles_through_frames() {
        let a = spinner_char(0.0);
        let b = spinner_char(0.1);
        assert_ne!(a, b);
        // Full cycle wraps back to the first frame
        assert_eq!(spinner_char(0.0), spinner_char(1.0));
    }
}
