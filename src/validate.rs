use std::sync::OnceLock;

use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;

/// What a form field holds, for validation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Select,
}

/// A single validation failure on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    BadEmail,
    ShortPassword,
}

impl Violation {
    /// Generic message shown when a field is validated on its own (blur).
    pub fn message(self) -> &'static str {
        match self {
            Violation::Required => "This field is required",
            Violation::BadEmail => "Please enter a valid email address",
            Violation::ShortPassword => "Password must be at least 6 characters",
        }
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_re().is_match(value)
}

/// Check one value against its field kind. The value is trimmed first.
/// Email and password rules only apply to non-empty values, so an
/// optional email field left blank passes.
pub fn check_value(kind: FieldKind, required: bool, value: &str) -> Option<Violation> {
    let value = value.trim();

    if required && value.is_empty() {
        return Some(Violation::Required);
    }

    if kind == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        return Some(Violation::BadEmail);
    }

    if kind == FieldKind::Password && !value.is_empty() && value.chars().count() < MIN_PASSWORD_LEN
    {
        return Some(Violation::ShortPassword);
    }

    None
}
