use zeroize::Zeroize;

use crate::validate::{check_value, FieldKind, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Username,
    Password,
    Role,
}

impl FieldId {
    /// Message used by the whole-form pass, where each field names itself
    /// (the blur pass uses the generic `Violation` message instead).
    fn submit_message(self, violation: Violation) -> &'static str {
        match (self, violation) {
            (FieldId::Username, Violation::Required) => "Username is required",
            (FieldId::Password, Violation::Required) => "Password is required",
            (FieldId::Role, Violation::Required) => "Please select a role",
            (_, v) => v.message(),
        }
    }
}

/// One form input plus its validation state. At most one error message is
/// attached at a time.
#[derive(Debug)]
pub struct Field {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
}

impl Field {
    fn new(id: FieldId, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            required: true,
            value: String::new(),
            error: None,
        }
    }

    /// Validate this field on its own, as when focus leaves it. Clears any
    /// stale error first, then re-annotates. Returns validity.
    pub fn validate_on_blur(&mut self) -> bool {
        self.clear_error();
        if let Some(v) = check_value(self.kind, self.required, &self.value) {
            self.error = Some(v.message().to_string());
            return false;
        }
        true
    }

    /// Eagerly drop the error annotation, as when the user edits the field.
    /// Idempotent: clearing an already-clean field is a no-op.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn validate_for_submit(&mut self) -> bool {
        self.clear_error();
        if let Some(v) = check_value(self.kind, self.required, &self.value) {
            self.error = Some(self.id.submit_message(v).to_string());
            return false;
        }
        true
    }
}

/// The sign-in form: username, password, and role selection.
#[derive(Debug)]
pub struct SigninForm {
    pub username: Field,
    pub password: Field,
    pub role: Field,
}

impl SigninForm {
    pub fn new() -> Self {
        Self {
            username: Field::new(FieldId::Username, "Username:", FieldKind::Text),
            password: Field::new(FieldId::Password, "Password:", FieldKind::Password),
            role: Field::new(FieldId::Role, "Role:", FieldKind::Select),
        }
    }

    /// Validate the whole form from current values, independent of blur
    /// history. Every field is checked and annotated in a single pass --
    /// no short-circuit -- so the user sees all problems at once.
    pub fn validate(&mut self) -> bool {
        let username_ok = self.username.validate_for_submit();
        let password_ok = self.password.validate_for_submit();
        let role_ok = self.role.validate_for_submit();
        username_ok && password_ok && role_ok
    }

    /// Fresh form after navigating away or signing out. The old password
    /// buffer is wiped by the Drop impl.
    pub fn reset(&mut self) {
        *self = SigninForm::new();
    }
}

impl Default for SigninForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SigninForm {
    fn drop(&mut self) {
        self.password.value.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(username: &str, password: &str, role: &str) -> SigninForm {
        let mut form = SigninForm::new();
        form.username.value = username.to_string();
        form.password.value = password.to_string();
        form.role.value = role.to_string();
        form
    }

    #[test]
    fn empty_form_annotates_every_field() {
        let mut form = filled("", "", "");
        assert!(!form.validate());
        assert_eq!(form.username.error.as_deref(), Some("Username is required"));
        assert_eq!(form.password.error.as_deref(), Some("Password is required"));
        assert_eq!(form.role.error.as_deref(), Some("Please select a role"));
    }

    #[test]
    fn short_password_annotated_on_submit() {
        let mut form = filled("alice", "abc12", "operator");
        assert!(!form.validate());
        assert!(form.username.error.is_none());
        assert_eq!(
            form.password.error.as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert!(form.role.error.is_none());
    }

    #[test]
    fn valid_form_passes_and_clears_stale_errors() {
        let mut form = filled("alice", "secret1", "operator");
        form.password.error = Some("stale".to_string());
        assert!(form.validate());
        assert!(form.username.error.is_none());
        assert!(form.password.error.is_none());
        assert!(form.role.error.is_none());
    }

    #[test]
    fn blur_uses_generic_required_message() {
        let mut form = SigninForm::new();
        assert!(!form.username.validate_on_blur());
        assert_eq!(
            form.username.error.as_deref(),
            Some("This field is required")
        );
    }

    #[test]
    fn clear_error_is_idempotent() {
        let mut form = SigninForm::new();
        form.username.validate_on_blur();
        assert!(form.username.error.is_some());
        form.username.clear_error();
        form.username.clear_error();
        assert!(form.username.error.is_none());
    }

    #[test]
    fn whole_form_checks_all_fields_even_after_first_failure() {
        // Username fails first; password and role must still be annotated.
        let mut form = filled("", "abc", "");
        assert!(!form.validate());
        assert!(form.username.error.is_some());
        assert!(form.password.error.is_some());
        assert!(form.role.error.is_some());
    }

    #[test]
    fn reset_wipes_values_and_errors() {
        let mut form = filled("alice", "secret1", "operator");
        form.validate();
        form.reset();
        assert!(form.username.value.is_empty());
        assert!(form.password.value.is_empty());
        assert!(form.role.value.is_empty());
        assert!(form.password.error.is_none());
    }
}
