//! Form state controllers.
//!
//! Each screen with a form owns one controller: field values, per-field
//! validation errors, a loading flag around the single network call, and the
//! one notice (error or success) shown above the form.
//!
//! # Lifecycle
//!
//! ```text
//! set_field(name, value)   - store a value, clear that field's error
//! validate()               - presence/format checks, fills field errors
//! submit(api)              - validate, then exactly one API call
//! ```
//!
//! Handlers build a fresh controller per request, feed it the posted fields,
//! submit, and render the template from whatever state results.

pub mod contact;
pub mod login;
pub mod product;
pub mod signup;

use std::collections::BTreeMap;

use crate::api::ApiError;

pub use contact::ContactForm;
pub use login::{LoginForm, LoginSuccess};
pub use product::{ImageUpload, ProductForm};
pub use signup::SignupForm;

/// Shown when a network failure leaves no response to inspect.
pub const MSG_NO_RESPONSE: &str = "No response from server. Please check your connection.";
/// Shown for HTTP 500 responses.
pub const MSG_SERVER_ERROR: &str = "Server error. Please try again later.";
/// Shown for HTTP 401 responses.
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";
/// Shown for HTTP 404 responses.
pub const MSG_NOT_FOUND: &str = "User not found";
/// Shown for any other failure status on the login screen.
pub const MSG_UNEXPECTED: &str = "An unexpected error occurred";
/// Shown on the login screen when the request failed without a usable response.
pub const MSG_LOGIN_UNKNOWN: &str = "Error processing login. Please try again.";

/// Status-to-message table used when a submission fails.
#[derive(Debug, Clone, Copy)]
pub struct FailureMessages {
    /// Message for anything not covered by a specific status.
    pub fallback: &'static str,
    /// Message when the request failed before any response was classified.
    pub unknown: &'static str,
}

impl FailureMessages {
    /// Table with the standard messages and a screen-specific fallback.
    #[must_use]
    pub const fn with_fallback(fallback: &'static str) -> Self {
        Self {
            fallback,
            unknown: fallback,
        }
    }

    /// Use a separate message for [`ApiError::Unknown`].
    #[must_use]
    pub const fn with_unknown(self, unknown: &'static str) -> Self {
        Self { unknown, ..self }
    }

    /// User-facing message for a failed API call.
    #[must_use]
    pub fn describe(&self, err: &ApiError) -> &'static str {
        match err {
            ApiError::Status { status, .. } => match status.as_u16() {
                401 => MSG_INVALID_CREDENTIALS,
                404 => MSG_NOT_FOUND,
                500 => MSG_SERVER_ERROR,
                _ => self.fallback,
            },
            ApiError::Transport(_) => MSG_NO_RESPONSE,
            ApiError::Unknown(_) => self.unknown,
        }
    }
}

/// Whether a notice reports a failure or a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// The single message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    text: String,
}

impl Notice {
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NoticeKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error)
    }

    /// CSS modifier used by the templates.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Error => "notice notice-error",
            NoticeKind::Success => "notice notice-success",
        }
    }
}

/// State shared by every controller.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    errors: BTreeMap<&'static str, String>,
    loading: bool,
    notice: Option<Notice>,
}

impl FormState {
    /// Error recorded for a field, if any.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// All field errors, keyed by field name.
    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<&'static str, String> {
        &self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Replace the notice with an error message.
    pub fn fail(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::error(text));
    }

    /// Replace the notice with a success message.
    pub fn succeed(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::success(text));
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Enter the loading state. Returns `false` if a submission is already running.
    fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.notice = None;
        true
    }

    fn finish(&mut self) {
        self.loading = false;
    }
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum Submission<T> {
    /// Local validation failed; no network call was made.
    Invalid,
    /// A submission from this controller is already running.
    InFlight,
    /// The call was made and failed; the notice holds the message.
    Failed,
    /// The call succeeded.
    Accepted(T),
}

impl<T> Submission<T> {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Field-level contract shared by the controllers.
pub trait FormController {
    fn state(&self) -> &FormState;

    fn state_mut(&mut self) -> &mut FormState;

    /// Store a raw value. Returns `false` for fields the form does not have.
    fn assign(&mut self, name: &str, value: String) -> bool;

    /// Run presence/format checks. Fills field errors and the notice.
    fn validate(&mut self) -> bool;

    /// Update one field and clear its error.
    fn set_field(&mut self, name: &str, value: String) -> bool {
        let known = self.assign(name, value);
        if known {
            self.state_mut().clear_error(name);
        }
        known
    }

    /// Feed every posted `(name, value)` pair through [`FormController::set_field`].
    fn apply<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in fields {
            if !self.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }
}

/// Record "required" errors for blank fields. Returns `true` if any were blank.
fn require_present(state: &mut FormState, fields: &[(&'static str, &str, &str)]) -> bool {
    let mut missing = false;
    for (name, value, message) in fields {
        if value.trim().is_empty() {
            state.set_error(*name, *message);
            missing = true;
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: StatusCode::from_u16(code).unwrap_or(StatusCode::IM_A_TEAPOT),
            message: String::new(),
        }
    }

    #[test]
    fn test_status_mapping() {
        let table = FailureMessages::with_fallback(MSG_UNEXPECTED);

        assert_eq!(table.describe(&status(401)), "Invalid email or password");
        assert_eq!(table.describe(&status(404)), "User not found");
        assert_eq!(
            table.describe(&status(500)),
            "Server error. Please try again later."
        );
        assert_eq!(table.describe(&status(403)), "An unexpected error occurred");
        assert_eq!(table.describe(&status(502)), "An unexpected error occurred");
        assert_eq!(
            table.describe(&ApiError::Unknown("bad json".to_string())),
            "An unexpected error occurred"
        );
    }

    #[test]
    fn test_unknown_message_can_differ() {
        let table = FailureMessages::with_fallback(MSG_UNEXPECTED).with_unknown(MSG_LOGIN_UNKNOWN);

        assert_eq!(table.describe(&status(418)), "An unexpected error occurred");
        assert_eq!(
            table.describe(&ApiError::Unknown("bad json".to_string())),
            "Error processing login. Please try again."
        );
    }

    #[test]
    fn test_fallback_is_per_screen() {
        let table = FailureMessages::with_fallback("Something went wrong. Please try again.");
        assert_eq!(
            table.describe(&status(400)),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn test_begin_guards_double_submit() {
        let mut state = FormState::default();
        state.fail("old");

        assert!(state.begin());
        assert!(state.is_loading());
        assert!(state.notice().is_none());
        assert!(!state.begin());

        state.finish();
        assert!(!state.is_loading());
        assert!(state.begin());
    }

    #[test]
    fn test_require_present() {
        let mut state = FormState::default();
        let missing = require_present(
            &mut state,
            &[("a", "value", "A is required"), ("b", "   ", "B is required")],
        );

        assert!(missing);
        assert_eq!(state.error("a"), None);
        assert_eq!(state.error("b"), Some("B is required"));
    }
}
