//! Login form controller.

use secrecy::{ExposeSecret, SecretString};

use aszmart_core::{Email, Role};

use super::{
    FailureMessages, FormController, FormState, MSG_LOGIN_UNKNOWN, MSG_UNEXPECTED, Submission,
    require_present,
};
use crate::api::ApiClient;

const FAILURES: FailureMessages =
    FailureMessages::with_fallback(MSG_UNEXPECTED).with_unknown(MSG_LOGIN_UNKNOWN);

/// Credentials entered on the login screen.
///
/// The password is never rendered back into the page.
#[derive(Debug)]
pub struct LoginForm {
    email: String,
    password: SecretString,
    state: FormState,
}

/// What a successful login hands to the session.
#[derive(Debug)]
pub struct LoginSuccess {
    pub email: Email,
    pub role: Role,
    pub token: Option<SecretString>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: SecretString::from(String::new()),
            state: FormState::default(),
        }
    }
}

impl LoginForm {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Validate, then exchange the credentials for a role and token.
    pub async fn submit(&mut self, api: &ApiClient) -> Submission<LoginSuccess> {
        if !self.validate() {
            return Submission::Invalid;
        }
        let Ok(email) = Email::parse(self.email.trim()) else {
            return Submission::Invalid;
        };
        if !self.state.begin() {
            return Submission::InFlight;
        }

        let result = api.login(&email, &self.password).await;
        self.state.finish();

        match result {
            Ok(response) => {
                tracing::info!(email = %email, role = %response.role, "Login succeeded");
                Submission::Accepted(LoginSuccess {
                    email,
                    role: response.role,
                    token: response.token.map(SecretString::from),
                })
            }
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Login failed");
                self.state.fail(FAILURES.describe(&e));
                Submission::Failed
            }
        }
    }
}

impl FormController for LoginForm {
    fn state(&self) -> &FormState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    fn assign(&mut self, name: &str, value: String) -> bool {
        match name {
            "email" => self.email = value,
            "password" => self.password = SecretString::from(value),
            _ => return false,
        }
        // Editing any field dismisses the previous error banner.
        self.state.clear_notice();
        true
    }

    fn validate(&mut self) -> bool {
        self.state.clear_errors();

        let missing = require_present(
            &mut self.state,
            &[
                ("email", self.email.as_str(), "Email is required"),
                ("password", self.password.expose_secret(), "Password is required"),
            ],
        );
        if missing {
            self.state.fail("Please fill in all fields");
            return false;
        }

        if Email::parse(self.email.trim()).is_err() {
            self.state
                .set_error("email", "Please enter a valid email address.");
            self.state.fail("Please enter a valid email address.");
            return false;
        }

        true
    }
}
