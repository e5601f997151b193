//! Signup form controller.

use secrecy::{ExposeSecret, SecretString};

use aszmart_core::{Email, Role};

use super::{FailureMessages, FormController, FormState, Submission, require_present};
use crate::api::ApiClient;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const FAILURES: FailureMessages =
    FailureMessages::with_fallback("Something went wrong. Please try again.");

const MSG_EMAIL_TAKEN: &str = "Email is already in use. Please use a different email.";
const MSG_SIGNED_UP: &str = "Signup successful! Please log in.";

/// Registration details entered on the signup screen.
#[derive(Debug)]
pub struct SignupForm {
    full_name: String,
    email: String,
    password: SecretString,
    role: String,
    state: FormState,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            role: Role::User.as_str().to_string(),
            state: FormState::default(),
        }
    }
}

impl SignupForm {
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The role as submitted, for re-selecting the `<select>` option.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Validate, refuse emails that are already registered, then create the account.
    pub async fn submit(&mut self, api: &ApiClient) -> Submission<()> {
        if !self.validate() {
            return Submission::Invalid;
        }
        let (Ok(email), Some(role)) = (Email::parse(self.email.trim()), Role::from_form(&self.role))
        else {
            return Submission::Invalid;
        };
        if !self.state.begin() {
            return Submission::InFlight;
        }

        let result = self.register(api, &email, role).await;
        self.state.finish();

        match result {
            Ok(true) => {
                tracing::info!(email = %email, role = %role, "Signup succeeded");
                self.password = SecretString::from(String::new());
                self.state.succeed(MSG_SIGNED_UP);
                Submission::Accepted(())
            }
            Ok(false) => {
                tracing::info!(email = %email, "Signup blocked: email already registered");
                self.state.set_error("email", "Email is already in use");
                self.state.fail(MSG_EMAIL_TAKEN);
                Submission::Failed
            }
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Signup failed");
                self.state.fail(FAILURES.describe(&e));
                Submission::Failed
            }
        }
    }

    /// Check-email then create. Returns `Ok(false)` when the email is taken.
    async fn register(
        &self,
        api: &ApiClient,
        email: &Email,
        role: Role,
    ) -> Result<bool, crate::api::ApiError> {
        if api.check_email(email).await?.exists {
            return Ok(false);
        }

        api.signup(self.full_name.trim(), email, &self.password, role)
            .await?;
        Ok(true)
    }
}

impl FormController for SignupForm {
    fn state(&self) -> &FormState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    fn assign(&mut self, name: &str, value: String) -> bool {
        match name {
            "full_name" => self.full_name = value,
            "email" => self.email = value,
            "password" => self.password = SecretString::from(value),
            "role" => self.role = value,
            _ => return false,
        }
        true
    }

    fn validate(&mut self) -> bool {
        self.state.clear_errors();

        require_present(
            &mut self.state,
            &[
                ("full_name", self.full_name.as_str(), "Full name is required"),
                ("email", self.email.as_str(), "Email is required"),
                ("password", self.password.expose_secret(), "Password is required"),
            ],
        );

        if self.state.error("email").is_none() && Email::parse(self.email.trim()).is_err() {
            self.state
                .set_error("email", "Please enter a valid email address.");
        }

        let password_len = self.password.expose_secret().chars().count();
        if password_len > 0 && password_len < MIN_PASSWORD_LENGTH {
            self.state.set_error(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }

        if Role::from_form(&self.role).is_none() {
            self.state.set_error("role", "Please choose a valid role");
        }

        if self.state.has_errors() {
            self.state.fail("Please correct the highlighted fields.");
            return false;
        }

        true
    }
}
