//! Contact form controller.
//!
//! There is no remote endpoint for contact messages; a valid submission is
//! logged and acknowledged.

use aszmart_core::Email;

use super::{FormController, FormState, require_present};

const MSG_SENT: &str = "Message Sent!";

#[derive(Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
    submitted: bool,
    state: FormState,
}

impl ContactForm {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the message was accepted.
    #[must_use]
    pub const fn submitted(&self) -> bool {
        self.submitted
    }

    /// Validate and record the message. Returns `true` when accepted.
    pub fn submit(&mut self) -> bool {
        if !self.validate() {
            return false;
        }

        tracing::info!(
            name = %self.name.trim(),
            email = %self.email.trim(),
            subject = %self.subject.trim(),
            message_len = self.message.trim().len(),
            "Contact message received"
        );

        self.submitted = true;
        self.state.succeed(MSG_SENT);
        true
    }
}

impl FormController for ContactForm {
    fn state(&self) -> &FormState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    fn assign(&mut self, name: &str, value: String) -> bool {
        match name {
            "name" => self.name = value,
            "email" => self.email = value,
            "subject" => self.subject = value,
            "message" => self.message = value,
            _ => return false,
        }
        true
    }

    fn validate(&mut self) -> bool {
        self.state.clear_errors();

        let missing = require_present(
            &mut self.state,
            &[
                ("name", self.name.as_str(), "Name is required"),
                ("email", self.email.as_str(), "Email is required"),
                ("subject", self.subject.as_str(), "Subject is required"),
                ("message", self.message.as_str(), "Message is required"),
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
