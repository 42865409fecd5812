//! the contact form
//!
//! a bounded state machine: `idle -> sending -> sent | error`. a new submit
//! from `sent` or `error` re-enters `sending`. the form refuses to start a
//! submission while one is in flight or while its fields are invalid.
pub mod endpoint;
#[cfg(not(target_arch = "wasm32"))]
pub mod relay;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

use {
    crate::contact::endpoint::ContactEndpoint,
    serde::{Deserialize, Serialize},
    thiserror::Error,
    tracing::{debug, info},
};

/// shown when the endpoint rejected the message without saying why
pub const REJECTED_MESSAGE: &str = "Failed to send";
/// shown when the request failed before a usable answer came back
pub const GENERIC_MESSAGE: &str = "Something went wrong";
/// shown next to the form after a successful submission
pub const SENT_MESSAGE: &str = "Message sent! I’ll reply soon.";

/// the values the user typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    /// sender name
    pub name: String,
    /// sender email
    pub email: String,
    /// message body
    pub message: String,
    /// hidden field, filled in only by bots
    pub honeypot: String,
}

/// a field that failed the input-level checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// the name is blank
    #[error("name is required")]
    MissingName,
    /// the email is blank
    #[error("email is required")]
    MissingEmail,
    /// the email doesn't look like one
    #[error("email is not a valid address")]
    InvalidEmail,
    /// the message is blank
    #[error("message is required")]
    MissingMessage,
}

impl ContactFields {
    /// make fields from the visible inputs
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            honeypot: String::new(),
        }
    }

    /// run the checks the inputs enforce before a submit is allowed
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::MissingName);
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::MissingEmail);
        } else if !looks_like_email(self.email.trim()) {
            errors.push(FieldError::InvalidEmail);
        }

        if self.message.trim().is_empty() {
            errors.push(FieldError::MissingMessage);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// build the request body
    pub fn payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            hp: self.honeypot.clone(),
        }
    }

    /// clear the visible inputs, the honeypot is left alone
    fn clear_visible(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }
}

/// a loose `local@domain.tld` check, the same bar an email input sets
pub fn looks_like_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !raw.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .all(|label| !label.is_empty())
        && domain.contains('.')
}

/// the request body sent to the contact endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    /// sender name
    #[serde(default)]
    pub name: String,
    /// sender email
    #[serde(default)]
    pub email: String,
    /// message body
    #[serde(default)]
    pub message: String,
    /// honeypot value
    #[serde(default)]
    pub hp: String,
}

/// the response body of the contact endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    /// whether the message was accepted
    pub ok: bool,
    /// why it wasn't
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactReply {
    /// an accepting reply
    pub fn accepted() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    /// a rejecting reply
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// why a submission failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// the request never got an answer
    #[error("network error: {0}")]
    Network(String),

    /// the answer couldn't be decoded
    #[error("malformed response: {0}")]
    Decode(String),

    /// the endpoint answered with a non-success status
    #[error("endpoint returned status {status}")]
    Status {
        /// the http status
        status: u16,
        /// the endpoint's message, if the body carried one
        message: Option<String>,
    },

    /// the endpoint answered `ok: false`
    #[error("endpoint rejected the message")]
    Rejected(Option<String>),
}

impl ContactError {
    /// the short message shown next to the form
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            }
            | Self::Rejected(Some(message)) => message.clone(),
            Self::Status { message: None, .. } | Self::Rejected(None) => {
                REJECTED_MESSAGE.to_string()
            }
            Self::Network(_) | Self::Decode(_) => GENERIC_MESSAGE.to_string(),
        }
    }
}

/// the state of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContactStatus {
    /// nothing submitted yet
    #[default]
    Idle,
    /// a request is in flight
    Sending,
    /// the last submission was accepted
    Sent,
    /// the last submission failed
    Error(String),
}

/// why a submit didn't start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRefused {
    /// a submission is already in flight
    #[error("a message is already being sent")]
    Busy,
    /// the inputs don't pass their checks
    #[error("the form has invalid fields")]
    Invalid(Vec<FieldError>),
}

/// a contact form session
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    /// the inputs
    fields: ContactFields,
    /// where the form is at
    status: ContactStatus,
}

impl ContactForm {
    /// a fresh, idle form
    pub fn new() -> Self {
        Self::default()
    }

    /// a fresh form with prefilled inputs
    pub fn with_fields(fields: ContactFields) -> Self {
        Self {
            fields,
            status: ContactStatus::Idle,
        }
    }

    /// the inputs
    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// edit the inputs
    pub fn fields_mut(&mut self) -> &mut ContactFields {
        &mut self.fields
    }

    /// the current status
    pub fn status(&self) -> &ContactStatus {
        &self.status
    }

    /// the error shown next to the form, if any
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ContactStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// whether the submit control is disabled
    pub fn is_busy(&self) -> bool {
        self.status == ContactStatus::Sending
    }

    /// the label of the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.is_busy() { "Sending..." } else { "Send" }
    }

    /// enter `sending` and produce the request body
    pub fn begin(&mut self) -> Result<ContactPayload, SubmitRefused> {
        if self.is_busy() {
            return Err(SubmitRefused::Busy);
        }

        self.fields.validate().map_err(SubmitRefused::Invalid)?;
        self.status = ContactStatus::Sending;

        Ok(self.fields.payload())
    }

    /// settle the in-flight submission
    pub fn resolve(&mut self, outcome: Result<ContactReply, ContactError>) {
        let outcome = outcome.and_then(|reply| {
            if reply.ok {
                Ok(reply)
            } else {
                Err(ContactError::Rejected(reply.error))
            }
        });

        match outcome {
            Ok(_) => {
                info!("contact message sent");
                self.status = ContactStatus::Sent;
                self.fields.clear_visible();
            }
            Err(e) => {
                debug!(error = %e, "contact message failed");
                self.status = ContactStatus::Error(e.user_message());
            }
        }
    }

    /// submit the form to an endpoint, exactly one request per call
    pub async fn submit<E>(&mut self, endpoint: &E) -> Result<&ContactStatus, SubmitRefused>
    where
        E: ContactEndpoint + ?Sized,
    {
        let payload = self.begin()?;
        let outcome = endpoint.send(&payload).await;
        self.resolve(outcome);
        Ok(&self.status)
    }
}
