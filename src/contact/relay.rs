//! the server side of the contact endpoint
use {
    crate::contact::{ContactPayload, ContactReply, looks_like_email},
    async_trait::async_trait,
    chrono::{DateTime, Utc},
    serde::Serialize,
    std::time::Duration,
    thiserror::Error,
    tracing::{info, warn},
};

/// reply for a filled honeypot
pub const SPAM_MESSAGE: &str = "Spam detected";
/// reply for blank fields
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
/// reply for a malformed email
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";
/// reply when the relay couldn't deliver
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send";

/// a delivery failure
#[derive(Debug, Error)]
pub enum RelayError {
    /// the relay couldn't be reached
    #[error("relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// the relay refused the message
    #[error("relay returned status {0}")]
    Status(u16),
}

/// an accepted message on its way to the inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    /// sender name
    pub name: String,
    /// sender email
    pub email: String,
    /// message body
    pub message: String,
    /// when the site received it
    pub received_at: DateTime<Utc>,
}

/// something that gets messages to the site owner
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// deliver one message
    async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError>;
}

/// posts messages as json to a webhook (mail service, chat hook, ...)
pub struct WebhookRelay {
    /// the http client
    client: reqwest::Client,
    /// the webhook url
    url: url::Url,
}

impl WebhookRelay {
    /// make a relay for the given webhook
    pub fn new(url: url::Url, timeout: Duration) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(crate::USER_AGENT)
            .build()?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl MailRelay for WebhookRelay {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status.as_u16()));
        }

        Ok(())
    }
}

/// records messages in the log, for when no webhook is configured
pub struct LogRelay;

#[async_trait]
impl MailRelay for LogRelay {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError> {
        info!(
            name = %message.name,
            email = %message.email,
            received_at = %message.received_at,
            "contact message: {}",
            message.message
        );
        Ok(())
    }
}

/// the http status and body to answer a submission with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    /// http status
    pub status: u16,
    /// response body
    pub reply: ContactReply,
}

impl RelayOutcome {
    /// a rejected submission
    fn rejected(status: u16, message: &str) -> Self {
        Self {
            status,
            reply: ContactReply::rejected(message),
        }
    }
}

/// check a submission and hand it to the relay
pub async fn handle_submission(payload: ContactPayload, relay: &dyn MailRelay) -> RelayOutcome {
    if !payload.hp.trim().is_empty() {
        warn!(email = %payload.email, "dropping contact message with filled honeypot");
        return RelayOutcome::rejected(400, SPAM_MESSAGE);
    }

    let name = payload.name.trim();
    let email = payload.email.trim();
    let message = payload.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return RelayOutcome::rejected(400, MISSING_FIELDS_MESSAGE);
    }

    if !looks_like_email(email) {
        return RelayOutcome::rejected(400, INVALID_EMAIL_MESSAGE);
    }

    let message = ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
        received_at: Utc::now(),
    };

    match relay.deliver(&message).await {
        Ok(()) => RelayOutcome {
            status: 200,
            reply: ContactReply::accepted(),
        },
        Err(e) => {
            warn!(error = %e, "failed to relay contact message");
            RelayOutcome::rejected(502, DELIVERY_FAILED_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::Mutex};

    #[derive(Default)]
    struct RecordingRelay {
        delivered: Mutex<Vec<ContactMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl MailRelay for RecordingRelay {
        async fn deliver(&self, message: &ContactMessage) -> Result<(), RelayError> {
            if self.fail {
                return Err(RelayError::Status(503));
            }

            self.delivered.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn payload(hp: &str) -> ContactPayload {
        ContactPayload {
            name: " Ada ".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hi".to_string(),
            hp: hp.to_string(),
        }
    }

    #[tokio::test]
    async fn test_honeypot_is_rejected_as_spam() {
        let relay = RecordingRelay::default();

        let outcome = handle_submission(payload("http://spam.example"), &relay).await;

        assert_eq!(outcome, RelayOutcome::rejected(400, SPAM_MESSAGE));
        assert!(relay.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clean_message_is_delivered_trimmed() {
        let relay = RecordingRelay::default();

        let outcome = handle_submission(payload(""), &relay).await;

        assert_eq!(outcome.status, 200);
        assert!(outcome.reply.ok);
        assert_eq!(relay.delivered.lock().unwrap()[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected() {
        let relay = RecordingRelay::default();
        let mut blank = payload("");
        blank.message = "   ".to_string();

        let outcome = handle_submission(blank, &relay).await;

        assert_eq!(outcome, RelayOutcome::rejected(400, MISSING_FIELDS_MESSAGE));
    }

    #[tokio::test]
    async fn test_bad_email_is_rejected() {
        let relay = RecordingRelay::default();
        let mut bad = payload("");
        bad.email = "ada.example.com".to_string();

        let outcome = handle_submission(bad, &relay).await;

        assert_eq!(outcome, RelayOutcome::rejected(400, INVALID_EMAIL_MESSAGE));
    }

    #[tokio::test]
    async fn test_relay_failure_is_a_bad_gateway() {
        let relay = RecordingRelay {
            fail: true,
            ..Default::default()
        };

        let outcome = handle_submission(payload(""), &relay).await;

        assert_eq!(outcome, RelayOutcome::rejected(502, DELIVERY_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_log_relay_always_delivers() {
        let message = ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hi".to_string(),
            received_at: Utc::now(),
        };

        assert!(LogRelay.deliver(&message).await.is_ok());
    }
}
