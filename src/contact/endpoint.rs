//! the client side of the contact endpoint
use {
    crate::contact::{ContactError, ContactPayload, ContactReply},
    async_trait::async_trait,
};

#[cfg(not(target_arch = "wasm32"))]
use {std::time::Duration, tracing::debug};

/// the default path the contact form posts to
pub const CONTACT_PATH: &str = "/api/contact";

/// something that accepts contact submissions
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ContactEndpoint {
    /// send one submission and report how it went
    async fn send(&self, payload: &ContactPayload) -> Result<ContactReply, ContactError>;
}

/// the contact endpoint reached over http
#[cfg(not(target_arch = "wasm32"))]
pub struct HttpContactEndpoint {
    /// the http client
    client: reqwest::Client,
    /// the absolute endpoint url
    url: url::Url,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpContactEndpoint {
    /// make an endpoint for the given url
    pub fn new(client: reqwest::Client, url: url::Url) -> Self {
        Self { client, url }
    }

    /// make an endpoint at `path` on the site at `base`
    pub fn for_site(base: &url::Url, path: &str, timeout: Duration) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(crate::USER_AGENT)
            .build()?;

        Ok(Self::new(client, base.join(path)?))
    }

    /// the url submissions go to
    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl ContactEndpoint for HttpContactEndpoint {
    async fn send(&self, payload: &ContactPayload) -> Result<ContactReply, ContactError> {
        debug!(url = %self.url, "posting contact message");

        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| ContactError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ContactError::Network(e.to_string()))?;

        interpret_response(status, &body)
    }
}

/// turn a status and body into a reply
///
/// a 2xx with a decodable body is returned as-is, leaving `ok: false` to the form.
/// anything else becomes an error carrying the body's message when it has one.
pub fn interpret_response(status: u16, body: &str) -> Result<ContactReply, ContactError> {
    let reply = serde_json::from_str::<ContactReply>(body);

    if (200..300).contains(&status) {
        return reply.map_err(|e| ContactError::Decode(e.to_string()));
    }

    Err(ContactError::Status {
        status,
        message: reply.ok().and_then(|r| r.error),
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_is_decoded() {
        assert_eq!(
            interpret_response(200, r#"{"ok":true}"#),
            Ok(ContactReply::accepted())
        );
        assert_eq!(
            interpret_response(200, r#"{"ok":false,"error":"nope"}"#),
            Ok(ContactReply::rejected("nope"))
        );
    }

    #[test]
    fn test_error_status_keeps_body_message() {
        assert_eq!(
            interpret_response(400, r#"{"ok":false,"error":"Spam detected"}"#),
            Err(ContactError::Status {
                status: 400,
                message: Some("Spam detected".to_string())
            })
        );
    }

    #[test]
    fn test_error_status_with_html_body() {
        assert_eq!(
            interpret_response(502, "<html>bad gateway</html>"),
            Err(ContactError::Status {
                status: 502,
                message: None
            })
        );
    }

    #[test]
    fn test_garbage_success_body_is_a_decode_error() {
        assert!(matches!(
            interpret_response(200, "not json"),
            Err(ContactError::Decode(_))
        ));
    }

    #[test]
    fn test_for_site_joins_contact_path() {
        let base = url::Url::parse("https://example.com/").unwrap();
        let endpoint =
            HttpContactEndpoint::for_site(&base, CONTACT_PATH, Duration::from_secs(5)).unwrap();

        assert_eq!(endpoint.url().as_str(), "https://example.com/api/contact");
    }

    #[test]
    fn test_for_site_uses_configured_path() {
        let base = url::Url::parse("https://example.com/blog/").unwrap();
        let endpoint =
            HttpContactEndpoint::for_site(&base, "/hello", Duration::from_secs(5)).unwrap();

        assert_eq!(endpoint.url().as_str(), "https://example.com/hello");
    }
}
