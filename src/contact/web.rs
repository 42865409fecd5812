//! the contact form in the browser
//!
//! [`FetchContactEndpoint`] posts through the page's `fetch`, and [`WebContact`] hands the
//! form state machine to page scripts, which only copy inputs in and render its state.
use {
    crate::{
        contact::{
            ContactError, ContactFields, ContactForm, ContactPayload, ContactReply, ContactStatus,
            SENT_MESSAGE,
            endpoint::{ContactEndpoint, interpret_response},
        },
        theme::web::describe,
    },
    async_trait::async_trait,
    std::{cell::RefCell, rc::Rc},
    tracing::debug,
    wasm_bindgen::{JsCast, JsValue, prelude::wasm_bindgen},
    wasm_bindgen_futures::{JsFuture, future_to_promise},
};

/// a js failure on the way to an answer
fn network(value: JsValue) -> ContactError {
    ContactError::Network(describe(&value))
}

/// the contact endpoint reached with the browser's `fetch`
pub struct FetchContactEndpoint {
    /// the endpoint path or url
    url: String,
}

impl FetchContactEndpoint {
    /// make an endpoint for a path on the current site
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl ContactEndpoint for FetchContactEndpoint {
    async fn send(&self, payload: &ContactPayload) -> Result<ContactReply, ContactError> {
        debug!(url = %self.url, "posting contact message");

        let body = serde_json::to_string(payload).map_err(|e| ContactError::Network(e.to_string()))?;
        let window = web_sys::window().ok_or_else(|| ContactError::Network("no window".to_string()))?;

        let headers = web_sys::Headers::new().map_err(network)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(network)?;

        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));

        let response: web_sys::Response =
            JsFuture::from(window.fetch_with_str_and_init(&self.url, &init))
                .await
                .and_then(|value| value.dyn_into())
                .map_err(network)?;

        let status = response.status();
        let text = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?
            .as_string()
            .unwrap_or_default();

        interpret_response(status, &text)
    }
}

/// the contact form as seen from page scripts
#[wasm_bindgen]
pub struct WebContact {
    /// shared with the in-flight request
    form: Rc<RefCell<ContactForm>>,
    /// where submissions go
    endpoint: Rc<FetchContactEndpoint>,
}

#[wasm_bindgen]
impl WebContact {
    /// a fresh, idle form posting to `endpoint`
    #[wasm_bindgen(constructor)]
    pub fn new(endpoint: String) -> WebContact {
        Self {
            form: Rc::new(RefCell::new(ContactForm::new())),
            endpoint: Rc::new(FetchContactEndpoint::new(endpoint)),
        }
    }

    /// copy the inputs into the form
    #[wasm_bindgen(js_name = setFields)]
    pub fn set_fields(&self, name: &str, email: &str, message: &str, honeypot: &str) {
        *self.form.borrow_mut().fields_mut() = ContactFields {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            honeypot: honeypot.to_string(),
        };
    }

    /// start a submission
    ///
    /// the form is `sending` when this returns. gives a promise that settles once the
    /// endpoint answers, or `undefined` when the form refused to submit.
    pub fn submit(&self) -> Option<js_sys::Promise> {
        let payload = match self.form.borrow_mut().begin() {
            Ok(payload) => payload,
            Err(refused) => {
                debug!(%refused, "contact submit refused");
                return None;
            }
        };

        let form = self.form.clone();
        let endpoint = self.endpoint.clone();

        Some(future_to_promise(async move {
            let outcome = endpoint.send(&payload).await;
            form.borrow_mut().resolve(outcome);
            Ok(JsValue::UNDEFINED)
        }))
    }

    /// `idle`, `sending`, `sent` or `error`
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        match self.form.borrow().status() {
            ContactStatus::Idle => "idle",
            ContactStatus::Sending => "sending",
            ContactStatus::Sent => "sent",
            ContactStatus::Error(_) => "error",
        }
        .to_string()
    }

    /// the line shown under the form
    #[wasm_bindgen(getter, js_name = statusText)]
    pub fn status_text(&self) -> String {
        match self.form.borrow().status() {
            ContactStatus::Sent => SENT_MESSAGE.to_string(),
            ContactStatus::Error(message) => message.clone(),
            ContactStatus::Idle | ContactStatus::Sending => String::new(),
        }
    }

    /// whether the submit control is disabled
    #[wasm_bindgen(getter, js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.form.borrow().is_busy()
    }

    /// the label of the submit control
    #[wasm_bindgen(getter, js_name = submitLabel)]
    pub fn submit_label(&self) -> String {
        self.form.borrow().submit_label().to_string()
    }

    /// the name input, as the form holds it
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.form.borrow().fields().name.clone()
    }

    /// the email input, as the form holds it
    #[wasm_bindgen(getter)]
    pub fn email(&self) -> String {
        self.form.borrow().fields().email.clone()
    }

    /// the message input, as the form holds it
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.form.borrow().fields().message.clone()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, wasm_bindgen_test::wasm_bindgen_test};

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn invalid_fields_are_refused_without_a_request() {
        let contact = WebContact::new("/api/contact".to_string());
        contact.set_fields("Ada", "not-an-email", "Hi", "");

        assert!(contact.submit().is_none());
        assert_eq!(contact.status(), "idle");
        assert_eq!(contact.submit_label(), "Send");
        assert_eq!(contact.name(), "Ada");
    }

    #[wasm_bindgen_test]
    fn submit_enters_sending_right_away() {
        let contact = WebContact::new("/nowhere".to_string());
        contact.set_fields("Ada", "ada@example.com", "Hi", "");

        assert!(contact.submit().is_some());
        assert_eq!(contact.status(), "sending");
        assert!(contact.is_busy());
        assert_eq!(contact.submit_label(), "Sending...");
        assert!(contact.submit().is_none());
    }

    #[wasm_bindgen_test]
    fn sent_clears_visible_fields_only() {
        let contact = WebContact::new("/api/contact".to_string());
        contact.set_fields("Ada", "ada@example.com", "Hi", "bot");

        contact.form.borrow_mut().begin().unwrap();
        contact.form.borrow_mut().resolve(Ok(ContactReply::accepted()));

        assert_eq!(contact.status(), "sent");
        assert_eq!(contact.status_text(), SENT_MESSAGE);
        assert_eq!(contact.name(), "");
        assert_eq!(contact.form.borrow().fields().honeypot, "bot");
    }

    #[wasm_bindgen_test]
    fn undecodable_success_body_is_generic() {
        let contact = WebContact::new("/api/contact".to_string());
        contact.set_fields("Ada", "ada@example.com", "Hi", "");

        contact.form.borrow_mut().begin().unwrap();
        contact
            .form
            .borrow_mut()
            .resolve(interpret_response(200, "<html>oops</html>"));

        assert_eq!(contact.status(), "error");
        assert_eq!(contact.status_text(), crate::contact::GENERIC_MESSAGE);
        assert_eq!(contact.email(), "ada@example.com");
    }
}
