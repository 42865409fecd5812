//! contact stuff
use {
    super::Handlers,
    crate::{
        contact::{
            ContactFields, ContactForm, ContactStatus, SubmitRefused,
            endpoint::{CONTACT_PATH, ContactEndpoint, HttpContactEndpoint},
        },
    },
    color_eyre::{
        Section,
        eyre::{Context, eyre},
    },
    tracing::info,
};

/// drive a contact form through one submission and report where it ended up
///
/// # Errors
///
/// returns an error if the fields don't pass their checks
pub async fn send_message<E: ContactEndpoint + ?Sized>(
    fields: ContactFields,
    endpoint: &E,
) -> color_eyre::Result<ContactStatus> {
    let mut form = ContactForm::with_fields(fields);

    let status = form.submit(endpoint).await.map_err(|refused| {
        let mut report = eyre!("{}", refused);
        if let SubmitRefused::Invalid(errors) = &refused {
            for error in errors {
                report = report.note(error.to_string());
            }
        }
        report
    })?;

    Ok(status.clone())
}

impl Handlers {
    /// send a message through a running site
    ///
    /// # Errors
    ///
    /// returns an error if the url is bad, the fields are invalid, or the message wasn't sent
    pub async fn contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
        url: Option<&str>,
    ) -> color_eyre::Result<()> {
        let base = match url {
            Some(url) => url.to_string(),
            None => {
                let server = self.cfg.server.clone().unwrap_or_default();
                format!(
                    "http://{}:{}",
                    server.address.as_deref().unwrap_or("127.0.0.1"),
                    server.port.unwrap_or(8000)
                )
            }
        };

        let base = url::Url::parse(&base)
            .wrap_err("invalid site url")
            .suggestion("Pass a full url like https://example.com with --url")?;

        let timeout = self.cfg.http.clone().unwrap_or_default().timeout();
        let path = self
            .cfg
            .contact
            .as_ref()
            .and_then(|c| c.endpoint.clone())
            .unwrap_or_else(|| CONTACT_PATH.to_string());
        let endpoint = HttpContactEndpoint::for_site(&base, &path, timeout)
            .map_err(|e| eyre!("{}", e))
            .wrap_err("invalid contact endpoint")
            .suggestion("Check contact.endpoint in your folio.toml")?;

        info!(url = %endpoint.url(), "sending contact message");
        let status = send_message(ContactFields::new(name, email, message), &endpoint).await?;

        match status {
            ContactStatus::Sent => {
                println!("{}", crate::contact::SENT_MESSAGE);
                Ok(())
            }
            ContactStatus::Error(message) => Err(eyre!(message)),
            other => Err(eyre!("contact form ended up {:?}", other)),
        }
    }
}
