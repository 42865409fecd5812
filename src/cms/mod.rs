//! read-only access to the hosted content store
pub mod client;
pub mod models;

pub use {
    client::CmsProject,
    models::{AboutPage, SiteSettings},
};

#[cfg(not(target_arch = "wasm32"))]
pub use client::CmsClient;

use thiserror::Error;
#[cfg(not(target_arch = "wasm32"))]
use tracing::warn;

/// content store failures
#[derive(Debug, Error)]
pub enum CmsError {
    /// no project id set
    #[error("content store is not configured")]
    NotConfigured,

    /// the query url couldn't be built
    #[error("bad content store url: {0}")]
    Url(#[from] url::ParseError),

    /// the request didn't go through
    #[error("content store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// the store answered with an error status
    #[error("content store returned status {0}")]
    Status(u16),

    /// the response wasn't what we expected
    #[error("couldn't decode content store response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(not(target_arch = "wasm32"))]
/// the settings document, or `fallback` if the store is off, empty or broken
pub async fn settings_or(client: Option<&CmsClient>, fallback: &SiteSettings) -> SiteSettings {
    let Some(client) = client else {
        return fallback.clone();
    };

    match client.fetch_settings().await {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            warn!("no settings document found, using configured site settings");
            fallback.clone()
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch settings, using configured site settings");
            fallback.clone()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
/// the about page document, or the default page if the store is off, empty or broken
pub async fn about_or_default(client: Option<&CmsClient>) -> AboutPage {
    let Some(client) = client else {
        return AboutPage::default();
    };

    match client.fetch_about().await {
        Ok(Some(about)) => about,
        Ok(None) => {
            warn!("no about document found");
            AboutPage::default()
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch about page");
            AboutPage::default()
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use {super::*, std::time::Duration};

    fn unconfigured() -> CmsClient {
        let project = CmsProject {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
        };

        CmsClient::new(project, None, Duration::from_secs(1)).unwrap()
    }

    fn fallback() -> SiteSettings {
        SiteSettings {
            site_title: "Fallback".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_store_uses_fallback() {
        assert_eq!(settings_or(None, &fallback()).await, fallback());
        assert_eq!(about_or_default(None).await, AboutPage::default());
    }

    #[tokio::test]
    async fn test_failing_store_uses_fallback() {
        let client = unconfigured();

        assert_eq!(settings_or(Some(&client), &fallback()).await, fallback());
        assert_eq!(about_or_default(Some(&client)).await.title, "About");
    }
}
