//! groq queries over http
use {
    crate::cms::CmsError,
    serde::{Deserialize, de::DeserializeOwned},
};

#[cfg(not(target_arch = "wasm32"))]
use {
    crate::cms::models::{AboutPage, SiteSettings},
    std::time::Duration,
    tracing::debug,
};

/// the query for the settings singleton
pub const SETTINGS_QUERY: &str = r#"*[_type == "settings"][0]"#;
/// the query for the about singleton
pub const ABOUT_QUERY: &str = r#"*[_type == "about"][0]"#;

/// where a project lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsProject {
    /// the project id
    pub project_id: String,
    /// the dataset
    pub dataset: String,
    /// the api version date, e.g. `2024-01-01`
    pub api_version: String,
    /// whether to read through the cached cdn
    pub use_cdn: bool,
}

impl CmsProject {
    /// the url for a query against this project
    pub fn query_url(&self, query: &str) -> Result<url::Url, CmsError> {
        if self.project_id.is_empty() {
            return Err(CmsError::NotConfigured);
        }

        let host = if self.use_cdn { "apicdn" } else { "api" };
        let mut url = url::Url::parse(&format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.project_id, host, self.api_version, self.dataset
        ))?;

        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }
}

/// the envelope around query results
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    /// the documents, `null` when nothing matched
    result: Option<T>,
}

/// reads site documents from the content store
#[cfg(not(target_arch = "wasm32"))]
pub struct CmsClient {
    /// the http client
    client: reqwest::Client,
    /// which project to read
    project: CmsProject,
    /// read token for private datasets
    token: Option<String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl CmsClient {
    /// make a client for the project
    pub fn new(
        project: CmsProject,
        token: Option<String>,
        timeout: Duration,
    ) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(crate::USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            project,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// the project being read
    pub fn project(&self) -> &CmsProject {
        &self.project
    }

    /// run a query, `None` when it matched nothing
    pub async fn query<T: DeserializeOwned>(&self, query: &str) -> Result<Option<T>, CmsError> {
        let url = self.project.query_url(query)?;
        debug!(%url, "querying content store");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        decode_result(&body)
    }

    /// fetch the settings document
    pub async fn fetch_settings(&self) -> Result<Option<SiteSettings>, CmsError> {
        self.query(SETTINGS_QUERY).await
    }

    /// fetch the about page document
    pub async fn fetch_about(&self) -> Result<Option<AboutPage>, CmsError> {
        self.query(ABOUT_QUERY).await
    }
}

/// pull the result out of a query response body
pub fn decode_result<T: DeserializeOwned>(body: &str) -> Result<Option<T>, CmsError> {
    let response: QueryResponse<T> = serde_json::from_str(body)?;
    Ok(response.result)
}
