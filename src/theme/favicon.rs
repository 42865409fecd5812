//! dynamic favicon stuff
use {
    crate::theme::{
        ThemeMode,
        colors::ACCENT_PROPERTIES,
        document::{Document, DomEffect},
    },
    async_trait::async_trait,
    thiserror::Error,
    tracing::debug,
};

/// the default path of the favicon template
pub const TEMPLATE_PATH: &str = "/mfj-logo-big.svg";
/// the static favicon used in dark mode before the controller is ready
pub const STATIC_DARK_FAVICON: &str = "/mfj-logo-big-white-blackbg.svg";
/// the static favicon used in light mode before the controller is ready
pub const STATIC_LIGHT_FAVICON: &str = "/mfj-logo-big-black-whitebg.svg";

/// a template fetch failure
#[derive(Debug, Error)]
pub enum FaviconError {
    /// the request never completed
    #[error("template request failed: {0}")]
    Request(String),

    /// the server answered with a non-success status
    #[error("template request returned status {0}")]
    Status(u16),

    /// the template isn't usable markup
    #[error("template is empty")]
    Empty,
}

impl From<reqwest::Error> for FaviconError {
    fn from(value: reqwest::Error) -> Self {
        Self::Request(value.to_string())
    }
}

/// the two static favicons picked by mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFavicons {
    /// href used in dark mode
    pub dark: String,
    /// href used in light mode
    pub light: String,
}

impl StaticFavicons {
    /// the static href for a mode
    pub fn for_mode(&self, mode: ThemeMode) -> &str {
        if mode.is_dark() { &self.dark } else { &self.light }
    }
}

impl Default for StaticFavicons {
    fn default() -> Self {
        Self {
            dark: STATIC_DARK_FAVICON.to_string(),
            light: STATIC_LIGHT_FAVICON.to_string(),
        }
    }
}

/// where the favicon template comes from
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait TemplateSource {
    /// fetch the template markup
    async fn fetch(&self) -> Result<String, FaviconError>;
}

/// fetch the template over http
#[cfg(not(target_arch = "wasm32"))]
pub struct HttpTemplateSource {
    /// the http client
    client: reqwest::Client,
    /// the absolute template url
    url: url::Url,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpTemplateSource {
    /// make a source for the given url
    pub fn new(client: reqwest::Client, url: url::Url) -> Self {
        Self { client, url }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self) -> Result<String, FaviconError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FaviconError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// a template that is already in memory
pub struct StaticTemplateSource(pub String);

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl TemplateSource for StaticTemplateSource {
    async fn fetch(&self) -> Result<String, FaviconError> {
        Ok(self.0.clone())
    }
}

/// the one-shot template cache
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FaviconTemplate {
    /// nobody asked for the template yet
    #[default]
    NotRequested,
    /// the single fetch is in flight
    Pending,
    /// the template arrived
    Ready(String),
    /// the fetch failed, the static favicon stays for the rest of the session
    Unavailable,
}

impl FaviconTemplate {
    /// mark the fetch as started, `false` when a fetch already happened or is happening
    pub fn begin(&mut self) -> bool {
        if *self != Self::NotRequested {
            return false;
        }

        *self = Self::Pending;
        true
    }

    /// record the outcome of the fetch
    pub fn finish(&mut self, result: Result<String, FaviconError>) {
        *self = match result {
            Ok(markup) if !markup.trim().is_empty() => Self::Ready(markup),
            Ok(_) => {
                debug!(error = %FaviconError::Empty, "keeping static favicon");
                Self::Unavailable
            }
            Err(e) => {
                debug!(error = %e, "keeping static favicon");
                Self::Unavailable
            }
        };
    }

    /// the cached markup, if available
    pub fn markup(&self) -> Option<&str> {
        match self {
            Self::Ready(markup) => Some(markup),
            _ => None,
        }
    }
}

/// pick the favicon color from the computed style, falling back to a mode color
pub fn accent_color(doc: &impl Document, mode: ThemeMode) -> String {
    ACCENT_PROPERTIES
        .iter()
        .map(|name| doc.computed_property(name).trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| fallback_color(mode).to_string())
}

/// the color used when no palette color is defined
pub const fn fallback_color(mode: ThemeMode) -> &'static str {
    if mode.is_dark() { "#ffffff" } else { "#000000" }
}

/// inject the color into the template's root tag and encode the result as a data uri
pub fn recolor(template: &str, color: &str) -> String {
    let colored = template.replacen("<svg", &format!("<svg style=\"color:{}\"", color), 1);
    format!("data:image/svg+xml,{}", urlencoding::encode(&colored))
}

/// compute the favicon write needed for the current document, if any
pub fn plan_favicon(template: &str, doc: &impl Document, mode: ThemeMode) -> Option<DomEffect> {
    let current = doc.favicon_href()?;
    let href = recolor(template, &accent_color(doc, mode));

    (current != href).then_some(DomEffect::SetFaviconHref(href))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use {
        super::*,
        crate::theme::{
            Palette,
            document::{VirtualDocument, reflect_mode, reflect_palette},
        },
    };

    const LOGO: &str = r#"<svg viewBox="0 0 10 10"><path fill="currentColor"/></svg>"#;

    #[test]
    fn test_recolor_injects_style_once() {
        let uri = recolor("<svg><svg></svg></svg>", "#ff0000");
        let decoded = urlencoding::decode(uri.trim_start_matches("data:image/svg+xml,")).unwrap();

        assert!(uri.starts_with("data:image/svg+xml,"));
        assert_eq!(decoded, "<svg style=\"color:#ff0000\"><svg></svg></svg>");
    }

    #[test]
    fn test_accent_prefers_gradient_mid() {
        let mut doc = VirtualDocument::new("/static.svg");
        doc.apply(&reflect_palette(Palette::Two));
        doc.apply_all(&reflect_mode(ThemeMode::Dark));

        assert_eq!(
            accent_color(&doc, ThemeMode::Dark),
            doc.computed_property("--text-gradient-mid")
        );
    }

    #[test]
    fn test_accent_uses_primary_without_gradient() {
        let mut doc = VirtualDocument::new("/static.svg");
        doc.apply(&reflect_palette(Palette::Default));
        doc.apply_all(&reflect_mode(ThemeMode::Light));

        assert_eq!(
            accent_color(&doc, ThemeMode::Light),
            doc.computed_property("--primary")
        );
    }

    #[test]
    fn test_accent_falls_back_per_mode() {
        let doc = VirtualDocument::new("/static.svg");

        assert_eq!(accent_color(&doc, ThemeMode::Dark), "#ffffff");
        assert_eq!(accent_color(&doc, ThemeMode::Light), "#000000");
    }

    #[test]
    fn test_plan_skips_identical_href() {
        let mut doc = VirtualDocument::new("/static.svg");

        let effect = plan_favicon(LOGO, &doc, ThemeMode::Dark).unwrap();
        doc.apply(&effect);

        assert_eq!(plan_favicon(LOGO, &doc, ThemeMode::Dark), None);
    }

    #[test]
    fn test_plan_needs_a_link() {
        let doc = VirtualDocument::without_favicon();
        assert_eq!(plan_favicon(LOGO, &doc, ThemeMode::Dark), None);
    }

    #[test]
    fn test_template_is_fetched_at_most_once() {
        let mut template = FaviconTemplate::default();

        assert!(template.begin());
        assert!(!template.begin());

        template.finish(Err(FaviconError::Status(404)));
        assert_eq!(template, FaviconTemplate::Unavailable);
        assert!(!template.begin());
    }

    #[test]
    fn test_blank_template_is_unavailable() {
        let mut template = FaviconTemplate::default();
        template.begin();
        template.finish(Ok("  \n".to_string()));

        assert_eq!(template.markup(), None);
        assert_eq!(template, FaviconTemplate::Unavailable);
    }

    #[tokio::test]
    async fn test_static_source_returns_markup() {
        let source = StaticTemplateSource(LOGO.to_string());
        assert_eq!(source.fetch().await.unwrap(), LOGO);
    }
}
