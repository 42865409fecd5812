//! routes for the site
use {
    crate::{
        cms::{self, AboutPage, CmsClient, SiteSettings, models::escape_html},
        config::options::{FolioCfg, ThemeCfg},
        contact::{
            ContactPayload, ContactReply,
            relay::{LogRelay, MISSING_FIELDS_MESSAGE, MailRelay, WebhookRelay, handle_submission},
        },
        bail,
        error::Result,
        serve::assets::{INDEX_HTML, LOGO_DARK, LOGO_LIGHT, LOGO_TEMPLATE, PALETTE_MARKER, STYLES_CSS},
        theme::{
            ThemeMode, ThemeState,
            favicon::TEMPLATE_PATH,
            document::{DARK_CLASS, MODE_ATTRIBUTE, PALETTE_ATTRIBUTE},
            prehydrate::inline_script,
            registry::{PaletteRegistry, PaletteSummary},
        },
    },
    rocket::{
        State, get,
        http::{
            ContentType, Status,
            uri::{Origin, Segments, fmt::Path as UriPath},
        },
        post,
        response::content::{RawCss, RawHtml},
        serde::json::Json,
    },
    std::{sync::Arc, time::Duration},
    tracing::{debug, info},
};

/// the state of the app
pub struct AppState {
    /// palette definitions
    pub registry: PaletteRegistry,
    /// theme settings shared with the page
    pub theme: ThemeCfg,
    /// the path the contact form posts to
    pub contact_endpoint: String,
    /// where accepted messages go
    pub relay: Box<dyn MailRelay>,
    /// the content store, `None` when disabled
    pub cms: Option<CmsClient>,
    /// settings used when the content store can't answer
    pub site: SiteSettings,
}

impl AppState {
    /// build the state from config
    pub fn from_cfg(cfg: &FolioCfg) -> Result<Self> {
        let defaults = FolioCfg::default();
        let theme = cfg.theme.clone().or(defaults.theme).unwrap_or_default();
        let contact = cfg.contact.clone().or(defaults.contact).unwrap_or_default();
        let http = cfg.http.clone().or(defaults.http).unwrap_or_default();
        let site = cfg.site.clone().or(defaults.site).unwrap_or_default();

        let relay: Box<dyn MailRelay> = match &contact.relay_url {
            Some(url) => {
                let timeout = Duration::from_secs(contact.relay_timeout_secs.unwrap_or(10));
                info!(%url, "relaying contact messages to webhook");
                Box::new(WebhookRelay::new(url::Url::parse(url)?, timeout)?)
            }
            None => {
                info!("no contact relay configured, messages will only be logged");
                Box::new(LogRelay)
            }
        };

        let cms = match cfg.cms.as_ref().and_then(|c| c.project()) {
            Some(project) => {
                let token = cfg.cms.as_ref().and_then(|c| c.token.clone());
                info!(project = %project.project_id, dataset = %project.dataset, "reading content store");
                Some(CmsClient::new(project, token, http.timeout())?)
            }
            None => None,
        };

        let contact_endpoint = contact
            .endpoint
            .unwrap_or_else(|| crate::contact::endpoint::CONTACT_PATH.to_string());
        match Origin::parse(&contact_endpoint) {
            Ok(origin) if origin.query().is_none() => {}
            _ => bail!("contact endpoint `{}` must be a plain path like /api/contact", contact_endpoint),
        }

        Ok(Self {
            registry: PaletteRegistry::new(),
            contact_endpoint,
            theme,
            relay,
            cms,
            site: site.settings(),
        })
    }

    /// the site settings, from the store if possible
    pub async fn settings(&self) -> SiteSettings {
        cms::settings_or(self.cms.as_ref(), &self.site).await
    }

    /// the about page, from the store if possible
    pub async fn about(&self) -> AboutPage {
        cms::about_or_default(self.cms.as_ref()).await
    }
}

/// fill the page shell
pub fn render_page(settings: &SiteSettings, theme: &ThemeCfg, contact_endpoint: &str) -> String {
    let initial = ThemeState::default();
    let prehydrate = theme.prehydrate();
    let template_path = theme.template_path.as_deref().unwrap_or(TEMPLATE_PATH);
    let root_class = if initial.mode == ThemeMode::Dark { DARK_CLASS } else { "" };

    fill_placeholders(
        INDEX_HTML,
        &[
            ("TITLE", escape_html(&settings.site_title)),
            ("DESCRIPTION", escape_html(&settings.description)),
            ("LOCATION", escape_html(&settings.location)),
            ("MODE_ATTRIBUTE", MODE_ATTRIBUTE.to_string()),
            ("PALETTE_ATTRIBUTE", PALETTE_ATTRIBUTE.to_string()),
            ("MODE", initial.mode.as_str().to_string()),
            ("PALETTE", initial.palette.as_str().to_string()),
            ("ROOT_CLASS", root_class.to_string()),
            ("FAVICON", escape_html(prehydrate.favicons.for_mode(initial.mode))),
            ("CONTACT_ENDPOINT", escape_html(contact_endpoint)),
            ("MODE_KEY", escape_html(&prehydrate.keys.mode)),
            ("PALETTE_KEY", escape_html(&prehydrate.keys.palette)),
            ("FAVICON_TEMPLATE", escape_html(template_path)),
            ("PREHYDRATE_SCRIPT", inline_script(&prehydrate)),
        ],
    )
}

/// replace `{{NAME}}` placeholders in one pass
///
/// substituted values are not rescanned. unknown placeholders are kept as-is.
pub fn fill_placeholders(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }

        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[get("/")]
/// the page shell
pub async fn index_handler(state: &State<Arc<AppState>>) -> RawHtml<String> {
    let settings = state.settings().await;
    RawHtml(render_page(&settings, &state.theme, &state.contact_endpoint))
}

#[get("/theme.css")]
/// the base stylesheet with every palette
pub async fn css_handler(state: &State<Arc<AppState>>) -> RawCss<String> {
    RawCss(STYLES_CSS.replace(PALETTE_MARKER, &state.registry.stylesheet()))
}

#[get("/api/themes")]
/// list the palettes
pub async fn themes_handler(state: &State<Arc<AppState>>) -> Json<Vec<PaletteSummary>> {
    Json(state.registry.list())
}

#[post("/", data = "<payload>")]
/// accept a contact submission, mounted at the configured endpoint
pub async fn contact_handler(
    state: &State<Arc<AppState>>,
    payload: std::result::Result<Json<ContactPayload>, rocket::serde::json::Error<'_>>,
) -> (Status, Json<ContactReply>) {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(e) => {
            debug!(error = %e, "unreadable contact submission");
            return (
                Status::BadRequest,
                Json(ContactReply::rejected(MISSING_FIELDS_MESSAGE)),
            );
        }
    };

    let outcome = handle_submission(payload, state.relay.as_ref()).await;
    let status = Status::from_code(outcome.status).unwrap_or(Status::InternalServerError);

    (status, Json(outcome.reply))
}

#[get("/api/settings")]
/// the site settings document
pub async fn settings_handler(state: &State<Arc<AppState>>) -> Json<SiteSettings> {
    Json(state.settings().await)
}

#[get("/api/about")]
/// the about page document
pub async fn about_handler(state: &State<Arc<AppState>>) -> Json<AboutPage> {
    Json(state.about().await)
}

#[get("/<segments..>", rank = 20)]
/// the logo files, at whatever paths the theme settings name
pub async fn brand_handler(
    state: &State<Arc<AppState>>,
    segments: Segments<'_, UriPath>,
) -> Option<(ContentType, &'static str)> {
    let path = format!("/{}", segments.collect::<Vec<_>>().join("/"));
    let favicons = state.theme.static_favicons();

    let svg = if state.theme.template_path.as_deref() == Some(path.as_str()) {
        LOGO_TEMPLATE
    } else if path == favicons.dark {
        LOGO_DARK
    } else if path == favicons.light {
        LOGO_LIGHT
    } else {
        return None;
    };

    Some((ContentType::SVG, svg))
}
