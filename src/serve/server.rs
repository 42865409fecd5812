//! the rocket application
use {
    crate::{
        error::Result,
        serve::{
            cfg::ServerConfig,
            routes::{
                AppState, about_handler, brand_handler, contact_handler, css_handler,
                index_handler, settings_handler, themes_handler,
            },
        },
    },
    rocket::{Build, Rocket, fairing::AdHoc, fs::FileServer, routes},
    std::sync::Arc,
    tracing::{info, warn},
};

/// the site server
pub struct SiteServer {
    /// where and how to listen
    config: ServerConfig,
    /// shared route state
    state: Arc<AppState>,
}

impl SiteServer {
    /// a server for the given state
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// assemble the rocket instance without launching it
    pub fn build(&self) -> Rocket<Build> {
        let figment = rocket::Config::figment()
            .merge(("address", self.config.bind_address.ip()))
            .merge(("port", self.config.bind_address.port()))
            .merge(("log_level", rocket::config::LogLevel::Off))
            .merge(("cli_colors", false));

        let mut rocket = rocket::custom(figment)
            .manage(self.state.clone())
            .mount(
                "/",
                routes![
                    index_handler,
                    css_handler,
                    themes_handler,
                    settings_handler,
                    about_handler,
                    brand_handler,
                ],
            )
            .mount(self.state.contact_endpoint.as_str(), routes![contact_handler]);

        if let Some(dir) = &self.config.static_dir {
            info!("Serving static files from: {}", dir.display());
            rocket = rocket.mount("/static", FileServer::from(dir));
        }

        if self.config.open_browser {
            let url = self.config.site_url();
            rocket = rocket.attach(AdHoc::on_liftoff("Open browser", move |_| {
                Box::pin(async move {
                    if let Err(e) = open::that(&url) {
                        warn!(error = %e, "failed to open browser");
                    }
                })
            }));
        }

        rocket
    }

    /// run until shut down
    pub async fn serve(self) -> Result<()> {
        info!("folio running at {}", self.config.site_url());

        let _rocket = self.build().launch().await?;

        info!("folio shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            cms::SiteSettings,
            config::options::{ContactCfg, FolioCfg, ThemeCfg},
            contact::ContactReply,
        },
        rocket::{
            http::{ContentType, Status},
            local::asynchronous::Client,
        },
        std::net::SocketAddr,
    };

    async fn client() -> Client {
        client_for(&FolioCfg::default()).await
    }

    async fn client_for(cfg: &FolioCfg) -> Client {
        let state = AppState::from_cfg(cfg).unwrap();
        let config = ServerConfig::builder()
            .bind_address(SocketAddr::from(([127, 0, 0, 1], 0)))
            .build()
            .unwrap();

        Client::tracked(SiteServer::new(config, state).build())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_has_theme_hooks() {
        let client = client().await;
        let response = client.get("/").dispatch().await;

        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().await.unwrap();
        assert!(body.contains("data-theme-favicon"));
        assert!(body.contains(r#"data-theme="palette-default""#));
        assert!(body.contains("localStorage.getItem(\"mj-theme-mode\")"));
        assert!(body.contains("<title>Portfolio</title>"));
        assert!(!body.contains("{{"));
    }

    #[tokio::test]
    async fn test_stylesheet_has_every_palette() {
        let client = client().await;
        let body = client
            .get("/theme.css")
            .dispatch()
            .await
            .into_string()
            .await
            .unwrap();

        assert!(body.contains(r#".dark[data-theme="palette-5"]"#));
        assert!(!body.contains("{{PALETTE_CSS}}"));
    }

    #[tokio::test]
    async fn test_themes_are_listed() {
        let client = client().await;
        let themes: Vec<serde_json::Value> = client
            .get("/api/themes")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        assert_eq!(themes.len(), 6);
        assert_eq!(themes[0]["id"], "palette-default");
        assert_eq!(themes[1]["id"], "palette-1");
    }

    #[tokio::test]
    async fn test_contact_accepts_clean_message() {
        let client = client().await;
        let response = client
            .post("/api/contact")
            .header(ContentType::JSON)
            .body(r#"{"name":"Ada","email":"ada@example.com","message":"Hi","hp":""}"#)
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.into_json::<ContactReply>().await.unwrap(),
            ContactReply::accepted()
        );
    }

    #[tokio::test]
    async fn test_contact_rejects_honeypot() {
        let client = client().await;
        let response = client
            .post("/api/contact")
            .header(ContentType::JSON)
            .body(r#"{"name":"Bot","email":"bot@example.com","message":"buy","hp":"x"}"#)
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(
            response.into_json::<ContactReply>().await.unwrap(),
            ContactReply::rejected("Spam detected")
        );
    }

    #[tokio::test]
    async fn test_contact_rejects_garbage_body() {
        let client = client().await;
        let response = client
            .post("/api/contact")
            .header(ContentType::JSON)
            .body("not json")
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
    }

    #[tokio::test]
    async fn test_contact_follows_configured_endpoint() {
        let cfg = FolioCfg {
            contact: Some(ContactCfg {
                endpoint: Some("/hello".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let client = client_for(&cfg).await;

        let page = client.get("/").dispatch().await.into_string().await.unwrap();
        assert!(page.contains(r#"data-endpoint="/hello""#));

        let response = client
            .post("/hello")
            .header(ContentType::JSON)
            .body(r#"{"name":"Ada","email":"ada@example.com","message":"Hi","hp":""}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let old = client
            .post("/api/contact")
            .header(ContentType::JSON)
            .body(r#"{"name":"Ada","email":"ada@example.com","message":"Hi","hp":""}"#)
            .dispatch()
            .await;
        assert_eq!(old.status(), Status::NotFound);
    }

    #[test]
    fn test_contact_endpoint_must_be_a_path() {
        let cfg = FolioCfg {
            contact: Some(ContactCfg {
                endpoint: Some("/api/contact?x=1".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(AppState::from_cfg(&cfg).is_err());
    }

    #[tokio::test]
    async fn test_settings_fall_back_to_config() {
        let client = client().await;
        let settings: SiteSettings = client
            .get("/api/settings")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        assert_eq!(settings.site_title, "Portfolio");
        assert_eq!(settings.location, "Fayetteville, AR");
    }

    #[tokio::test]
    async fn test_brand_assets() {
        let client = client().await;

        let template = client.get("/mfj-logo-big.svg").dispatch().await;
        assert_eq!(template.status(), Status::Ok);
        assert_eq!(template.content_type(), Some(ContentType::SVG));

        let dark = client.get("/mfj-logo-big-white-blackbg.svg").dispatch().await;
        assert_eq!(dark.status(), Status::Ok);

        let missing = client.get("/nope.svg").dispatch().await;
        assert_eq!(missing.status(), Status::NotFound);
    }

    #[tokio::test]
    async fn test_brand_assets_at_nested_paths() {
        let cfg = FolioCfg {
            theme: Some(ThemeCfg {
                template_path: Some("/brand/logo.svg".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let client = client_for(&cfg).await;

        let template = client.get("/brand/logo.svg").dispatch().await;
        assert_eq!(template.status(), Status::Ok);
        assert_eq!(template.content_type(), Some(ContentType::SVG));

        let moved = client.get("/mfj-logo-big.svg").dispatch().await;
        assert_eq!(moved.status(), Status::NotFound);
    }
}
