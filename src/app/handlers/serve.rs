//! serve stuff
use {
    super::Handlers,
    crate::serve::{AppState, ServerConfig, SiteServer},
    color_eyre::{Section, eyre::Context},
};

impl Handlers {
    /// run the site server until it's shut down
    ///
    /// # Errors
    ///
    /// returns an error if the server settings are invalid or rocket fails to launch
    pub async fn serve(&self, open: bool) -> color_eyre::Result<()> {
        let settings = self.cfg.server.clone().unwrap_or_default();
        let mut config = ServerConfig::from_settings(&settings)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))
            .wrap_err("invalid server settings")
            .suggestion("Check the [server] section of your folio.toml")?;
        config.open_browser |= open;

        let state = AppState::from_cfg(&self.cfg)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))
            .wrap_err("failed to set up the site")?;

        SiteServer::new(config, state)
            .serve()
            .await
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))
            .wrap_err("the site server stopped with an error")
    }
}
