//! favicon stuff
use {
    super::Handlers,
    crate::{
        config::options::ThemeCfg,
        serve::assets::LOGO_TEMPLATE,
        theme::{
            Palette, ThemeMode,
            controller::ThemeController,
            document::{Document, VirtualDocument},
            favicon::StaticTemplateSource,
            storage::MemoryStorage,
        },
    },
    color_eyre::eyre::OptionExt,
};

/// the favicon href a visitor with this stored theme ends up with
///
/// runs the controller against an in-memory document and the bundled logo template
pub async fn favicon_for(mode: ThemeMode, palette: Palette, theme: &ThemeCfg) -> Option<String> {
    let keys = theme.storage_keys();
    let storage = MemoryStorage::new()
        .with(&keys.mode, mode.as_str())
        .with(&keys.palette, palette.as_str());

    let mut doc = VirtualDocument::new(theme.static_favicons().for_mode(mode));
    let mut controller = ThemeController::init_with_keys(storage, keys, &mut doc);

    let source = StaticTemplateSource(LOGO_TEMPLATE.to_string());
    controller.load_template(&source, &mut doc).await;

    doc.favicon_href()
}

impl Handlers {
    /// print the favicon data uri for a theme
    ///
    /// # Errors
    ///
    /// returns an error if no favicon could be derived
    pub async fn print_favicon(&self, mode: ThemeMode, palette: Palette) -> color_eyre::Result<()> {
        let theme = self.cfg.theme.clone().unwrap_or_default();
        let href = favicon_for(mode, palette, &theme)
            .await
            .ok_or_eyre("no favicon link to write to")?;

        println!("{}", href);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_favicon_is_recolored_per_palette() {
        let theme = ThemeCfg::default();

        let default = favicon_for(ThemeMode::Dark, Palette::Default, &theme).await.unwrap();
        let ember = favicon_for(ThemeMode::Dark, Palette::One, &theme).await.unwrap();

        assert!(default.starts_with("data:image/svg+xml,"));
        assert!(ember.starts_with("data:image/svg+xml,"));
        assert_ne!(default, ember);
    }

    #[tokio::test]
    async fn test_favicon_differs_by_mode() {
        let theme = ThemeCfg::default();

        let dark = favicon_for(ThemeMode::Dark, Palette::Two, &theme).await.unwrap();
        let light = favicon_for(ThemeMode::Light, Palette::Two, &theme).await.unwrap();

        assert_ne!(dark, light);
    }
}
