//! flash prevention before the controller is up
//!
//! the page shell runs this step inline, before anything else renders. it is
//! best-effort: any failure leaves the shell's own defaults in place. it reads
//! storage independently of the controller, so if another tab writes in
//! between the two may briefly disagree; the controller's write wins.
use {
    crate::theme::{
        ThemeMode,
        document::{
            DARK_CLASS, Document, DomEffect, FAVICON_SELECTOR, MODE_ATTRIBUTE, PALETTE_ATTRIBUTE,
            reflect_mode,
        },
        favicon::StaticFavicons,
        storage::{StorageKeys, ThemeStorage},
    },
    tracing::trace,
};

/// what the inline step needs to know
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrehydrateConfig {
    /// the storage keys shared with the controller
    pub keys: StorageKeys,
    /// the static favicons picked by mode
    pub favicons: StaticFavicons,
}

/// compute the writes of the inline step
///
/// the mode is light only for an exact `"light"`; the stored palette is applied
/// as-is when present, since the controller validates it moments later.
pub fn plan(storage: &impl ThemeStorage, doc: &impl Document, cfg: &PrehydrateConfig) -> Vec<DomEffect> {
    let (stored_mode, stored_palette) = match (storage.get(&cfg.keys.mode), storage.get(&cfg.keys.palette)) {
        (Ok(mode), Ok(palette)) => (mode, palette),
        (Err(e), _) | (_, Err(e)) => {
            trace!(error = %e, "skipping prehydration");
            return Vec::new();
        }
    };

    let mode = if stored_mode.as_deref() == Some("light") {
        ThemeMode::Light
    } else {
        ThemeMode::Dark
    };

    let mut effects = reflect_mode(mode).to_vec();

    if let Some(palette) = stored_palette {
        effects.push(DomEffect::SetRootAttribute {
            name: PALETTE_ATTRIBUTE,
            value: palette,
        });
    }

    if doc.favicon_href().is_some() {
        effects.push(DomEffect::SetFaviconHref(
            cfg.favicons.for_mode(mode).to_string(),
        ));
    }

    effects
}

/// run the inline step against a document
pub fn run(storage: &impl ThemeStorage, doc: &mut impl Document, cfg: &PrehydrateConfig) {
    let effects = plan(storage, &*doc, cfg);
    doc.apply_all(&effects);
}

/// render the inline step as a script for the page shell
pub fn inline_script(cfg: &PrehydrateConfig) -> String {
    let js = |s: &str| serde_json::Value::String(s.to_string()).to_string();

    format!(
        concat!(
            "(()=>{{try{{",
            "const root=document.documentElement;",
            "const storedMode=localStorage.getItem({mode_key});",
            "const storedPalette=localStorage.getItem({palette_key});",
            "const mode=storedMode===\"light\"?\"light\":\"dark\";",
            "root.setAttribute({mode_attr},mode);",
            "root.classList.toggle({dark_class},mode===\"dark\");",
            "if(storedPalette){{root.setAttribute({palette_attr},storedPalette);}}",
            "const iconHref=mode===\"dark\"?{dark_icon}:{light_icon};",
            "const link=document.head.querySelector({selector});",
            "if(link){{link.href=iconHref;}}",
            "}}catch(e){{}}}})();"
        ),
        mode_key = js(&cfg.keys.mode),
        palette_key = js(&cfg.keys.palette),
        mode_attr = js(MODE_ATTRIBUTE),
        dark_class = js(DARK_CLASS),
        palette_attr = js(PALETTE_ATTRIBUTE),
        dark_icon = js(&cfg.favicons.dark),
        light_icon = js(&cfg.favicons.light),
        selector = js(FAVICON_SELECTOR),
    )
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::theme::{
            document::VirtualDocument,
            favicon::{STATIC_DARK_FAVICON, STATIC_LIGHT_FAVICON},
            storage::{MODE_STORAGE_KEY, MemoryStorage, PALETTE_STORAGE_KEY},
        },
    };

    #[test]
    fn test_light_mode_picks_light_icon() {
        let storage = MemoryStorage::new().with(MODE_STORAGE_KEY, "light");
        let mut doc = VirtualDocument::new(STATIC_DARK_FAVICON);

        run(&storage, &mut doc, &PrehydrateConfig::default());

        assert!(!doc.has_class(DARK_CLASS));
        assert_eq!(doc.attribute(MODE_ATTRIBUTE), Some("light"));
        assert_eq!(doc.favicon_href().as_deref(), Some(STATIC_LIGHT_FAVICON));
        assert_eq!(doc.attribute(PALETTE_ATTRIBUTE), None);
    }

    #[test]
    fn test_anything_but_light_is_dark() {
        let storage = MemoryStorage::new().with(MODE_STORAGE_KEY, "LIGHT");
        let mut doc = VirtualDocument::new(STATIC_LIGHT_FAVICON);

        run(&storage, &mut doc, &PrehydrateConfig::default());

        assert!(doc.has_class(DARK_CLASS));
        assert_eq!(doc.favicon_href().as_deref(), Some(STATIC_DARK_FAVICON));
    }

    #[test]
    fn test_stored_palette_is_applied_raw() {
        let storage = MemoryStorage::new().with(PALETTE_STORAGE_KEY, "palette-legacy");
        let mut doc = VirtualDocument::new(STATIC_DARK_FAVICON);

        run(&storage, &mut doc, &PrehydrateConfig::default());

        assert_eq!(doc.attribute(PALETTE_ATTRIBUTE), Some("palette-legacy"));
    }

    #[test]
    fn test_blocked_storage_changes_nothing() {
        let storage = MemoryStorage::blocked();
        let doc = VirtualDocument::new(STATIC_LIGHT_FAVICON);

        assert!(plan(&storage, &doc, &PrehydrateConfig::default()).is_empty());
    }

    #[test]
    fn test_missing_link_is_skipped() {
        let storage = MemoryStorage::new();
        let doc = VirtualDocument::without_favicon();

        let effects = plan(&storage, &doc, &PrehydrateConfig::default());

        assert_eq!(effects.len(), 2);
        assert!(!effects.iter().any(|e| matches!(e, DomEffect::SetFaviconHref(_))));
    }

    #[test]
    fn test_script_embeds_keys_and_icons() {
        let script = inline_script(&PrehydrateConfig::default());

        assert!(script.starts_with("(()=>{try{"));
        assert!(script.ends_with("}catch(e){}})();"));
        assert!(script.contains(r#"localStorage.getItem("mj-theme-mode")"#));
        assert!(script.contains(r#"localStorage.getItem("mj-theme-palette")"#));
        assert!(script.contains(r#""/mfj-logo-big-white-blackbg.svg""#));
        assert!(script.contains(r#"querySelector("link[data-theme-favicon]")"#));
    }
}
