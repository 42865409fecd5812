//! palette registry stuff
use {
    crate::theme::{
        Palette, PaletteDef, ThemeMode,
        colors::{ModeColors, PaletteColors},
        presets::*,
    },
    hashbrown::HashMap,
    serde::Serialize,
};

/// the metadata of a palette
#[derive(Clone)]
pub struct PaletteMetadata {
    /// the id of the palette
    pub id: Palette,
    /// the palette name
    pub name: &'static str,
    /// the function returning the palette colors
    pub colors_fn: fn() -> ModeColors,
}

impl PaletteMetadata {
    /// make new metadata
    pub fn new<T: PaletteDef>() -> Self {
        Self {
            id: T::id(),
            name: T::name(),
            colors_fn: T::colors,
        }
    }

    /// get the colors
    pub fn get_colors(&self) -> ModeColors {
        (self.colors_fn)()
    }
}

/// a listing entry for a palette
#[derive(Debug, Clone, Serialize)]
pub struct PaletteSummary {
    /// the storage token
    pub id: &'static str,
    /// the display name
    pub name: &'static str,
}

/// the palette registry
pub struct PaletteRegistry {
    /// the installed palettes
    palettes: HashMap<Palette, PaletteMetadata>,
}

impl PaletteRegistry {
    /// make a new registry with every built-in palette
    pub fn new() -> Self {
        let mut registry = Self {
            palettes: HashMap::new(),
        };

        registry.register::<Neutral>();
        registry.register::<Ember>();
        registry.register::<Lagoon>();
        registry.register::<Grove>();
        registry.register::<Orchid>();
        registry.register::<Dusk>();

        registry
    }

    /// register a palette, replacing any previous definition for its id
    pub fn register<T: PaletteDef>(&mut self) {
        self.palettes.insert(T::id(), PaletteMetadata::new::<T>());
    }

    /// get the colors of a palette
    pub fn get_colors(&self, palette: Palette) -> Option<ModeColors> {
        self.palettes.get(&palette).map(|meta| meta.get_colors())
    }

    /// get the metadata of a palette
    pub fn get_metadata(&self, palette: Palette) -> Option<&PaletteMetadata> {
        self.palettes.get(&palette)
    }

    /// get the CSS vars of a palette in a mode
    pub fn css_vars(&self, palette: Palette, mode: ThemeMode) -> Option<String> {
        self.get_colors(palette)
            .map(|colors| colors.for_mode(mode).to_css_vars())
    }

    /// resolve the computed value of a custom property, empty when undefined
    pub fn property(&self, palette: Palette, mode: ThemeMode, name: &str) -> String {
        self.get_colors(palette)
            .map(|colors| colors.for_mode(mode).property(name).trim().to_string())
            .unwrap_or_default()
    }

    /// list registered palettes in whitelist order
    pub fn list(&self) -> Vec<PaletteSummary> {
        Palette::ALL
            .into_iter()
            .filter_map(|id| self.palettes.get(&id))
            .map(|meta| PaletteSummary {
                id: meta.id.as_str(),
                name: meta.name,
            })
            .collect()
    }

    /// render the stylesheet selecting palette colors by `data-theme` and the `dark` class
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();

        for id in Palette::ALL {
            let Some(colors) = self.get_colors(id) else {
                continue;
            };

            let selector = format!("[data-theme=\"{}\"]", id.as_str());
            let (light_sel, dark_sel) = if id == Palette::default() {
                (
                    format!(":root, {}", selector),
                    format!(":root.dark, .dark{}", selector),
                )
            } else {
                (selector.clone(), format!(".dark{}", selector))
            };

            Self::push_block(&mut css, &light_sel, &colors.light);
            Self::push_block(&mut css, &dark_sel, &colors.dark);
        }

        css
    }

    /// append one rule block
    fn push_block(css: &mut String, selector: &str, colors: &PaletteColors) {
        css.push_str(selector);
        css.push_str(" {\n");
        for line in colors.to_css_vars().lines() {
            css.push_str("  ");
            css.push_str(line);
            css.push('\n');
        }
        css.push_str("}\n");
    }
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_whitelisted_palette_is_registered() {
        let registry = PaletteRegistry::new();

        for palette in Palette::ALL {
            assert!(registry.get_metadata(palette).is_some(), "{palette}");
        }

        let ids: Vec<&str> = registry.list().iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                "palette-default",
                "palette-1",
                "palette-2",
                "palette-3",
                "palette-4",
                "palette-5"
            ]
        );
    }

    #[test]
    fn test_default_palette_has_no_text_gradient() {
        let registry = PaletteRegistry::new();

        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(
                registry.property(Palette::Default, mode, "--text-gradient-mid"),
                ""
            );
            assert!(!registry.property(Palette::Default, mode, "--primary").is_empty());
        }
    }

    #[test]
    fn test_modes_resolve_different_colors() {
        let registry = PaletteRegistry::new();

        assert_ne!(
            registry.property(Palette::Two, ThemeMode::Light, "--primary"),
            registry.property(Palette::Two, ThemeMode::Dark, "--primary")
        );
    }

    #[test]
    fn test_stylesheet_has_a_block_per_palette_and_mode() {
        let css = PaletteRegistry::new().stylesheet();

        assert!(css.starts_with(":root, [data-theme=\"palette-default\"] {\n"));
        assert!(css.contains(".dark[data-theme=\"palette-5\"] {\n"));
        assert_eq!(css.matches(" {\n").count(), 12);
    }
}
