//! document reflection stuff
//!
//! the theme never touches a document directly. it describes the writes it
//! needs as [`DomEffect`]s and hands them to a [`Document`] adapter, which is
//! either the live browser document or a [`VirtualDocument`].
use {
    crate::theme::{Palette, ThemeMode, registry::PaletteRegistry},
    hashbrown::{HashMap, HashSet},
};

/// attribute on the document root holding the mode
pub const MODE_ATTRIBUTE: &str = "data-mode";
/// attribute on the document root holding the palette
pub const PALETTE_ATTRIBUTE: &str = "data-theme";
/// class on the document root present iff the mode is dark
pub const DARK_CLASS: &str = "dark";
/// selector of the favicon link the theme controls
pub const FAVICON_SELECTOR: &str = "link[data-theme-favicon]";

/// a single write against the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEffect {
    /// set an attribute on the document root
    SetRootAttribute {
        /// attribute name
        name: &'static str,
        /// attribute value
        value: String,
    },
    /// add or remove a class on the document root
    ToggleRootClass {
        /// class name
        class: &'static str,
        /// whether the class should be present
        enabled: bool,
    },
    /// point the themed favicon link at a new href
    SetFaviconHref(String),
}

/// the writes that reflect a mode onto the document root
pub fn reflect_mode(mode: ThemeMode) -> [DomEffect; 2] {
    [
        DomEffect::SetRootAttribute {
            name: MODE_ATTRIBUTE,
            value: mode.as_str().to_string(),
        },
        DomEffect::ToggleRootClass {
            class: DARK_CLASS,
            enabled: mode.is_dark(),
        },
    ]
}

/// the write that reflects a palette onto the document root
pub fn reflect_palette(palette: Palette) -> DomEffect {
    DomEffect::SetRootAttribute {
        name: PALETTE_ATTRIBUTE,
        value: palette.as_str().to_string(),
    }
}

/// the document side of the theme
pub trait Document {
    /// the trimmed computed value of a custom property on the root, empty when undefined
    fn computed_property(&self, name: &str) -> String;
    /// the current href of the themed favicon link, `None` when there is no such link
    fn favicon_href(&self) -> Option<String>;
    /// perform a write
    fn apply(&mut self, effect: &DomEffect);

    /// perform several writes in order
    fn apply_all(&mut self, effects: &[DomEffect]) {
        for effect in effects {
            self.apply(effect);
        }
    }
}

impl<D: Document + ?Sized> Document for &mut D {
    fn computed_property(&self, name: &str) -> String {
        (**self).computed_property(name)
    }

    fn favicon_href(&self) -> Option<String> {
        (**self).favicon_href()
    }

    fn apply(&mut self, effect: &DomEffect) {
        (**self).apply(effect)
    }
}

/// an in-memory document root plus favicon link
///
/// computed style is resolved the way the palette stylesheet would resolve it:
/// from the `data-theme` attribute and the `dark` class.
pub struct VirtualDocument {
    /// root attributes
    attributes: HashMap<&'static str, String>,
    /// root classes
    classes: HashSet<&'static str>,
    /// the themed favicon link href, `None` when the link is missing
    favicon: Option<String>,
    /// how many times the favicon href was written
    favicon_writes: usize,
    /// the palettes used to resolve computed style
    registry: PaletteRegistry,
}

impl VirtualDocument {
    /// make a document with a favicon link pointing at `href`
    pub fn new(href: &str) -> Self {
        Self {
            attributes: HashMap::new(),
            classes: HashSet::new(),
            favicon: Some(href.to_string()),
            favicon_writes: 0,
            registry: PaletteRegistry::new(),
        }
    }

    /// make a document without a themed favicon link
    pub fn without_favicon() -> Self {
        Self {
            favicon: None,
            ..Self::new("")
        }
    }

    /// replace the palettes used to resolve computed style
    pub fn with_registry(mut self, registry: PaletteRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// read a root attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// whether the root carries a class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// how many favicon writes happened so far
    pub fn favicon_writes(&self) -> usize {
        self.favicon_writes
    }
}

impl Document for VirtualDocument {
    fn computed_property(&self, name: &str) -> String {
        let Some(palette) = self.attribute(PALETTE_ATTRIBUTE).and_then(Palette::parse) else {
            return String::new();
        };

        let mode = if self.has_class(DARK_CLASS) {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        };

        self.registry.property(palette, mode, name)
    }

    fn favicon_href(&self) -> Option<String> {
        self.favicon.clone()
    }

    fn apply(&mut self, effect: &DomEffect) {
        match effect {
            DomEffect::SetRootAttribute { name, value } => {
                self.attributes.insert(*name, value.clone());
            }
            DomEffect::ToggleRootClass { class, enabled } => {
                if *enabled {
                    self.classes.insert(*class);
                } else {
                    self.classes.remove(*class);
                }
            }
            DomEffect::SetFaviconHref(href) => {
                if let Some(current) = self.favicon.as_mut() {
                    *current = href.clone();
                    self.favicon_writes += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_mode_toggles_dark_class() {
        let mut doc = VirtualDocument::new("/icon.svg");

        doc.apply_all(&reflect_mode(ThemeMode::Dark));
        assert!(doc.has_class(DARK_CLASS));
        assert_eq!(doc.attribute(MODE_ATTRIBUTE), Some("dark"));

        doc.apply_all(&reflect_mode(ThemeMode::Light));
        assert!(!doc.has_class(DARK_CLASS));
        assert_eq!(doc.attribute(MODE_ATTRIBUTE), Some("light"));
    }

    #[test]
    fn test_computed_style_follows_root_state() {
        let mut doc = VirtualDocument::new("/icon.svg");
        assert_eq!(doc.computed_property("--primary"), "");

        doc.apply(&reflect_palette(Palette::One));
        doc.apply_all(&reflect_mode(ThemeMode::Dark));
        let dark = doc.computed_property("--primary");

        doc.apply_all(&reflect_mode(ThemeMode::Light));
        let light = doc.computed_property("--primary");

        assert!(!dark.is_empty());
        assert_ne!(dark, light);
    }

    #[test]
    fn test_favicon_writes_need_a_link() {
        let mut doc = VirtualDocument::without_favicon();
        doc.apply(&DomEffect::SetFaviconHref("data:x".to_string()));

        assert_eq!(doc.favicon_href(), None);
        assert_eq!(doc.favicon_writes(), 0);
    }
}
