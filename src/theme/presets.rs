//! the built-in palettes
use crate::theme::{Palette, PaletteDef, colors::*};

macro_rules! impl_palette {
    ($name:ident, $id:expr, $display_name:expr, $colors:expr) => {
        #[doc = concat!("the ", $display_name, " palette")]
        #[derive(Clone, Default)]
        pub struct $name;

        impl PaletteDef for $name {
            fn id() -> Palette {
                $id
            }

            fn name() -> &'static str {
                $display_name
            }

            fn colors() -> ModeColors {
                $colors
            }
        }
    };
}

/// shorthand for the core colors
fn core(primary: &str, background: &str, foreground: &str) -> CoreColors {
    CoreColors {
        primary: primary.to_string(),
        background: background.to_string(),
        foreground: foreground.to_string(),
    }
}

/// shorthand for a full text gradient
fn gradient(start: &str, mid: &str, end: &str) -> TextGradient {
    TextGradient {
        start: Some(start.to_string()),
        mid: Some(mid.to_string()),
        end: Some(end.to_string()),
    }
}

/// shorthand for a full backdrop
fn backdrop(top: &str, bottom: &str, radial_1: &str, radial_2: &str) -> BackdropColors {
    BackdropColors {
        top: Some(top.to_string()),
        bottom: Some(bottom.to_string()),
        radial_1: Some(radial_1.to_string()),
        radial_2: Some(radial_2.to_string()),
    }
}

impl_palette!(Neutral, Palette::Default, "Neutral", {
    ModeColors {
        light: PaletteColors::new(core("#171717", "#ffffff", "#0a0a0a"))
            .with_backdrop(backdrop("#ffffff", "#f5f5f5", "#e5e5e5", "#f0f0f0")),
        dark: PaletteColors::new(core("#e5e5e5", "#0a0a0a", "#fafafa"))
            .with_backdrop(backdrop("#0a0a0a", "#111111", "#1f1f1f", "#171717")),
    }
});

impl_palette!(Ember, Palette::One, "Ember", {
    ModeColors {
        light: PaletteColors::new(core("#c2410c", "#fffaf5", "#1c1917"))
            .with_gradient(gradient("#ea580c", "#dc2626", "#db2777"))
            .with_backdrop(backdrop("#fffaf5", "#fff1e6", "#fed7aa", "#fecdd3")),
        dark: PaletteColors::new(core("#fb923c", "#0c0a09", "#fafaf9"))
            .with_gradient(gradient("#fdba74", "#f97316", "#f43f5e"))
            .with_backdrop(backdrop("#0c0a09", "#1c1210", "#7c2d1240", "#9f123940")),
    }
});

impl_palette!(Lagoon, Palette::Two, "Lagoon", {
    ModeColors {
        light: PaletteColors::new(core("#0e7490", "#f5fdff", "#082f49"))
            .with_gradient(gradient("#0891b2", "#0d9488", "#2563eb"))
            .with_backdrop(backdrop("#f5fdff", "#e6f7fb", "#a5f3fc", "#bfdbfe")),
        dark: PaletteColors::new(core("#22d3ee", "#04121a", "#ecfeff"))
            .with_gradient(gradient("#67e8f9", "#2dd4bf", "#60a5fa"))
            .with_backdrop(backdrop("#04121a", "#061a24", "#155e7540", "#1e3a8a40")),
    }
});

impl_palette!(Grove, Palette::Three, "Grove", {
    ModeColors {
        light: PaletteColors::new(core("#15803d", "#f7fdf8", "#052e16"))
            .with_gradient(gradient("#16a34a", "#65a30d", "#0d9488"))
            .with_backdrop(backdrop("#f7fdf8", "#ecfdf3", "#bbf7d0", "#d9f99d")),
        dark: PaletteColors::new(core("#4ade80", "#050f08", "#f0fdf4"))
            .with_gradient(gradient("#86efac", "#a3e635", "#2dd4bf"))
            .with_backdrop(backdrop("#050f08", "#07170c", "#14532d40", "#3f620740")),
    }
});

impl_palette!(Orchid, Palette::Four, "Orchid", {
    ModeColors {
        light: PaletteColors::new(core("#7e22ce", "#fcf8ff", "#2e1065"))
            .with_gradient(gradient("#9333ea", "#c026d3", "#db2777"))
            .with_backdrop(backdrop("#fcf8ff", "#f5edff", "#e9d5ff", "#fbcfe8")),
        dark: PaletteColors::new(core("#c084fc", "#0d0614", "#faf5ff"))
            .with_gradient(gradient("#d8b4fe", "#e879f9", "#f472b6"))
            .with_backdrop(backdrop("#0d0614", "#150a20", "#581c8740", "#83184340")),
    }
});

impl_palette!(Dusk, Palette::Five, "Dusk", {
    ModeColors {
        light: PaletteColors::new(core("#4338ca", "#f8f9ff", "#1e1b4b"))
            .with_gradient(gradient("#4f46e5", "#7c3aed", "#0284c7"))
            .with_backdrop(backdrop("#f8f9ff", "#eef0ff", "#c7d2fe", "#bae6fd")),
        dark: PaletteColors::new(core("#818cf8", "#07081a", "#eef2ff"))
            .with_gradient(gradient("#a5b4fc", "#a78bfa", "#38bdf8"))
            .with_backdrop(backdrop("#07081a", "#0c0e26", "#3730a340", "#07598540")),
    }
});
