//! palette color stuff

/// the custom properties the favicon accent is read from, highest priority first
pub const ACCENT_PROPERTIES: [&str; 4] = [
    "--text-gradient-mid",
    "--text-gradient-start",
    "--text-gradient-end",
    "--primary",
];

/// the core colors every palette needs
#[derive(Debug, Clone)]
pub struct CoreColors {
    /// main accent color
    pub primary: String,
    /// page background color
    pub background: String,
    /// main text color
    pub foreground: String,
}

/// optional gradient used for headline text
#[derive(Debug, Clone, Default)]
pub struct TextGradient {
    /// gradient start
    pub start: Option<String>,
    /// gradient middle
    pub mid: Option<String>,
    /// gradient end
    pub end: Option<String>,
}

/// optional page background layers
#[derive(Debug, Clone, Default)]
pub struct BackdropColors {
    /// top of the linear backdrop
    pub top: Option<String>,
    /// bottom of the linear backdrop
    pub bottom: Option<String>,
    /// first radial glow
    pub radial_1: Option<String>,
    /// second radial glow
    pub radial_2: Option<String>,
}

/// complete color set for one mode of a palette
#[derive(Debug, Clone)]
pub struct PaletteColors {
    /// required core colors
    pub core: CoreColors,
    /// optional text gradient
    pub gradient: TextGradient,
    /// optional backdrop
    pub backdrop: BackdropColors,
}

impl PaletteColors {
    /// make new palette colors
    pub fn new(core: CoreColors) -> Self {
        Self {
            core,
            gradient: TextGradient::default(),
            backdrop: BackdropColors::default(),
        }
    }

    /// set the text gradient
    pub fn with_gradient(mut self, gradient: TextGradient) -> Self {
        self.gradient = gradient;
        self
    }

    /// set the backdrop colors
    pub fn with_backdrop(mut self, backdrop: BackdropColors) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// every css variable this color set defines, in declaration order
    pub fn vars(&self) -> Vec<(&'static str, &str)> {
        let mut vars = vec![
            ("--primary", self.core.primary.as_str()),
            ("--background", self.core.background.as_str()),
            ("--foreground", self.core.foreground.as_str()),
        ];

        let optional = [
            ("--text-gradient-start", &self.gradient.start),
            ("--text-gradient-mid", &self.gradient.mid),
            ("--text-gradient-end", &self.gradient.end),
            ("--gradient-top", &self.backdrop.top),
            ("--gradient-bottom", &self.backdrop.bottom),
            ("--gradient-radial-1", &self.backdrop.radial_1),
            ("--gradient-radial-2", &self.backdrop.radial_2),
        ];

        vars.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.as_deref().map(|v| (name, v))),
        );

        vars
    }

    /// look up a single css variable, an undefined variable computes to the empty string
    pub fn property(&self, name: &str) -> &str {
        self.vars()
            .into_iter()
            .find(|(var, _)| *var == name)
            .map(|(_, value)| value)
            .unwrap_or("")
    }

    /// convert the colors to css declarations
    pub fn to_css_vars(&self) -> String {
        let mut css = String::new();

        for (name, value) in self.vars() {
            css.push_str(&format!("{}: {};\n", name, value));
        }

        css
    }
}

/// the light and dark color sets of a palette
#[derive(Debug, Clone)]
pub struct ModeColors {
    /// colors used in light mode
    pub light: PaletteColors,
    /// colors used in dark mode
    pub dark: PaletteColors,
}

impl ModeColors {
    /// pick the color set for a mode
    pub fn for_mode(&self, mode: super::ThemeMode) -> &PaletteColors {
        if mode.is_dark() { &self.dark } else { &self.light }
    }
}
