//! files baked into the binary

/// the page shell
pub const INDEX_HTML: &str = include_str!("../../resources/site/index.html");
/// the base stylesheet, palettes are spliced in at [`PALETTE_MARKER`]
pub const STYLES_CSS: &str = include_str!("../../resources/site/styles.css");
/// where the palette stylesheet goes
pub const PALETTE_MARKER: &str = "/* {{PALETTE_CSS}} */";

/// the recolorable logo
pub const LOGO_TEMPLATE: &str = include_str!("../../resources/brand/mfj-logo-big.svg");
/// the white-on-black logo
pub const LOGO_DARK: &str = include_str!("../../resources/brand/mfj-logo-big-white-blackbg.svg");
/// the black-on-white logo
pub const LOGO_LIGHT: &str = include_str!("../../resources/brand/mfj-logo-big-black-whitebg.svg");
