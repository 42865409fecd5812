//! layered configuration
//!
//! embedded defaults, then the global `folio.toml`, then the nearest local
//! `folio.toml`, then `FOLIO_*` environment variables.
pub mod instance;
pub mod options;
pub mod validate;

pub use options::FolioCfg;
