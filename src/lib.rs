//! folio is a themeable, CMS-backed portfolio site
//!
//! the theme controller and contact form live here as plain state machines with
//! adapter traits at their edges, so the same logic drives the browser (`web`
//! feature), the CLI and the tests. the site server itself needs the `cli` feature.
#![warn(
    clippy::missing_docs_in_private_items,
    missing_docs,
    rustdoc::missing_crate_level_docs
)]

/// the user agent sent with outgoing requests
pub static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub mod cms;
pub mod config;
pub mod contact;
pub mod error;
pub mod macros;
pub mod theme;
pub mod utils;

#[cfg(feature = "cli")]
pub mod app;
#[cfg(feature = "cli")]
pub mod serve;
