//! the site server
pub mod assets;
pub mod cfg;
pub mod routes;
pub mod server;

pub use {cfg::ServerConfig, routes::AppState, server::SiteServer};
