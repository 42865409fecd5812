//! the application shell
pub mod cli;
pub mod core;
pub mod handlers;
pub mod logging;

pub use core::FolioApp;
