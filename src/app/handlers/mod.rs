//! subcommand handlers
mod contact;
mod favicon;
mod serve;

pub use {contact::send_message, favicon::favicon_for};

use crate::{app::cli::Command, config::options::FolioCfg};

/// runs subcommands against a config snapshot
pub struct Handlers {
    /// the config as loaded at startup
    pub(crate) cfg: FolioCfg,
}

impl Handlers {
    /// make a new set of handlers
    pub fn new(cfg: FolioCfg) -> Self {
        Self { cfg }
    }

    /// run one subcommand
    ///
    /// # Errors
    ///
    /// returns an error if the subcommand fails
    pub async fn run(&self, command: Command) -> color_eyre::Result<()> {
        match command {
            Command::Serve { open } => self.serve(open).await,
            Command::Favicon { mode, palette } => self.print_favicon(mode, palette).await,
            Command::Contact {
                name,
                email,
                message,
                url,
            } => self.contact(&name, &email, &message, url.as_deref()).await,
        }
    }
}
