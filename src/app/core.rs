//! the core app
use {
    super::{handlers::Handlers, logging},
    crate::{
        app::cli::{Cli, Command},
        config::instance::{init_config, snapshot},
        error::Result,
        getopt,
    },
    clap::Parser,
    tracing::info,
};

/// the folio app
pub struct FolioApp {
    /// the subcommand handlers
    handlers: Handlers,
    /// what to run
    command: Command,
}

impl FolioApp {
    /// initialize folio
    ///
    /// - 1. installs the miette error handler hook
    /// - 2. parses the cli, exiting early for the config generation flags
    /// - 3. loads the config file
    /// - 4. sets up logging
    ///
    /// returns `None` when the cli already did everything asked of it
    ///
    /// # Errors
    ///
    /// returns an error if the miette hook can't be installed
    /// returns an error if config generation fails
    /// returns an error if the configuration file fails to load
    /// returns an error if it fails to setup logging
    pub fn init() -> Result<Option<Self>> {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::MietteHandlerOpts::new()
                    .terminal_links(true)
                    .unicode(true)
                    .context_lines(3)
                    .tab_width(4)
                    .build(),
            )
        }))?;

        let cli = Cli::parse();
        if cli.run_generators()? {
            return Ok(None);
        }

        init_config()?;
        logging::setup(&getopt!(section logging))?;

        info!(
            "Starting {} v{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        );

        Ok(Some(Self {
            handlers: Handlers::new(snapshot()?),
            command: cli.command(),
        }))
    }

    /// run the chosen subcommand
    ///
    /// # Errors
    ///
    /// returns an error if the subcommand fails
    pub async fn run(self) -> Result<()> {
        self.handlers.run(self.command).await?;
        Ok(())
    }
}
