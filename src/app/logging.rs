//! logging stuff
use {
    crate::{
        config::options::{LoggingCfg, LoggingFormat},
        utils::string_to_log_level,
    },
    color_eyre::Result,
    tracing::{info, subscriber},
    tracing_subscriber::FmtSubscriber,
};

/// install the global subscriber described by the `logging` section
///
/// does nothing when logging is disabled
pub fn setup(cfg: &LoggingCfg) -> Result<()> {
    if !cfg.enable.unwrap_or(true) {
        return Ok(());
    }

    let max_level = string_to_log_level(cfg.level.as_deref().unwrap_or("info"));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_ansi(cfg.ansi.unwrap_or(true))
        .with_line_number(cfg.line_numbers.unwrap_or(false))
        .with_target(cfg.event_targets.unwrap_or(false));

    match cfg.format.unwrap_or_default() {
        LoggingFormat::Pretty => {
            subscriber::set_global_default(subscriber.pretty().finish())?;
        }
        LoggingFormat::Compact => {
            subscriber::set_global_default(subscriber.compact().finish())?;
        }
    }

    info!("Logging setup successfully");
    Ok(())
}
