//! the process-wide config, loaded on first use
//!
//! only the app shell reads from here; library code takes its settings as arguments.
use {
    crate::config::options::FolioCfg,
    color_eyre::{Result, eyre::eyre},
    std::sync::{LazyLock, RwLock, RwLockReadGuard},
};

/// global config instance
static CONFIG: LazyLock<RwLock<FolioCfg>> = LazyLock::new(|| {
    RwLock::new(FolioCfg::load().expect("!!!Failed to load configuration, this should NOT happen!!!"))
});

/// load the config now instead of on first access
pub fn init_config() -> Result<()> {
    let _l = config()?;
    Ok(())
}

/// get a ro ref to the config
pub fn config() -> Result<RwLockReadGuard<'static, FolioCfg>> {
    CONFIG
        .read()
        .map_err(|e| eyre!("Configuration lock poisoned: {}", e))
}

/// an owned copy of the current config, for handing to the server
pub fn snapshot() -> Result<FolioCfg> {
    Ok(config()?.clone())
}

/// get a specific config value with a default fallback
pub fn get_or_default<T, F>(getter: F, default: T) -> T
where
    F: FnOnce(&FolioCfg) -> Option<T>,
{
    config()
        .ok()
        .and_then(|cfg| getter(&cfg))
        .unwrap_or(default)
}
