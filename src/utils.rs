//! misc helpers
use tracing::level_filters::LevelFilter;

/// convert a string to a log level filter
///
/// accepts the full names and their short forms; anything unknown logs errors only.
pub fn string_to_log_level(lvl: &str) -> LevelFilter {
    match lvl.trim().to_lowercase().as_str() {
        "d" | "debug" | "dbg" => LevelFilter::DEBUG,
        "t" | "trace" | "trc" => LevelFilter::TRACE,
        "e" | "error" | "err" => LevelFilter::ERROR,
        "i" | "info" | "inf" => LevelFilter::INFO,
        "w" | "warn" | "wrn" => LevelFilter::WARN,
        "off" | "none" => LevelFilter::OFF,
        _ => LevelFilter::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_log_level() {
        assert_eq!(string_to_log_level("info"), LevelFilter::INFO);
        assert_eq!(string_to_log_level(" DBG "), LevelFilter::DEBUG);
        assert_eq!(string_to_log_level("off"), LevelFilter::OFF);
        assert_eq!(string_to_log_level("loud"), LevelFilter::ERROR);
    }
}
