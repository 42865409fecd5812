//! error handling stuff
use thiserror::Error;

#[derive(Debug, Error)]
/// An error
pub enum FolioError {
    /// a report from color_eyre
    #[error("{0}")]
    EyreReport(#[from] color_eyre::Report),

    /// a reqwest error
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// a url parse error
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    /// a miette hook install error
    #[error("error installing miette hook: {0}")]
    MietteInstall(#[from] miette::InstallError),

    /// an addr parse error
    #[error("error parsing address: {0}")]
    ParseAddr(#[from] std::net::AddrParseError),

    /// a rocket error
    #[cfg(feature = "cli")]
    #[error("rocket error: {0}")]
    Rocket(Box<rocket::Error>),

    /// a custom error
    #[error("error: {0}")]
    Other(String),
}

impl From<String> for FolioError {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

#[cfg(feature = "cli")]
impl From<rocket::Error> for FolioError {
    fn from(value: rocket::Error) -> Self {
        Self::Rocket(Box::new(value))
    }
}

/// A result using [`FolioError`] as the `Err` variant
pub type Result<T, U = FolioError> = miette::Result<T, U>;

/// bail
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::FolioError::from(String::from($msg)))
    };

    ($err:expr $(,)?) => {
        return Err($crate::error::FolioError::from($err))
    };

    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::FolioError::from(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_port(raw: &str) -> Result<u16> {
        if raw.is_empty() {
            bail!("port must not be empty");
        }

        raw.parse::<u16>()
            .map_err(|e| FolioError::Other(format!("bad port {raw}: {e}")))
    }

    #[test]
    fn test_bail_literal() {
        let err = parse_port("").unwrap_err();
        assert_eq!(err.to_string(), "error: port must not be empty");
    }

    #[test]
    fn test_question_mark_conversions() {
        fn join(base: &str) -> Result<url::Url> {
            Ok(url::Url::parse(base)?.join("/api/contact")?)
        }

        fn addr(raw: &str) -> Result<std::net::IpAddr> {
            Ok(raw.parse()?)
        }

        assert!(matches!(join("not a url"), Err(FolioError::Url(_))));
        assert!(matches!(addr("localhost"), Err(FolioError::ParseAddr(_))));
        assert_eq!(join("http://x.test/a/").unwrap().as_str(), "http://x.test/api/contact");
    }

    #[test]
    fn test_string_conversion() {
        let err = FolioError::from("boom".to_string());
        assert!(matches!(err, FolioError::Other(ref m) if m == "boom"));
    }
}
