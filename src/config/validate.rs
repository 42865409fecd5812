//! configuration validation stuff
use {
    crate::{config::options::*, theme::storage::MODE_STORAGE_KEY, validator, validator_nested},
    color_eyre::Result,
};

/// trait for validating config structs
pub trait Validate {
    /// validate the config
    fn validate(&self) -> Result<(), Vec<String>>;

    /// check if the config is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// whether a string is an absolute site path
fn is_site_path(v: &str) -> bool {
    v.starts_with('/') && !v.contains(char::is_whitespace)
}

/// whether a string is an http(s) url
fn is_http_url(v: &str) -> bool {
    url::Url::parse(v).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

validator! { ServerCfg,
    address => |v: &String| v.parse::<std::net::IpAddr>().is_ok(),
        "must be a valid ip address";
    port => |v: &u16| *v > 0,
        "must be a valid port (1-65535)";
    static_dir => |v: &String| !v.trim().is_empty(),
        "must not be empty";
}

impl Validate for ThemeCfg {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = Vec::new();

        for (name, key) in [("mode_key", &self.mode_key), ("palette_key", &self.palette_key)] {
            if let Some(v) = key
                && v.trim().is_empty()
            {
                errors.push(format!("{}: must not be empty", name));
            }
        }

        if let (Some(mode), Some(palette)) = (&self.mode_key, &self.palette_key)
            && mode == palette
        {
            errors.push(format!(
                "palette_key: must differ from mode_key (default mode key is '{}')",
                MODE_STORAGE_KEY
            ));
        }

        for (name, path) in [
            ("template_path", &self.template_path),
            ("dark_favicon", &self.dark_favicon),
            ("light_favicon", &self.light_favicon),
        ] {
            if let Some(v) = path
                && !is_site_path(v)
            {
                errors.push(format!("{}: must be an absolute path starting with '/'", name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

validator! { ContactCfg,
    endpoint => |v: &String| is_site_path(v),
        "must be an absolute path starting with '/'";
    relay_url => |v: &String| is_http_url(v),
        "must be an http or https url";
    relay_timeout_secs => |v: &u64| *v > 0,
        "must be greater than 0";
}

impl Validate for CmsCfg {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = Vec::new();

        if let Some(true) = self.enabled
            && self.project_id.as_ref().is_none_or(|s| s.trim().is_empty())
        {
            errors.push("project_id: required when the content store is enabled".to_string());
        }

        if let Some(ref v) = self.project_id
            && !v.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            errors.push("project_id: must only contain letters, digits and '-'".to_string());
        }

        if let Some(ref v) = self.dataset
            && v.trim().is_empty()
        {
            errors.push("dataset: must not be empty".to_string());
        }

        if let Some(ref v) = self.api_version
            && chrono::NaiveDate::parse_from_str(v, "%Y-%m-%d").is_err()
        {
            errors.push("api_version: must be a date like 2024-01-01".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

validator! { SiteCfg,
    title => |v: &String| !v.trim().is_empty(),
        "must not be empty";
}

validator! { HttpCfg,
    timeout_secs => |v: &u64| *v > 0,
        "must be greater than 0";
}

/// valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

validator! { LoggingCfg,
    level => |v: &String| VALID_LOG_LEVELS.contains(&v.to_lowercase().as_str()),
        "must be one of: trace, debug, info, warn, error, off";
}

validator_nested! { FolioCfg,
    fields: {}
    nested: {
        server;
        theme;
        contact;
        cms;
        site;
        http;
        logging;
    }
}

/// format validation errors for display
pub fn format_validation_errors(errors: &[String]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, err) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, err));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FolioCfg::default().is_valid());
    }

    #[test]
    fn test_nested_errors_are_prefixed() {
        let cfg = FolioCfg {
            server: Some(ServerCfg {
                port: Some(0),
                ..Default::default()
            }),
            logging: Some(LoggingCfg {
                level: Some("loud".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let errors = cfg.validate().unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("server.port:"));
        assert!(errors[1].starts_with("logging.level:"));
    }

    #[test]
    fn test_enabled_cms_needs_project() {
        let cms = CmsCfg {
            enabled: Some(true),
            ..Default::default()
        };

        assert_eq!(
            cms.validate().unwrap_err(),
            vec!["project_id: required when the content store is enabled".to_string()]
        );
    }

    #[test]
    fn test_theme_keys_must_differ() {
        let theme = ThemeCfg {
            palette_key: Some(MODE_STORAGE_KEY.to_string()),
            ..Default::default()
        };

        assert!(!theme.is_valid());
    }

    #[test]
    fn test_relay_url_must_be_http() {
        let contact = ContactCfg {
            relay_url: Some("ftp://example.com".to_string()),
            ..Default::default()
        };

        assert!(!contact.is_valid());
    }

    #[test]
    fn test_format_validation_errors() {
        let formatted = format_validation_errors(&["a: bad".to_string(), "b: worse".to_string()]);

        assert_eq!(
            formatted,
            "Configuration validation failed:\n  1. a: bad\n  2. b: worse\n"
        );
    }
}
