//! every available configuration option and its type is listed in this file
use {
    crate::{
        cms::{CmsProject, SiteSettings},
        config::validate::{Validate, format_validation_errors},
        theme::{favicon::StaticFavicons, prehydrate::PrehydrateConfig, storage::StorageKeys},
    },
    color_eyre::{
        Section, SectionExt,
        eyre::{Context, OptionExt, Result, eyre},
    },
    config::{Config, ConfigBuilder},
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    smart_default::SmartDefault,
    std::{
        path::{Path, PathBuf},
        time::Duration,
    },
    tracing::info,
};

/// the file name looked up globally and in the current directory's ancestors
pub const CONFIG_FILE_NAME: &str = "folio.toml";

/// the prefix for environment overrides, e.g. `FOLIO_SERVER__PORT`
pub const ENV_PREFIX: &str = "FOLIO";

/// Settings for the site server
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct ServerCfg {
    /// The address to bind to
    #[default(Some("127.0.0.1".to_string()))]
    pub address: Option<String>,

    /// The port to listen on
    #[default(Some(8000))]
    pub port: Option<u16>,

    /// Directory served under `/static`, skipped if it doesn't exist
    #[default(Some("public".to_string()))]
    pub static_dir: Option<String>,

    /// Open the site in the default browser once the server is up
    #[default(Some(false))]
    pub auto_open_browser: Option<bool>,
}

/// Settings for theme persistence and the favicon
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct ThemeCfg {
    /// Storage key holding the mode
    #[default(Some(crate::theme::storage::MODE_STORAGE_KEY.to_string()))]
    pub mode_key: Option<String>,

    /// Storage key holding the palette
    #[default(Some(crate::theme::storage::PALETTE_STORAGE_KEY.to_string()))]
    pub palette_key: Option<String>,

    /// Path of the recolorable favicon template
    #[default(Some(crate::theme::favicon::TEMPLATE_PATH.to_string()))]
    pub template_path: Option<String>,

    /// Path of the static favicon used in dark mode
    #[default(Some(crate::theme::favicon::STATIC_DARK_FAVICON.to_string()))]
    pub dark_favicon: Option<String>,

    /// Path of the static favicon used in light mode
    #[default(Some(crate::theme::favicon::STATIC_LIGHT_FAVICON.to_string()))]
    pub light_favicon: Option<String>,
}

impl ThemeCfg {
    /// the storage keys, falling back to the built-in ones
    pub fn storage_keys(&self) -> StorageKeys {
        let defaults = StorageKeys::default();

        StorageKeys {
            mode: self.mode_key.clone().unwrap_or(defaults.mode),
            palette: self.palette_key.clone().unwrap_or(defaults.palette),
        }
    }

    /// the static favicons, falling back to the built-in ones
    pub fn static_favicons(&self) -> StaticFavicons {
        let defaults = StaticFavicons::default();

        StaticFavicons {
            dark: self.dark_favicon.clone().unwrap_or(defaults.dark),
            light: self.light_favicon.clone().unwrap_or(defaults.light),
        }
    }

    /// what the inline pre-hydration script needs
    pub fn prehydrate(&self) -> PrehydrateConfig {
        PrehydrateConfig {
            keys: self.storage_keys(),
            favicons: self.static_favicons(),
        }
    }
}

/// Settings for the contact form and its relay
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct ContactCfg {
    /// The path the contact form posts to
    #[default(Some(crate::contact::endpoint::CONTACT_PATH.to_string()))]
    pub endpoint: Option<String>,

    /// Webhook that accepted messages are posted to as json.
    /// Messages are only logged when this is unset
    #[default(None)]
    pub relay_url: Option<String>,

    /// How long to wait on the relay, in seconds
    #[default(Some(10))]
    pub relay_timeout_secs: Option<u64>,
}

/// Settings for the hosted content store
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct CmsCfg {
    /// Read site content from the store
    #[default(Some(false))]
    pub enabled: Option<bool>,

    /// The project id
    #[default(Some(String::new()))]
    pub project_id: Option<String>,

    /// The dataset to query
    #[default(Some("production".to_string()))]
    pub dataset: Option<String>,

    /// The api version date
    #[default(Some("2024-01-01".to_string()))]
    pub api_version: Option<String>,

    /// Read through the cached cdn
    #[default(Some(true))]
    pub use_cdn: Option<bool>,

    /// Read token for private datasets
    #[default(None)]
    pub token: Option<String>,
}

impl CmsCfg {
    /// the project to read, `None` when the store is disabled
    pub fn project(&self) -> Option<CmsProject> {
        if !self.enabled.unwrap_or(false) {
            return None;
        }

        let defaults = Self::default();
        Some(CmsProject {
            project_id: self.project_id.clone().unwrap_or_default(),
            dataset: self
                .dataset
                .clone()
                .or(defaults.dataset)
                .unwrap_or_default(),
            api_version: self
                .api_version
                .clone()
                .or(defaults.api_version)
                .unwrap_or_default(),
            use_cdn: self.use_cdn.unwrap_or(true),
        })
    }
}

/// Site settings used when the content store is off or unreachable
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct SiteCfg {
    /// The site title
    #[default(Some("Portfolio".to_string()))]
    pub title: Option<String>,

    /// The site description
    #[default(Some("Projects, résumé and contact".to_string()))]
    pub description: Option<String>,

    /// The public contact address
    #[default(Some(String::new()))]
    pub contact_email: Option<String>,

    /// Where the owner is based
    #[default(Some("Fayetteville, AR".to_string()))]
    pub location: Option<String>,
}

impl SiteCfg {
    /// these settings as a settings document
    pub fn settings(&self) -> SiteSettings {
        let defaults = SiteSettings::default();

        SiteSettings {
            site_title: self.title.clone().unwrap_or(defaults.site_title),
            description: self.description.clone().unwrap_or(defaults.description),
            contact_email: self.contact_email.clone().unwrap_or(defaults.contact_email),
            location: self.location.clone().unwrap_or(defaults.location),
            ..defaults
        }
    }
}

/// Configuration options for outgoing HTTP requests
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct HttpCfg {
    /// Request timeout in seconds
    #[default(Some(15))]
    pub timeout_secs: Option<u64>,
}

impl HttpCfg {
    /// the request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(15))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, SmartDefault)]
/// The format to log in
pub enum LoggingFormat {
    /// Use the compact output format
    Compact,

    /// Use an excessively pretty output format
    #[default]
    Pretty,
}

/// Settings for logging
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct LoggingCfg {
    /// Enable logging
    #[default(Some(true))]
    pub enable: Option<bool>,

    /// The max level to log at
    #[default(Some("info".to_string()))]
    pub level: Option<String>,

    /// The output format
    #[default(Some(LoggingFormat::Pretty))]
    pub format: Option<LoggingFormat>,

    /// Enable ANSI escape codes for colors and stuff
    #[default(Some(true))]
    pub ansi: Option<bool>,

    /// Display event targets in log messages
    #[default(Some(false))]
    pub event_targets: Option<bool>,

    /// Display line numbers in log messages
    #[default(Some(false))]
    pub line_numbers: Option<bool>,
}

/// The full configuration
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[schemars(default)]
pub struct FolioCfg {
    /// Site server settings
    #[default(Some(ServerCfg::default()))]
    pub server: Option<ServerCfg>,

    /// Theme settings
    #[default(Some(ThemeCfg::default()))]
    pub theme: Option<ThemeCfg>,

    /// Contact form settings
    #[default(Some(ContactCfg::default()))]
    pub contact: Option<ContactCfg>,

    /// Content store settings
    #[default(Some(CmsCfg::default()))]
    pub cms: Option<CmsCfg>,

    /// Fallback site settings
    #[default(Some(SiteCfg::default()))]
    pub site: Option<SiteCfg>,

    /// Outgoing HTTP settings
    #[default(Some(HttpCfg::default()))]
    pub http: Option<HttpCfg>,

    /// Logging settings
    #[default(Some(LoggingCfg::default()))]
    pub logging: Option<LoggingCfg>,
}

impl FolioCfg {
    /// load config from default locations
    ///
    /// load prio: env > local > global > defaults
    pub fn load() -> Result<Self> {
        let global_config_path = Self::global_config_path()?;
        let defaults = Self::load_defaults()?;
        let local_config = Self::find_local_config()?;

        let cfg = Self::load_layers(&defaults, Some(&global_config_path), local_config.as_deref())?;

        if !global_config_path.exists() {
            Self::create_default_config(&global_config_path, &defaults)?;
        }

        Ok(cfg)
    }

    /// stack the given files and the environment on top of `defaults`
    pub fn load_layers(
        defaults: &FolioCfg,
        global: Option<&Path>,
        local: Option<&Path>,
    ) -> Result<Self> {
        let mut builder = Self::create_builder(defaults)?;

        for path in [global, local].into_iter().flatten() {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = builder.build().wrap_err("Failed to build configuration")?;
        let cfg: FolioCfg = settings
            .try_deserialize::<FolioCfg>()
            .wrap_err("Failed to deserialize configuration")?;

        cfg.run_validation()?;
        info!("Configuration validation successful");

        Ok(cfg)
    }

    /// get the global config file path
    pub fn global_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_eyre("Unable to determine system config directory")
            .suggestion("Ensure XDG_CONFIG_HOME or HOME environment variables are set")
            .suggestion("On Windows, APPDATA should be set")?;

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// load default config from the embedded default config file
    pub fn load_defaults() -> Result<Self> {
        toml::from_str(include_str!("../../resources/folio.default.toml"))
            .wrap_err("Failed to parse embedded default configuration")
            .note("This is a bug - the embedded defaults are malformed")
    }

    /// create a config builder with defaults
    fn create_builder(defaults: &FolioCfg) -> Result<ConfigBuilder<config::builder::DefaultState>> {
        let config_source = Config::try_from(defaults)
            .wrap_err("Failed to convert default config struct to config source")?;

        Ok(Config::builder().add_source(config_source))
    }

    /// run validation and return a pretty error if it fails
    fn run_validation(&self) -> Result<()> {
        self.validate()
            .map_err(|errors| eyre!(format_validation_errors(&errors)))
            .wrap_err("config validation failed")
            .suggestion("Check your folio.toml for invalid values")
            .suggestion("Run with --gen-default to see valid options")
    }

    /// find the nearest local config file
    fn find_local_config() -> Result<Option<PathBuf>> {
        let curr_dir = std::env::current_dir()
            .wrap_err("Failed to get current working directory")
            .suggestion("Ensure the current directory exists and is accessible")?;

        Ok(Self::find_config_in(&curr_dir))
    }

    /// walk up from `start` looking for a config file
    pub fn find_config_in(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|path| path.exists())
    }

    /// create the default config file
    fn create_default_config(path: &Path, defaults: &FolioCfg) -> Result<()> {
        let config_dir = path
            .parent()
            .ok_or_eyre("Unable to determine parent directory of config path")?;

        std::fs::create_dir_all(config_dir)
            .wrap_err("Failed to create config directory")
            .with_section(|| format!("{}", config_dir.display()).header("Directory:"))?;

        defaults
            .save_to_file(path)
            .wrap_err("Failed to write default configuration file")?;

        Ok(())
    }

    /// save config to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let toml_str =
            toml::to_string_pretty(self).wrap_err("Failed to serialize config to TOML")?;

        std::fs::write(path, &toml_str)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))
            .with_section(|| path.display().to_string().header("File path"))
            .with_section(|| format!("{} bytes", toml_str.len()).header("Content size:"))?;

        Ok(())
    }

    /// save config to the global config location
    pub fn save(&self) -> Result<()> {
        let path = Self::global_config_path()?;
        self.save_to_file(path)
    }
}
