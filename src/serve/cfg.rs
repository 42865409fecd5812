//! where and how the site server listens
use {
    crate::{bail, config::options::ServerCfg, error::Result},
    std::{
        net::{IpAddr, Ipv4Addr, SocketAddr},
        path::PathBuf,
    },
};

/// the address used when none is given
const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000);

/// resolved server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// where to listen
    pub bind_address: SocketAddr,
    /// directory mounted at `/static`, if it exists
    pub static_dir: Option<PathBuf>,
    /// open the site in a browser once listening
    pub open_browser: bool,
}

impl ServerConfig {
    /// start building a config
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// build from the `server` config section
    pub fn from_settings(settings: &ServerCfg) -> Result<Self> {
        let mut builder = Self::builder().open_browser(settings.auto_open_browser.unwrap_or(false));

        if let Some(address) = &settings.address {
            let ip: IpAddr = address.parse()?;
            builder = builder.bind_address(SocketAddr::new(ip, settings.port.unwrap_or(8000)));
        }

        if let Some(dir) = &settings.static_dir {
            builder = builder.static_dir(PathBuf::from(dir));
        }

        builder.build()
    }

    /// where to listen
    pub fn bind_address(&self) -> &SocketAddr {
        &self.bind_address
    }

    /// the url the site is reachable at
    pub fn site_url(&self) -> String {
        format!("http://{}", self.bind_address)
    }
}

/// builds a [`ServerConfig`]
#[derive(Default)]
pub struct ServerConfigBuilder {
    /// where to listen
    bind_address: Option<SocketAddr>,
    /// static directory
    static_dir: Option<PathBuf>,
    /// open a browser
    open_browser: bool,
}

impl ServerConfigBuilder {
    /// a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// set the listen address
    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = Some(addr);
        self
    }

    /// set the static directory
    pub fn static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }

    /// open a browser once listening
    pub fn open_browser(mut self, enabled: bool) -> Self {
        self.open_browser = enabled;
        self
    }

    /// finish the config
    ///
    /// a missing static directory is dropped rather than treated as an error,
    /// since most sites don't have one
    pub fn build(self) -> Result<ServerConfig> {
        let bind_address = self.bind_address.unwrap_or(DEFAULT_BIND);

        if bind_address.port() == 0 && self.open_browser {
            bail!("can't open a browser on a random port");
        }

        let static_dir = self.static_dir.filter(|dir| dir.is_dir());

        Ok(ServerConfig {
            bind_address,
            static_dir,
            open_browser: self.open_browser,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::builder().build().unwrap();

        assert_eq!(cfg.site_url(), "http://127.0.0.1:8000");
        assert!(cfg.static_dir.is_none());
        assert!(!cfg.open_browser);
    }

    #[test]
    fn test_static_dir_kept_only_if_present() {
        let dir = tempfile::tempdir().unwrap();

        let present = ServerConfig::builder()
            .static_dir(dir.path().to_path_buf())
            .build()
            .unwrap();
        let missing = ServerConfig::builder()
            .static_dir(dir.path().join("nope"))
            .build()
            .unwrap();

        assert_eq!(present.static_dir.as_deref(), Some(dir.path()));
        assert!(missing.static_dir.is_none());
    }

    #[test]
    fn test_from_settings() {
        let settings = ServerCfg {
            address: Some("0.0.0.0".to_string()),
            port: Some(3000),
            ..Default::default()
        };

        let cfg = ServerConfig::from_settings(&settings).unwrap();
        assert_eq!(cfg.bind_address.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_bad_address_is_an_error() {
        let settings = ServerCfg {
            address: Some("localhost:abc".to_string()),
            ..Default::default()
        };

        assert!(ServerConfig::from_settings(&settings).is_err());
    }
}
