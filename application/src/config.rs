//! [`Config`]-related definitions.

use std::{path::PathBuf, sync::Arc, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::{
    domain::upload,
    infra::{gateway, Backend, Http, Local},
};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Entity store configuration.
    pub gateway: Gateway,

    /// List screens configuration.
    pub list: List,

    /// File upload configuration.
    pub upload: upload::Policy,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Kind of the entity store.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// REST API.
    #[default]
    Http,

    /// JSON files in a local directory.
    Local,
}

/// Entity store configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Gateway {
    /// [`GatewayKind`] to use.
    pub kind: GatewayKind,

    /// REST API configuration.
    pub http: HttpGateway,

    /// Local store configuration.
    pub local: LocalGateway,
}

impl Gateway {
    /// Builds the configured [`Backend`].
    ///
    /// # Errors
    ///
    /// If failed to initialize the HTTP client.
    pub fn build(self) -> Result<Backend, Traced<gateway::Error>> {
        Ok(match self.kind {
            GatewayKind::Http => {
                let http = Http::new(&self.http.into())
                    .map_err(tracerr::map_from_and_wrap!(=> gateway::Error))?
                    .with_progress(Arc::new(|file, percent| {
                        log::info!("uploading `{file}`: {percent}%");
                    }));
                Backend::Http(http)
            }
            GatewayKind::Local => {
                log::debug!(
                    "storing data in `{}`",
                    self.local.dir.display(),
                );
                Backend::Local(Local::new(gateway::local::FileStorage::new(
                    self.local.dir,
                )))
            }
        })
    }
}

/// REST API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct HttpGateway {
    /// Base URL of the REST API.
    #[default("http://localhost:8080/api".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<HttpGateway> for gateway::http::Config {
    fn from(value: HttpGateway) -> Self {
        let HttpGateway { base_url, timeout } = value;
        Self { base_url, timeout }
    }
}

/// Local store configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct LocalGateway {
    /// Directory to keep the JSON files in.
    #[default(PathBuf::from("data"))]
    pub dir: PathBuf,
}

/// List screens configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct List {
    /// Number of entries per page.
    #[default(10)]
    pub page_size: usize,

    /// Quiet period after the last keystroke before searching.
    #[default(time::Duration::from_millis(500))]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::{Config, GatewayKind};

    #[test]
    fn defaults_when_nothing_configured() {
        let conf = Config::new("definitely-missing-config").unwrap();

        assert_eq!(conf.gateway.kind, GatewayKind::Http);
        assert_eq!(conf.gateway.http.timeout, Duration::from_secs(10));
        assert_eq!(conf.list.page_size, 10);
        assert_eq!(conf.list.debounce, Duration::from_millis(500));
        assert_eq!(conf.upload.max_image_size, 5 * 1024 * 1024);
    }

    #[test]
    fn deserializes_sections() {
        let conf: Config = serde_json::from_value(serde_json::json!({
            "gateway": {"kind": "local", "local": {"dir": "/tmp/console"}},
            "list": {"page_size": 25, "debounce": "1s"},
            "log": {"level": "DEBUG"},
        }))
        .unwrap();

        assert_eq!(conf.gateway.kind, GatewayKind::Local);
        assert_eq!(conf.gateway.local.dir.to_str(), Some("/tmp/console"));
        assert_eq!(conf.list.page_size, 25);
        assert_eq!(conf.list.debounce, Duration::from_secs(1));
    }
}
