//! [`Config`]-related definitions.

use std::time;

use common::pagination::PageSize;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use http::header::{HeaderValue, InvalidHeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use smart_default::SmartDefault;
use tower_http::cors::AllowOrigin;

/// [JWT] secret used when none is configured.
///
/// Only suitable for local development.
///
/// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
pub const DEFAULT_JWT_SECRET: &str = "secret";

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

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

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

impl Cors {
    /// Builds the [`AllowOrigin`] rule accepting all the configured
    /// [`Cors::origins`] at once.
    ///
    /// A `*` among them allows any origin.
    ///
    /// # Errors
    ///
    /// If any of the origins is not a valid header value.
    pub fn allow_origin(&self) -> Result<AllowOrigin, InvalidHeaderValue> {
        if self.origins.iter().any(|o| o == "*") {
            return Ok(AllowOrigin::any());
        }
        let origins = self
            .origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AllowOrigin::list(origins))
    }
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [JWT] secret the identity provider signs session tokens with.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    /// Falls back to [`DEFAULT_JWT_SECRET`].
    #[default(SecretString::from(DEFAULT_JWT_SECRET))]
    pub jwt_secret: SecretString,

    /// List views configuration.
    pub lists: Lists,
}

impl Service {
    /// Indicates whether [`Service::jwt_secret`] is left at the
    /// [`DEFAULT_JWT_SECRET`].
    #[must_use]
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret.expose_secret() == DEFAULT_JWT_SECRET
    }
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            jwt_secret,
            lists:
                Lists {
                    page_size,
                    search_debounce,
                },
        } = value;
        Self {
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                jwt_secret.expose_secret().as_bytes(),
            ),
            lists: service::view::Config {
                page_size: PageSize::new(page_size)
                    .unwrap_or(service::view::DEFAULT_PAGE_SIZE),
                search_debounce,
            },
        }
    }
}

/// List views configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Lists {
    /// Number of rows on a single page.
    ///
    /// Zero falls back to the default.
    #[default(service::view::DEFAULT_PAGE_SIZE.get())]
    pub page_size: usize,

    /// Delay of applying a typed search query in live list views.
    #[default(time::Duration::from_millis(300))]
    #[serde(with = "humantime_serde")]
    pub search_debounce: time::Duration,
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
