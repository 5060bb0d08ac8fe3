use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeConfig,
    pub client: ClientConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let reference_prefix =
            env::var("QUOTE_REFERENCE_PREFIX").unwrap_or_else(|_| "QR".to_string());
        let reference_prefix = reference_prefix.trim().to_ascii_uppercase();
        if reference_prefix.is_empty()
            || !reference_prefix
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric())
        {
            return Err(ConfigError::InvalidReferencePrefix(reference_prefix));
        }

        let base_url = env::var("QUOTE_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(base_url));
        }

        let timeout = match env::var("QUOTE_API_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout)?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            intake: IntakeConfig { reference_prefix },
            client: ClientConfig { base_url, timeout },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings for the quote-request backend.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Leading segment of every issued reference number, e.g. `QR`.
    pub reference_prefix: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            reference_prefix: "QR".to_string(),
        }
    }
}

/// Settings for the outbound submission client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` leaves the HTTP client's own default in place.
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidReferencePrefix(String),
    InvalidApiUrl(String),
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidReferencePrefix(value) => write!(
                f,
                "QUOTE_REFERENCE_PREFIX must be non-empty and alphanumeric (found '{value}')"
            ),
            ConfigError::InvalidApiUrl(value) => write!(
                f,
                "QUOTE_API_URL must start with http:// or https:// (found '{value}')"
            ),
            ConfigError::InvalidTimeout => {
                write!(f, "QUOTE_API_TIMEOUT_SECS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidReferencePrefix(_)
            | ConfigError::InvalidApiUrl(_)
            | ConfigError::InvalidTimeout => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("QUOTE_REFERENCE_PREFIX");
        env::remove_var("QUOTE_API_URL");
        env::remove_var("QUOTE_API_TIMEOUT_SECS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.intake.reference_prefix, "QR");
        assert_eq!(config.client.base_url, "http://127.0.0.1:3000");
        assert!(config.client.timeout.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn client_settings_are_normalized() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("QUOTE_API_URL", "https://quotes.example.com/");
        env::set_var("QUOTE_API_TIMEOUT_SECS", "15");
        env::set_var("QUOTE_REFERENCE_PREFIX", "hb");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.client.base_url, "https://quotes.example.com");
        assert_eq!(config.client.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.intake.reference_prefix, "HB");
        reset_env();
    }

    #[test]
    fn rejects_invalid_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();

        env::set_var("QUOTE_API_URL", "quotes.example.com");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidApiUrl(_))
        ));
        reset_env();

        env::set_var("QUOTE_REFERENCE_PREFIX", "QR-");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidReferencePrefix(_))
        ));
        reset_env();
    }
}
