//! Server configuration from command-line flags and environment variables.

use clap::Parser;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("port must be non-zero")]
    ZeroPort,

    #[error("session TTL must be at least one second")]
    ZeroTtl,

    #[error("portfolio URL must start with http:// or https://, got '{0}'")]
    PortfolioUrl(String),
}

#[derive(Debug, Clone, Parser)]
#[command(name = "qr-studio", version, about = "Serve a QR code generator page")]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "QR_STUDIO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "QR_STUDIO_PORT", default_value_t = 8501)]
    pub port: u16,

    /// Seconds of inactivity before a session is dropped
    #[arg(long = "session-ttl-secs", env = "QR_STUDIO_SESSION_TTL", default_value_t = 3600)]
    pub session_ttl_secs: u64,

    /// Target of the floating link button; hidden when unset
    #[arg(long, env = "QR_STUDIO_PORTFOLIO_URL")]
    pub portfolio_url: Option<String>,

    /// Mark the session cookie `Secure` (set when served over HTTPS)
    #[arg(long, env = "QR_STUDIO_SECURE_COOKIES")]
    pub secure_cookies: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "QR_STUDIO_LOG", default_value = "info")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8501,
            session_ttl_secs: 3600,
            portfolio_url: None,
            secure_cookies: false,
            log_level: "info".into(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::ZeroTtl);
        }
        if let Some(url) = &self.portfolio_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::PortfolioUrl(url.clone()));
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
