//! Server configuration from flags and environment.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use stockscope_core::{Language, LogFormat, LoggingConfig, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "stockscope-web",
    version,
    about = "HTTP API for stock quotes and daily price history"
)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "STOCKSCOPE_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Base URL of the Alpha Vantage API.
    #[arg(long, env = "STOCKSCOPE_UPSTREAM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_base_url: String,

    /// Upstream request timeout in milliseconds. Unset waits indefinitely.
    #[arg(long, env = "STOCKSCOPE_UPSTREAM_TIMEOUT_MS")]
    pub upstream_timeout_ms: Option<u64>,

    /// Language of error messages when a request has no `lang` parameter.
    #[arg(long, env = "STOCKSCOPE_DEFAULT_LANGUAGE", default_value = "ja")]
    pub default_language: Language,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "STOCKSCOPE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format (pretty or json).
    #[arg(long, env = "STOCKSCOPE_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_ms.map(Duration::from_millis)
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally_without_timeout() {
        let config = ServerConfig::parse_from(["stockscope-web"]);

        assert_eq!(config.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(config.upstream_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.upstream_timeout(), None);
        assert_eq!(config.default_language, Language::Ja);
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "stockscope-web",
            "--bind",
            "0.0.0.0:8080",
            "--upstream-timeout-ms",
            "2500",
            "--log-format",
            "json",
        ]);

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.upstream_timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.logging().format, LogFormat::Json);
    }
}
