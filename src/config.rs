// src/config.rs

use crate::core::client::scan_endpoint;
use crate::router::{Route, RouteError};
use clap::Parser;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API: &str = "http://127.0.0.1:8888";

#[derive(Parser, Debug)]
#[command(name = "cfssl-scan-viewer")]
#[command(version)]
#[command(about = "Terminal viewer for CFSSL TLS/PKI scan results", long_about = None)]
pub struct Cli {
    /// Page to open: /, /scan or /scan/<domain>
    #[arg(value_name = "ROUTE", default_value = "/")]
    pub route: String,

    /// Base URL of the CFSSL API
    #[arg(long, env = "CFSSL_API", default_value = DEFAULT_API)]
    pub api: String,

    /// Request timeout in seconds
    #[arg(long, env = "CFSSL_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Print the page once to stdout instead of starting the interactive UI
    #[arg(long)]
    pub print: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("Invalid API URL {url}: {source}")]
    InvalidApi {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API URL must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("Timeout must be at least one second")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Print,
}

/// Validated settings the application runs with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub route: Route,
    pub endpoint: Url,
    pub timeout: Duration,
    pub mode: Mode,
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let route = Route::parse(&self.route)?;

        let invalid = |source| ConfigError::InvalidApi { url: self.api.clone(), source };
        let api_base = Url::parse(&self.api).map_err(invalid)?;
        if !matches!(api_base.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(api_base.scheme().to_string()));
        }
        let endpoint = scan_endpoint(&api_base).map_err(invalid)?;

        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Settings {
            route,
            endpoint,
            timeout: Duration::from_secs(self.timeout),
            mode: if self.print { Mode::Print } else { Mode::Interactive },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Settings, ConfigError> {
        let mut argv = vec!["cfssl-scan-viewer"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().into_settings()
    }

    #[test]
    fn explicit_arguments() {
        let settings = parse(&[
            "/scan/cfssl.org",
            "--api",
            "https://api.example.com/cfssl",
            "--timeout",
            "5",
            "--print",
        ])
        .unwrap();
        assert_eq!(settings.route, Route::Scan { domain: Some("cfssl.org".to_string()) });
        assert_eq!(
            settings.endpoint.as_str(),
            "https://api.example.com/cfssl/api/v1/cfssl/scan"
        );
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.mode, Mode::Print);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(parse(&["/bundle"]), Err(ConfigError::Route(_))));
        assert!(matches!(
            parse(&["/", "--api", "not a url"]),
            Err(ConfigError::InvalidApi { .. })
        ));
        assert!(matches!(
            parse(&["/", "--api", "ftp://example.com"]),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            parse(&["/", "--api", DEFAULT_API, "--timeout", "0"]),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
