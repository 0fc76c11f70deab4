// src/router.rs

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;
use thiserror::Error;

// Characters that cannot appear verbatim inside the domain segment.
const SEGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%').add(b'/').add(b'?');

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("No page at {0}")]
    NotFound(String),
}

/// The pages of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Scan { domain: Option<String> },
}

impl Route {
    /// Matches `/`, `/scan` and `/scan/:domain`. A trailing slash is ignored
    /// and the domain segment is percent-decoded.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] if trimmed.starts_with('/') => Ok(Route::Home),
            ["scan"] => Ok(Route::Scan { domain: None }),
            ["scan", domain] => {
                let domain = percent_decode_str(domain)
                    .decode_utf8()
                    .map_err(|_| RouteError::NotFound(path.to_string()))?;
                Ok(Route::Scan { domain: Some(domain.into_owned()).filter(|d| !d.is_empty()) })
            }
            _ => Err(RouteError::NotFound(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Scan { domain: None } => "/scan".to_string(),
            Route::Scan { domain: Some(domain) } => {
                format!("/scan/{}", utf8_percent_encode(domain, SEGMENT))
            }
        }
    }

    /// Document title, as shown in the terminal's title bar.
    pub fn title(&self) -> String {
        match self {
            Route::Home => "CFSSL".to_string(),
            Route::Scan { .. } => "Scan | CFSSL".to_string(),
        }
    }

    /// Whether this route is the active one for the nav entry at `prefix`.
    pub fn is_under(&self, prefix: &str) -> bool {
        self.path().starts_with(prefix)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/"), Ok(Route::Home));
        assert_eq!(Route::parse("/scan"), Ok(Route::Scan { domain: None }));
        assert_eq!(Route::parse("/scan/"), Ok(Route::Scan { domain: None }));
        assert_eq!(
            Route::parse("/scan/cfssl.org"),
            Ok(Route::Scan { domain: Some("cfssl.org".to_string()) })
        );
    }

    #[test]
    fn decodes_domain_segment() {
        assert_eq!(
            Route::parse("/scan/example.com%3A8443"),
            Ok(Route::Scan { domain: Some("example.com:8443".to_string()) })
        );
        // A path segment is not a form value: '+' stays a plus.
        assert_eq!(
            Route::parse("/scan/a+b.example"),
            Ok(Route::Scan { domain: Some("a+b.example".to_string()) })
        );
        assert!(Route::parse("/scan/%FF").is_err());
    }

    #[test]
    fn path_encodes_the_domain_segment() {
        let route = Route::Scan { domain: Some("odd/host name%".to_string()) };
        assert_eq!(route.path(), "/scan/odd%2Fhost%20name%25");
        assert_eq!(Route::parse(&route.path()), Ok(route));

        let route = Route::Scan { domain: Some("cfssl.org:443".to_string()) };
        assert_eq!(route.path(), "/scan/cfssl.org:443");
    }

    #[test]
    fn rejects_unknown_paths() {
        assert!(matches!(Route::parse("/bundle"), Err(RouteError::NotFound(_))));
        assert!(Route::parse("/scan/a/b").is_err());
        assert!(Route::parse("").is_err());
    }

    #[test]
    fn path_round_trips_and_titles() {
        let route = Route::Scan { domain: Some("cfssl.org".to_string()) };
        assert_eq!(Route::parse(&route.path()), Ok(route.clone()));
        assert_eq!(route.title(), "Scan | CFSSL");
        assert_eq!(Route::Home.title(), "CFSSL");
        assert!(route.is_under("/scan"));
        assert!(!Route::Home.is_under("/scan"));
    }
}
