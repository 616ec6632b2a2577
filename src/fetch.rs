//! Source document retrieval.
//!
//! `http://` and `https://` sources are fetched with a blocking `reqwest`
//! client and must come back with an HTML content type. Anything else is
//! treated as a local file path, which is handy for offline runs and tests.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid source '{0}': expected an http(s) URL or an existing file")]
    InvalidSource(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("expected HTML content from {url}, got '{content_type}'")]
    NotHtml { url: String, content_type: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can turn a source string into HTML text.
pub trait Fetch {
    fn fetch(&self, source: &str) -> Result<String, FetchError>;
}

/// Whether a `Content-Type` header value denotes an HTML document.
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_lowercase().contains("html")
}

fn is_http(source: &str) -> bool {
    let lower = source.trim_start().to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetches over HTTP or reads from disk depending on the source.
pub struct SourceFetcher {
    client: reqwest::blocking::Client,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("site-rebrand/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn fetch_http(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_html_content_type(&content_type) {
            return Err(FetchError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }
        Ok(response.text()?)
    }
}

impl Fetch for SourceFetcher {
    fn fetch(&self, source: &str) -> Result<String, FetchError> {
        if is_http(source) {
            return self.fetch_http(source.trim());
        }
        let path = PathBuf::from(source);
        if !path.is_file() {
            return Err(FetchError::InvalidSource(source.to_string()));
        }
        std::fs::read_to_string(&path).map_err(|source| FetchError::Read { path, source })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Serves a fixed document regardless of the source.
    pub struct StaticFetcher(pub String);

    impl Fetch for StaticFetcher {
        fn fetch(&self, _source: &str) -> Result<String, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=UTF-8"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(is_html_content_type("TEXT/HTML"));
        assert!(!is_html_content_type("application/json"));
        assert!(!is_html_content_type(""));
    }

    #[test]
    fn http_detection() {
        assert!(is_http("https://example.com"));
        assert!(is_http("HTTP://example.com"));
        assert!(!is_http("httpdocs/index.html"));
        assert!(!is_http("page.html"));
    }

    #[test]
    fn reads_local_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        std::fs::write(&path, "<h1>Hi</h1>").unwrap();

        let fetcher = SourceFetcher::new(Duration::from_secs(1)).unwrap();
        let html = fetcher.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(html, "<h1>Hi</h1>");
    }

    #[test]
    fn missing_local_file_is_invalid_source() {
        let fetcher = SourceFetcher::new(Duration::from_secs(1)).unwrap();
        let result = fetcher.fetch("/definitely/not/here.html");
        assert!(matches!(result, Err(FetchError::InvalidSource(_))));
    }
}
