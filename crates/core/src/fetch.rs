//! Source content fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving raw page HTML or pasted
//! source text from various inputs: HTTP/HTTPS URLs, local files, and
//! standard input.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{CopymillError, Result};

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
/// The default timeout is the fixed 10-second fetch budget; there are no
/// retries and no caching.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36"
                .to_string(),
        }
    }
}

/// Fetches HTML content from a URL.
///
/// This function performs a single HTTP GET request and returns the response
/// body as text. It follows redirects, respects the configured timeout, uses
/// a browser-like User-Agent for better compatibility, and rejects
/// non-success status codes.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| CopymillError::InvalidUrl(e.to_string()))?;

    if parsed_url.scheme().is_empty() {
        return Err(CopymillError::InvalidUrl(
            "URL must include a scheme (http:// or https://)".to_string(),
        ));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(CopymillError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                CopymillError::Timeout { timeout: config.timeout }
            } else {
                CopymillError::HttpError(e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CopymillError::BadStatus { status: status.as_u16() });
    }

    let content = response.text().await?;

    Ok(content)
}

/// Reads source content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(CopymillError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(CopymillError::from)
    }
}

/// Reads source content from standard input.
///
/// This function reads all available input from stdin until EOF.
/// Useful for piping content from other commands.
pub fn fetch_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(CopymillError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 10);
        assert!(config.user_agent.contains("Mozilla"));
    }

    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(CopymillError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/article.txt");
        assert!(matches!(result, Err(CopymillError::FileNotFound(_))));
    }

    #[test]
    fn test_url_validation() {
        assert!(Url::parse("http://example.com").is_ok());
        assert!(Url::parse("https://example.com").is_ok());
        assert!(Url::parse("example.com").is_err()); // Missing scheme
    }

    #[test]
    fn test_error_timeout_message() {
        let err = CopymillError::Timeout { timeout: 10 };
        assert!(err.to_string().contains("10"));
    }
}
