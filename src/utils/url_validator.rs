//! Long URL validation.
//!
//! URLs are checked but stored exactly as submitted, so a redirect returns the
//! same string the client shortened.

use url::Url;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must start with http:// or https://")]
    UnsupportedScheme,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates that `input` is an absolute `http` or `https` URL with a host.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for blank input
/// - [`UrlValidationError::UnsupportedScheme`] for any other scheme (`ftp:`, `javascript:`, ...)
/// - [`UrlValidationError::InvalidFormat`] when the URL does not parse
/// - [`UrlValidationError::MissingHost`] when there is no host
///
/// # Examples
///
/// ```ignore
/// assert!(validate_long_url("https://example.com/a?b=c").is_ok());
/// assert!(validate_long_url("ftp://example.com").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return Err(UrlValidationError::UnsupportedScheme);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedScheme),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
