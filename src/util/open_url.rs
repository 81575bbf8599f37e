use thiserror::Error;
use url::Url;

/// Why a URL was refused for opening in the system browser.
#[derive(Error, Debug)]
pub enum UrlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
}

/// Check a catalog URL before handing it to the system opener.
///
/// Only `http` and `https` URLs with a host pass, so a crafted catalog cannot
/// launch `file:` or custom-scheme handlers.
///
/// ```
/// use clipdeck::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://www.youtube.com/watch?v=abc").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim())?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_owned())),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_urls_accepted() {
        let url = validate_url_for_open("https://www.youtube.com/watch?v=abc").unwrap();
        assert_eq!(url.host_str(), Some("www.youtube.com"));
        assert!(validate_url_for_open("http://example.com").is_ok());
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(matches!(
            validate_url_for_open("file:///etc/passwd"),
            Err(UrlError::UnsupportedScheme(s)) if s == "file"
        ));
        assert!(validate_url_for_open("javascript:alert(1)").is_err());
        assert!(validate_url_for_open("vscode://open").is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            validate_url_for_open("not a url"),
            Err(UrlError::InvalidUrl(_))
        ));
        assert!(validate_url_for_open("").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert!(validate_url_for_open("  https://example.com/v  ").is_ok());
    }
}
