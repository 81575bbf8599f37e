use std::borrow::Cow;
use url::Url;

const WATCH_BASE: &str = "https://www.youtube.com/watch";

/// Rewrite embed-style media links (`.../embed/<id>?...`) to the canonical
/// watch URL. Anything else is returned trimmed but otherwise untouched.
///
/// ```
/// use clipdeck::catalog::normalize_media_url;
///
/// assert_eq!(
///     normalize_media_url("https://www.youtube.com/embed/abc123?rel=0"),
///     "https://www.youtube.com/watch?v=abc123"
/// );
/// assert_eq!(normalize_media_url("https://vimeo.com/42"), "https://vimeo.com/42");
/// assert_eq!(normalize_media_url(""), "");
/// ```
pub fn normalize_media_url(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();

    let Some((_, rest)) = trimmed.split_once("/embed/") else {
        return Cow::Borrowed(trimmed);
    };

    let id = rest.split(['?', '#', '/']).next().unwrap_or_default();
    if id.is_empty() {
        return Cow::Borrowed(trimmed);
    }

    match Url::parse(WATCH_BASE) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("v", id);
            Cow::Owned(url.into())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build watch URL, keeping embed link");
            Cow::Borrowed(trimmed)
        }
    }
}
