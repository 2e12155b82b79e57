//! URL resolution logic for img-grab
//!
//! Turns image references into fetchable URLs and fetchable URLs into file
//! names. Both are purely textual.

/// Scheme prefixes treated as already absolute
const NETWORK_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Returns true if the reference already carries a network scheme
pub fn has_network_scheme(reference: &str) -> bool {
    NETWORK_SCHEMES
        .iter()
        .any(|scheme| reference.starts_with(scheme))
}

/// Resolves an image reference against the page URL.
///
/// Absolute `http://`/`https://` references pass through. Anything else,
/// including `../x` and `//host/x`, is appended to the page URL with exactly
/// one `/` inserted when the page URL does not already end with one.
pub fn resolve_reference(reference: &str, page_url: &str) -> String {
    if has_network_scheme(reference) {
        return reference.to_string();
    }

    if page_url.ends_with('/') {
        format!("{page_url}{reference}")
    } else {
        format!("{page_url}/{reference}")
    }
}

/// Generates the destination filename for a resolved URL.
///
/// Uses the text after the last `/`, cut at the first `?`. Falls back to
/// `image_<ordinal>.jpg` when that leaves nothing usable.
pub fn resolve_filename(url: &str, ordinal: usize) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let name = match segment.find('?') {
        Some(idx) => &segment[..idx],
        None => segment,
    };

    match name {
        "" | "." | ".." => fallback_filename(ordinal),
        name => name.to_string(),
    }
}

/// Positional name for images without a usable basename
pub fn fallback_filename(ordinal: usize) -> String {
    format!("image_{ordinal}.jpg")
}
