use crate::domain::ports::UriValidator;
use crate::utils::error::{NmlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks that `candidate` is an absolute URI with an explicit scheme.
///
/// `Url::parse` follows the WHATWG rules, which percent-encode characters
/// RFC 3986 forbids instead of rejecting them, so the raw text is checked
/// against the RFC 3986 character set first.
pub fn is_valid_absolute_uri(candidate: &str) -> bool {
    if candidate.is_empty() || !has_rfc3986_characters(candidate) {
        return false;
    }

    match Url::parse(candidate) {
        Ok(url) => !url.scheme().is_empty(),
        Err(e) => {
            tracing::trace!("{:?} is not an absolute URI: {}", candidate, e);
            false
        }
    }
}

/// Unreserved, gen-delims, sub-delims and well-formed `%XX` escapes only,
/// with at most one fragment delimiter.
fn has_rfc3986_characters(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    let mut fragments = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes.get(i + 1..i + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
                continue;
            }
            b'#' => fragments += 1,
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {}
            b':' | b'/' | b'?' | b'[' | b']' | b'@' => {}
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' => {}
            _ => return false,
        }
        i += 1;
    }

    fragments <= 1
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NmlError::description(format!("{} path cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(NmlError::description(format!(
            "{} path contains null bytes",
            field_name
        )));
    }

    Ok(())
}

/// Default validator, backed by the `url` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteUriValidator;

impl UriValidator for AbsoluteUriValidator {
    fn is_valid_absolute_uri(&self, candidate: &str) -> bool {
        is_valid_absolute_uri(candidate)
    }
}
