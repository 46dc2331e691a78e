//! Binary⇄text codec functions shared by every wire boundary of the
//! `cognito-passkey` crates.

use data_encoding::{BASE64, BASE64URL, BASE64URL_NOPAD, BASE64_NOPAD, Specification};

/// Convert bytes to standard base64 without padding.
pub fn base64(data: &[u8]) -> String {
    BASE64_NOPAD.encode(data)
}

/// Convert bytes to standard base64 with padding.
///
/// Cognito expects its `SECRET_HASH` parameter in this form; the output is
/// forwarded opaquely and never decoded again by this crate.
pub fn base64_padded(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Convert bytes to base64url without padding.
///
/// This is the transport representation of every binary field in the JSON
/// payloads this crate produces; the output never contains `+`, `/` or `=`.
pub fn base64url(data: &[u8]) -> String {
    BASE64URL_NOPAD.encode(data)
}

/// Try parsing from base64 with or without padding.
pub(crate) fn try_from_base64(input: &str) -> Option<Vec<u8>> {
    let padding = BASE64.specification().padding.unwrap();
    let sane_string = input.trim_end_matches(padding);
    BASE64_NOPAD.decode(sane_string.as_bytes()).ok()
}

/// Try parsing from base64url with or without padding.
///
/// Returns `None` when `input` contains characters outside the base64url
/// alphabet or has an invalid length; the caller decides which error that
/// maps to.
pub fn try_from_base64url(input: &str) -> Option<Vec<u8>> {
    let specs = BASE64URL.specification();
    let padding = specs.padding.unwrap();
    let specs = Specification {
        check_trailing_bits: false,
        padding: None,
        ..specs
    };
    let encoding = specs.encoding().unwrap();
    let sane_string = input.trim_end_matches(padding);
    encoding.decode(sane_string.as_bytes()).ok()
}
