//! Keyed-hash utility for confidential provider clients.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::encoding;

/// Compute the `SECRET_HASH` proof a confidential Cognito client must attach
/// to every user-scoped request.
///
/// This is HMAC-SHA256 over the UTF-8 concatenation `username || client_id`,
/// keyed by the client secret, in padded standard base64. The output is
/// deterministic, computed fresh per request, and forwarded opaquely; it is
/// never decoded again nor reused across usernames.
pub fn secret_hash(username: &str, client_id: &str, client_secret: &str) -> String {
    // SAFETY: HMAC-SHA256 accepts keys of arbitrary length.
    let mut mac = Hmac::<Sha256>::new_from_slice(client_secret.as_bytes()).unwrap();
    mac.update(username.as_bytes());
    mac.update(client_id.as_bytes());
    encoding::base64_padded(&mac.finalize().into_bytes())
}
