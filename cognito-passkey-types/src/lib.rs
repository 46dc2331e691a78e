//! # Cognito Passkey Types
//!
//! Type definitions shared by the passkey sign-in and registration flows:
//!
//! * [`webauthn`] — the ceremony option and credential structures exchanged
//!   with a platform authenticator, mirroring [WebAuthn Level 3] naming.
//! * [`cognito`] — the wire shapes of Cognito's `USER_AUTH` challenge
//!   protocol and the normalized token set it yields.
//! * [`Bytes`], [`encoding`] and [`crypto`] — the binary⇄text transcoding
//!   utilities every boundary of this crate relies on. All binary fields
//!   travel as padless base64url strings in JSON and as raw bytes only
//!   inside an authenticator invocation.
//!
//! [WebAuthn Level 3]: https://w3c.github.io/webauthn

mod utils;

pub mod cognito;
pub mod webauthn;

// Re-exports
pub use utils::{
    bytes::{Bytes, NotBase64Encoded},
    crypto, encoding, rand,
};
