//! Ceremony option and credential structures from [WebAuthn Level 3],
//! restricted to what the Cognito `USER_AUTH` flows exchange.
//!
//! [WebAuthn Level 3]: https://w3c.github.io/webauthn

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::Bytes;

mod assertion;
mod attestation;
mod common;

// re-export types
pub use self::{assertion::*, attestation::*, common::*};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::AuthenticatorAssertionResponse {}
    impl Sealed for super::AuthenticatorAttestationResponse {}
}

/// Marker trait for response types
pub trait AuthenticatorResponse: sealed::Sealed {}

impl AuthenticatorResponse for AuthenticatorAssertionResponse {}
impl AuthenticatorResponse for AuthenticatorAttestationResponse {}

/// The outcome of a single ceremony: one credential with either an assertion
/// or an attestation response.
///
/// The two response shapes are distinct types rather than one record with
/// optional fields, so an attestation payload can never carry a stray
/// `signature` or `userHandle` member and vice versa. Use the aliases for the
/// concrete shapes:
/// * assertion (sign-in): [`AuthenticatedPublicKeyCredential`]
/// * attestation (registration): [`CreatedPublicKeyCredential`]
///
/// <https://w3c.github.io/webauthn/#iface-pkcredential>
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredential<R: AuthenticatorResponse> {
    /// The credential ID chosen by the authenticator, as base64url text.
    /// This is the encoded form of [`Self::raw_id`].
    pub id: String,

    /// The raw bytes of the credential ID.
    pub raw_id: Bytes,

    /// Always [`PublicKeyCredentialType::PublicKey`] for credentials this
    /// crate produces.
    #[serde(rename = "type")]
    pub ty: PublicKeyCredentialType,

    /// The authenticator's response to the ceremony request.
    pub response: R,
}
