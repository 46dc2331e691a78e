//! # Cognito Passkey Client
//!
//! This crate drives the two passkey ceremonies of Cognito's `USER_AUTH`
//! protocol end to end:
//!
//! * [`PasskeyAuth::sign_in`] — obtain a `WEB_AUTHN` challenge, run the
//!   assertion ceremony, submit the result, and normalize the returned
//!   tokens.
//! * [`PasskeyRegistration::register_with_passkey`] — obtain creation
//!   options under a bearer token, run the attestation ceremony, and submit
//!   the new credential for binding.
//!
//! The crate performs no networking and no cryptography itself. The
//! identity-provider transport is injected through [`CognitoApi`] and the
//! platform authenticator through [`PlatformAuthenticator`]; the flows
//! marshal data between the two, transcoding every binary field between
//! padless base64url text on the wire and raw bytes at the authenticator
//! boundary.
//!
//! Each flow is a strictly sequential start → ceremony → complete chain.
//! State is threaded through parameters only, so independent flows never
//! share anything and need no locking. Failures are surfaced unmodified as
//! [`PasskeyError`]; there are no retries here, retry policy belongs to the
//! caller.

use typeshare::typeshare;

mod authenticator;
mod provider;
mod register;
mod sign_in;

#[cfg(test)]
mod tests;

#[cfg(any(test, feature = "testable"))]
pub use self::{authenticator::MockPlatformAuthenticator, provider::MockCognitoApi};
pub use self::{
    authenticator::{CeremonyFailure, PlatformAuthenticator},
    provider::{ClientCredentials, CognitoApi, RemoteServiceError},
    register::PasskeyRegistration,
    sign_in::PasskeyAuth,
};

#[typeshare]
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "content")]
/// Errors produced by the passkey flows.
///
/// Every variant reaches the caller unmodified; the categories stay
/// distinguishable so a UI can map them to distinct messages (retry prompt
/// for a cancelled ceremony, fallback flow for an unsupported environment,
/// and so on).
pub enum PasskeyError {
    /// A binary field was not valid base64url, a JSON document did not
    /// parse, or a decoded field that must be non-empty was empty.
    MalformedEncoding,
    /// The provider posed a challenge other than `WEB_AUTHN`; carries the
    /// challenge name it posed instead.
    UnexpectedChallenge(String),
    /// A field the flow cannot proceed without was absent from the provider
    /// response; carries the field name.
    MissingChallengeData(String),
    /// The user or the platform dismissed the ceremony prompt.
    CeremonyCancelled,
    /// No platform authenticator capability is present in this environment.
    CeremonyUnsupported,
    /// The provider or the transport beneath it failed; carries the
    /// implementor-supplied description.
    RemoteService(String),
}

impl From<RemoteServiceError> for PasskeyError {
    fn from(value: RemoteServiceError) -> Self {
        PasskeyError::RemoteService(value.0)
    }
}

impl From<CeremonyFailure> for PasskeyError {
    fn from(value: CeremonyFailure) -> Self {
        match value {
            CeremonyFailure::Cancelled => PasskeyError::CeremonyCancelled,
            CeremonyFailure::Unavailable => PasskeyError::CeremonyUnsupported,
        }
    }
}

impl From<cognito_passkey_types::NotBase64Encoded> for PasskeyError {
    fn from(_: cognito_passkey_types::NotBase64Encoded) -> Self {
        PasskeyError::MalformedEncoding
    }
}
