use std::fmt;

use cognito_passkey_types::{
    cognito::{
        CompleteWebAuthnRegistrationRequest, InitiateAuthRequest, InitiateAuthResponse,
        RespondToAuthChallengeRequest, RespondToAuthChallengeResponse,
        StartWebAuthnRegistrationRequest, StartWebAuthnRegistrationResponse,
    },
    crypto,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An opaque failure from the identity provider or the transport beneath it.
///
/// Implementations of [`CognitoApi`] fold whatever their HTTP stack or SDK
/// produces into this; the flows pass it through to the caller without
/// interpretation or retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteServiceError(pub String);

/// The identity-provider operations the flows drive, one method per wire
/// call.
///
/// This crate ships no implementation: networking is the embedder's concern,
/// and tests substitute a mock. Implementations should not retry on behalf
/// of the flows.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait CognitoApi {
    /// Start an authentication flow and receive the provider's challenge.
    async fn initiate_auth(
        &self,
        request: InitiateAuthRequest,
    ) -> Result<InitiateAuthResponse, RemoteServiceError>;

    /// Answer the challenge and, when the flow is complete, receive tokens.
    async fn respond_to_auth_challenge(
        &self,
        request: RespondToAuthChallengeRequest,
    ) -> Result<RespondToAuthChallengeResponse, RemoteServiceError>;

    /// Start a registration flow and receive the creation options document.
    async fn start_webauthn_registration(
        &self,
        request: StartWebAuthnRegistrationRequest,
    ) -> Result<StartWebAuthnRegistrationResponse, RemoteServiceError>;

    /// Submit the attested credential for binding. Success has no payload.
    async fn complete_webauthn_registration(
        &self,
        request: CompleteWebAuthnRegistrationRequest,
    ) -> Result<(), RemoteServiceError>;
}

/// How this app client authenticates itself to the provider, fixed once at
/// construction.
///
/// A confidential client holds a shared secret and must prove it with a
/// fresh [`crypto::secret_hash`] on every user-scoped request; a public
/// client sends no proof. The secret is wiped on drop and redacted from
/// debug output, and the derived hash is never cached or logged.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub enum ClientCredentials {
    /// No client secret is configured.
    Public,
    /// A shared client secret is configured.
    Confidential {
        /// The app client's shared secret.
        client_secret: String,
    },
}

impl ClientCredentials {
    /// The `SECRET_HASH` proof for one request, or `None` for a public
    /// client.
    pub(crate) fn secret_hash(&self, username: &str, client_id: &str) -> Option<String> {
        match self {
            ClientCredentials::Public => None,
            ClientCredentials::Confidential { client_secret } => {
                Some(crypto::secret_hash(username, client_id, client_secret))
            }
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientCredentials::Public => f.write_str("Public"),
            ClientCredentials::Confidential { .. } => f
                .debug_struct("Confidential")
                .field("client_secret", &"<redacted>")
                .finish(),
        }
    }
}
