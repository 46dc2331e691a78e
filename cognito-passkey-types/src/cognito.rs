//! Wire shapes of the Cognito identity-provider calls the passkey flows
//! drive, plus the normalized token set a completed sign-in yields.
//!
//! Field names follow the provider's PascalCase JSON, parameter keys its
//! SCREAMING_SNAKE map entries. This module only defines the contract; the
//! [`cognito-passkey-client`] crate holds the trait an actual transport
//! implements.
//!
//! [`cognito-passkey-client`]: https://docs.rs/cognito-passkey-client

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::webauthn::PublicKeyCredentialRequestOptions;

/// The auth flow this crate drives.
pub const AUTH_FLOW_USER_AUTH: &str = "USER_AUTH";

/// The only challenge name these flows accept from the provider. Any other
/// name means the user is not set up for passkeys.
pub const CHALLENGE_NAME_WEB_AUTHN: &str = "WEB_AUTHN";

/// Auth-parameter and challenge-response key: the user name.
pub const PARAM_USERNAME: &str = "USERNAME";

/// Auth-parameter key: the confidential-client proof, see
/// [`crate::crypto::secret_hash`].
pub const PARAM_SECRET_HASH: &str = "SECRET_HASH";

/// Challenge-response key: the fixed answer marker, always
/// [`CHALLENGE_NAME_WEB_AUTHN`].
pub const PARAM_ANSWER: &str = "ANSWER";

/// Challenge-response key: the serialized ceremony result.
pub const PARAM_CREDENTIAL: &str = "CREDENTIAL";

/// Challenge-parameter key under which the provider delivers the assertion
/// options JSON.
pub const PARAM_CREDENTIAL_REQUEST_OPTIONS: &str = "CREDENTIAL_REQUEST_OPTIONS";

/// Request for `InitiateAuth`, the start of an authentication flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthRequest {
    /// Always [`AUTH_FLOW_USER_AUTH`] for these flows.
    pub auth_flow: String,

    /// `USERNAME`, plus `SECRET_HASH` when the client is confidential.
    pub auth_parameters: HashMap<String, String>,

    /// The app client id the flow runs under.
    pub client_id: String,
}

/// Response to `InitiateAuth`: the challenge the provider chose for this
/// user. Every member is optional on the wire; the flow decides which
/// absences are errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthResponse {
    /// Which challenge the provider is posing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_name: Option<String>,

    /// Opaque state token binding this flow; must be echoed back on
    /// completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,

    /// Challenge-specific parameters; passkey challenges carry
    /// [`PARAM_CREDENTIAL_REQUEST_OPTIONS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_parameters: Option<HashMap<String, String>>,
}

/// Request for `RespondToAuthChallenge`, the completion of an
/// authentication flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RespondToAuthChallengeRequest {
    /// The challenge being answered, always [`CHALLENGE_NAME_WEB_AUTHN`].
    pub challenge_name: String,

    /// The app client id the flow runs under.
    pub client_id: String,

    /// The session token from [`InitiateAuthResponse::session`].
    pub session: String,

    /// `USERNAME`, `ANSWER` and the serialized `CREDENTIAL`.
    pub challenge_responses: HashMap<String, String>,
}

/// Response to `RespondToAuthChallenge`. An absent
/// [`Self::authentication_result`] is not an error: it signals the flow
/// needs a further step before tokens are issued.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RespondToAuthChallengeResponse {
    /// The issued tokens, when the flow is complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_result: Option<AuthenticationResult>,
}

/// The raw token set as the provider returns it. Normalized into
/// [`AuthTokens`] before reaching the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    /// The access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// The OpenID Connect ID token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,

    /// The refresh token, when the client is allowed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Access-token validity in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u32>,

    /// The token type, `Bearer` in practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Request for `StartWebAuthnRegistration`. Authenticated by a bearer
/// access token, not by username and challenge state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartWebAuthnRegistrationRequest {
    /// The access token of the signed-in user registering a passkey.
    pub access_token: String,
}

/// Response to `StartWebAuthnRegistration`: the creation options document.
///
/// The provider returns this as a free-form JSON document rather than a
/// string; it is parsed into
/// [`crate::webauthn::PublicKeyCredentialCreationOptions`] by the flow so a
/// malformed document is distinguishable from a missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartWebAuthnRegistrationResponse {
    /// The webauthn creation options document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_creation_options: Option<serde_json::Value>,
}

/// Request for `CompleteWebAuthnRegistration`: the serialized attestation
/// credential, under the same bearer token that started the flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompleteWebAuthnRegistrationRequest {
    /// The access token of the signed-in user registering a passkey.
    pub access_token: String,

    /// The JSON-serialized [`crate::webauthn::CreatedPublicKeyCredential`].
    pub credential: String,
}

/// One decoded passkey challenge: the session token binding the flow and the
/// parsed assertion options.
///
/// Produced by the start step, consumed by exactly one ceremony, and
/// discarded after completion; it never outlives its flow.
#[derive(Debug)]
pub struct WebAuthnChallenge {
    /// Opaque flow state, echoed back on completion.
    pub session: String,

    /// The parsed assertion options, binary members already decoded.
    pub request_options: PublicKeyCredentialRequestOptions,
}

/// The normalized token set a completed sign-in yields. Owned by the caller;
/// this crate keeps no copy and no session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthTokens {
    /// The access token.
    pub access_token: String,

    /// The OpenID Connect ID token.
    pub id_token: String,

    /// The refresh token, when the client is allowed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Access-token validity in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u32>,

    /// The token type, `Bearer` in practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}
