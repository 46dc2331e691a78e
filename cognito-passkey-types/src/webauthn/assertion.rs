//! Types used for public key authentication

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec, maybe_stringified},
    webauthn::{
        AuthenticationExtensionsClientInputs, PublicKeyCredential, PublicKeyCredentialDescriptor,
        UserVerificationRequirement,
    },
    Bytes,
};

/// The credential produced by a successful assertion ceremony.
#[typeshare]
pub type AuthenticatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAssertionResponse>;

/// The data an assertion ceremony needs: a challenge, plus optional
/// constraints on which credential may answer it.
///
/// Cognito delivers this structure as the `CREDENTIAL_REQUEST_OPTIONS`
/// challenge parameter, a JSON document whose binary members are padless
/// base64url strings.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrequestoptions>
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialRequestOptions {
    /// The challenge the authenticator signs along with other data when
    /// producing the assertion. Must decode to a non-empty byte string.
    pub challenge: Bytes,

    /// A hint, in milliseconds, of how long the relying party is willing to
    /// wait. Advisory input to the authenticator, not enforced here.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub timeout: Option<u32>,

    /// The relying party identifier the credential must be scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,

    /// The credentials eligible for this ceremony, in descending order of
    /// preference. An empty or absent list means any discoverable credential
    /// scoped to the relying party may answer.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub allow_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,

    /// The relying party's user-verification policy for this assertion.
    /// Unknown values fall back to the default rather than failing.
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub user_verification: UserVerificationRequirement,

    /// Extension inputs, forwarded to the authenticator unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

/// An authenticator's answer to an assertion request: the signature proving
/// possession of the credential private key, plus the data it was computed
/// over.
///
/// <https://w3c.github.io/webauthn/#iface-authenticatorassertionresponse>
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorAssertionResponse {
    /// The JSON serialization of the client data the assertion was computed
    /// over. The exact bytes must be preserved, the signature covers them.
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Bytes,

    /// The authenticator data covered by the signature.
    pub authenticator_data: Bytes,

    /// The raw assertion signature.
    pub signature: Bytes,

    /// The user handle the credential was registered with, when the
    /// authenticator returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<Bytes>,
}
