//! Types specific to public key credential creation

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec, maybe_stringified},
    webauthn::{
        AuthenticationExtensionsClientInputs, AuthenticatorAttachment, AuthenticatorTransport,
        PublicKeyCredential, PublicKeyCredentialDescriptor, PublicKeyCredentialType,
        UserVerificationRequirement,
    },
    Bytes,
};

/// The credential produced by a successful attestation ceremony.
#[typeshare]
pub type CreatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAttestationResponse>;

/// The data an attestation ceremony needs to create a credential: who the
/// relying party and user are, a challenge, and the acceptable key types.
///
/// Cognito's start-registration call returns this structure as a JSON
/// document with base64url binary members.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialcreationoptions>
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialCreationOptions {
    /// The relying party the new credential will be bound to.
    pub rp: PublicKeyCredentialRpEntity,

    /// The user account the new credential will be bound to. Its `id` can
    /// come back as the `userHandle` of future assertions.
    pub user: PublicKeyCredentialUserEntity,

    /// The challenge signed into the attestation. Must decode to a non-empty
    /// byte string.
    pub challenge: Bytes,

    /// The key types and signature algorithms the relying party accepts,
    /// most preferred first.
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,

    /// A hint, in milliseconds, of how long the relying party is willing to
    /// wait. Advisory input to the authenticator, not enforced here.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub timeout: Option<u32>,

    /// Credentials already registered to this account, so the authenticator
    /// does not create a duplicate.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub exclude_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,

    /// Constraints on which authenticators may participate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,

    /// The relying party's attestation-conveyance preference. Unknown values
    /// fall back to the default rather than failing.
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub attestation: AttestationConveyancePreference,

    /// Extension inputs, forwarded to the authenticator unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

/// The relying party attributes for credential creation.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrpentity>
#[derive(Debug, Serialize, Deserialize, Clone)]
#[typeshare]
pub struct PublicKeyCredentialRpEntity {
    /// The relying party identifier the credential will be scoped to. When
    /// omitted, the authenticator uses the requesting origin's effective
    /// domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// A human-palatable name for the relying party, intended only for
    /// display.
    pub name: String,
}

/// The user account attributes for credential creation.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialuserentity>
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialUserEntity {
    /// The user handle: an opaque, non-empty byte sequence of at most 64
    /// bytes. Authentication decisions must be based on this member, never
    /// on the display strings.
    pub id: Bytes,

    /// A human-palatable name for the account, intended only for display,
    /// e.g. to distinguish accounts with similar `display_name`s.
    pub name: String,

    /// A human-palatable display name for the account.
    pub display_name: String,
}

/// One acceptable credential type and signature algorithm pair.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialparameters>
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[typeshare]
pub struct PublicKeyCredentialParameters {
    /// The type of credential to be created. Entries with an unknown type
    /// should be skipped, not treated as errors.
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The [COSEAlgorithmIdentifier] of the signature algorithm, e.g. `-7`
    /// for ES256.
    ///
    /// [COSEAlgorithmIdentifier]: https://w3c.github.io/webauthn/#typedefdef-cosealgorithmidentifier
    #[typeshare(serialized_as = "I54")] // because i64 fails for js
    pub alg: i64,
}

/// Requirements regarding authenticator attributes for a creation ceremony.
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticatorselectioncriteria>
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorSelectionCriteria {
    /// Restrict the ceremony to authenticators of this attachment modality.
    /// Unknown values are treated as if the member were absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown"
    )]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,

    /// The relying party's preference for a client-side discoverable
    /// credential. The historical "resident" naming is kept for wire
    /// compatibility.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown"
    )]
    pub resident_key: Option<ResidentKeyRequirement>,

    /// WebAuthn Level 1 alias: relying parties set this to `true` if and
    /// only if [`Self::resident_key`] is required.
    #[serde(default)]
    pub require_resident_key: bool,

    /// The relying party's user-verification policy for the creation
    /// ceremony.
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub user_verification: UserVerificationRequirement,
}

/// The relying party's requirement for client-side discoverable credentials.
///
/// <https://w3c.github.io/webauthn/#enumdef-residentkeyrequirement>
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum ResidentKeyRequirement {
    /// Prefer a server-side credential, accept a discoverable one.
    Discouraged,

    /// Prefer a discoverable credential, accept a server-side one.
    Preferred,

    /// The ceremony must fail if a discoverable credential cannot be
    /// created.
    Required,
}

/// The relying party's preference for how much attestation information it
/// receives about a new credential.
///
/// <https://w3c.github.io/webauthn/#enumdef-attestationconveyancepreference>
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum AttestationConveyancePreference {
    /// No attestation wanted. The default; unknown values fall back here.
    #[default]
    None,

    /// A verifiable attestation statement, obtained however the client sees
    /// fit.
    Indirect,

    /// The attestation statement exactly as the authenticator generated it.
    Direct,

    /// An attestation statement that may uniquely identify the
    /// authenticator, for controlled enterprise deployments.
    Enterprise,
}

/// An authenticator's answer to a creation request: the attestation object
/// binding the new credential, and the client data it covers.
///
/// There is no `signature` or `userHandle` member on this shape; those
/// belong to assertions only.
///
/// <https://w3c.github.io/webauthn/#iface-authenticatorattestationresponse>
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorAttestationResponse {
    /// The JSON serialization of the client data the attestation was
    /// computed over. The exact bytes must be preserved.
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Bytes,

    /// The attestation object: authenticator data plus an attestation
    /// statement, opaque to this crate.
    pub attestation_object: Bytes,

    /// The transports the authenticator believes it supports, for the
    /// relying party to store alongside the credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}
