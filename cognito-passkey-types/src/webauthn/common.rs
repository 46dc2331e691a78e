//! Common types used in both attestation (registration) and assertion
//! (authentication).

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec},
    Bytes,
};

/// Extension inputs are carried through to the authenticator without
/// interpretation, so they stay an opaque JSON object here.
pub type AuthenticationExtensionsClientInputs = serde_json::Map<String, serde_json::Value>;

/// The valid credential types. Only `public-key` is defined today; unknown
/// values deserialize to [`Self::Unknown`] instead of failing, per the
/// webauthn extensibility rules.
///
/// <https://w3c.github.io/webauthn/#enumdef-publickeycredentialtype>
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum PublicKeyCredentialType {
    /// The public counterpart of an asymmetric key pair.
    PublicKey,
    /// Any value this crate does not recognise.
    #[default]
    Unknown,
}

/// A reference to one specific credential, as found in an allow-list
/// (authentication) or exclude-list (registration).
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialdescriptor>
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[typeshare]
pub struct PublicKeyCredentialDescriptor {
    /// The credential type. Descriptors whose type is
    /// [`PublicKeyCredentialType::Unknown`] should be ignored.
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The credential ID. Base64url text on the wire, raw bytes here.
    pub id: Bytes,

    /// Optional hints as to how the managing authenticator can be reached.
    /// Unknown hint values are dropped rather than failing the parse.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}

impl PublicKeyCredentialDescriptor {
    /// Whether [`Self::ty`] is a type this crate recognises. Use this to
    /// filter descriptor lists before acting on them.
    pub fn is_known(&self) -> bool {
        match self.ty {
            PublicKeyCredentialType::PublicKey => true,
            PublicKeyCredentialType::Unknown => false,
        }
    }
}

/// The relying party's user-verification policy for a ceremony.
///
/// <https://w3c.github.io/webauthn/#enumdef-userverificationrequirement>
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum UserVerificationRequirement {
    /// The ceremony must fail if the user cannot be verified.
    Required,

    /// Verify the user if possible, but do not fail the ceremony otherwise.
    #[default]
    Preferred,

    /// Do not employ user verification.
    Discouraged,
}

/// Hints as to how a client might communicate with an authenticator holding
/// a particular credential.
///
/// <https://w3c.github.io/webauthn/#enum-transport>
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorTransport {
    /// Removable USB.
    Usb,

    /// Near Field Communication.
    Nfc,

    /// Bluetooth Low Energy.
    Ble,

    /// Paired data-transport and proximity mechanisms, e.g. signing in on a
    /// desktop with a phone.
    #[serde(alias = "cable")]
    Hybrid,

    /// A platform authenticator, not removable from the client device.
    Internal,
}

/// Authenticator attachment modalities. Used by a relying party to express a
/// preference during registration.
///
/// <https://w3c.github.io/webauthn/#enumdef-authenticatorattachment>
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorAttachment {
    /// Attached through a client-device-specific transport and usually not
    /// removable from it.
    Platform,

    /// Removable, can roam between client devices.
    CrossPlatform,
}
