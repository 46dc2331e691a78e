//! # Cognito Passkey
//!
//! A small library for passkey (webauthn) sign-in and registration against
//! Amazon Cognito's `USER_AUTH` challenge protocol. It is comprised of two
//! sub-libraries:
//!
//! - `cognito-passkey-client` - usable as [`client`], the flow drivers: a
//!   sign-in pipeline ([`client::PasskeyAuth`]) and a registration pipeline
//!   ([`client::PasskeyRegistration`]), each a strict start → ceremony →
//!   complete chain.
//! - `cognito-passkey-types` - usable as [`types`], the wire structures
//!   those flows exchange: webauthn option and credential shapes, the
//!   provider's PascalCase protocol records, and the base64url transcoding
//!   utilities ([`types::Bytes`], [`types::encoding`], [`types::crypto`]).
//!
//! The library deliberately stops at two seams. It never talks to the
//! network: the embedder supplies a [`client::CognitoApi`] implementation
//! wrapping whatever transport it already has. And it never performs a
//! ceremony itself: the embedder supplies a [`client::PlatformAuthenticator`]
//! wrapping the environment's credential API. Everything between those
//! seams — challenge-type checks, base64url decoding of challenges and
//! credential IDs, invoking the right ceremony, re-encoding the result, and
//! normalizing the returned tokens — is handled here.
//!
//! Both seams are plain async traits, so tests (and the runnable example in
//! `examples/usage.rs`) drive complete flows with in-memory fakes. With the
//! `testable` feature of `cognito-passkey-client`, ready-made `mockall`
//! mocks are exported for both.
//!
//! What this library is not: it does not verify signatures (the provider
//! does), does not store or refresh tokens, and does not retry failed calls.
//! Failures surface as [`client::PasskeyError`], one distinguishable
//! category per cause, so an application can offer a retry for a cancelled
//! ceremony and a fallback for an unsupported environment.

pub use cognito_passkey_client as client;
pub use cognito_passkey_types as types;
