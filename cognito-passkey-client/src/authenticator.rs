use cognito_passkey_types::webauthn::{
    AuthenticatedPublicKeyCredential, CreatedPublicKeyCredential,
    PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions,
};

/// The ways an authenticator capability reports that a ceremony produced no
/// credential.
///
/// Anything else an implementation might encounter is a programming error on
/// its side; the two cases here are the only ones callers can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyFailure {
    /// The user dismissed the platform prompt, or the platform timed the
    /// ceremony out. Callers typically offer a retry.
    Cancelled,
    /// The capability is absent in the executing environment.
    Unavailable,
}

/// The platform authenticator capability, injected into the flows.
///
/// Implementations wrap whatever the executing environment provides — a
/// browser's `navigator.credentials`, an OS credential API, or a fake in
/// tests. The options they receive have every binary member already decoded
/// to raw bytes, and the credentials they return are re-encoded by the flows
/// before leaving the process.
///
/// [`Self::is_available`] must answer without side effects: the flows query
/// it before invoking a ceremony instead of probing by invocation.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait PlatformAuthenticator {
    /// Whether a ceremony can be performed in this environment at all.
    fn is_available(&self) -> bool;

    /// Prove possession of an existing credential (sign-in).
    async fn get_assertion(
        &self,
        options: PublicKeyCredentialRequestOptions,
    ) -> Result<AuthenticatedPublicKeyCredential, CeremonyFailure>;

    /// Create and attest a new credential (registration).
    async fn create_attestation(
        &self,
        options: PublicKeyCredentialCreationOptions,
    ) -> Result<CreatedPublicKeyCredential, CeremonyFailure>;
}
