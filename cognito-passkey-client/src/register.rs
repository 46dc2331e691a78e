use cognito_passkey_types::{
    cognito::{CompleteWebAuthnRegistrationRequest, StartWebAuthnRegistrationRequest},
    webauthn::{CreatedPublicKeyCredential, PublicKeyCredentialCreationOptions},
};

use crate::{CognitoApi, PasskeyError, PlatformAuthenticator};

/// Drives a passkey registration: obtain creation options under a bearer
/// access token, run the attestation ceremony, and submit the new credential
/// for binding.
///
/// Like [`crate::PasskeyAuth`], the flow is stateless between invocations.
pub struct PasskeyRegistration<C, A> {
    cognito: C,
    authenticator: A,
}

impl<C, A> PasskeyRegistration<C, A>
where
    C: CognitoApi + Sync,
    A: PlatformAuthenticator + Sync,
{
    /// Create a registration flow.
    pub fn new(cognito: C, authenticator: A) -> Self {
        Self {
            cognito,
            authenticator,
        }
    }

    /// Register a new passkey for the signed-in user `access_token` belongs
    /// to.
    ///
    /// Availability of the authenticator capability is a precondition of the
    /// whole flow and is checked here, before the first network call, rather
    /// than deep inside the ceremony.
    pub async fn register_with_passkey(&self, access_token: &str) -> Result<(), PasskeyError> {
        if !self.authenticator.is_available() {
            return Err(PasskeyError::CeremonyUnsupported);
        }

        let options = self.start(access_token).await?;
        let credential = self.run_ceremony(options).await?;
        self.complete(access_token, &credential).await
    }

    /// Request and parse the creation options document.
    pub(crate) async fn start(
        &self,
        access_token: &str,
    ) -> Result<PublicKeyCredentialCreationOptions, PasskeyError> {
        log::debug!("starting webauthn registration");

        let response = self
            .cognito
            .start_webauthn_registration(StartWebAuthnRegistrationRequest {
                access_token: access_token.to_owned(),
            })
            .await?;

        let document = response.credential_creation_options.ok_or_else(|| {
            PasskeyError::MissingChallengeData("CredentialCreationOptions".to_owned())
        })?;

        serde_json::from_value(document).map_err(|_| PasskeyError::MalformedEncoding)
    }

    /// Run the attestation ceremony for already-parsed creation options.
    ///
    /// The result is attestation-shaped: it carries an `attestationObject`
    /// and no assertion members, which is what the provider verifies during
    /// credential binding.
    pub(crate) async fn run_ceremony(
        &self,
        options: PublicKeyCredentialCreationOptions,
    ) -> Result<CreatedPublicKeyCredential, PasskeyError> {
        if options.challenge.is_empty() || options.user.id.is_empty() {
            return Err(PasskeyError::MalformedEncoding);
        }
        if let Some(excluded) = &options.exclude_credentials {
            if excluded.iter().any(|descriptor| descriptor.id.is_empty()) {
                return Err(PasskeyError::MalformedEncoding);
            }
        }

        if !self.authenticator.is_available() {
            return Err(PasskeyError::CeremonyUnsupported);
        }

        self.authenticator
            .create_attestation(options)
            .await
            .map_err(Into::into)
    }

    /// Submit the attested credential under the same bearer token that
    /// started the flow.
    pub(crate) async fn complete(
        &self,
        access_token: &str,
        credential: &CreatedPublicKeyCredential,
    ) -> Result<(), PasskeyError> {
        // SAFETY: serializing a credential this crate just built cannot fail.
        let credential_json = serde_json::to_string(credential).unwrap();

        self.cognito
            .complete_webauthn_registration(CompleteWebAuthnRegistrationRequest {
                access_token: access_token.to_owned(),
                credential: credential_json,
            })
            .await
            .map_err(Into::into)
    }
}
