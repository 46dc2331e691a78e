use std::collections::HashMap;

use cognito_passkey_types::{
    cognito::{
        AuthTokens, AuthenticationResult, InitiateAuthRequest, RespondToAuthChallengeRequest,
        WebAuthnChallenge, AUTH_FLOW_USER_AUTH, CHALLENGE_NAME_WEB_AUTHN, PARAM_ANSWER,
        PARAM_CREDENTIAL, PARAM_CREDENTIAL_REQUEST_OPTIONS, PARAM_SECRET_HASH, PARAM_USERNAME,
    },
    webauthn::{AuthenticatedPublicKeyCredential, PublicKeyCredentialRequestOptions},
};

use crate::{ClientCredentials, CognitoApi, PasskeyError, PlatformAuthenticator};

/// Drives a passkey sign-in: obtain a `WEB_AUTHN` challenge from the
/// provider, run the assertion ceremony against the platform authenticator,
/// and submit the result.
///
/// The flow is stateless between invocations; everything a sign-in needs is
/// threaded through the call chain, so concurrent sign-ins on one
/// `PasskeyAuth` are independent.
pub struct PasskeyAuth<C, A> {
    cognito: C,
    authenticator: A,
    client_id: String,
    credentials: ClientCredentials,
}

impl<C, A> PasskeyAuth<C, A>
where
    C: CognitoApi + Sync,
    A: PlatformAuthenticator + Sync,
{
    /// Create a sign-in flow for one app client.
    pub fn new(
        cognito: C,
        authenticator: A,
        client_id: impl Into<String>,
        credentials: ClientCredentials,
    ) -> Self {
        Self {
            cognito,
            authenticator,
            client_id: client_id.into(),
            credentials,
        }
    }

    /// Sign `username` in with a passkey.
    ///
    /// Returns the normalized tokens, or `Ok(None)` when the provider
    /// accepted the assertion but requires a further step before issuing
    /// tokens — an incomplete flow, not a failure.
    ///
    /// The decoded challenge and the authenticator-ready structures never
    /// leave this call.
    pub async fn sign_in(&self, username: &str) -> Result<Option<AuthTokens>, PasskeyError> {
        let challenge = self.start(username).await?;
        let credential = self.run_ceremony(challenge.request_options).await?;
        self.complete(username, &challenge.session, &credential)
            .await
    }

    /// Request a challenge for `username` and parse it into a
    /// [`WebAuthnChallenge`].
    pub(crate) async fn start(&self, username: &str) -> Result<WebAuthnChallenge, PasskeyError> {
        log::debug!("initiating USER_AUTH flow");

        let mut auth_parameters =
            HashMap::from([(PARAM_USERNAME.to_owned(), username.to_owned())]);
        if let Some(hash) = self.credentials.secret_hash(username, &self.client_id) {
            auth_parameters.insert(PARAM_SECRET_HASH.to_owned(), hash);
        }

        let response = self
            .cognito
            .initiate_auth(InitiateAuthRequest {
                auth_flow: AUTH_FLOW_USER_AUTH.to_owned(),
                auth_parameters,
                client_id: self.client_id.clone(),
            })
            .await?;

        let challenge_name = response.challenge_name.unwrap_or_default();
        if challenge_name != CHALLENGE_NAME_WEB_AUTHN {
            log::warn!("provider posed challenge {challenge_name:?} instead of WEB_AUTHN");
            return Err(PasskeyError::UnexpectedChallenge(challenge_name));
        }

        let session = response
            .session
            .ok_or_else(|| PasskeyError::MissingChallengeData("Session".to_owned()))?;
        let options_json = response
            .challenge_parameters
            .and_then(|mut parameters| parameters.remove(PARAM_CREDENTIAL_REQUEST_OPTIONS))
            .ok_or_else(|| {
                PasskeyError::MissingChallengeData(PARAM_CREDENTIAL_REQUEST_OPTIONS.to_owned())
            })?;

        let request_options: PublicKeyCredentialRequestOptions =
            serde_json::from_str(&options_json).map_err(|_| PasskeyError::MalformedEncoding)?;

        Ok(WebAuthnChallenge {
            session,
            request_options,
        })
    }

    /// Run the assertion ceremony for an already-parsed challenge.
    ///
    /// Availability is queried before invoking the capability, and the
    /// decoded binary members are checked for the non-empty invariant first,
    /// so the authenticator only ever sees well-formed input.
    pub(crate) async fn run_ceremony(
        &self,
        options: PublicKeyCredentialRequestOptions,
    ) -> Result<AuthenticatedPublicKeyCredential, PasskeyError> {
        if options.challenge.is_empty() {
            return Err(PasskeyError::MalformedEncoding);
        }
        if let Some(allowed) = &options.allow_credentials {
            if allowed.iter().any(|descriptor| descriptor.id.is_empty()) {
                return Err(PasskeyError::MalformedEncoding);
            }
        }

        if !self.authenticator.is_available() {
            return Err(PasskeyError::CeremonyUnsupported);
        }

        self.authenticator
            .get_assertion(options)
            .await
            .map_err(Into::into)
    }

    /// Submit the assertion under the flow's session token and normalize the
    /// provider's answer.
    pub(crate) async fn complete(
        &self,
        username: &str,
        session: &str,
        credential: &AuthenticatedPublicKeyCredential,
    ) -> Result<Option<AuthTokens>, PasskeyError> {
        // SAFETY: serializing a credential this crate just built cannot fail.
        let credential_json = serde_json::to_string(credential).unwrap();

        let challenge_responses = HashMap::from([
            (PARAM_USERNAME.to_owned(), username.to_owned()),
            (PARAM_ANSWER.to_owned(), CHALLENGE_NAME_WEB_AUTHN.to_owned()),
            (PARAM_CREDENTIAL.to_owned(), credential_json),
        ]);

        let response = self
            .cognito
            .respond_to_auth_challenge(RespondToAuthChallengeRequest {
                challenge_name: CHALLENGE_NAME_WEB_AUTHN.to_owned(),
                client_id: self.client_id.clone(),
                session: session.to_owned(),
                challenge_responses,
            })
            .await?;

        response
            .authentication_result
            .map(normalize_tokens)
            .transpose()
    }
}

/// Flatten the provider's optional-everything token record into
/// [`AuthTokens`], requiring the two tokens a completed sign-in always has.
fn normalize_tokens(result: AuthenticationResult) -> Result<AuthTokens, PasskeyError> {
    Ok(AuthTokens {
        access_token: result
            .access_token
            .ok_or_else(|| PasskeyError::MissingChallengeData("AccessToken".to_owned()))?,
        id_token: result
            .id_token
            .ok_or_else(|| PasskeyError::MissingChallengeData("IdToken".to_owned()))?,
        refresh_token: result.refresh_token,
        expires_in: result.expires_in,
        token_type: result.token_type,
    })
}
