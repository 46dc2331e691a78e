//! Sample app driving both passkey pipelines against an in-memory identity
//! provider and a canned platform authenticator.
//!
//! A real embedder would back [`CognitoApi`] with its HTTP stack and
//! [`PlatformAuthenticator`] with the environment's credential API; the
//! flows themselves do not change.

use std::collections::HashMap;
use std::sync::Mutex;

use cognito_passkey::{
    client::{
        CeremonyFailure, ClientCredentials, CognitoApi, PasskeyAuth, PasskeyRegistration,
        PlatformAuthenticator, RemoteServiceError,
    },
    types::{
        cognito::{
            CompleteWebAuthnRegistrationRequest, InitiateAuthRequest, InitiateAuthResponse,
            RespondToAuthChallengeRequest, RespondToAuthChallengeResponse,
            StartWebAuthnRegistrationRequest, StartWebAuthnRegistrationResponse,
            AuthenticationResult, CHALLENGE_NAME_WEB_AUTHN, PARAM_CREDENTIAL,
            PARAM_CREDENTIAL_REQUEST_OPTIONS,
        },
        rand::random_vec,
        webauthn::{
            AuthenticatedPublicKeyCredential, AuthenticatorAssertionResponse,
            AuthenticatorAttestationResponse, CreatedPublicKeyCredential,
            PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions,
            PublicKeyCredentialRpEntity, PublicKeyCredentialType, PublicKeyCredentialUserEntity,
            PublicKeyCredentialParameters,
        },
        Bytes,
    },
};

/// An identity provider living entirely in process: issues one session per
/// started flow and accepts any well-formed answer under a live session.
#[derive(Default)]
struct DemoCognito {
    sessions: Mutex<HashMap<String, u32>>,
}

#[async_trait::async_trait]
impl CognitoApi for DemoCognito {
    async fn initiate_auth(
        &self,
        _request: InitiateAuthRequest,
    ) -> Result<InitiateAuthResponse, RemoteServiceError> {
        let session = {
            let mut sessions = self.sessions.lock().unwrap();
            let serial = u32::try_from(sessions.len()).unwrap();
            let session = format!("session-{serial}");
            sessions.insert(session.clone(), serial);
            session
        };

        let options = PublicKeyCredentialRequestOptions {
            challenge: random_vec(32).into(),
            timeout: Some(60_000),
            rp_id: Some("auth.example.com".to_owned()),
            allow_credentials: None,
            user_verification: Default::default(),
            extensions: None,
        };

        Ok(InitiateAuthResponse {
            challenge_name: Some(CHALLENGE_NAME_WEB_AUTHN.to_owned()),
            session: Some(session),
            challenge_parameters: Some(HashMap::from([(
                PARAM_CREDENTIAL_REQUEST_OPTIONS.to_owned(),
                serde_json::to_string(&options).unwrap(),
            )])),
        })
    }

    async fn respond_to_auth_challenge(
        &self,
        request: RespondToAuthChallengeRequest,
    ) -> Result<RespondToAuthChallengeResponse, RemoteServiceError> {
        if !self.sessions.lock().unwrap().contains_key(&request.session) {
            return Err(RemoteServiceError("invalid session".to_owned()));
        }
        if !request.challenge_responses.contains_key(PARAM_CREDENTIAL) {
            return Err(RemoteServiceError("missing credential".to_owned()));
        }

        Ok(RespondToAuthChallengeResponse {
            authentication_result: Some(AuthenticationResult {
                access_token: Some("demo-access-token".to_owned()),
                id_token: Some("demo-id-token".to_owned()),
                refresh_token: None,
                expires_in: Some(3600),
                token_type: Some("Bearer".to_owned()),
            }),
        })
    }

    async fn start_webauthn_registration(
        &self,
        _request: StartWebAuthnRegistrationRequest,
    ) -> Result<StartWebAuthnRegistrationResponse, RemoteServiceError> {
        let options = PublicKeyCredentialCreationOptions {
            rp: PublicKeyCredentialRpEntity {
                id: Some("auth.example.com".to_owned()),
                name: "Example".to_owned(),
            },
            user: PublicKeyCredentialUserEntity {
                id: random_vec(16).into(),
                name: "wendy".to_owned(),
                display_name: "Wendy Appleseed".to_owned(),
            },
            challenge: random_vec(32).into(),
            pub_key_cred_params: vec![PublicKeyCredentialParameters {
                ty: PublicKeyCredentialType::PublicKey,
                alg: -7,
            }],
            timeout: None,
            exclude_credentials: None,
            authenticator_selection: None,
            attestation: Default::default(),
            extensions: None,
        };

        Ok(StartWebAuthnRegistrationResponse {
            credential_creation_options: Some(serde_json::to_value(&options).unwrap()),
        })
    }

    async fn complete_webauthn_registration(
        &self,
        request: CompleteWebAuthnRegistrationRequest,
    ) -> Result<(), RemoteServiceError> {
        if !request.credential.contains("attestationObject") {
            return Err(RemoteServiceError("not an attestation".to_owned()));
        }
        Ok(())
    }
}

/// A platform authenticator returning canned ceremony results.
struct DemoAuthenticator;

#[async_trait::async_trait]
impl PlatformAuthenticator for DemoAuthenticator {
    fn is_available(&self) -> bool {
        true
    }

    async fn get_assertion(
        &self,
        _options: PublicKeyCredentialRequestOptions,
    ) -> Result<AuthenticatedPublicKeyCredential, CeremonyFailure> {
        let raw_id = Bytes::from(random_vec(16));
        Ok(AuthenticatedPublicKeyCredential {
            id: String::from(raw_id.clone()),
            raw_id,
            ty: PublicKeyCredentialType::PublicKey,
            response: AuthenticatorAssertionResponse {
                client_data_json: br#"{"type":"webauthn.get"}"#.to_vec().into(),
                authenticator_data: random_vec(37).into(),
                signature: random_vec(70).into(),
                user_handle: None,
            },
        })
    }

    async fn create_attestation(
        &self,
        _options: PublicKeyCredentialCreationOptions,
    ) -> Result<CreatedPublicKeyCredential, CeremonyFailure> {
        let raw_id = Bytes::from(random_vec(16));
        Ok(CreatedPublicKeyCredential {
            id: String::from(raw_id.clone()),
            raw_id,
            ty: PublicKeyCredentialType::PublicKey,
            response: AuthenticatorAttestationResponse {
                client_data_json: br#"{"type":"webauthn.create"}"#.to_vec().into(),
                attestation_object: random_vec(120).into(),
                transports: None,
            },
        })
    }
}

#[tokio::main]
async fn main() {
    let auth = PasskeyAuth::new(
        DemoCognito::default(),
        DemoAuthenticator,
        "demo-client-id",
        ClientCredentials::Public,
    );

    let tokens = auth
        .sign_in("wendy")
        .await
        .expect("sign-in should succeed")
        .expect("the demo provider always issues tokens");
    println!("signed in, access token: {}", tokens.access_token);

    let registration = PasskeyRegistration::new(DemoCognito::default(), DemoAuthenticator);
    registration
        .register_with_passkey(&tokens.access_token)
        .await
        .expect("registration should succeed");
    println!("registered a new passkey");
}
