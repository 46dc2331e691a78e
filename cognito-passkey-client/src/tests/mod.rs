use super::*;
use cognito_passkey_types::{
    cognito::{
        AuthTokens, AuthenticationResult, InitiateAuthResponse, RespondToAuthChallengeResponse,
        StartWebAuthnRegistrationResponse, CHALLENGE_NAME_WEB_AUTHN, PARAM_ANSWER,
        PARAM_CREDENTIAL, PARAM_CREDENTIAL_REQUEST_OPTIONS, PARAM_SECRET_HASH, PARAM_USERNAME,
    },
    webauthn::{
        AuthenticatedPublicKeyCredential, AuthenticatorAssertionResponse,
        AuthenticatorAttestationResponse, CreatedPublicKeyCredential, PublicKeyCredentialType,
    },
    Bytes,
};
use serde_json::json;

const CLIENT_ID: &str = "client";

fn challenge_response(session: &str, options_json: &str) -> InitiateAuthResponse {
    InitiateAuthResponse {
        challenge_name: Some(CHALLENGE_NAME_WEB_AUTHN.to_owned()),
        session: Some(session.to_owned()),
        challenge_parameters: Some(
            [(
                PARAM_CREDENTIAL_REQUEST_OPTIONS.to_owned(),
                options_json.to_owned(),
            )]
            .into(),
        ),
    }
}

fn assertion_credential(raw_id: Vec<u8>) -> AuthenticatedPublicKeyCredential {
    let raw_id = Bytes::from(raw_id);
    AuthenticatedPublicKeyCredential {
        id: String::from(raw_id.clone()),
        raw_id,
        ty: PublicKeyCredentialType::PublicKey,
        response: AuthenticatorAssertionResponse {
            client_data_json: b"{}".to_vec().into(),
            authenticator_data: vec![1].into(),
            signature: vec![2].into(),
            user_handle: None,
        },
    }
}

fn attestation_credential() -> CreatedPublicKeyCredential {
    let raw_id = Bytes::from(vec![9, 9]);
    CreatedPublicKeyCredential {
        id: String::from(raw_id.clone()),
        raw_id,
        ty: PublicKeyCredentialType::PublicKey,
        response: AuthenticatorAttestationResponse {
            client_data_json: b"{}".to_vec().into(),
            attestation_object: vec![3, 4].into(),
            transports: None,
        },
    }
}

fn creation_options_document() -> serde_json::Value {
    json!({
        "rp": {"id": "auth.example.com", "name": "Example"},
        "user": {"id": "AQID", "name": "wendy", "displayName": "Wendy"},
        "challenge": "YWJj",
        "pubKeyCredParams": [{"type": "public-key", "alg": -7}]
    })
}

fn available_authenticator() -> MockPlatformAuthenticator {
    let mut authenticator = MockPlatformAuthenticator::new();
    authenticator.expect_is_available().return_const(true);
    authenticator
}

#[tokio::test]
async fn sign_in_exchanges_a_challenge_for_tokens() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_initiate_auth()
        .withf(|request| {
            request.auth_flow == "USER_AUTH"
                && request.client_id == CLIENT_ID
                && request.auth_parameters.get(PARAM_USERNAME).map(String::as_str) == Some("wendy")
        })
        .times(1)
        .returning(|_| Ok(challenge_response("s1", r#"{"challenge":"YWJj"}"#)));
    cognito
        .expect_respond_to_auth_challenge()
        .withf(|request| {
            let credential = request
                .challenge_responses
                .get(PARAM_CREDENTIAL)
                .expect("a serialized credential");
            request.challenge_name == CHALLENGE_NAME_WEB_AUTHN
                && request.session == "s1"
                && request.challenge_responses.get(PARAM_ANSWER).map(String::as_str)
                    == Some(CHALLENGE_NAME_WEB_AUTHN)
                && request.challenge_responses.get(PARAM_USERNAME).map(String::as_str)
                    == Some("wendy")
                && credential.contains(r#""rawId":"CQk""#)
                && credential.contains(r#""type":"public-key""#)
        })
        .times(1)
        .returning(|_| {
            Ok(RespondToAuthChallengeResponse {
                authentication_result: Some(AuthenticationResult {
                    access_token: Some("A".to_owned()),
                    id_token: Some("I".to_owned()),
                    ..Default::default()
                }),
            })
        });

    let mut authenticator = available_authenticator();
    authenticator
        .expect_get_assertion()
        .withf(|options| *options.challenge == b"abc".to_vec())
        .times(1)
        .returning(|_| Ok(assertion_credential(vec![9, 9])));

    let auth = PasskeyAuth::new(cognito, authenticator, CLIENT_ID, ClientCredentials::Public);
    let tokens = auth.sign_in("wendy").await.expect("sign-in should succeed");

    assert_eq!(
        tokens,
        Some(AuthTokens {
            access_token: "A".to_owned(),
            id_token: "I".to_owned(),
            refresh_token: None,
            expires_in: None,
            token_type: None,
        })
    );
}

#[tokio::test]
async fn sign_in_rejects_a_non_passkey_challenge() {
    let mut cognito = MockCognitoApi::new();
    cognito.expect_initiate_auth().times(1).returning(|_| {
        Ok(InitiateAuthResponse {
            challenge_name: Some("PASSWORD".to_owned()),
            session: Some("s1".to_owned()),
            challenge_parameters: None,
        })
    });
    cognito.expect_respond_to_auth_challenge().never();

    let auth = PasskeyAuth::new(
        cognito,
        MockPlatformAuthenticator::new(),
        CLIENT_ID,
        ClientCredentials::Public,
    );
    let err = auth.sign_in("wendy").await.unwrap_err();

    assert_eq!(err, PasskeyError::UnexpectedChallenge("PASSWORD".to_owned()));
}

#[tokio::test]
async fn sign_in_requires_a_session() {
    let mut cognito = MockCognitoApi::new();
    cognito.expect_initiate_auth().times(1).returning(|_| {
        Ok(InitiateAuthResponse {
            challenge_name: Some(CHALLENGE_NAME_WEB_AUTHN.to_owned()),
            session: None,
            challenge_parameters: Some(
                [(
                    PARAM_CREDENTIAL_REQUEST_OPTIONS.to_owned(),
                    r#"{"challenge":"YWJj"}"#.to_owned(),
                )]
                .into(),
            ),
        })
    });

    let auth = PasskeyAuth::new(
        cognito,
        MockPlatformAuthenticator::new(),
        CLIENT_ID,
        ClientCredentials::Public,
    );
    let err = auth.sign_in("wendy").await.unwrap_err();

    assert_eq!(err, PasskeyError::MissingChallengeData("Session".to_owned()));
}

#[tokio::test]
async fn sign_in_requires_request_options() {
    let mut cognito = MockCognitoApi::new();
    cognito.expect_initiate_auth().times(1).returning(|_| {
        Ok(InitiateAuthResponse {
            challenge_name: Some(CHALLENGE_NAME_WEB_AUTHN.to_owned()),
            session: Some("s1".to_owned()),
            challenge_parameters: Some([("OTHER".to_owned(), "{}".to_owned())].into()),
        })
    });

    let auth = PasskeyAuth::new(
        cognito,
        MockPlatformAuthenticator::new(),
        CLIENT_ID,
        ClientCredentials::Public,
    );
    let err = auth.sign_in("wendy").await.unwrap_err();

    assert_eq!(
        err,
        PasskeyError::MissingChallengeData(PARAM_CREDENTIAL_REQUEST_OPTIONS.to_owned())
    );
}

#[tokio::test]
async fn sign_in_rejects_malformed_options() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_initiate_auth()
        .times(1)
        .returning(|_| Ok(challenge_response("s1", "not json")));

    let auth = PasskeyAuth::new(
        cognito,
        MockPlatformAuthenticator::new(),
        CLIENT_ID,
        ClientCredentials::Public,
    );
    let err = auth.sign_in("wendy").await.unwrap_err();

    assert_eq!(err, PasskeyError::MalformedEncoding);
}

#[tokio::test]
async fn sign_in_rejects_an_empty_challenge() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_initiate_auth()
        .times(1)
        .returning(|_| Ok(challenge_response("s1", r#"{"challenge":""}"#)));
    cognito.expect_respond_to_auth_challenge().never();

    let auth = PasskeyAuth::new(
        cognito,
        MockPlatformAuthenticator::new(),
        CLIENT_ID,
        ClientCredentials::Public,
    );
    let err = auth.sign_in("wendy").await.unwrap_err();

    assert_eq!(err, PasskeyError::MalformedEncoding);
}

#[tokio::test]
async fn allowed_credentials_reach_the_authenticator_decoded() {
    let mut cognito = MockCognitoApi::new();
    cognito.expect_initiate_auth().times(1).returning(|_| {
        Ok(challenge_response(
            "s1",
            r#"{"challenge":"YWJj","allowCredentials":[{"type":"public-key","id":"AQID"}]}"#,
        ))
    });
    cognito.expect_respond_to_auth_challenge().never();

    let mut authenticator = available_authenticator();
    authenticator
        .expect_get_assertion()
        .withf(|options| {
            let allowed = options.allow_credentials.as_deref().unwrap();
            *options.challenge == b"abc".to_vec() && *allowed[0].id == vec![1, 2, 3]
        })
        .times(1)
        .returning(|_| Err(CeremonyFailure::Cancelled));

    let auth = PasskeyAuth::new(cognito, authenticator, CLIENT_ID, ClientCredentials::Public);
    let err = auth.sign_in("wendy").await.unwrap_err();

    assert_eq!(err, PasskeyError::CeremonyCancelled);
}

#[tokio::test]
async fn sign_in_fails_fast_without_an_authenticator() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_initiate_auth()
        .times(1)
        .returning(|_| Ok(challenge_response("s1", r#"{"challenge":"YWJj"}"#)));
    cognito.expect_respond_to_auth_challenge().never();

    let mut authenticator = MockPlatformAuthenticator::new();
    authenticator.expect_is_available().return_const(false);
    authenticator.expect_get_assertion().never();

    let auth = PasskeyAuth::new(cognito, authenticator, CLIENT_ID, ClientCredentials::Public);
    let err = auth.sign_in("wendy").await.unwrap_err();

    assert_eq!(err, PasskeyError::CeremonyUnsupported);
}

#[tokio::test]
async fn sign_in_without_tokens_is_a_soft_outcome() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_initiate_auth()
        .times(1)
        .returning(|_| Ok(challenge_response("s1", r#"{"challenge":"YWJj"}"#)));
    cognito
        .expect_respond_to_auth_challenge()
        .times(1)
        .returning(|_| Ok(RespondToAuthChallengeResponse::default()));

    let mut authenticator = available_authenticator();
    authenticator
        .expect_get_assertion()
        .times(1)
        .returning(|_| Ok(assertion_credential(vec![9, 9])));

    let auth = PasskeyAuth::new(cognito, authenticator, CLIENT_ID, ClientCredentials::Public);
    let tokens = auth.sign_in("wendy").await.expect("not an error");

    assert_eq!(tokens, None);
}

#[tokio::test]
async fn a_confidential_client_proves_its_secret() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_initiate_auth()
        .withf(|request| {
            // HMAC-SHA256("user" || "client", "secret"), standard base64.
            request.auth_parameters.get(PARAM_SECRET_HASH).map(String::as_str)
                == Some("wvW87lzZoI+qQCVGmWVBJLlucdJ65huAVP1z+0MgA6E=")
        })
        .times(1)
        .returning(|_| Ok(challenge_response("s1", r#"{"challenge":"YWJj"}"#)));
    cognito.expect_respond_to_auth_challenge().never();

    let mut authenticator = available_authenticator();
    authenticator
        .expect_get_assertion()
        .times(1)
        .returning(|_| Err(CeremonyFailure::Cancelled));

    let auth = PasskeyAuth::new(
        cognito,
        authenticator,
        CLIENT_ID,
        ClientCredentials::Confidential {
            client_secret: "secret".to_owned(),
        },
    );
    let err = auth.sign_in("user").await.unwrap_err();

    assert_eq!(err, PasskeyError::CeremonyCancelled);
}

#[tokio::test]
async fn a_public_client_sends_no_secret_hash() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_initiate_auth()
        .withf(|request| !request.auth_parameters.contains_key(PARAM_SECRET_HASH))
        .times(1)
        .returning(|_| {
            Ok(InitiateAuthResponse {
                challenge_name: Some("PASSWORD".to_owned()),
                ..Default::default()
            })
        });

    let auth = PasskeyAuth::new(
        cognito,
        MockPlatformAuthenticator::new(),
        CLIENT_ID,
        ClientCredentials::Public,
    );
    let err = auth.sign_in("wendy").await.unwrap_err();

    assert_eq!(err, PasskeyError::UnexpectedChallenge("PASSWORD".to_owned()));
}

#[tokio::test]
async fn a_stale_session_surfaces_the_provider_rejection() {
    let mut cognito = MockCognitoApi::new();
    let mut sessions = mockall::Sequence::new();
    cognito
        .expect_initiate_auth()
        .times(1)
        .in_sequence(&mut sessions)
        .returning(|_| Ok(challenge_response("s1", r#"{"challenge":"YWJj"}"#)));
    cognito
        .expect_initiate_auth()
        .times(1)
        .in_sequence(&mut sessions)
        .returning(|_| Ok(challenge_response("s2", r#"{"challenge":"ZGVm"}"#)));
    cognito
        .expect_respond_to_auth_challenge()
        .withf(|request| request.session == "s1")
        .times(1)
        .returning(|_| {
            Err(RemoteServiceError(
                "NotAuthorizedException: Invalid session for the user.".to_owned(),
            ))
        });

    let auth = PasskeyAuth::new(
        cognito,
        MockPlatformAuthenticator::new(),
        CLIENT_ID,
        ClientCredentials::Public,
    );

    let first = auth.start("wendy").await.unwrap();
    let second = auth.start("wendy").await.unwrap();
    assert_ne!(first.session, second.session);

    // Submitting under the superseded session is the provider's call to
    // reject; the rejection passes through unmodified.
    let err = auth
        .complete("wendy", &first.session, &assertion_credential(vec![9, 9]))
        .await
        .unwrap_err();
    assert!(matches!(err, PasskeyError::RemoteService(_)));
}

#[tokio::test]
async fn registration_binds_a_new_credential() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_start_webauthn_registration()
        .withf(|request| request.access_token == "token")
        .times(1)
        .returning(|_| {
            Ok(StartWebAuthnRegistrationResponse {
                credential_creation_options: Some(creation_options_document()),
            })
        });
    cognito
        .expect_complete_webauthn_registration()
        .withf(|request| {
            request.access_token == "token"
                && request.credential.contains("attestationObject")
                && !request.credential.contains("signature")
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut authenticator = available_authenticator();
    authenticator
        .expect_create_attestation()
        .withf(|options| *options.challenge == b"abc".to_vec() && *options.user.id == vec![1, 2, 3])
        .times(1)
        .returning(|_| Ok(attestation_credential()));

    let registration = PasskeyRegistration::new(cognito, authenticator);
    registration
        .register_with_passkey("token")
        .await
        .expect("registration should succeed");
}

#[tokio::test]
async fn a_cancelled_registration_never_reaches_the_provider_again() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_start_webauthn_registration()
        .times(1)
        .returning(|_| {
            Ok(StartWebAuthnRegistrationResponse {
                credential_creation_options: Some(creation_options_document()),
            })
        });
    cognito.expect_complete_webauthn_registration().never();

    let mut authenticator = available_authenticator();
    authenticator
        .expect_create_attestation()
        .times(1)
        .returning(|_| Err(CeremonyFailure::Cancelled));

    let registration = PasskeyRegistration::new(cognito, authenticator);
    let err = registration.register_with_passkey("token").await.unwrap_err();

    assert_eq!(err, PasskeyError::CeremonyCancelled);
}

#[tokio::test]
async fn registration_requires_an_authenticator_before_any_network_call() {
    let mut cognito = MockCognitoApi::new();
    cognito.expect_start_webauthn_registration().never();
    cognito.expect_complete_webauthn_registration().never();

    let mut authenticator = MockPlatformAuthenticator::new();
    authenticator.expect_is_available().return_const(false);
    authenticator.expect_create_attestation().never();

    let registration = PasskeyRegistration::new(cognito, authenticator);
    let err = registration.register_with_passkey("token").await.unwrap_err();

    assert_eq!(err, PasskeyError::CeremonyUnsupported);
}

#[tokio::test]
async fn registration_requires_creation_options() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_start_webauthn_registration()
        .times(1)
        .returning(|_| Ok(StartWebAuthnRegistrationResponse::default()));

    let registration = PasskeyRegistration::new(cognito, available_authenticator());
    let err = registration.register_with_passkey("token").await.unwrap_err();

    assert_eq!(
        err,
        PasskeyError::MissingChallengeData("CredentialCreationOptions".to_owned())
    );
}

#[tokio::test]
async fn registration_rejects_a_malformed_options_document() {
    let mut cognito = MockCognitoApi::new();
    cognito
        .expect_start_webauthn_registration()
        .times(1)
        .returning(|_| {
            Ok(StartWebAuthnRegistrationResponse {
                credential_creation_options: Some(json!({"challenge": "YWJj"})),
            })
        });

    let registration = PasskeyRegistration::new(cognito, available_authenticator());
    let err = registration.register_with_passkey("token").await.unwrap_err();

    assert_eq!(err, PasskeyError::MalformedEncoding);
}
