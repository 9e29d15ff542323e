use did_jose_core::{Error, PublicKeyJWK, DID};
use did_jose_jws::{
    create_jws, create_jwt, create_multisignature_jwt, verify_jwt, AlgorithmRegistry, JWTHeader,
    JWTOptions, JWTPayload, JWTVerifyOptions, Signer, SignerEntry,
};
use did_jose_mock::{
    single_key_document, ES256KSigner, ES256Signer, Ed25519Signer, FailingResolver, MockResolver,
    SoftwareVerifier,
};

/// This will run once at load time (i.e. presumably before main function is called).
#[ctor::ctor]
fn overall_init() {
    env_logger::init();
}

fn register_issuer(
    resolver: &MockResolver,
    did: &str,
    r#type: &str,
    public_key_jwk: PublicKeyJWK,
) -> DID {
    let did = DID::new(did).expect("pass");
    resolver.register(single_key_document(did.clone(), r#type, public_key_jwk));
    did
}

async fn round_trip_impl(alg: &str, signer: &dyn Signer, r#type: &str, jwk: PublicKeyJWK) {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    let issuer = register_issuer(&resolver, "did:example:issuer", r#type, jwk);

    let payload = JWTPayload::with_claim("name", serde_json::json!("hippo"));
    let options = JWTOptions {
        issuer: issuer.clone(),
        signer,
        expires_in_o: Some(600),
    };
    let jwt = create_jwt(&payload, &options, &JWTHeader::new(alg), &registry)
        .await
        .expect("pass");

    let verified = verify_jwt(&jwt, &JWTVerifyOptions::new(&resolver, &SoftwareVerifier))
        .await
        .expect("pass");
    assert_eq!(verified.issuer, issuer);
    assert_eq!(verified.payload.extra_m["name"], serde_json::json!("hippo"));
    assert_eq!(verified.jwt, jwt);
    assert!(verified.payload.iat_o.is_some());
    assert!(verified.payload.exp_o.is_some());

    // Flipping a payload character must surface as a signature failure, not a decode error.
    let mut char_v: Vec<char> = jwt.chars().collect();
    let dot = jwt.find('.').unwrap();
    char_v[dot + 1] = if char_v[dot + 1] == 'A' { 'B' } else { 'A' };
    let tampered: String = char_v.into_iter().collect();
    match verify_jwt(&tampered, &JWTVerifyOptions::new(&resolver, &SoftwareVerifier)).await {
        Err(Error::InvalidSignature(_)) | Err(Error::MalformedToken(_)) => {}
        other => panic!("tampered JWT produced {:?}", other.map(|v| v.jwt)),
    }
}

#[tokio::test]
async fn test_jwt_round_trip_eddsa() {
    let signer = Ed25519Signer::generate();
    let jwk = signer.public_key_jwk();
    round_trip_impl("EdDSA", &signer, "JsonWebKey2020", jwk.clone()).await;
    // "Ed25519" is an alias for "EdDSA" and must keep working.
    round_trip_impl("Ed25519", &signer, "Ed25519VerificationKey2018", jwk).await;
}

#[tokio::test]
async fn test_jwt_round_trip_es256() {
    let signer = ES256Signer::generate();
    let jwk = signer.public_key_jwk();
    round_trip_impl("ES256", &signer, "EcdsaSecp256r1VerificationKey2019", jwk).await;
}

#[tokio::test]
async fn test_jwt_round_trip_es256k() {
    let signer = ES256KSigner::generate();
    let jwk = signer.public_key_jwk();
    round_trip_impl("ES256K", &signer, "EcdsaSecp256k1VerificationKey2019", jwk.clone()).await;
    round_trip_impl("ES256K-R", &signer, "JsonWebKey2020", jwk).await;
}

#[tokio::test]
async fn test_jwt_expiry() {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    let signer = Ed25519Signer::generate();
    let issuer = register_issuer(
        &resolver,
        "did:example:issuer",
        "JsonWebKey2020",
        signer.public_key_jwk(),
    );
    let options = JWTOptions {
        issuer,
        signer: &signer,
        expires_in_o: Some(600),
    };
    let jwt = create_jwt(
        &JWTPayload::default(),
        &options,
        &JWTHeader::new("EdDSA"),
        &registry,
    )
    .await
    .expect("pass");

    let mut verify_options = JWTVerifyOptions::new(&resolver, &SoftwareVerifier);
    verify_jwt(&jwt, &verify_options).await.expect("pass");

    // At or after exp the token is expired; the boundary instant itself is rejected.
    let decoded = did_jose_jws::decode_jwt(&jwt).expect("pass");
    verify_options.now_o = Some(decoded.payload.exp_o.unwrap());
    assert!(matches!(
        verify_jwt(&jwt, &verify_options).await,
        Err(Error::Expired(_))
    ));
}

#[tokio::test]
async fn test_jwt_not_yet_valid() {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    let signer = Ed25519Signer::generate();
    let issuer = register_issuer(
        &resolver,
        "did:example:issuer",
        "JsonWebKey2020",
        signer.public_key_jwk(),
    );

    let mut payload = JWTPayload::default();
    payload.nbf_o = Some(2_000_000_000);
    let options = JWTOptions {
        issuer: issuer.clone(),
        signer: &signer,
        expires_in_o: None,
    };
    let jwt = create_jwt(&payload, &options, &JWTHeader::new("EdDSA"), &registry)
        .await
        .expect("pass");

    let mut verify_options = JWTVerifyOptions::new(&resolver, &SoftwareVerifier);
    verify_options.now_o = Some(1_999_999_999);
    assert!(matches!(
        verify_jwt(&jwt, &verify_options).await,
        Err(Error::NotYetValid(_))
    ));
    verify_options.now_o = Some(2_000_000_000);
    verify_jwt(&jwt, &verify_options).await.expect("pass");

    // Without "nbf", "iat" stands in as the validity start.
    let mut payload = JWTPayload::default();
    payload.iat_o = Some(2_000_000_000);
    let jwt = create_jwt(&payload, &options, &JWTHeader::new("EdDSA"), &registry)
        .await
        .expect("pass");
    verify_options.now_o = Some(1_999_999_999);
    assert!(matches!(
        verify_jwt(&jwt, &verify_options).await,
        Err(Error::NotYetValid(_))
    ));
}

#[tokio::test]
async fn test_jwt_audience() {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    let signer = Ed25519Signer::generate();
    let issuer = register_issuer(
        &resolver,
        "did:example:issuer",
        "JsonWebKey2020",
        signer.public_key_jwk(),
    );
    let mut payload = JWTPayload::default();
    payload.aud_o = Some(did_jose_jws::Audience::Many(vec![
        "did:example:aud1".to_string(),
        "did:example:aud2".to_string(),
    ]));
    let options = JWTOptions {
        issuer,
        signer: &signer,
        expires_in_o: None,
    };
    let jwt = create_jwt(&payload, &options, &JWTHeader::new("EdDSA"), &registry)
        .await
        .expect("pass");

    let mut verify_options = JWTVerifyOptions::new(&resolver, &SoftwareVerifier);
    verify_options.audience_o = Some("did:example:aud2".to_string());
    verify_jwt(&jwt, &verify_options).await.expect("pass");

    verify_options.audience_o = Some("did:example:other".to_string());
    assert!(matches!(
        verify_jwt(&jwt, &verify_options).await,
        Err(Error::AudienceMismatch(_))
    ));

    // A verifier that doesn't identify as an audience ignores the claim.
    verify_options.audience_o = None;
    verify_jwt(&jwt, &verify_options).await.expect("pass");
}

#[tokio::test]
async fn test_jwt_authentication_requirement() {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    let signer = Ed25519Signer::generate();
    let issuer = DID::new("did:example:issuer").expect("pass");
    // Document whose only key is NOT in the authentication relationship.
    let mut did_document = single_key_document(
        issuer.clone(),
        "JsonWebKey2020",
        signer.public_key_jwk(),
    );
    did_document.authentication.clear();
    resolver.register(did_document);

    let options = JWTOptions {
        issuer,
        signer: &signer,
        expires_in_o: None,
    };
    let jwt = create_jwt(
        &JWTPayload::default(),
        &options,
        &JWTHeader::new("EdDSA"),
        &registry,
    )
    .await
    .expect("pass");

    let mut verify_options = JWTVerifyOptions::new(&resolver, &SoftwareVerifier);
    verify_jwt(&jwt, &verify_options).await.expect("pass");
    verify_options.auth = true;
    assert!(matches!(
        verify_jwt(&jwt, &verify_options).await,
        Err(Error::AuthenticationFailed(_))
    ));
}

#[tokio::test]
async fn test_jwt_issuer_errors() {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    let signer = Ed25519Signer::generate();
    register_issuer(
        &resolver,
        "did:example:issuer",
        "JsonWebKey2020",
        signer.public_key_jwk(),
    );

    // "iss" that is not a DID.
    let mut payload = JWTPayload::default();
    payload.iss_o = Some("joe".to_string());
    let jwt = create_jws(&JWTHeader::new("EdDSA"), &payload, &signer, &registry)
        .await
        .expect("pass");
    assert!(matches!(
        verify_jwt(&jwt, &JWTVerifyOptions::new(&resolver, &SoftwareVerifier)).await,
        Err(Error::InvalidIssuer(_))
    ));

    // Missing "iss".
    let jwt = create_jws(
        &JWTHeader::new("EdDSA"),
        &JWTPayload::default(),
        &signer,
        &registry,
    )
    .await
    .expect("pass");
    assert!(matches!(
        verify_jwt(&jwt, &JWTVerifyOptions::new(&resolver, &SoftwareVerifier)).await,
        Err(Error::InvalidIssuer(_))
    ));

    // Resolution failure propagates with its source preserved.
    let mut payload = JWTPayload::default();
    payload.iss_o = Some("did:example:unregistered".to_string());
    let jwt = create_jws(&JWTHeader::new("EdDSA"), &payload, &signer, &registry)
        .await
        .expect("pass");
    assert!(matches!(
        verify_jwt(&jwt, &JWTVerifyOptions::new(&FailingResolver, &SoftwareVerifier)).await,
        Err(Error::IssuerResolutionFailed(_))
    ));
}

#[tokio::test]
async fn test_jwt_no_matching_key() {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    let ed25519_signer = Ed25519Signer::generate();
    // The document only holds an Ed25519 key type, so an ES256K token from the same DID
    // has no candidate keys at all.
    let issuer = register_issuer(
        &resolver,
        "did:example:issuer",
        "Ed25519VerificationKey2018",
        ed25519_signer.public_key_jwk(),
    );
    let es256k_signer = ES256KSigner::generate();
    let options = JWTOptions {
        issuer,
        signer: &es256k_signer,
        expires_in_o: None,
    };
    let jwt = create_jwt(
        &JWTPayload::default(),
        &options,
        &JWTHeader::new("ES256K"),
        &registry,
    )
    .await
    .expect("pass");
    assert!(matches!(
        verify_jwt(&jwt, &JWTVerifyOptions::new(&resolver, &SoftwareVerifier)).await,
        Err(Error::NoMatchingKey(_))
    ));
}

#[tokio::test]
async fn test_jwt_wrong_key_fails() {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    // Document carries a different key than the one that signs.
    let issuer = register_issuer(
        &resolver,
        "did:example:issuer",
        "JsonWebKey2020",
        Ed25519Signer::generate().public_key_jwk(),
    );
    let signer = Ed25519Signer::generate();
    let options = JWTOptions {
        issuer,
        signer: &signer,
        expires_in_o: None,
    };
    let jwt = create_jwt(
        &JWTPayload::default(),
        &options,
        &JWTHeader::new("EdDSA"),
        &registry,
    )
    .await
    .expect("pass");
    assert!(matches!(
        verify_jwt(&jwt, &JWTVerifyOptions::new(&resolver, &SoftwareVerifier)).await,
        Err(Error::InvalidSignature(_))
    ));
}

#[tokio::test]
async fn test_create_jwt_rejects_negative_expiry() {
    let registry = AlgorithmRegistry::with_builtins();
    let signer = Ed25519Signer::generate();
    let options = JWTOptions {
        issuer: DID::new("did:example:issuer").expect("pass"),
        signer: &signer,
        expires_in_o: Some(-1),
    };
    assert!(matches!(
        create_jwt(
            &JWTPayload::default(),
            &options,
            &JWTHeader::new("EdDSA"),
            &registry
        )
        .await,
        Err(Error::InvalidExpiry(_))
    ));
}

#[tokio::test]
async fn test_multisignature_jwt() {
    let registry = AlgorithmRegistry::with_builtins();
    let resolver = MockResolver::new();
    let ed25519_signer = Ed25519Signer::generate();
    let es256_signer = ES256Signer::generate();

    let issuer = register_issuer(
        &resolver,
        "did:example:alpha",
        "JsonWebKey2020",
        ed25519_signer.public_key_jwk(),
    );

    let jws = create_multisignature_jwt(
        &JWTPayload::with_claim("action", serde_json::json!("approve")),
        &issuer,
        &[
            SignerEntry {
                signer: &ed25519_signer,
                alg: "EdDSA".to_string(),
            },
            SignerEntry {
                signer: &es256_signer,
                alg: "ES256".to_string(),
            },
        ],
        &registry,
    )
    .await
    .expect("pass");
    assert_eq!(jws.signatures.len(), 2);

    // The first entry verifies independently against the issuer's document.
    let verified = verify_jwt(
        &jws.compact_form(0).expect("pass"),
        &JWTVerifyOptions::new(&resolver, &SoftwareVerifier),
    )
    .await
    .expect("pass");
    assert_eq!(
        verified.payload.extra_m["action"],
        serde_json::json!("approve")
    );

    // Both entries cover the same payload octets; the second entry's compact form decodes
    // to the same claims and carries its own algorithm.
    let second = did_jose_jws::decode_jwt(&jws.compact_form(1).expect("pass")).expect("pass");
    assert_eq!(second.header.alg, "ES256");
    assert_eq!(second.payload, verified.payload);

    // The JSON serialization round-trips.
    let json = serde_json::to_string(&jws).expect("pass");
    let parsed: did_jose_jws::GeneralJWS = serde_json::from_str(&json).expect("pass");
    assert_eq!(parsed, jws);

    // Corrupting one entry's signature leaves the other entry verifiable.
    let mut corrupted = jws.clone();
    corrupted.signatures[1].signature = "AAAA".to_string();
    verify_jwt(
        &corrupted.compact_form(0).expect("pass"),
        &JWTVerifyOptions::new(&resolver, &SoftwareVerifier),
    )
    .await
    .expect("pass");
}

#[tokio::test]
async fn test_multisignature_requires_signers() {
    let registry = AlgorithmRegistry::with_builtins();
    assert!(matches!(
        create_multisignature_jwt(
            &JWTPayload::default(),
            &DID::new("did:example:issuer").expect("pass"),
            &[],
            &registry
        )
        .await,
        Err(Error::Configuration(_))
    ));
}
