//! Unit tests for token minting and validation

use carpool_shared::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode_header, encode, Algorithm, Header};
use uuid::Uuid;

use super::*;
use crate::domain::entities::token::Claims;
use crate::errors::{ConfigurationError, DomainError, TokenError};
use crate::services::token::{SigningKey, MAX_TOKEN_LIFETIME_DAYS};

fn token_error(result: Result<impl std::fmt::Debug, DomainError>) -> TokenError {
    match result.unwrap_err() {
        DomainError::Token(err) => err,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn test_access_token_round_trip() {
    let (service, _) = create_test_service();
    let user = test_user("rider@example.com");

    let token = service.create_access_token(&user).unwrap();

    assert_eq!(token.split('.').count(), 3);
    assert_eq!(decode_header(&token).unwrap().alg, Algorithm::HS256);
    assert_eq!(service.get_username(&token).unwrap(), "rider@example.com");
}

#[test]
fn test_access_token_expires_after_thirty_minutes() {
    let (service, _) = create_test_service();
    let before = Utc::now().timestamp();

    let token = service.create_access_token(&test_user("rider@example.com")).unwrap();
    let claims = service.decode_claims(&token).unwrap();
    let after = Utc::now().timestamp();

    assert!(claims.iat >= before && claims.iat <= after);
    assert_eq!(claims.exp - claims.iat, 30 * 60);
    assert_eq!(claims.lifetime().num_milliseconds(), 1_800_000);
}

#[test]
fn test_refresh_token_expires_after_fourteen_days() {
    let (service, _) = create_test_service();
    let refresh = service.create_refresh_token(&test_user("rider@example.com")).unwrap();

    let claims = service.validate_refresh_token(&refresh.key).unwrap();

    assert_eq!(claims.exp - claims.iat, 14 * 24 * 60 * 60);
}

#[test]
fn test_refresh_token_value_is_owner_and_subject_is_random() {
    let (service, _) = create_test_service();
    let user = test_user("driver@example.com");

    let first = service.create_refresh_token(&user).unwrap();
    let second = service.create_refresh_token(&user).unwrap();

    assert_eq!(first.value, user.id);
    assert_eq!(second.value, user.id);
    assert_ne!(first.key, second.key);

    let subject = service.validate_refresh_token(&first.key).unwrap().sub;
    assert_ne!(subject, user.id.to_string());
    assert_ne!(subject, user.email);
    assert!(Uuid::parse_str(&subject).is_ok());
    assert!(!first.key.contains(&user.id.to_string()));
}

#[test]
fn test_expired_token_rejected() {
    let (service, _) = create_test_service();
    let claims = Claims::new(
        "rider@example.com",
        Utc::now() - Duration::hours(2),
        Duration::minutes(30),
    )
    .unwrap();
    let token = service.encode_jwt(&claims).unwrap();

    assert_eq!(token_error(service.get_username(&token)), TokenError::TokenExpired);
}

#[test]
fn test_token_expired_one_second_ago_rejected() {
    let (service, _) = create_test_service();
    let claims = Claims {
        sub: "rider@example.com".to_string(),
        iat: Utc::now().timestamp() - 1800,
        exp: Utc::now().timestamp() - 1,
    };
    let token = service.encode_jwt(&claims).unwrap();

    assert_eq!(token_error(service.get_username(&token)), TokenError::TokenExpired);
}

#[test]
fn test_token_from_other_key_rejected() {
    let (service, _) = create_test_service();
    let (other, _) = create_service_with_config(&JwtConfig::new("another-secret-of-sufficient-length"));

    let foreign = other.create_access_token(&test_user("rider@example.com")).unwrap();

    assert_eq!(token_error(service.get_username(&foreign)), TokenError::InvalidSignature);
}

#[test]
fn test_expired_token_from_other_key_reports_signature() {
    let (service, _) = create_test_service();
    let (other, _) = create_service_with_config(&JwtConfig::new("another-secret-of-sufficient-length"));
    let claims =
        Claims::new("rider@example.com", Utc::now() - Duration::days(1), Duration::minutes(30))
            .unwrap();
    let foreign = other.encode_jwt(&claims).unwrap();

    assert_eq!(token_error(service.get_username(&foreign)), TokenError::InvalidSignature);
}

#[test]
fn test_tampered_payload_rejected() {
    let (service, _) = create_test_service();
    let token = service.create_access_token(&test_user("rider@example.com")).unwrap();
    let other = service.create_access_token(&test_user("admin@example.com")).unwrap();

    let parts: Vec<&str> = token.split('.').collect();
    let other_parts: Vec<&str> = other.split('.').collect();
    let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

    assert_eq!(token_error(service.get_username(&forged)), TokenError::InvalidSignature);
}

#[test]
fn test_malformed_tokens_rejected() {
    let (service, _) = create_test_service();

    for token in ["", "not-a-token", "abc.def", "abc.def.ghi"] {
        assert_eq!(
            token_error(service.get_username(token)),
            TokenError::MalformedToken,
            "token {:?}",
            token
        );
    }
}

#[test]
fn test_unexpected_algorithm_rejected() {
    let (service, _) = create_test_service();
    let key = SigningKey::from_secret(TEST_SECRET).unwrap();
    let claims = Claims::new("rider@example.com", Utc::now(), Duration::minutes(30)).unwrap();
    let token = encode(&Header::new(Algorithm::HS512), &claims, key.encoding_key()).unwrap();

    assert_eq!(token_error(service.get_username(&token)), TokenError::MalformedToken);
}

#[test]
fn test_missing_subject_rejected() {
    let (service, _) = create_test_service();
    let key = SigningKey::from_secret(TEST_SECRET).unwrap();
    let now = Utc::now().timestamp();
    let claims = serde_json::json!({ "iat": now, "exp": now + 60 });
    let token = encode(&Header::new(Algorithm::HS256), &claims, key.encoding_key()).unwrap();

    assert_eq!(token_error(service.get_username(&token)), TokenError::MalformedToken);
}

#[test]
fn test_configured_lifetimes_are_used() {
    let jwt = JwtConfig::new(TEST_SECRET)
        .with_access_expiry_minutes(5)
        .with_refresh_expiry_days(1);
    let (service, _) = create_service_with_config(&jwt);
    let user = test_user("rider@example.com");

    let access = service.create_access_token(&user).unwrap();
    let refresh = service.create_refresh_token(&user).unwrap();

    assert_eq!(service.decode_claims(&access).unwrap().lifetime(), Duration::minutes(5));
    assert_eq!(service.validate_refresh_token(&refresh.key).unwrap().lifetime(), Duration::days(1));
}

#[test]
fn test_missing_secret_is_configuration_error() {
    let store = InMemoryStore::new();
    let result = TokenService::new(&JwtConfig::default(), UserIdentityLookup::new(store));

    assert!(matches!(
        result,
        Err(DomainError::Configuration(ConfigurationError::MissingSecret))
    ));
}

#[test]
fn test_invalid_lifetime_is_configuration_error() {
    let store = InMemoryStore::new();
    let jwt = JwtConfig::new(TEST_SECRET).with_access_expiry_minutes(0);
    let result = TokenService::new(&jwt, UserIdentityLookup::new(store));

    assert!(matches!(
        result,
        Err(DomainError::Configuration(ConfigurationError::InvalidSetting { .. }))
    ));
}

#[test]
fn test_out_of_range_lifetime_is_configuration_error() {
    let huge_access = JwtConfig::new(TEST_SECRET).with_access_expiry_minutes(200_000_000_000);
    let overflowing_refresh = JwtConfig::new(TEST_SECRET).with_refresh_expiry_days(i64::MAX / 2);

    for jwt in [huge_access, overflowing_refresh] {
        let result = TokenService::new(&jwt, UserIdentityLookup::new(InMemoryStore::new()));
        assert!(matches!(
            result,
            Err(DomainError::Configuration(ConfigurationError::InvalidSetting { .. }))
        ));
    }
}

#[test]
fn test_longest_accepted_lifetime_still_mints() {
    let jwt = JwtConfig::new(TEST_SECRET)
        .with_access_expiry_minutes(MAX_TOKEN_LIFETIME_DAYS * 24 * 60)
        .with_refresh_expiry_days(MAX_TOKEN_LIFETIME_DAYS);
    let (service, _) = create_service_with_config(&jwt);
    let user = test_user("rider@example.com");

    let access = service.create_access_token(&user).unwrap();
    let refresh = service.create_refresh_token(&user).unwrap();

    assert_eq!(
        service.decode_claims(&access).unwrap().lifetime(),
        Duration::days(MAX_TOKEN_LIFETIME_DAYS)
    );
    assert!(service.validate_refresh_token(&refresh.key).is_ok());
}

#[tokio::test]
async fn test_concurrent_mint_and_validate() {
    let service = shared_service();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let user = test_user(&format!("member{}@example.com", i));
                let token = service.create_access_token(&user).unwrap();
                service.get_username(&token).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), format!("member{}@example.com", i));
    }
}
