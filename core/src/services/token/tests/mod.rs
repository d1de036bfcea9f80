mod service_tests;

use std::sync::Arc;

use carpool_shared::config::JwtConfig;

use crate::domain::entities::user::User;
use crate::repositories::{InMemoryStore, UserIdentityLookup};
use crate::services::token::TokenService;

pub(super) const TEST_SECRET: &str = "carpool-signing-secret-for-tests";

pub(super) type TestTokenService = TokenService<UserIdentityLookup<InMemoryStore>>;

pub(super) fn create_test_service() -> (TestTokenService, InMemoryStore) {
    create_service_with_config(&JwtConfig::new(TEST_SECRET))
}

pub(super) fn create_service_with_config(jwt: &JwtConfig) -> (TestTokenService, InMemoryStore) {
    let store = InMemoryStore::new();
    let service = TokenService::new(jwt, UserIdentityLookup::new(store.clone()))
        .expect("Failed to create token service");
    (service, store)
}

pub(super) fn shared_service() -> Arc<TestTokenService> {
    Arc::new(create_test_service().0)
}

pub(super) fn test_user(email: &str) -> User {
    User::new(email.to_string(), "hashed".to_string(), "Test Member".to_string())
}
