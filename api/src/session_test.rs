use futures::executor::block_on;

use super::*;
use crate::store::{LOGIN_COOKIE, PersistedCredentialStore, StorageBackend};
use crate::types::{Role, UserSnapshot};

struct FixedProvider(Option<&'static str>);

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FixedProvider {
    async fn session_token(&self) -> Result<Option<String>, IdentityError> {
        Ok(self.0.map(str::to_owned))
    }
}

struct FailingProvider;

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FailingProvider {
    async fn session_token(&self) -> Result<Option<String>, IdentityError> {
        Err(IdentityError::Lookup("session endpoint unreachable".to_owned()))
    }
}

fn snapshot() -> UserSnapshot {
    UserSnapshot {
        id: "1".to_owned(),
        email: "a@paw.test".to_owned(),
        name: "A".to_owned(),
        image: None,
        firstname: "A".to_owned(),
        lastname: None,
        user_type: Role::General,
    }
}

// =============================================================
// looks_like_jwt
// =============================================================

#[test]
fn jwt_heuristic_accepts_three_segment_tokens() {
    assert!(looks_like_jwt("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiI3In0.sig"));
}

#[test]
fn jwt_heuristic_rejects_other_shapes() {
    assert!(!looks_like_jwt("opaque-token"));
    assert!(!looks_like_jwt("eyJa.b"));
    assert!(!looks_like_jwt("eyJa.b.c.d"));
    assert!(!looks_like_jwt("abc.def.ghi"));
    assert!(!looks_like_jwt("eyJa..sig"));
}

// =============================================================
// resolve
// =============================================================

#[test]
fn provider_token_wins_over_stored_token() {
    let store = PersistedCredentialStore::in_memory();
    store.write("stored", &snapshot());
    let resolver = SessionResolver::new(FixedProvider(Some("live")), store);
    assert_eq!(block_on(resolver.resolve()).as_deref(), Some("live"));
}

#[test]
fn falls_back_to_stored_token_without_provider_session() {
    let store = PersistedCredentialStore::in_memory();
    store.write("stored", &snapshot());
    let resolver = SessionResolver::new(FixedProvider(None), store);
    assert_eq!(block_on(resolver.resolve()).as_deref(), Some("stored"));
}

#[test]
fn blank_provider_token_is_treated_as_absent() {
    let store = PersistedCredentialStore::in_memory();
    store.write("stored", &snapshot());
    let resolver = SessionResolver::new(FixedProvider(Some("   ")), store);
    assert_eq!(block_on(resolver.resolve()).as_deref(), Some("stored"));
}

#[test]
fn provider_failure_degrades_to_stored_token() {
    let store = PersistedCredentialStore::in_memory();
    store.write("stored", &snapshot());
    let resolver = SessionResolver::new(FailingProvider, store);
    assert_eq!(block_on(resolver.resolve()).as_deref(), Some("stored"));
}

#[test]
fn provider_failure_with_empty_store_resolves_none() {
    let resolver = SessionResolver::new(FailingProvider, PersistedCredentialStore::in_memory());
    assert_eq!(block_on(resolver.resolve()), None);
}

#[test]
fn provider_token_heals_expired_cookie() {
    let store = PersistedCredentialStore::in_memory();
    let resolver = SessionResolver::new(FixedProvider(Some("live")), store.clone());
    block_on(resolver.resolve());
    assert_eq!(store.backend().cookie(LOGIN_COOKIE).as_deref(), Some("live"));
}

#[test]
fn stored_mirror_token_is_rewritten_into_cookie() {
    let store = PersistedCredentialStore::in_memory();
    store.write("stored", &snapshot());
    store.backend().remove_cookie(LOGIN_COOKIE);
    let resolver = SessionResolver::new(NoIdentityProvider, store.clone());
    block_on(resolver.resolve());
    assert_eq!(store.backend().cookie(LOGIN_COOKIE).as_deref(), Some("stored"));
}

// =============================================================
// authorize
// =============================================================

#[test]
fn authorize_attaches_bearer_header() {
    let resolver = SessionResolver::new(FixedProvider(Some("live")), PersistedCredentialStore::in_memory());
    let mut request = HttpRequest::get("/user/info");
    block_on(resolver.authorize(&mut request));
    assert_eq!(request.header("authorization"), Some("Bearer live"));
}

#[test]
fn authorize_replaces_stale_header() {
    let resolver = SessionResolver::new(FixedProvider(Some("live")), PersistedCredentialStore::in_memory());
    let mut request = HttpRequest::get("/user/info");
    request.set_header("authorization", "Bearer old");
    block_on(resolver.authorize(&mut request));
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.header("Authorization"), Some("Bearer live"));
}

#[test]
fn authorize_without_token_leaves_request_unauthenticated() {
    let resolver = SessionResolver::new(NoIdentityProvider, PersistedCredentialStore::in_memory());
    let mut request = HttpRequest::get("/pet/list");
    block_on(resolver.authorize(&mut request));
    assert_eq!(request.header("Authorization"), None);
}
