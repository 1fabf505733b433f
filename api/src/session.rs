//! Session-token resolution for outgoing requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs as the request interceptor of [`ApiClient`](crate::ApiClient). The
//! identity provider's live session wins; the persisted store is the
//! fallback. Attaching a token is best-effort: resolution problems are logged
//! and the request goes out unauthenticated, leaving any 401 to the caller.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::error::IdentityError;
use crate::store::CredentialStore;
use crate::transport::HttpRequest;

/// External identity-provider session (e.g. an auth server's session
/// endpoint, or an environment-supplied token).
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider {
    /// Bearer token of the active session, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] when the provider cannot be queried.
    async fn session_token(&self) -> Result<Option<String>, IdentityError>;
}

/// Provider for platforms without an identity-provider session.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIdentityProvider;

#[async_trait::async_trait(?Send)]
impl IdentityProvider for NoIdentityProvider {
    async fn session_token(&self) -> Result<Option<String>, IdentityError> {
        Ok(None)
    }
}

/// Diagnostic-only check: three non-empty dot-separated segments with a
/// base64url JSON header (`eyJ`).
#[must_use]
pub fn looks_like_jwt(token: &str) -> bool {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    header.starts_with("eyJ") && !payload.is_empty() && !signature.is_empty()
}

/// Finds the bearer token for a request and mirrors it into the cookie.
pub struct SessionResolver<P, S> {
    provider: P,
    store: S,
}

impl<P: IdentityProvider, S: CredentialStore> SessionResolver<P, S> {
    pub fn new(provider: P, store: S) -> Self {
        Self { provider, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Provider token, else persisted token, else `None`. Never fails.
    pub async fn resolve(&self) -> Option<String> {
        let from_provider = match self.provider.session_token().await {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                log::warn!("identity session lookup failed, using stored token: {e}");
                None
            }
        };
        let token = from_provider.or_else(|| self.store.read().token);

        match &token {
            Some(token) => {
                if !looks_like_jwt(token) {
                    log::debug!("bearer token does not look like a JWT ({} chars)", token.len());
                }
                self.store.refresh_cookie(token);
            }
            None => log::info!("no session token found; sending request unauthenticated"),
        }
        token
    }

    /// Attach `Authorization: Bearer <token>` when a token resolves.
    pub async fn authorize(&self, request: &mut HttpRequest) {
        if let Some(token) = self.resolve().await {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
    }
}
