//! Persisted credential store: bearer token plus user snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token lives in cookie `login` (path `/`) and is mirrored under local
//! key `token`; the user snapshot is JSON under local key `user`. The store
//! is the only shared mutable resource between the session resolver, the
//! auth state monitor, and sign-in/sign-out flows. Writers overwrite
//! wholesale; the last writer wins.
//!
//! Absence is `None`, never an error. Backend failures degrade to absence.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::types::UserSnapshot;

pub const LOGIN_COOKIE: &str = "login";
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Raw cookie + key/value persistence for one browser context (or its
/// equivalent on other platforms).
pub trait StorageBackend {
    fn cookie(&self, name: &str) -> Option<String>;
    /// Set a site-wide (`path=/`) cookie.
    fn set_cookie(&self, name: &str, value: &str);
    fn remove_cookie(&self, name: &str);
    fn item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }
    fn set_cookie(&self, name: &str, value: &str) {
        (**self).set_cookie(name, value);
    }
    fn remove_cookie(&self, name: &str) {
        (**self).remove_cookie(name);
    }
    fn item(&self, key: &str) -> Option<String> {
        (**self).item(key)
    }
    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }
    fn remove_item(&self, key: &str) {
        (**self).remove_item(key);
    }
}

/// Whatever credentials are currently persisted, unvalidated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub token: Option<String>,
    pub user: Option<UserSnapshot>,
}

/// Handle returned by [`CredentialStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Box<dyn Fn(&StoredCredentials)>;

/// Credential persistence contract shared by every platform.
pub trait CredentialStore {
    /// Current token and snapshot. Blank tokens read as `None`.
    fn read(&self) -> StoredCredentials;

    /// Persist a freshly issued token and its user snapshot, then notify
    /// subscribers.
    fn write(&self, token: &str, user: &UserSnapshot);

    /// Remove every credential entry, then notify subscribers.
    fn clear(&self);

    /// Rewrite only the `login` cookie. Does not notify.
    fn refresh_cookie(&self, token: &str);

    /// Register a change listener. Listeners run after `write`, `clear`
    /// and `notify_external`.
    fn subscribe(&self, listener: Listener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);

    /// Re-read and notify after a change made outside this handle (another
    /// tab, another process).
    fn notify_external(&self);
}

struct Inner<B> {
    backend: B,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn Fn(&StoredCredentials)>)>>,
    next_id: Cell<u64>,
}

/// [`CredentialStore`] over a [`StorageBackend`]. Clones share state.
pub struct PersistedCredentialStore<B> {
    inner: Rc<Inner<B>>,
}

impl<B> Clone for PersistedCredentialStore<B> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<B: StorageBackend> PersistedCredentialStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            inner: Rc::new(Inner { backend, listeners: RefCell::new(Vec::new()), next_id: Cell::new(0) }),
        }
    }

    /// Direct access to the backend, for platform glue and tests.
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    fn notify(&self) {
        let snapshot = self.read();
        // Listeners may subscribe or unsubscribe while running.
        let listeners: Vec<_> = self.inner.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl PersistedCredentialStore<MemoryBackend> {
    /// Store backed by process memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }
}

impl<B: StorageBackend> CredentialStore for PersistedCredentialStore<B> {
    fn read(&self) -> StoredCredentials {
        let backend = &self.inner.backend;
        let token = non_blank(backend.cookie(LOGIN_COOKIE)).or_else(|| non_blank(backend.item(TOKEN_KEY)));
        let user = backend.item(USER_KEY).and_then(|raw| match serde_json::from_str::<UserSnapshot>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("ignoring unreadable `{USER_KEY}` entry: {e}");
                None
            }
        });
        StoredCredentials { token, user }
    }

    fn write(&self, token: &str, user: &UserSnapshot) {
        let backend = &self.inner.backend;
        backend.set_cookie(LOGIN_COOKIE, token);
        backend.set_item(TOKEN_KEY, token);
        match serde_json::to_string(user) {
            Ok(raw) => backend.set_item(USER_KEY, &raw),
            Err(e) => {
                log::warn!("failed to serialize user snapshot: {e}");
                backend.remove_item(USER_KEY);
            }
        }
        self.notify();
    }

    fn clear(&self) {
        let backend = &self.inner.backend;
        backend.remove_cookie(LOGIN_COOKIE);
        backend.remove_item(TOKEN_KEY);
        backend.remove_item(USER_KEY);
        self.notify();
    }

    fn refresh_cookie(&self, token: &str) {
        if self.inner.backend.cookie(LOGIN_COOKIE).as_deref() != Some(token) {
            self.inner.backend.set_cookie(LOGIN_COOKIE, token);
        }
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::from(listener)));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    fn notify_external(&self) {
        self.notify();
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// In-process cookie jar and key/value map.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    cookies: RefCell<HashMap<String, String>>,
    items: RefCell<HashMap<String, String>>,
}

impl StorageBackend for MemoryBackend {
    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.borrow().get(name).cloned()
    }
    fn set_cookie(&self, name: &str, value: &str) {
        self.cookies.borrow_mut().insert(name.to_owned(), value.to_owned());
    }
    fn remove_cookie(&self, name: &str) {
        self.cookies.borrow_mut().remove(name);
    }
    fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}
