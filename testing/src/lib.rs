//! # Lunamart Testing
//!
//! Deterministic mocks for the seams of the retail suite:
//!
//! - [`mocks::FixedClock`] - frozen time
//! - [`mocks::SequentialIds`] - predictable opaque ids
//! - [`mocks::FakeAuth`] - an in-memory identity provider
//! - [`FlakyCollections`] - failure injection over any collection store,
//!   for exercising the best-effort workflows' partial-failure paths

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use lunamart_core::collections::{Collections, Path, Snapshot, StoreError, StoreFuture};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Mock implementations of the environment and identity seams.
pub mod mocks {
    use chrono::{DateTime, Utc};
    use lunamart_core::auth::{AuthError, AuthFuture, AuthGateway, ProfileUpdate, UserProfile};
    use lunamart_core::environment::{Clock, IdSource};
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::sync::Mutex;

    /// Fixed clock for deterministic tests: always returns the same time.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Creates a clock frozen at `time`.
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// A fixed clock at 2025-01-01 00:00:00 UTC.
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::from_timestamp_millis(1_735_689_600_000).unwrap_or_default())
    }

    /// Id source yielding `prefix-1`, `prefix-2`, … in call order.
    #[derive(Debug)]
    pub struct SequentialIds {
        prefix: &'static str,
        counter: AtomicU64,
    }

    impl SequentialIds {
        /// Creates a sequence with the given prefix.
        #[must_use]
        pub const fn new(prefix: &'static str) -> Self {
            Self {
                prefix,
                counter: AtomicU64::new(0),
            }
        }
    }

    impl IdSource for SequentialIds {
        fn opaque_id(&self) -> String {
            let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
            format!("{}-{n}", self.prefix)
        }
    }

    struct FakeAuthState {
        password: String,
        profile: UserProfile,
        signed_in: bool,
    }

    /// In-memory identity provider with one account.
    pub struct FakeAuth {
        state: Mutex<FakeAuthState>,
    }

    impl FakeAuth {
        /// Creates a provider knowing one email/password pair, signed out.
        #[must_use]
        pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
            Self {
                state: Mutex::new(FakeAuthState {
                    password: password.into(),
                    profile: UserProfile {
                        email: email.into(),
                        display_name: None,
                        photo_url: None,
                    },
                    signed_in: false,
                }),
            }
        }

        /// Creates a provider that is already signed in.
        #[must_use]
        pub fn signed_in(email: impl Into<String>, password: impl Into<String>) -> Self {
            let auth = Self::new(email, password);
            if let Ok(mut state) = auth.state.try_lock() {
                state.signed_in = true;
            }
            auth
        }
    }

    impl AuthGateway for FakeAuth {
        fn sign_in(&self, email: String, password: String) -> AuthFuture<'_, UserProfile> {
            Box::pin(async move {
                let mut state = self.state.lock().await;
                if state.profile.email == email && state.password == password {
                    state.signed_in = true;
                    Ok(state.profile.clone())
                } else {
                    Err(AuthError::InvalidCredentials)
                }
            })
        }

        fn current_user(&self) -> AuthFuture<'_, Option<UserProfile>> {
            Box::pin(async move {
                let state = self.state.lock().await;
                Ok(state.signed_in.then(|| state.profile.clone()))
            })
        }

        fn update_profile(&self, update: ProfileUpdate) -> AuthFuture<'_, UserProfile> {
            Box::pin(async move {
                let mut state = self.state.lock().await;
                if !state.signed_in {
                    return Err(AuthError::NotSignedIn);
                }
                if let Some(display_name) = update.display_name {
                    state.profile.display_name = Some(display_name);
                }
                if let Some(photo_url) = update.photo_url {
                    state.profile.photo_url = Some(photo_url);
                }
                Ok(state.profile.clone())
            })
        }

        fn change_password(&self, current: String, new: String) -> AuthFuture<'_, ()> {
            Box::pin(async move {
                let mut state = self.state.lock().await;
                if !state.signed_in {
                    return Err(AuthError::NotSignedIn);
                }
                if state.password != current {
                    return Err(AuthError::InvalidCredentials);
                }
                state.password = new;
                Ok(())
            })
        }
    }
}

/// A collection store wrapper that fails writes to a chosen set of
/// collections, for driving the workflows into their partial-failure
/// branches. Reads and subscriptions always delegate.
pub struct FlakyCollections {
    inner: Arc<dyn Collections>,
    failing_writes: HashSet<Path>,
}

impl FlakyCollections {
    /// Wraps a store, failing every write to the given collections.
    #[must_use]
    pub fn failing_writes(
        inner: Arc<dyn Collections>,
        paths: impl IntoIterator<Item = Path>,
    ) -> Arc<Self> {
        Arc::new(Self {
            inner,
            failing_writes: paths.into_iter().collect(),
        })
    }

    fn check(&self, path: Path) -> Result<(), StoreError> {
        if self.failing_writes.contains(&path) {
            Err(StoreError::Backend(format!("injected failure on {path}")))
        } else {
            Ok(())
        }
    }
}

impl Collections for FlakyCollections {
    fn load(&self, path: Path, key: String) -> StoreFuture<'_, Option<Value>> {
        self.inner.load(path, key)
    }

    fn snapshot(&self, path: Path) -> StoreFuture<'_, Snapshot> {
        self.inner.snapshot(path)
    }

    fn put(&self, path: Path, key: String, value: Value) -> StoreFuture<'_, ()> {
        match self.check(path) {
            Ok(()) => self.inner.put(path, key, value),
            Err(e) => Box::pin(async move { Err(e) }),
        }
    }

    fn merge(&self, path: Path, key: String, partial: Value) -> StoreFuture<'_, ()> {
        match self.check(path) {
            Ok(()) => self.inner.merge(path, key, partial),
            Err(e) => Box::pin(async move { Err(e) }),
        }
    }

    fn apply_delta(
        &self,
        path: Path,
        key: String,
        field: &'static str,
        delta: i64,
    ) -> StoreFuture<'_, i64> {
        match self.check(path) {
            Ok(()) => self.inner.apply_delta(path, key, field, delta),
            Err(e) => Box::pin(async move { Err(e) }),
        }
    }

    fn remove(&self, path: Path, key: String) -> StoreFuture<'_, ()> {
        match self.check(path) {
            Ok(()) => self.inner.remove(path, key),
            Err(e) => Box::pin(async move { Err(e) }),
        }
    }

    fn subscribe(&self, path: Path) -> watch::Receiver<Snapshot> {
        self.inner.subscribe(path)
    }
}

// Re-export commonly used items
pub use mocks::{FakeAuth, FixedClock, SequentialIds, test_clock};
