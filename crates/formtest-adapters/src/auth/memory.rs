//! In-memory authentication adapter for testing.

use std::sync::{Arc, RwLock};

use tracing::debug;

use formtest_core::{application::ports::PrincipalAccessor, domain::Principal};

/// Switchable "current user".
///
/// Clones share state, so a test can keep a handle and switch users after
/// the tester context has been built.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuth {
    current: Arc<RwLock<Option<Principal>>>,
}

impl InMemoryAuth {
    /// No one is logged in.
    pub fn guest() -> Self {
        Self::default()
    }

    /// Start with `principal` logged in.
    pub fn with_user(principal: Principal) -> Self {
        let auth = Self::guest();
        auth.acting_as(principal);
        auth
    }

    /// Log `principal` in, replacing whoever was logged in.
    pub fn acting_as(&self, principal: Principal) {
        debug!(user = %principal.id, "Acting as user");
        *self.write() = Some(principal);
    }

    pub fn logout(&self) {
        *self.write() = None;
    }

    pub fn is_guest(&self) -> bool {
        self.current_user().is_none()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Principal>> {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PrincipalAccessor for InMemoryAuth {
    fn current_user(&self) -> Option<Principal> {
        self.current
            .read()
            .map(|current| (*current).clone())
            .unwrap_or_else(|poisoned| (*poisoned.into_inner()).clone())
    }
}
