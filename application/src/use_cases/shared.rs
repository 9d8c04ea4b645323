//! Shared utilities for use cases.
//!
//! Contains the advisory per-user lock used to serialize persistence of a
//! new provisional batch against confirmation for the same user.

use examforge_domain::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Keyed async mutex, one entry per user.
///
/// Without it, a `confirm` that loads a user's provisional set while a
/// `generate` for the same user is persisting may erase the fresh batch.
/// Locks are advisory: only use cases configured with the same registry
/// exclude each other.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `user_id`'s provisional set
    pub async fn acquire(&self, user_id: UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(user_id).or_default())
        };
        lock.lock_owned().await
    }
}

/// Acquire the lock if a registry is configured
pub(crate) async fn lock_user(
    locks: &Option<Arc<UserLocks>>,
    user_id: UserId,
) -> Option<OwnedMutexGuard<()>> {
    match locks {
        Some(locks) => Some(locks.acquire(user_id).await),
        None => None,
    }
}
