//! Redis-backed activity throttle gate.
//!
//! Coalesces bursts of activity signals into at most one presence write per
//! TTL window. A single atomic `SET NX EX` both checks and claims the window,
//! so concurrent signals for the same user race safely: exactly one wins.

use async_trait::async_trait;

use pulse_core::traits::{ActivityGate, RepoResult};
use pulse_core::{DomainError, Id};

use crate::pool::RedisPool;

/// Key prefix for per-user activity window entries
const ACTIVITY_KEY_PREFIX: &str = "activity:";

/// Redis implementation of the activity throttle gate
#[derive(Clone)]
pub struct RedisActivityGate {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisActivityGate {
    /// Create a new gate with the given window TTL
    pub fn new(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key_for(user_id: Id) -> String {
        format!("{ACTIVITY_KEY_PREFIX}{user_id}")
    }
}

#[async_trait]
impl ActivityGate for RedisActivityGate {
    async fn should_throttle(&self, user_id: Id) -> RepoResult<bool> {
        let key = Self::key_for(user_id);
        let claimed = self
            .pool
            .set_nx_ex(&key, "1", self.ttl_seconds)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?;

        if claimed {
            tracing::debug!(%user_id, ttl = self.ttl_seconds, "activity window opened");
        } else {
            tracing::trace!(%user_id, "activity throttled, window still open");
        }

        // Key already present means a write happened within the window
        Ok(!claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let id = Id::new(42);
        assert_eq!(RedisActivityGate::key_for(id), "activity:42");
    }
}
