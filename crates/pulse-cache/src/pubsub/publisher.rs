//! Redis pub/sub event publisher.
//!
//! Delivery is at-most-once to currently connected subscribers. The
//! publisher reports the receiver count but never fails a caller's
//! operation over delivery; fire-and-forget handling lives in the
//! service layer.

use async_trait::async_trait;

use pulse_core::events::{BroadcastChannel, BroadcastEvent};
use pulse_core::traits::{EventPublisher, RepoResult};
use pulse_core::DomainError;

use crate::pool::RedisPool;

/// Redis implementation of the broadcast event publisher
#[derive(Clone)]
pub struct RedisPublisher {
    pool: RedisPool,
}

impl RedisPublisher {
    /// Create a new publisher backed by the given pool
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventPublisher for RedisPublisher {
    async fn publish(&self, channel: &BroadcastChannel, event: &BroadcastEvent) -> RepoResult<u32> {
        let payload = event
            .to_json()
            .map_err(|e| DomainError::BroadcastError(e.to_string()))?;

        let receivers = self
            .pool
            .publish(&channel.name(), &payload)
            .await
            .map_err(|e| DomainError::BroadcastError(e.to_string()))?;

        tracing::debug!(
            channel = %channel,
            event_type = %event.event_type,
            receivers,
            "event published"
        );

        Ok(receivers)
    }
}
