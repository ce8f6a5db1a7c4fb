//! Non-repository ports: the activity throttle gate and the broadcast
//! publisher. Defined here so services can be exercised against in-memory
//! implementations.

use async_trait::async_trait;

use crate::events::{BroadcastChannel, BroadcastEvent};
use crate::traits::RepoResult;
use crate::value_objects::Id;

/// Short-TTL gate coalescing repeated activity signals into at most one
/// presence write per window per user.
#[async_trait]
pub trait ActivityGate: Send + Sync {
    /// Returns true if a gate entry already exists for this user. If none
    /// exists, installs one (for the configured TTL) and returns false.
    /// The check-and-install must be a single atomic operation.
    ///
    /// Not durable: losing the gate at worst causes one extra presence
    /// write, never incorrect state.
    async fn should_throttle(&self, user_id: Id) -> RepoResult<bool>;
}

/// Fire-and-forget broadcast publisher.
///
/// No acknowledgment, no retry, no persistence of missed events; ordering
/// across channels is not guaranteed. Current state is always recoverable by
/// polling the presence read path.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event to one channel, returning the subscriber count
    /// reported by the transport
    async fn publish(&self, channel: &BroadcastChannel, event: &BroadcastEvent)
        -> RepoResult<u32>;
}
