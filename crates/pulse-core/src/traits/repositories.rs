//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    ChatRoom, RoomMember, UserPresence, Vote, VoteDirection, VoteTally, VoteTarget,
};
use crate::error::DomainError;
use crate::value_objects::Id;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Insert a vote, or overwrite the direction of an existing vote for the
    /// same (user, target) pair. Must be atomic at the storage layer
    /// (constraint-backed upsert, never check-then-insert) so concurrent
    /// identical requests cannot produce duplicate rows.
    async fn upsert(
        &self,
        user_id: Id,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> RepoResult<Vote>;

    /// Delete any vote for the pair; returns whether a row existed.
    /// Idempotent.
    async fn delete(&self, user_id: Id, target: VoteTarget) -> RepoResult<bool>;

    /// Find a user's vote on a target
    async fn find(&self, user_id: Id, target: VoteTarget) -> RepoResult<Option<Vote>>;

    /// Count votes for a target grouped by direction, against committed
    /// state only
    async fn tally(&self, target: VoteTarget) -> RepoResult<VoteTally>;
}

// ============================================================================
// Votable Repository
// ============================================================================

#[async_trait]
pub trait VotableRepository: Send + Sync {
    /// Check that a votable target exists
    async fn exists(&self, target: VoteTarget) -> RepoResult<bool>;
}

// ============================================================================
// Presence Repository
// ============================================================================

#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// Find the presence record for a user
    async fn find(&self, user_id: Id) -> RepoResult<Option<UserPresence>>;

    /// Insert or overwrite the presence record for a user
    async fn upsert(&self, presence: &UserPresence) -> RepoResult<()>;

    /// List all users currently marked online
    async fn find_online(&self) -> RepoResult<Vec<UserPresence>>;

    /// Transition every row with `is_online` and `last_seen_at` before the
    /// cutoff to offline, returning the rows as they are after the update
    async fn mark_stale_offline(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<UserPresence>>;
}

// ============================================================================
// Room Repository
// ============================================================================

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find a room by id
    async fn find_by_id(&self, room_id: Id) -> RepoResult<Option<ChatRoom>>;

    /// Ids of all rooms where the user has an active membership
    async fn active_room_ids(&self, user_id: Id) -> RepoResult<Vec<Id>>;

    /// All active memberships of a room, with read positions
    async fn active_members(&self, room_id: Id) -> RepoResult<Vec<RoomMember>>;
}
