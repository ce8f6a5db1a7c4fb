//! Response DTOs for serializing service outputs

use chrono::{DateTime, Utc};
use serde::Serialize;

use pulse_core::{Id, PresenceStatus, UserPresence, VotableKind, Vote, VoteDirection, VoteTally};

/// A user's vote on a votable target
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub id: Id,
    pub user_id: Id,
    pub votable_kind: VotableKind,
    pub votable_id: Id,
    pub direction: VoteDirection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Vote> for VoteResponse {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id,
            user_id: vote.user_id,
            votable_kind: vote.target.kind,
            votable_id: vote.target.id,
            direction: vote.direction,
            created_at: vote.created_at,
            updated_at: vote.updated_at,
        }
    }
}

/// Aggregated score for a votable target
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub votable_kind: VotableKind,
    pub votable_id: Id,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

impl ScoreResponse {
    /// Build a response from a tally
    #[must_use]
    pub fn new(kind: VotableKind, id: Id, tally: VoteTally) -> Self {
        Self {
            votable_kind: kind,
            votable_id: id,
            upvotes: tally.upvotes,
            downvotes: tally.downvotes,
            score: tally.score,
        }
    }
}

/// A user's presence state
#[derive(Debug, Clone, Serialize)]
pub struct PresenceResponse {
    pub user_id: Id,
    pub status: PresenceStatus,
    pub is_online: bool,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl PresenceResponse {
    /// Response for a user with no presence record yet
    #[must_use]
    pub fn offline(user_id: Id) -> Self {
        Self {
            user_id,
            status: PresenceStatus::Offline,
            is_online: false,
            last_seen_at: None,
        }
    }
}

impl From<&UserPresence> for PresenceResponse {
    fn from(presence: &UserPresence) -> Self {
        Self {
            user_id: presence.user_id,
            status: presence.status,
            is_online: presence.is_online,
            last_seen_at: Some(presence.last_seen_at),
        }
    }
}
