//! Vote entity - a directional vote cast by a user on a votable content item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Id;

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Stable string form used in storage and payloads
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// The opposite direction
    #[must_use]
    pub fn flipped(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl std::fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VoteDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(format!("Invalid vote direction: {s}")),
        }
    }
}

/// The content kinds that can receive votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotableKind {
    Thread,
    Comment,
    Reply,
    Review,
}

impl VotableKind {
    /// Stable string form used in storage and payloads
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thread => "thread",
            Self::Comment => "comment",
            Self::Reply => "reply",
            Self::Review => "review",
        }
    }

    /// All votable kinds
    #[must_use]
    pub fn all() -> [Self; 4] {
        [Self::Thread, Self::Comment, Self::Reply, Self::Review]
    }
}

impl std::fmt::Display for VotableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VotableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "thread" => Ok(Self::Thread),
            "comment" => Ok(Self::Comment),
            "reply" => Ok(Self::Reply),
            "review" => Ok(Self::Review),
            _ => Err(format!("Invalid votable kind: {s}")),
        }
    }
}

/// A (kind, id) pair identifying the target of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteTarget {
    pub kind: VotableKind,
    pub id: Id,
}

impl VoteTarget {
    /// Create a new VoteTarget
    #[must_use]
    pub fn new(kind: VotableKind, id: Id) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Vote entity
///
/// At most one vote exists per (user, target) pair; revoting overwrites the
/// direction in place. The uniqueness is enforced by a database constraint,
/// not application logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Id,
    pub user_id: Id,
    pub target: VoteTarget,
    pub direction: VoteDirection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Check if this vote points in the given direction
    #[inline]
    pub fn is_direction(&self, direction: VoteDirection) -> bool {
        self.direction == direction
    }
}

/// Aggregated vote counts for a target, computed on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

impl VoteTally {
    /// Create a tally from raw counts; the score is always derived
    #[must_use]
    pub fn new(upvotes: i64, downvotes: i64) -> Self {
        Self {
            upvotes,
            downvotes,
            score: upvotes - downvotes,
        }
    }

    /// Total number of votes counted
    #[must_use]
    pub fn total(&self) -> i64 {
        self.upvotes + self.downvotes
    }
}
