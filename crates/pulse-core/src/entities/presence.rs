//! User presence entity - online status plus last-seen timestamp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Id;

/// User presence status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
    Away,
    Busy,
}

impl Default for PresenceStatus {
    fn default() -> Self {
        Self::Offline
    }
}

impl PresenceStatus {
    /// Whether this status counts as online.
    ///
    /// The single source of truth for the `is_online` flag:
    /// every status except `offline` counts as online.
    #[must_use]
    pub fn is_online(&self) -> bool {
        !matches!(self, Self::Offline)
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
            Self::Away => write!(f, "away"),
            Self::Busy => write!(f, "busy"),
        }
    }
}

impl std::str::FromStr for PresenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "away" => Ok(Self::Away),
            "busy" => Ok(Self::Busy),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

/// Presence record for one user
///
/// One row per user, never deleted. Mutated only by the presence tracker:
/// activity marks online, explicit status sets apply directly, and the
/// periodic sweep resets stale online rows to offline. Writers race and the
/// last write wins; presence is advisory soft-state, not a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPresence {
    pub user_id: Id,
    pub status: PresenceStatus,
    pub is_online: bool,
    pub last_seen_at: DateTime<Utc>,
}

impl UserPresence {
    /// Create a presence record with the flag derived from the status
    #[must_use]
    pub fn new(user_id: Id, status: PresenceStatus, at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            status,
            is_online: status.is_online(),
            last_seen_at: at,
        }
    }

    /// Apply a status transition, keeping the flag consistent and
    /// refreshing the last-seen timestamp
    pub fn apply(&mut self, status: PresenceStatus, at: DateTime<Utc>) {
        self.status = status;
        self.is_online = status.is_online();
        self.last_seen_at = at;
    }

    /// Invariant check: `is_online` must agree with the status
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.is_online == self.status.is_online()
    }
}
