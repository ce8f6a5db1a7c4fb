//! Chat room and membership entities
//!
//! Membership determines which presence-channel broadcasts a user receives
//! and carries the per-member read position used for unread flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Id;

/// Role of a user within a chat room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomRole {
    Member,
    Moderator,
    Owner,
}

impl std::fmt::Display for RoomRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Moderator => write!(f, "moderator"),
            Self::Owner => write!(f, "owner"),
        }
    }
}

impl std::str::FromStr for RoomRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "moderator" => Ok(Self::Moderator),
            "owner" => Ok(Self::Owner),
            _ => Err(format!("Invalid room role: {s}")),
        }
    }
}

/// Chat room entity - only what fan-out needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: Id,
    pub name: String,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Room membership (junction between User and ChatRoom)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    pub room_id: Id,
    pub user_id: Id,
    pub role: RoomRole,
    pub active: bool,
    pub joined_at: DateTime<Utc>,
    /// When this member last viewed the room; None means never
    pub last_read_at: Option<DateTime<Utc>>,
}

impl RoomMember {
    /// Create an active membership with the default role
    #[must_use]
    pub fn new(room_id: Id, user_id: Id, joined_at: DateTime<Utc>) -> Self {
        Self {
            room_id,
            user_id,
            role: RoomRole::Member,
            active: true,
            joined_at,
            last_read_at: None,
        }
    }

    /// Whether this member has messages they have not seen, given the
    /// room's latest message timestamp
    #[must_use]
    pub fn has_unread(&self, last_message_at: Option<DateTime<Utc>>) -> bool {
        match (last_message_at, self.last_read_at) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(msg), Some(read)) => msg > read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_room_role_parse() {
        assert_eq!("owner".parse::<RoomRole>().unwrap(), RoomRole::Owner);
        assert_eq!("Moderator".parse::<RoomRole>().unwrap(), RoomRole::Moderator);
        assert!("admin".parse::<RoomRole>().is_err());
    }

    #[test]
    fn test_unread_no_messages() {
        let member = RoomMember::new(Id::new(1), Id::new(2), Utc::now());
        assert!(!member.has_unread(None));
    }

    #[test]
    fn test_unread_never_read() {
        let member = RoomMember::new(Id::new(1), Id::new(2), Utc::now());
        assert!(member.has_unread(Some(Utc::now())));
    }

    #[test]
    fn test_unread_depends_on_read_position() {
        let now = Utc::now();
        let mut member = RoomMember::new(Id::new(1), Id::new(2), now);

        member.last_read_at = Some(now);
        assert!(!member.has_unread(Some(now - Duration::minutes(5))));
        assert!(member.has_unread(Some(now + Duration::minutes(5))));
    }
}
