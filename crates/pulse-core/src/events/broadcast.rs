//! Broadcast channel naming and event payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entities::PresenceStatus;
use crate::value_objects::Id;

/// Channel prefix for per-room events
pub const CHAT_ROOM_CHANNEL_PREFIX: &str = "chat-room.";
/// Channel for general presence events (all subscribers)
pub const USER_STATUS_CHANNEL: &str = "user-status";
/// Channel prefix for per-user private notifications
pub const NOTIFICATIONS_CHANNEL_PREFIX: &str = "notifications.";

/// Broadcast channel types
///
/// Subscribers authenticate before joining private channels; that handshake
/// belongs to the broadcast transport, not this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BroadcastChannel {
    /// Events for everyone in a chat room
    ChatRoom(Id),
    /// General presence channel
    UserStatus,
    /// Private per-user notifications
    Notifications(Id),
}

impl BroadcastChannel {
    /// Create a chat room channel
    #[must_use]
    pub fn chat_room(room_id: Id) -> Self {
        Self::ChatRoom(room_id)
    }

    /// Create the general presence channel
    #[must_use]
    pub fn user_status() -> Self {
        Self::UserStatus
    }

    /// Create a per-user notifications channel
    #[must_use]
    pub fn notifications(user_id: Id) -> Self {
        Self::Notifications(user_id)
    }

    /// Get the wire channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::ChatRoom(id) => format!("{CHAT_ROOM_CHANNEL_PREFIX}{id}"),
            Self::UserStatus => USER_STATUS_CHANNEL.to_string(),
            Self::Notifications(id) => format!("{NOTIFICATIONS_CHANNEL_PREFIX}{id}"),
        }
    }

    /// Parse a channel name back to a `BroadcastChannel`
    pub fn parse(name: &str) -> Option<Self> {
        if name == USER_STATUS_CHANNEL {
            return Some(Self::UserStatus);
        }

        if let Some(id_str) = name.strip_prefix(CHAT_ROOM_CHANNEL_PREFIX) {
            return id_str.parse::<i64>().ok().map(|id| Self::ChatRoom(Id::new(id)));
        }

        if let Some(id_str) = name.strip_prefix(NOTIFICATIONS_CHANNEL_PREFIX) {
            return id_str
                .parse::<i64>()
                .ok()
                .map(|id| Self::Notifications(Id::new(id)));
        }

        None
    }
}

impl std::fmt::Display for BroadcastChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Event wrapper pushed to channel subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastEvent {
    /// Event type name (e.g., "PRESENCE_UPDATE", "CHAT_ROOM_UPDATE")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl BroadcastEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Presence change payload, fanned out to the user's rooms and the
/// general presence channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceChange {
    pub user_id: Id,
    pub status: PresenceStatus,
    pub is_online: bool,
    pub last_seen_at: DateTime<Utc>,
}

impl PresenceChange {
    /// Build the wire event for this change
    #[must_use]
    pub fn to_event(&self) -> BroadcastEvent {
        BroadcastEvent::new(
            "PRESENCE_UPDATE",
            json!({
                "user_id": self.user_id,
                "status": self.status,
                "is_online": self.is_online,
                "last_seen_at": self.last_seen_at,
            }),
        )
    }
}

/// What happened to a chat room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomAction {
    MessagePosted,
    MemberJoined,
    MemberLeft,
}

impl RoomAction {
    /// Stable string form used in payloads
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MessagePosted => "message_posted",
            Self::MemberJoined => "member_joined",
            Self::MemberLeft => "member_left",
        }
    }
}

/// Room update payload, delivered per recipient so the unread flag can be
/// computed individually
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub room_id: Id,
    pub action: RoomAction,
    /// Computed from the recipient's read position vs the room's latest message
    pub unread: bool,
}

impl RoomUpdate {
    /// Build the wire event for this update
    #[must_use]
    pub fn to_event(&self) -> BroadcastEvent {
        BroadcastEvent::new(
            "CHAT_ROOM_UPDATE",
            json!({
                "room_id": self.room_id,
                "action": self.action,
                "unread": self.unread,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(BroadcastChannel::chat_room(Id::new(7)).name(), "chat-room.7");
        assert_eq!(BroadcastChannel::user_status().name(), "user-status");
        assert_eq!(
            BroadcastChannel::notifications(Id::new(42)).name(),
            "notifications.42"
        );
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(
            BroadcastChannel::parse("chat-room.7"),
            Some(BroadcastChannel::ChatRoom(Id::new(7)))
        );
        assert_eq!(
            BroadcastChannel::parse("user-status"),
            Some(BroadcastChannel::UserStatus)
        );
        assert_eq!(
            BroadcastChannel::parse("notifications.42"),
            Some(BroadcastChannel::Notifications(Id::new(42)))
        );
        assert_eq!(BroadcastChannel::parse("guild:1"), None);
        assert_eq!(BroadcastChannel::parse("chat-room.abc"), None);
    }

    #[test]
    fn test_presence_event_shape() {
        let change = PresenceChange {
            user_id: Id::new(1),
            status: PresenceStatus::Away,
            is_online: true,
            last_seen_at: Utc::now(),
        };
        let event = change.to_event();
        assert_eq!(event.event_type, "PRESENCE_UPDATE");
        assert_eq!(event.data["status"], "away");
        assert_eq!(event.data["user_id"], "1");
    }

    #[test]
    fn test_room_update_event_shape() {
        let update = RoomUpdate {
            room_id: Id::new(9),
            action: RoomAction::MessagePosted,
            unread: true,
        };
        let event = update.to_event();
        assert_eq!(event.event_type, "CHAT_ROOM_UPDATE");
        assert_eq!(event.data["action"], "message_posted");
        assert_eq!(event.data["unread"], true);
    }
}
