//! Broadcast events and channel naming
//!
//! Events are ephemeral: typed payloads published to channel subscribers at
//! the moment of a state change, never persisted, never retried.

mod broadcast;

pub use broadcast::{
    BroadcastChannel, BroadcastEvent, PresenceChange, RoomAction, RoomUpdate,
    CHAT_ROOM_CHANNEL_PREFIX, NOTIFICATIONS_CHANNEL_PREFIX, USER_STATUS_CHANNEL,
};
