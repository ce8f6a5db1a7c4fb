//! Domain entities

mod presence;
mod room;
mod vote;

pub use presence::{PresenceStatus, UserPresence};
pub use room::{ChatRoom, RoomMember, RoomRole};
pub use vote::{VotableKind, Vote, VoteDirection, VoteTally, VoteTarget};
