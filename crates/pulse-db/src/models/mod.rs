//! Database models - SQLx-compatible structs for PostgreSQL tables

mod presence;
mod room;
mod vote;

pub use presence::PresenceModel;
pub use room::{ChatRoomModel, RoomMemberModel};
pub use vote::{VoteModel, VoteTallyModel};
