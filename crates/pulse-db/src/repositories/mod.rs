//! PostgreSQL repository implementations

mod error;
mod presence;
mod room;
mod votable;
mod vote;

pub use presence::PgPresenceRepository;
pub use room::PgRoomRepository;
pub use votable::PgVotableRepository;
pub use vote::PgVoteRepository;

pub(crate) use error::{map_db_error, map_unique_violation};
