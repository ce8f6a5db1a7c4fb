//! Ports - interfaces the domain needs from infrastructure

mod ports;
mod repositories;

pub use ports::{ActivityGate, EventPublisher};
pub use repositories::{
    PresenceRepository, RepoResult, RoomRepository, VotableRepository, VoteRepository,
};
