//! # pulse-core
//!
//! Domain layer containing entities, value objects, ports, and broadcast
//! event types for the voting and presence subsystem. This crate has zero
//! dependencies on infrastructure (database, cache, runtime).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ChatRoom, PresenceStatus, RoomMember, RoomRole, UserPresence, VotableKind, Vote,
    VoteDirection, VoteTally, VoteTarget,
};
pub use error::DomainError;
pub use events::{BroadcastChannel, BroadcastEvent, PresenceChange, RoomAction, RoomUpdate};
pub use traits::{
    ActivityGate, EventPublisher, PresenceRepository, RepoResult, RoomRepository,
    VotableRepository, VoteRepository,
};
pub use value_objects::{Id, IdParseError};
