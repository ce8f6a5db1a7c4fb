//! # pulse-db
//!
//! Database layer implementing the domain ports with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ model mappers
//! - Repository implementations for votes, presence, rooms, and votable
//!   target checks
//!
//! Vote uniqueness relies on the `votes` table's unique constraint over
//! (user_id, votable_kind, votable_id); the upsert is constraint-backed and
//! atomic, never check-then-insert.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgPresenceRepository, PgRoomRepository, PgVotableRepository, PgVoteRepository,
};
