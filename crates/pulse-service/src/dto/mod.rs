//! Data transfer objects for service responses

pub mod responses;

pub use responses::{PresenceResponse, ScoreResponse, VoteResponse};
