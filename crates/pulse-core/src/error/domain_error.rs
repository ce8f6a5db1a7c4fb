//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::VoteTarget;
use crate::value_objects::Id;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Id),

    #[error("Votable target not found: {0}")]
    VotableNotFound(VoteTarget),

    #[error("Chat room not found: {0}")]
    RoomNotFound(Id),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid presence status: {0}")]
    InvalidStatus(String),

    #[error("Invalid vote direction: {0}")]
    InvalidDirection(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Vote already exists for this target")]
    DuplicateVote,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Broadcast error: {0}")]
    BroadcastError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::VotableNotFound(_) => "UNKNOWN_VOTABLE",
            Self::RoomNotFound(_) => "UNKNOWN_ROOM",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::InvalidDirection(_) => "INVALID_DIRECTION",
            Self::DuplicateVote => "DUPLICATE_VOTE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::BroadcastError(_) => "BROADCAST_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::VotableNotFound(_) | Self::RoomNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidStatus(_) | Self::InvalidDirection(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateVote)
    }
}
