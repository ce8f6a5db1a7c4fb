//! Vote database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub id: i64,
    pub user_id: i64,
    pub votable_kind: String,
    pub votable_id: i64,
    pub direction: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated vote counts (from query)
#[derive(Debug, Clone, FromRow)]
pub struct VoteTallyModel {
    pub upvotes: i64,
    pub downvotes: i64,
}
