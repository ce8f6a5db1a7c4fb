//! Presence database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the user_presences table
#[derive(Debug, Clone, FromRow)]
pub struct PresenceModel {
    pub user_id: i64,
    pub status: String,
    pub is_online: bool,
    pub last_seen_at: DateTime<Utc>,
}
