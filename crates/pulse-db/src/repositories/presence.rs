//! PostgreSQL implementation of PresenceRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::traits::{PresenceRepository, RepoResult};
use pulse_core::{Id, PresenceStatus, UserPresence};

use crate::models::PresenceModel;

use super::map_db_error;

/// PostgreSQL implementation of PresenceRepository
///
/// One row per user; rows are never deleted. Concurrent writers race and
/// the last write wins, which is acceptable for advisory soft-state.
#[derive(Clone)]
pub struct PgPresenceRepository {
    pool: PgPool,
}

impl PgPresenceRepository {
    /// Create a new PgPresenceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PresenceRepository for PgPresenceRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: Id) -> RepoResult<Option<UserPresence>> {
        let result = sqlx::query_as::<_, PresenceModel>(
            r#"
            SELECT user_id, status, is_online, last_seen_at
            FROM user_presences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(UserPresence::try_from).transpose()
    }

    #[instrument(skip(self, presence), fields(user_id = %presence.user_id, status = %presence.status))]
    async fn upsert(&self, presence: &UserPresence) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_presences (user_id, status, is_online, last_seen_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id)
            DO UPDATE SET
                status = EXCLUDED.status,
                is_online = EXCLUDED.is_online,
                last_seen_at = EXCLUDED.last_seen_at
            "#,
        )
        .bind(presence.user_id.into_inner())
        .bind(presence.status.to_string())
        .bind(presence.is_online)
        .bind(presence.last_seen_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_online(&self) -> RepoResult<Vec<UserPresence>> {
        let results = sqlx::query_as::<_, PresenceModel>(
            r#"
            SELECT user_id, status, is_online, last_seen_at
            FROM user_presences
            WHERE is_online = TRUE
            ORDER BY last_seen_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(UserPresence::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn mark_stale_offline(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<UserPresence>> {
        // Single statement so the scan and the transition cannot interleave
        // with each other; rows returned are the post-update state.
        let results = sqlx::query_as::<_, PresenceModel>(
            r#"
            UPDATE user_presences
            SET status = $1, is_online = FALSE
            WHERE is_online = TRUE AND last_seen_at < $2
            RETURNING user_id, status, is_online, last_seen_at
            "#,
        )
        .bind(PresenceStatus::Offline.to_string())
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(UserPresence::try_from).collect()
    }
}
