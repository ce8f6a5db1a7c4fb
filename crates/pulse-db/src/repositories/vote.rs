//! PostgreSQL implementation of VoteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::traits::{RepoResult, VoteRepository};
use pulse_core::{DomainError, Id, Vote, VoteDirection, VoteTally, VoteTarget};

use crate::models::{VoteModel, VoteTallyModel};

use super::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of VoteRepository
///
/// Uniqueness over (user_id, votable_kind, votable_id) is enforced by the
/// table's unique constraint; `upsert` rides that constraint so concurrent
/// identical requests can never produce duplicate rows.
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn upsert(
        &self,
        user_id: Id,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> RepoResult<Vote> {
        let model = sqlx::query_as::<_, VoteModel>(
            r#"
            INSERT INTO votes (user_id, votable_kind, votable_id, direction, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (user_id, votable_kind, votable_id)
            DO UPDATE SET direction = EXCLUDED.direction, updated_at = NOW()
            RETURNING id, user_id, votable_kind, votable_id, direction, created_at, updated_at
            "#,
        )
        .bind(user_id.into_inner())
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .bind(direction.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateVote))?;

        Vote::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Id, target: VoteTarget) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM votes
            WHERE user_id = $1 AND votable_kind = $2 AND votable_id = $3
            "#,
        )
        .bind(user_id.into_inner())
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find(&self, user_id: Id, target: VoteTarget) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT id, user_id, votable_kind, votable_id, direction, created_at, updated_at
            FROM votes
            WHERE user_id = $1 AND votable_kind = $2 AND votable_id = $3
            "#,
        )
        .bind(user_id.into_inner())
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Vote::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn tally(&self, target: VoteTarget) -> RepoResult<VoteTally> {
        let model = sqlx::query_as::<_, VoteTallyModel>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE direction = 'up') AS upvotes,
                COUNT(*) FILTER (WHERE direction = 'down') AS downvotes
            FROM votes
            WHERE votable_kind = $1 AND votable_id = $2
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(VoteTally::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgVoteRepository>();
    }
}
