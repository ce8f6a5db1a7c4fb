//! PostgreSQL implementation of VotableRepository
//!
//! Each votable kind lives in its own table; the existence check dispatches
//! on the kind. Table names are static strings, never user input.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::traits::{RepoResult, VotableRepository};
use pulse_core::{VotableKind, VoteTarget};

use super::map_db_error;

/// PostgreSQL implementation of VotableRepository
#[derive(Clone)]
pub struct PgVotableRepository {
    pool: PgPool,
}

impl PgVotableRepository {
    /// Create a new PgVotableRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Table backing a votable kind
    fn table_for(kind: VotableKind) -> &'static str {
        match kind {
            VotableKind::Thread => "threads",
            VotableKind::Comment => "comments",
            VotableKind::Reply => "replies",
            VotableKind::Review => "reviews",
        }
    }
}

#[async_trait]
impl VotableRepository for PgVotableRepository {
    #[instrument(skip(self))]
    async fn exists(&self, target: VoteTarget) -> RepoResult<bool> {
        let table = Self::table_for(target.kind);
        let query = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");

        let exists = sqlx::query_scalar::<_, bool>(&query)
            .bind(target.id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(exists)
    }
}
