//! PostgreSQL implementation of RoomRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::traits::{RepoResult, RoomRepository};
use pulse_core::{ChatRoom, Id, RoomMember};

use crate::models::{ChatRoomModel, RoomMemberModel};

use super::map_db_error;

/// PostgreSQL implementation of RoomRepository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new PgRoomRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, room_id: Id) -> RepoResult<Option<ChatRoom>> {
        let result = sqlx::query_as::<_, ChatRoomModel>(
            r#"
            SELECT id, name, last_message_at, created_at
            FROM chat_rooms
            WHERE id = $1
            "#,
        )
        .bind(room_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatRoom::from))
    }

    #[instrument(skip(self))]
    async fn active_room_ids(&self, user_id: Id) -> RepoResult<Vec<Id>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT room_id
            FROM chat_room_members
            WHERE user_id = $1 AND active = TRUE
            ORDER BY room_id
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Id::new).collect())
    }

    #[instrument(skip(self))]
    async fn active_members(&self, room_id: Id) -> RepoResult<Vec<RoomMember>> {
        let results = sqlx::query_as::<_, RoomMemberModel>(
            r#"
            SELECT room_id, user_id, role, active, joined_at, last_read_at
            FROM chat_room_members
            WHERE room_id = $1 AND active = TRUE
            ORDER BY user_id
            "#,
        )
        .bind(room_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(RoomMember::try_from).collect()
    }
}
