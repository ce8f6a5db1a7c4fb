//! Presence service
//!
//! Maintains the per-user presence rows: activity signals mark users online
//! through the throttle gate, explicit status changes apply directly, and
//! the periodic sweep resets stale online rows to offline. Every applied
//! transition is fanned out after the write succeeds.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use pulse_core::{Id, PresenceStatus, UserPresence};

use crate::dto::PresenceResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::fanout::FanoutService;

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record an activity signal for a user, marking them online.
    ///
    /// Throttled: within one gate window per user only the first signal
    /// reaches storage, the rest return without writing. Returns whether a
    /// write happened.
    #[instrument(skip(self))]
    pub async fn record_activity(&self, user_id: Id) -> ServiceResult<bool> {
        if self.ctx.activity_gate().should_throttle(user_id).await? {
            return Ok(false);
        }

        let presence = self.apply_status(user_id, PresenceStatus::Online).await?;

        info!(user_id = %user_id, "Activity recorded, user marked online");

        self.fan_out_quietly(&presence).await;

        Ok(true)
    }

    /// Set a user's status explicitly. Bypasses the throttle gate; the
    /// online flag always follows the status.
    #[instrument(skip(self))]
    pub async fn set_status(&self, user_id: Id, status: PresenceStatus) -> ServiceResult<PresenceResponse> {
        let presence = self.apply_status(user_id, status).await?;

        info!(user_id = %user_id, status = %status, "Presence status set");

        self.fan_out_quietly(&presence).await;

        Ok(PresenceResponse::from(&presence))
    }

    /// Get a user's current presence. Users with no presence row yet read
    /// as offline with no last-seen timestamp.
    #[instrument(skip(self))]
    pub async fn get_presence(&self, user_id: Id) -> ServiceResult<PresenceResponse> {
        let presence = self.ctx.presence_repo().find(user_id).await?;

        Ok(presence
            .as_ref()
            .map_or_else(|| PresenceResponse::offline(user_id), PresenceResponse::from))
    }

    /// List all users currently online, most recently seen first
    #[instrument(skip(self))]
    pub async fn get_online_users(&self) -> ServiceResult<Vec<PresenceResponse>> {
        let online = self.ctx.presence_repo().find_online().await?;

        Ok(online.iter().map(PresenceResponse::from).collect())
    }

    /// Sweep stale presence rows offline: every user currently online whose
    /// last activity predates the configured threshold is transitioned to
    /// offline, and each transition is fanned out. Returns the number of
    /// users swept.
    #[instrument(skip(self))]
    pub async fn cleanup_offline(&self) -> ServiceResult<u64> {
        let threshold = self.ctx.presence_config().offline_threshold_mins;
        let cutoff = Utc::now() - Duration::minutes(threshold);

        let swept = self.ctx.presence_repo().mark_stale_offline(cutoff).await?;
        let count = swept.len() as u64;

        if count > 0 {
            info!(count, threshold_mins = threshold, "Stale presences swept offline");
        }

        for presence in &swept {
            self.fan_out_quietly(presence).await;
        }

        Ok(count)
    }

    /// Fan a committed presence change out without letting fan-out failures
    /// undo the result: the write already happened, so a failed broadcast is
    /// logged and dropped
    async fn fan_out_quietly(&self, presence: &UserPresence) {
        if let Err(e) = FanoutService::new(self.ctx)
            .publish_presence_change(presence)
            .await
        {
            warn!(
                user_id = %presence.user_id,
                error = %e,
                "Presence fan-out failed, change not broadcast"
            );
        }
    }

    /// Load-or-create the row, apply the transition, and persist it
    async fn apply_status(&self, user_id: Id, status: PresenceStatus) -> ServiceResult<UserPresence> {
        let now = Utc::now();
        let presence = match self.ctx.presence_repo().find(user_id).await? {
            Some(mut existing) => {
                existing.apply(status, now);
                existing
            }
            None => UserPresence::new(user_id, status, now),
        };

        self.ctx.presence_repo().upsert(&presence).await?;

        Ok(presence)
    }
}
