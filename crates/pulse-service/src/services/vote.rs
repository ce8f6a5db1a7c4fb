//! Vote service
//!
//! Handles casting, removing, and tallying directional votes on votable
//! content. Uniqueness per (user, target) is enforced by the storage
//! constraint; this layer validates the target and shapes responses.

use tracing::{info, instrument};

use pulse_core::{Id, VoteDirection, VoteTarget};

use crate::dto::{ScoreResponse, VoteResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cast a vote on a target, overwriting any previous vote by the same
    /// user on the same target. Casting the direction already stored is a
    /// no-op at the row level; the timestamps still refresh.
    #[instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        user_id: Id,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> ServiceResult<VoteResponse> {
        self.verify_target(target).await?;

        let vote = self.ctx.vote_repo().upsert(user_id, target, direction).await?;

        info!(
            user_id = %user_id,
            target = %target,
            direction = %direction,
            "Vote cast"
        );

        Ok(VoteResponse::from(&vote))
    }

    /// Remove a user's vote from a target. Idempotent: removing a vote that
    /// does not exist succeeds and reports `false`.
    #[instrument(skip(self))]
    pub async fn remove_vote(&self, user_id: Id, target: VoteTarget) -> ServiceResult<bool> {
        self.verify_target(target).await?;

        let removed = self.ctx.vote_repo().delete(user_id, target).await?;

        if removed {
            info!(user_id = %user_id, target = %target, "Vote removed");
        }

        Ok(removed)
    }

    /// Tally the votes on a target, computed on read against committed
    /// state. Targets nobody has voted on score zero.
    #[instrument(skip(self))]
    pub async fn score_for(&self, target: VoteTarget) -> ServiceResult<ScoreResponse> {
        self.verify_target(target).await?;

        let tally = self.ctx.vote_repo().tally(target).await?;

        Ok(ScoreResponse::new(target.kind, target.id, tally))
    }

    /// Get a user's current vote on a target, if any
    #[instrument(skip(self))]
    pub async fn vote_of(
        &self,
        user_id: Id,
        target: VoteTarget,
    ) -> ServiceResult<Option<VoteResponse>> {
        self.verify_target(target).await?;

        let vote = self.ctx.vote_repo().find(user_id, target).await?;

        Ok(vote.as_ref().map(VoteResponse::from))
    }

    /// Reject operations against targets that do not exist
    async fn verify_target(&self, target: VoteTarget) -> ServiceResult<()> {
        if !self.ctx.votable_repo().exists(target).await? {
            return Err(ServiceError::not_found("Votable", target.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestHarness;
    use pulse_core::VotableKind;

    fn thread_target(id: i64) -> VoteTarget {
        VoteTarget::new(VotableKind::Thread, Id::new(id))
    }

    #[tokio::test]
    async fn test_cast_vote_on_missing_target_fails() {
        let harness = TestHarness::new();
        let service = VoteService::new(&harness.ctx);

        let err = service
            .cast_vote(Id::new(1), thread_target(99), VoteDirection::Up)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(harness.vote_repo.row_count(), 0);
    }

    #[tokio::test]
    async fn test_revote_overwrites_without_second_row() {
        let target = thread_target(1);
        let harness = TestHarness::with_targets(&[target]);
        let service = VoteService::new(&harness.ctx);
        let user = Id::new(7);

        let first = service
            .cast_vote(user, target, VoteDirection::Up)
            .await
            .unwrap();
        let second = service
            .cast_vote(user, target, VoteDirection::Down)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.direction, VoteDirection::Down);
        assert_eq!(harness.vote_repo.row_count(), 1);

        let score = service.score_for(target).await.unwrap();
        assert_eq!(score.upvotes, 0);
        assert_eq!(score.downvotes, 1);
        assert_eq!(score.score, -1);
    }

    #[tokio::test]
    async fn test_two_voters_then_switch() {
        let target = thread_target(1);
        let harness = TestHarness::with_targets(&[target]);
        let service = VoteService::new(&harness.ctx);
        let (alice, bob) = (Id::new(1), Id::new(2));

        service.cast_vote(alice, target, VoteDirection::Up).await.unwrap();
        let score = service.score_for(target).await.unwrap();
        assert_eq!(score.score, 1);

        service.cast_vote(bob, target, VoteDirection::Down).await.unwrap();
        let score = service.score_for(target).await.unwrap();
        assert_eq!(score.score, 0);

        service.cast_vote(alice, target, VoteDirection::Down).await.unwrap();
        let score = service.score_for(target).await.unwrap();
        assert_eq!(score.upvotes, 0);
        assert_eq!(score.downvotes, 2);
        assert_eq!(score.score, -2);
        assert_eq!(harness.vote_repo.row_count(), 2);
    }

    #[tokio::test]
    async fn test_remove_vote_is_idempotent() {
        let target = thread_target(3);
        let harness = TestHarness::with_targets(&[target]);
        let service = VoteService::new(&harness.ctx);
        let user = Id::new(5);

        service.cast_vote(user, target, VoteDirection::Up).await.unwrap();
        assert!(service.remove_vote(user, target).await.unwrap());
        assert!(!service.remove_vote(user, target).await.unwrap());

        let score = service.score_for(target).await.unwrap();
        assert_eq!(score.score, 0);
    }

    #[tokio::test]
    async fn test_votes_are_scoped_to_their_target() {
        let thread = thread_target(1);
        let review = VoteTarget::new(VotableKind::Review, Id::new(1));
        let harness = TestHarness::with_targets(&[thread, review]);
        let service = VoteService::new(&harness.ctx);
        let user = Id::new(9);

        service.cast_vote(user, thread, VoteDirection::Up).await.unwrap();
        service.cast_vote(user, review, VoteDirection::Down).await.unwrap();

        // Same numeric id, different kinds: two independent votes
        assert_eq!(harness.vote_repo.row_count(), 2);
        assert_eq!(service.score_for(thread).await.unwrap().score, 1);
        assert_eq!(service.score_for(review).await.unwrap().score, -1);
    }

    #[tokio::test]
    async fn test_vote_of_reports_current_direction() {
        let target = thread_target(8);
        let harness = TestHarness::with_targets(&[target]);
        let service = VoteService::new(&harness.ctx);
        let user = Id::new(2);

        assert!(service.vote_of(user, target).await.unwrap().is_none());

        service.cast_vote(user, target, VoteDirection::Down).await.unwrap();
        let vote = service.vote_of(user, target).await.unwrap().unwrap();
        assert_eq!(vote.direction, VoteDirection::Down);
    }
}
