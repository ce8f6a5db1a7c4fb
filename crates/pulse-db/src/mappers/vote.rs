//! Vote entity <-> model mapper

use pulse_core::{
    DomainError, Id, VotableKind, Vote, VoteDirection, VoteTally, VoteTarget,
};

use crate::models::{VoteModel, VoteTallyModel};

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        let kind: VotableKind = model
            .votable_kind
            .parse()
            .map_err(DomainError::InternalError)?;
        let direction: VoteDirection = model
            .direction
            .parse()
            .map_err(DomainError::InternalError)?;

        Ok(Vote {
            id: Id::new(model.id),
            user_id: Id::new(model.user_id),
            target: VoteTarget::new(kind, Id::new(model.votable_id)),
            direction,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<VoteTallyModel> for VoteTally {
    fn from(model: VoteTallyModel) -> Self {
        VoteTally::new(model.upvotes, model.downvotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_vote_model_lift() {
        let model = VoteModel {
            id: 1,
            user_id: 10,
            votable_kind: "thread".to_string(),
            votable_id: 42,
            direction: "down".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let vote = Vote::try_from(model).unwrap();
        assert_eq!(vote.target.kind, VotableKind::Thread);
        assert_eq!(vote.direction, VoteDirection::Down);
    }

    #[test]
    fn test_vote_model_bad_column() {
        let model = VoteModel {
            id: 1,
            user_id: 10,
            votable_kind: "poll".to_string(),
            votable_id: 42,
            direction: "up".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(Vote::try_from(model).is_err());
    }

    #[test]
    fn test_tally_model_derives_score() {
        let tally = VoteTally::from(VoteTallyModel {
            upvotes: 4,
            downvotes: 6,
        });
        assert_eq!(tally.score, -2);
    }
}
