//! Presence entity <-> model mapper

use pulse_core::{DomainError, Id, PresenceStatus, UserPresence};

use crate::models::PresenceModel;

impl TryFrom<PresenceModel> for UserPresence {
    type Error = DomainError;

    fn try_from(model: PresenceModel) -> Result<Self, Self::Error> {
        let status: PresenceStatus =
            model.status.parse().map_err(DomainError::InternalError)?;

        Ok(UserPresence {
            user_id: Id::new(model.user_id),
            status,
            is_online: model.is_online,
            last_seen_at: model.last_seen_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_presence_model_lift() {
        let model = PresenceModel {
            user_id: 5,
            status: "away".to_string(),
            is_online: true,
            last_seen_at: Utc::now(),
        };

        let presence = UserPresence::try_from(model).unwrap();
        assert_eq!(presence.status, PresenceStatus::Away);
        assert!(presence.is_consistent());
    }
}
