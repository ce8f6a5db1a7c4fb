//! Broadcast fanout service
//!
//! Distributes events to their interested channel sets after a successful
//! mutation. Callers invoke fanout explicitly; nothing here is triggered by
//! storage hooks.
//!
//! Publishing is fire-and-forget: a failed publish is logged and dropped,
//! never failing the mutation that triggered it. Subscribers that miss an
//! event recover by polling the read path.

use tracing::{debug, instrument, warn};

use pulse_core::{
    BroadcastChannel, BroadcastEvent, Id, PresenceChange, RoomAction, RoomUpdate, UserPresence,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Broadcast fanout service
pub struct FanoutService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FanoutService<'a> {
    /// Create a new FanoutService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fan a presence change out to every room the user is active in, plus
    /// the general presence channel. Returns the number of channels targeted.
    #[instrument(skip(self, presence), fields(user_id = %presence.user_id))]
    pub async fn publish_presence_change(&self, presence: &UserPresence) -> ServiceResult<usize> {
        let change = PresenceChange {
            user_id: presence.user_id,
            status: presence.status,
            is_online: presence.is_online,
            last_seen_at: presence.last_seen_at,
        };
        let event = change.to_event();

        let room_ids = self.ctx.room_repo().active_room_ids(presence.user_id).await?;

        let mut channels: Vec<BroadcastChannel> = room_ids
            .into_iter()
            .map(BroadcastChannel::chat_room)
            .collect();
        channels.push(BroadcastChannel::user_status());

        let targeted = channels.len();
        for channel in &channels {
            self.publish_quiet(channel, &event).await;
        }

        debug!(
            user_id = %presence.user_id,
            status = %presence.status,
            channels = targeted,
            "presence change fanned out"
        );

        Ok(targeted)
    }

    /// Deliver a room update to each active member's private notification
    /// channel, with the unread flag computed per recipient. Returns the
    /// number of recipients targeted.
    #[instrument(skip(self))]
    pub async fn publish_room_update(&self, room_id: Id, action: RoomAction) -> ServiceResult<usize> {
        let room = self
            .ctx
            .room_repo()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room", room_id.to_string()))?;

        let members = self.ctx.room_repo().active_members(room_id).await?;
        let targeted = members.len();

        for member in &members {
            let update = RoomUpdate {
                room_id,
                action,
                unread: member.has_unread(room.last_message_at),
            };
            let channel = BroadcastChannel::notifications(member.user_id);
            self.publish_quiet(&channel, &update.to_event()).await;
        }

        debug!(
            room_id = %room_id,
            action = ?action,
            recipients = targeted,
            "room update fanned out"
        );

        Ok(targeted)
    }

    /// Publish without surfacing transport failures to the caller
    async fn publish_quiet(&self, channel: &BroadcastChannel, event: &BroadcastEvent) {
        if let Err(e) = self.ctx.publisher().publish(channel, event).await {
            warn!(channel = %channel, error = %e, "broadcast publish failed, dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestHarness;
    use chrono::{Duration, Utc};
    use pulse_core::{ChatRoom, PresenceStatus, RoomMember};

    #[tokio::test]
    async fn test_presence_change_targets_rooms_and_status_channel() {
        let harness = TestHarness::new();
        let user = Id::new(1);
        let now = Utc::now();

        for room_id in [10, 20] {
            harness.room_repo.insert_room(ChatRoom {
                id: Id::new(room_id),
                name: format!("room-{room_id}"),
                last_message_at: None,
                created_at: now,
            });
            harness
                .room_repo
                .insert_member(RoomMember::new(Id::new(room_id), user, now));
        }

        let presence = UserPresence::new(user, PresenceStatus::Online, now);
        let fanout = FanoutService::new(&harness.ctx);
        let targeted = fanout.publish_presence_change(&presence).await.unwrap();

        assert_eq!(targeted, 3);
        let channels = harness.publisher.channels();
        assert!(channels.contains(&"chat-room.10".to_string()));
        assert!(channels.contains(&"chat-room.20".to_string()));
        assert!(channels.contains(&"user-status".to_string()));

        let (_, event) = &harness.publisher.published()[0];
        assert_eq!(event.event_type, "PRESENCE_UPDATE");
    }

    #[tokio::test]
    async fn test_presence_change_with_no_rooms_still_hits_status_channel() {
        let harness = TestHarness::new();
        let presence = UserPresence::new(Id::new(2), PresenceStatus::Away, Utc::now());

        let fanout = FanoutService::new(&harness.ctx);
        let targeted = fanout.publish_presence_change(&presence).await.unwrap();

        assert_eq!(targeted, 1);
        assert_eq!(harness.publisher.channels(), vec!["user-status".to_string()]);
    }

    #[tokio::test]
    async fn test_room_update_computes_unread_per_recipient() {
        let harness = TestHarness::new();
        let room_id = Id::new(5);
        let now = Utc::now();

        harness.room_repo.insert_room(ChatRoom {
            id: room_id,
            name: "protocol-check-ins".to_string(),
            last_message_at: Some(now),
            created_at: now - Duration::days(1),
        });

        // Member 1 read after the last message, member 2 never read
        let mut caught_up = RoomMember::new(room_id, Id::new(1), now - Duration::days(1));
        caught_up.last_read_at = Some(now + Duration::seconds(1));
        harness.room_repo.insert_member(caught_up);

        let behind = RoomMember::new(room_id, Id::new(2), now - Duration::days(1));
        harness.room_repo.insert_member(behind);

        let fanout = FanoutService::new(&harness.ctx);
        let targeted = fanout
            .publish_room_update(room_id, RoomAction::MessagePosted)
            .await
            .unwrap();

        assert_eq!(targeted, 2);
        let published = harness.publisher.published();
        let by_channel: std::collections::HashMap<_, _> = published
            .iter()
            .map(|(channel, event)| (channel.clone(), event.data.clone()))
            .collect();

        assert_eq!(by_channel["notifications.1"]["unread"], false);
        assert_eq!(by_channel["notifications.2"]["unread"], true);
    }

    #[tokio::test]
    async fn test_room_update_unknown_room_is_not_found() {
        let harness = TestHarness::new();
        let fanout = FanoutService::new(&harness.ctx);

        let err = fanout
            .publish_room_update(Id::new(404), RoomAction::MemberJoined)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(harness.publisher.published().is_empty());
    }
}
