//! In-memory implementations of the ports, for exercising services
//! without a database or Redis.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pulse_core::traits::{
    ActivityGate, EventPublisher, PresenceRepository, RepoResult, RoomRepository,
    VotableRepository, VoteRepository,
};
use pulse_core::{
    BroadcastChannel, BroadcastEvent, ChatRoom, DomainError, Id, RoomMember, UserPresence, Vote,
    VoteDirection, VoteTally, VoteTarget,
};

use pulse_common::PresenceConfig;

use super::context::{ServiceContext, ServiceContextBuilder};

/// Vote store keyed by (user, target), mirroring the unique constraint
#[derive(Default)]
pub struct InMemoryVoteRepo {
    votes: Mutex<HashMap<(Id, VoteTarget), Vote>>,
    next_id: AtomicI64,
}

impl InMemoryVoteRepo {
    pub fn new() -> Self {
        Self {
            votes: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn row_count(&self) -> usize {
        self.votes.lock().unwrap().len()
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepo {
    async fn upsert(
        &self,
        user_id: Id,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> RepoResult<Vote> {
        let mut votes = self.votes.lock().unwrap();
        let now = Utc::now();
        let vote = votes
            .entry((user_id, target))
            .and_modify(|v| {
                v.direction = direction;
                v.updated_at = now;
            })
            .or_insert_with(|| Vote {
                id: Id::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
                user_id,
                target,
                direction,
                created_at: now,
                updated_at: now,
            });
        Ok(vote.clone())
    }

    async fn delete(&self, user_id: Id, target: VoteTarget) -> RepoResult<bool> {
        Ok(self.votes.lock().unwrap().remove(&(user_id, target)).is_some())
    }

    async fn find(&self, user_id: Id, target: VoteTarget) -> RepoResult<Option<Vote>> {
        Ok(self.votes.lock().unwrap().get(&(user_id, target)).cloned())
    }

    async fn tally(&self, target: VoteTarget) -> RepoResult<VoteTally> {
        let votes = self.votes.lock().unwrap();
        let mut up = 0;
        let mut down = 0;
        for vote in votes.values().filter(|v| v.target == target) {
            match vote.direction {
                VoteDirection::Up => up += 1,
                VoteDirection::Down => down += 1,
            }
        }
        Ok(VoteTally::new(up, down))
    }
}

/// Votable registry: a set of targets that exist
#[derive(Default)]
pub struct InMemoryVotableRepo {
    targets: Mutex<Vec<VoteTarget>>,
}

impl InMemoryVotableRepo {
    pub fn with_targets(targets: &[VoteTarget]) -> Self {
        Self {
            targets: Mutex::new(targets.to_vec()),
        }
    }
}

#[async_trait]
impl VotableRepository for InMemoryVotableRepo {
    async fn exists(&self, target: VoteTarget) -> RepoResult<bool> {
        Ok(self.targets.lock().unwrap().contains(&target))
    }
}

/// Presence store keyed by user, with a write counter for throttle tests
#[derive(Default)]
pub struct InMemoryPresenceRepo {
    rows: Mutex<HashMap<Id, UserPresence>>,
    writes: AtomicI64,
}

impl InMemoryPresenceRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> i64 {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn insert(&self, presence: UserPresence) {
        self.rows.lock().unwrap().insert(presence.user_id, presence);
    }

    pub fn get(&self, user_id: Id) -> Option<UserPresence> {
        self.rows.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepo {
    async fn find(&self, user_id: Id) -> RepoResult<Option<UserPresence>> {
        Ok(self.rows.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert(&self, presence: &UserPresence) -> RepoResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .unwrap()
            .insert(presence.user_id, presence.clone());
        Ok(())
    }

    async fn find_online(&self) -> RepoResult<Vec<UserPresence>> {
        let rows = self.rows.lock().unwrap();
        let mut online: Vec<_> = rows.values().filter(|p| p.is_online).cloned().collect();
        online.sort_by(|a, b| b.last_seen_at.cmp(&a.last_seen_at));
        Ok(online)
    }

    async fn mark_stale_offline(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<UserPresence>> {
        let mut rows = self.rows.lock().unwrap();
        let mut swept = Vec::new();
        for presence in rows.values_mut() {
            if presence.is_online && presence.last_seen_at < cutoff {
                presence.status = pulse_core::PresenceStatus::Offline;
                presence.is_online = false;
                swept.push(presence.clone());
            }
        }
        Ok(swept)
    }
}

/// Room registry with static memberships
#[derive(Default)]
pub struct InMemoryRoomRepo {
    rooms: Mutex<HashMap<Id, ChatRoom>>,
    members: Mutex<Vec<RoomMember>>,
}

impl InMemoryRoomRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_room(&self, room: ChatRoom) {
        self.rooms.lock().unwrap().insert(room.id, room);
    }

    pub fn insert_member(&self, member: RoomMember) {
        self.members.lock().unwrap().push(member);
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepo {
    async fn find_by_id(&self, room_id: Id) -> RepoResult<Option<ChatRoom>> {
        Ok(self.rooms.lock().unwrap().get(&room_id).cloned())
    }

    async fn active_room_ids(&self, user_id: Id) -> RepoResult<Vec<Id>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && m.active)
            .map(|m| m.room_id)
            .collect())
    }

    async fn active_members(&self, room_id: Id) -> RepoResult<Vec<RoomMember>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.room_id == room_id && m.active)
            .cloned()
            .collect())
    }
}

/// Room repository whose lookups always fail, for exercising fan-out
/// failure paths
pub struct BrokenRoomRepo;

#[async_trait]
impl RoomRepository for BrokenRoomRepo {
    async fn find_by_id(&self, _room_id: Id) -> RepoResult<Option<ChatRoom>> {
        Err(DomainError::DatabaseError("room lookup failed".to_string()))
    }

    async fn active_room_ids(&self, _user_id: Id) -> RepoResult<Vec<Id>> {
        Err(DomainError::DatabaseError("room lookup failed".to_string()))
    }

    async fn active_members(&self, _room_id: Id) -> RepoResult<Vec<RoomMember>> {
        Err(DomainError::DatabaseError("room lookup failed".to_string()))
    }
}

/// Gate with manually controlled windows: a user throttles until the test
/// expires their window
#[derive(Default)]
pub struct ManualGate {
    open_windows: Mutex<Vec<Id>>,
}

impl ManualGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the TTL expiring for a user
    pub fn expire(&self, user_id: Id) {
        self.open_windows.lock().unwrap().retain(|id| *id != user_id);
    }
}

#[async_trait]
impl ActivityGate for ManualGate {
    async fn should_throttle(&self, user_id: Id) -> RepoResult<bool> {
        let mut windows = self.open_windows.lock().unwrap();
        if windows.contains(&user_id) {
            Ok(true)
        } else {
            windows.push(user_id);
            Ok(false)
        }
    }
}

/// Publisher that records every (channel, event) pair
#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, BroadcastEvent)>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<(String, BroadcastEvent)> {
        self.published.lock().unwrap().clone()
    }

    pub fn channels(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(channel, _)| channel.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, channel: &BroadcastChannel, event: &BroadcastEvent) -> RepoResult<u32> {
        self.published
            .lock()
            .unwrap()
            .push((channel.name(), event.clone()));
        Ok(1)
    }
}

/// Bundle of fakes plus the context wired to them
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub vote_repo: Arc<InMemoryVoteRepo>,
    pub votable_repo: Arc<InMemoryVotableRepo>,
    pub presence_repo: Arc<InMemoryPresenceRepo>,
    pub room_repo: Arc<InMemoryRoomRepo>,
    pub gate: Arc<ManualGate>,
    pub publisher: Arc<RecordingPublisher>,
}

impl TestHarness {
    pub fn with_targets(targets: &[VoteTarget]) -> Self {
        let vote_repo = Arc::new(InMemoryVoteRepo::new());
        let votable_repo = Arc::new(InMemoryVotableRepo::with_targets(targets));
        let presence_repo = Arc::new(InMemoryPresenceRepo::new());
        let room_repo = Arc::new(InMemoryRoomRepo::new());
        let gate = Arc::new(ManualGate::new());
        let publisher = Arc::new(RecordingPublisher::new());

        let ctx = ServiceContextBuilder::new()
            .vote_repo(vote_repo.clone())
            .votable_repo(votable_repo.clone())
            .presence_repo(presence_repo.clone())
            .room_repo(room_repo.clone())
            .activity_gate(gate.clone())
            .publisher(publisher.clone())
            .presence_config(PresenceConfig::default())
            .build()
            .unwrap();

        Self {
            ctx,
            vote_repo,
            votable_repo,
            presence_repo,
            room_repo,
            gate,
            publisher,
        }
    }

    pub fn new() -> Self {
        Self::with_targets(&[])
    }
}
