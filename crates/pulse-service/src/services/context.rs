//! Service context - dependency container for services
//!
//! Holds the repositories, throttle gate, publisher, and presence tuning
//! needed by services. Everything behind a trait object so services can be
//! exercised against in-memory implementations.

use std::sync::Arc;

use pulse_common::PresenceConfig;
use pulse_core::traits::{
    ActivityGate, EventPublisher, PresenceRepository, RoomRepository, VotableRepository,
    VoteRepository,
};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    vote_repo: Arc<dyn VoteRepository>,
    votable_repo: Arc<dyn VotableRepository>,
    presence_repo: Arc<dyn PresenceRepository>,
    room_repo: Arc<dyn RoomRepository>,

    activity_gate: Arc<dyn ActivityGate>,
    publisher: Arc<dyn EventPublisher>,

    presence_config: PresenceConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        vote_repo: Arc<dyn VoteRepository>,
        votable_repo: Arc<dyn VotableRepository>,
        presence_repo: Arc<dyn PresenceRepository>,
        room_repo: Arc<dyn RoomRepository>,
        activity_gate: Arc<dyn ActivityGate>,
        publisher: Arc<dyn EventPublisher>,
        presence_config: PresenceConfig,
    ) -> Self {
        Self {
            vote_repo,
            votable_repo,
            presence_repo,
            room_repo,
            activity_gate,
            publisher,
            presence_config,
        }
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the votable repository
    pub fn votable_repo(&self) -> &dyn VotableRepository {
        self.votable_repo.as_ref()
    }

    /// Get the presence repository
    pub fn presence_repo(&self) -> &dyn PresenceRepository {
        self.presence_repo.as_ref()
    }

    /// Get the room repository
    pub fn room_repo(&self) -> &dyn RoomRepository {
        self.room_repo.as_ref()
    }

    /// Get the activity throttle gate
    pub fn activity_gate(&self) -> &dyn ActivityGate {
        self.activity_gate.as_ref()
    }

    /// Get the broadcast publisher
    pub fn publisher(&self) -> &dyn EventPublisher {
        self.publisher.as_ref()
    }

    /// Get the presence tuning parameters
    pub fn presence_config(&self) -> &PresenceConfig {
        &self.presence_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("presence_config", &self.presence_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    vote_repo: Option<Arc<dyn VoteRepository>>,
    votable_repo: Option<Arc<dyn VotableRepository>>,
    presence_repo: Option<Arc<dyn PresenceRepository>>,
    room_repo: Option<Arc<dyn RoomRepository>>,
    activity_gate: Option<Arc<dyn ActivityGate>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    presence_config: Option<PresenceConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            vote_repo: None,
            votable_repo: None,
            presence_repo: None,
            room_repo: None,
            activity_gate: None,
            publisher: None,
            presence_config: None,
        }
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn votable_repo(mut self, repo: Arc<dyn VotableRepository>) -> Self {
        self.votable_repo = Some(repo);
        self
    }

    pub fn presence_repo(mut self, repo: Arc<dyn PresenceRepository>) -> Self {
        self.presence_repo = Some(repo);
        self
    }

    pub fn room_repo(mut self, repo: Arc<dyn RoomRepository>) -> Self {
        self.room_repo = Some(repo);
        self
    }

    pub fn activity_gate(mut self, gate: Arc<dyn ActivityGate>) -> Self {
        self.activity_gate = Some(gate);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn presence_config(mut self, config: PresenceConfig) -> Self {
        self.presence_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.vote_repo
                .ok_or_else(|| super::error::ServiceError::validation("vote_repo is required"))?,
            self.votable_repo
                .ok_or_else(|| super::error::ServiceError::validation("votable_repo is required"))?,
            self.presence_repo
                .ok_or_else(|| super::error::ServiceError::validation("presence_repo is required"))?,
            self.room_repo
                .ok_or_else(|| super::error::ServiceError::validation("room_repo is required"))?,
            self.activity_gate
                .ok_or_else(|| super::error::ServiceError::validation("activity_gate is required"))?,
            self.publisher
                .ok_or_else(|| super::error::ServiceError::validation("publisher is required"))?,
            self.presence_config.unwrap_or_default(),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
