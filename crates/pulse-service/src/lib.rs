//! # pulse-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services orchestrate the domain operations: casting and tallying votes,
//! tracking user presence through the activity throttle, and fanning out
//! broadcast events after successful mutations. All side effects are
//! explicit calls, never storage-layer hooks.

pub mod dto;
pub mod services;

pub use services::{
    FanoutService, PresenceService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, VoteService,
};
