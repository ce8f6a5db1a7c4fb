//! # pulse-cache
//!
//! Redis layer for the activity throttle gate and pub/sub fan-out.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Throttle Gate**: short-TTL `SET NX` entries coalescing activity
//!   signals into at most one presence write per window
//! - **Pub/Sub**: fire-and-forget event distribution to channel subscribers
//!
//! The gate is intentionally not durable: losing Redis state at worst
//! causes one extra presence write, never incorrect state.

pub mod pool;
pub mod pubsub;
pub mod throttle;

// Re-export pool types
pub use pool::{create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export throttle types
pub use throttle::RedisActivityGate;

// Re-export pubsub types
pub use pubsub::RedisPublisher;
