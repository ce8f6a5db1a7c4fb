//! Pub/sub event publisher

mod publisher;

pub use publisher::RedisPublisher;
