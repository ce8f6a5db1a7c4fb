//! Activity throttle gate

mod activity_gate;

pub use activity_gate::RedisActivityGate;
