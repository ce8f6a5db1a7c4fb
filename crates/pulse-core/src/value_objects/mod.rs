//! Value objects - small immutable types with identity semantics

mod id;

pub use id::{Id, IdParseError};
