//! Entity ↔ model mappers
//!
//! Models hold raw column types; mappers lift them into domain entities.
//! Enum-typed columns are stored as text, so the lifts are fallible: a
//! value that fails to parse means the row was written outside this crate.

mod presence;
mod room;
mod vote;
