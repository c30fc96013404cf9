//!
//! # CRUD Services
//!
//! The business-logic core. Every operation follows the same shape:
//! validate the input, run the cross-entity reference check where one
//! applies, then perform a single persistence round-trip and shape the
//! response. There is no retry policy and no transaction spanning the
//! reference check and the write; the check-then-write window against a
//! concurrent teacher deletion is a known, accepted race.

pub mod students;
pub mod teachers;

use crate::error::ApiError;
use uuid::Uuid;

/// Parses a path identifier. A string that is not a UUID is a client input
/// error (400), distinct from a well-formed id that matches nothing (404).
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::MalformedId(format!("'{}' is not a valid id", raw)))
}
