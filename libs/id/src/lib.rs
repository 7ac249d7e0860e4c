//! # barcamp-id
//!
//! Typed entity identifiers for the barcamp platform.
//!
//! ## Design Principles
//!
//! - IDs are system-generated and stable; names and titles are
//!   user-controlled labels
//! - Every ID has a canonical string form with strict parsing
//! - IDs round-trip through serialization (parse → format → parse)
//! - IDs are typed so a session id can never stand in for a room id
//!
//! ## ID Format
//!
//! All entity IDs use a prefixed format: `{prefix}_{ulid}`
//!
//! Examples:
//! - `evt_01HV4Z2WQXKJNM8GPQY6VBKC3D`
//! - `ses_01HV4Z3MXNKPQR9HSTZ7WCLD4E`
//! - `room_01HV4Z4NYPLTRS0JTUA8XDME5F`
//!
//! The ULID payload is time-ordered, so comparing two ids of the same type
//! orders them by creation time. The scheduler relies on this for its
//! deterministic tie-breaking between equally voted sessions.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;
