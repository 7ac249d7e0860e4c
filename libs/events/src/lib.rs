//! # barcamp-events
//!
//! Broadcast message definitions for the barcamp platform.
//!
//! ## Design Principles
//!
//! - Broadcasts are immutable snapshots of committed state changes
//! - A broadcast is emitted strictly after its change is durable; delivery
//!   failure never affects the persisted state
//! - Every broadcast is scoped to exactly one barcamp event
//!
//! ## Broadcast Envelope
//!
//! All broadcasts share a common envelope with:
//! - The message kind (`schedule.published`, `votes.updated`, ...)
//! - The barcamp event the message belongs to (`event_id`)
//! - The wall-clock emission time (`occurred_at`)
//! - A kind-specific payload

mod envelope;
mod error;
mod types;

pub use envelope::*;
pub use error::BroadcastError;
pub use types::*;
