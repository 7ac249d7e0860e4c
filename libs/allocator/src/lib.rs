//! # barcamp-allocator
//!
//! The schedule assignment core for barcamp events.
//!
//! Given the sessions proposed for an event (each carrying a vote count and
//! a set of required capabilities), the rooms (capacity plus offered
//! capabilities), and the time slots, [`allocate`] produces a conflict-free
//! assignment of sessions to (room, time slot) pairs together with
//! [`OptimizationMetrics`] describing its quality.
//!
//! # Invariants
//!
//! - The same inputs always produce the same assignment (deterministic)
//! - A room hosts at most one session per time slot
//! - A session is assigned at most once
//! - `assignments.len() + metrics.conflicts == sessions.len()`
//!
//! The allocator is a pure, synchronous computation over in-memory
//! snapshots: no I/O, no locking, no shared state across invocations. It is
//! intentionally a fast first-fit heuristic rather than an exact solver;
//! organizers review the proposal and can re-run or hand-edit it before
//! publishing.

pub mod capability;
pub mod domain;
pub mod greedy;
pub mod metrics;

pub use capability::satisfies;
pub use domain::{
    validate_inputs, Capability, Room, ScheduleProposal, Session, SessionStatus, SlotCategory,
    TimeSlot, ValidationError,
};
pub use greedy::{allocate, AllocationOutcome};
pub use metrics::OptimizationMetrics;
