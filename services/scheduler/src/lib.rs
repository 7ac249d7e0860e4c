//! Barcamp scheduling service.
//!
//! Ties the pure allocation core to durable storage and the broadcast
//! seam: input validation and allocation via [`barcamp_allocator`],
//! transactional schedule publication via [`db::ScheduleStore`], and
//! post-commit fan-out through the [`notify::ScheduleNotifier`] seam.
//! The backend that owns the HTTP and websocket surfaces embeds this
//! crate and injects its own handles.

pub mod config;
pub mod db;
pub mod notify;
pub mod service;

pub use service::{ScheduleWriter, Scheduler, SchedulerError};
