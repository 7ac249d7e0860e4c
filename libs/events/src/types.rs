//! Broadcast kinds and payload definitions.
//!
//! The kind vocabulary covers every message the platform fans out to
//! connected clients. The scheduling engine itself emits only
//! `schedule.published`; the remaining kinds belong to the session and
//! voting surfaces that share this wire format.

use chrono::{DateTime, Utc};
use barcamp_id::{EventId, RoomId, SessionId, TimeSlotId};
use serde::{Deserialize, Serialize};

/// All broadcast kind names as constants.
pub mod kinds {
    pub const SESSION_CREATED: &str = "session.created";
    pub const SESSION_UPDATED: &str = "session.updated";
    pub const SESSION_DELETED: &str = "session.deleted";
    pub const VOTES_UPDATED: &str = "votes.updated";
    pub const SCHEDULE_PUBLISHED: &str = "schedule.published";
    pub const EVENT_STATUS_CHANGED: &str = "event.status_changed";
}

/// The kind of a broadcast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroadcastKind {
    #[serde(rename = "session.created")]
    SessionCreated,
    #[serde(rename = "session.updated")]
    SessionUpdated,
    #[serde(rename = "session.deleted")]
    SessionDeleted,
    #[serde(rename = "votes.updated")]
    VotesUpdated,
    #[serde(rename = "schedule.published")]
    SchedulePublished,
    #[serde(rename = "event.status_changed")]
    EventStatusChanged,
}

impl std::fmt::Display for BroadcastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BroadcastKind::SessionCreated => kinds::SESSION_CREATED,
            BroadcastKind::SessionUpdated => kinds::SESSION_UPDATED,
            BroadcastKind::SessionDeleted => kinds::SESSION_DELETED,
            BroadcastKind::VotesUpdated => kinds::VOTES_UPDATED,
            BroadcastKind::SchedulePublished => kinds::SCHEDULE_PUBLISHED,
            BroadcastKind::EventStatusChanged => kinds::EVENT_STATUS_CHANGED,
        };
        write!(f, "{s}")
    }
}

/// One committed schedule entry inside a published snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSession {
    pub session_id: SessionId,
    pub room_id: RoomId,
    pub time_slot_id: TimeSlotId,
    pub starts_at: DateTime<Utc>,
}

/// Payload of a `schedule.published` broadcast: the full committed schedule
/// for one barcamp event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub event_id: EventId,
    pub entries: Vec<ScheduledSession>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_matches_wire_name() {
        assert_eq!(
            BroadcastKind::SchedulePublished.to_string(),
            kinds::SCHEDULE_PUBLISHED
        );
        assert_eq!(
            BroadcastKind::VotesUpdated.to_string(),
            kinds::VOTES_UPDATED
        );
    }

    #[test]
    fn test_kind_serde_roundtrip() {
        let json = serde_json::to_string(&BroadcastKind::SessionDeleted).unwrap();
        assert_eq!(json, "\"session.deleted\"");
        let parsed: BroadcastKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, BroadcastKind::SessionDeleted);
    }
}
