//! Domain types for schedule assignment.
//!
//! These are plain in-memory snapshots handed over by the storage
//! collaborator; the allocator never queries for them itself.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use barcamp_id::{EventId, RoomId, SessionId, TimeSlotId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An equipment tag a room offers and a session may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capability {
    Beamer,
    Flipchart,
    Whiteboard,
    ModerationKit,
}

impl Capability {
    /// The stored wire name of this capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Beamer => "BEAMER",
            Capability::Flipchart => "FLIPCHART",
            Capability::Whiteboard => "WHITEBOARD",
            Capability::ModerationKit => "MODERATION_KIT",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session lifecycle status.
///
/// Sessions start as `Created`; voting happens without a status change. The
/// schedule store flips scheduled sessions to `Scheduled` when a schedule is
/// published. The time-driven `InProgress`/`Completed` transitions belong to
/// the event runtime, not the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Created,
    Scheduled,
    InProgress,
    Completed,
}

impl SessionStatus {
    /// The stored wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Created => "CREATED",
            SessionStatus::Scheduled => "SCHEDULED",
            SessionStatus::InProgress => "IN_PROGRESS",
            SessionStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The category of a time slot.
///
/// The allocator treats every slot it is handed as assignable; callers that
/// keep talks out of meal breaks filter with [`SlotCategory::is_schedulable`]
/// before invoking it, the same way they pre-sort slots by start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotCategory {
    /// An ordinary session slot.
    #[serde(rename = "SESSION")]
    Talk,
    Breakfast,
    Lunch,
    Dinner,
    Break,
}

impl SlotCategory {
    /// Returns true for ordinary session slots.
    pub fn is_schedulable(&self) -> bool {
        matches!(self, SlotCategory::Talk)
    }
}

/// A proposed talk or workshop, carrying popularity and technical
/// requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub presenter: String,
    pub duration_minutes: u32,
    /// Capabilities the room must offer for this session.
    pub required: BTreeSet<Capability>,
    /// Vote tally, maintained by the voting subsystem.
    pub vote_count: u32,
    pub status: SessionStatus,
}

/// A physical space with seating capacity and offered equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub event_id: EventId,
    pub name: String,
    pub capacity: u32,
    pub capabilities: BTreeSet<Capability>,
}

/// A fixed calendar interval sessions can be assigned into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub event_id: EventId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub category: SlotCategory,
    pub label: Option<String>,
}

/// One candidate assignment of a session to a (room, time slot) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleProposal {
    pub session_id: SessionId,
    pub room_id: RoomId,
    pub time_slot_id: TimeSlotId,
    pub starts_at: DateTime<Utc>,
}

/// Input defects the allocator assumes callers have ruled out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A time slot whose end does not lie after its start.
    #[error("time slot {slot_id} ends at {ends_at} which is not after its start {starts_at}")]
    MalformedTimeRange {
        slot_id: TimeSlotId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },

    /// A room that cannot seat anyone.
    #[error("room {room_id} ('{name}') has zero capacity")]
    ZeroCapacity { room_id: RoomId, name: String },

    /// A room with a blank name.
    #[error("room {room_id} has a blank name")]
    BlankRoomName { room_id: RoomId },

    /// A session with a blank title.
    #[error("session {session_id} has a blank title")]
    BlankSessionTitle { session_id: SessionId },
}

/// Checks the well-formedness assumptions the allocator makes about its
/// inputs.
///
/// Infeasibility (a session nothing can host) is not a validation failure;
/// it surfaces as `conflicts` in the metrics.
pub fn validate_inputs(
    sessions: &[Session],
    rooms: &[Room],
    slots: &[TimeSlot],
) -> Result<(), ValidationError> {
    for session in sessions {
        if session.title.trim().is_empty() {
            return Err(ValidationError::BlankSessionTitle {
                session_id: session.id,
            });
        }
    }

    for room in rooms {
        if room.name.trim().is_empty() {
            return Err(ValidationError::BlankRoomName { room_id: room.id });
        }
        if room.capacity == 0 {
            return Err(ValidationError::ZeroCapacity {
                room_id: room.id,
                name: room.name.clone(),
            });
        }
    }

    for slot in slots {
        if slot.ends_at <= slot.starts_at {
            return Err(ValidationError::MalformedTimeRange {
                slot_id: slot.id,
                starts_at: slot.starts_at,
                ends_at: slot.ends_at,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> EventId {
        EventId::new()
    }

    fn slot_at(event_id: EventId, start_hour: u32, end_hour: u32) -> TimeSlot {
        TimeSlot {
            id: TimeSlotId::new(),
            event_id,
            starts_at: Utc.with_ymd_and_hms(2026, 9, 12, start_hour, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 9, 12, end_hour, 0, 0).unwrap(),
            category: SlotCategory::Talk,
            label: None,
        }
    }

    #[test]
    fn test_capability_wire_names() {
        let json = serde_json::to_string(&Capability::ModerationKit).unwrap();
        assert_eq!(json, "\"MODERATION_KIT\"");
        let parsed: Capability = serde_json::from_str("\"BEAMER\"").unwrap();
        assert_eq!(parsed, Capability::Beamer);
    }

    #[test]
    fn test_slot_category_session_wire_name() {
        let json = serde_json::to_string(&SlotCategory::Talk).unwrap();
        assert_eq!(json, "\"SESSION\"");
        assert!(SlotCategory::Talk.is_schedulable());
        assert!(!SlotCategory::Lunch.is_schedulable());
    }

    #[test]
    fn test_validate_rejects_inverted_time_range() {
        let event_id = event();
        let mut slot = slot_at(event_id, 10, 11);
        slot.ends_at = slot.starts_at;

        let err = validate_inputs(&[], &[], &[slot]).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedTimeRange { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let event_id = event();
        let room = Room {
            id: RoomId::new(),
            event_id,
            name: "Main hall".to_owned(),
            capacity: 0,
            capabilities: BTreeSet::new(),
        };

        let err = validate_inputs(&[], &[room], &[]).unwrap_err();
        assert!(matches!(err, ValidationError::ZeroCapacity { .. }));
    }

    #[test]
    fn test_validate_rejects_blank_names() {
        let event_id = event();
        let session = Session {
            id: SessionId::new(),
            event_id,
            title: "   ".to_owned(),
            description: String::new(),
            presenter: "ada".to_owned(),
            duration_minutes: 45,
            required: BTreeSet::new(),
            vote_count: 0,
            status: SessionStatus::Created,
        };

        let err = validate_inputs(&[session], &[], &[]).unwrap_err();
        assert!(matches!(err, ValidationError::BlankSessionTitle { .. }));
    }

    #[test]
    fn test_validate_accepts_well_formed_inputs() {
        let event_id = event();
        let room = Room {
            id: RoomId::new(),
            event_id,
            name: "Workshop corner".to_owned(),
            capacity: 25,
            capabilities: BTreeSet::from([Capability::Whiteboard]),
        };
        let slot = slot_at(event_id, 9, 10);

        assert_eq!(validate_inputs(&[], &[room], &[slot]), Ok(()));
    }
}
