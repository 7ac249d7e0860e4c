//! Broadcast envelope - the common wrapper for all outgoing messages.

use chrono::{DateTime, Utc};
use barcamp_id::EventId;
use serde::{Deserialize, Serialize};

use crate::error::BroadcastError;
use crate::types::BroadcastKind;

/// The broadcast envelope - common metadata for all messages fanned out to
/// observers of a barcamp event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast<P> {
    /// The message kind (e.g., "schedule.published").
    pub kind: BroadcastKind,

    /// The barcamp event this message belongs to.
    pub event_id: EventId,

    /// When the message was emitted.
    pub occurred_at: DateTime<Utc>,

    /// Kind-specific payload.
    pub payload: P,
}

impl<P> Broadcast<P> {
    /// Creates a broadcast stamped with the current time.
    pub fn new(kind: BroadcastKind, event_id: EventId, payload: P) -> Self {
        Self {
            kind,
            event_id,
            occurred_at: Utc::now(),
            payload,
        }
    }
}

impl<P: Serialize> Broadcast<P> {
    /// Serializes the broadcast to its JSON wire form.
    pub fn to_json(&self) -> Result<String, BroadcastError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScheduleSnapshot, ScheduledSession};
    use barcamp_id::{RoomId, SessionId, TimeSlotId};

    #[test]
    fn test_broadcast_json_kind_is_dotted() {
        let event_id = EventId::new();
        let snapshot = ScheduleSnapshot {
            event_id,
            entries: vec![ScheduledSession {
                session_id: SessionId::new(),
                room_id: RoomId::new(),
                time_slot_id: TimeSlotId::new(),
                starts_at: Utc::now(),
            }],
        };
        let broadcast = Broadcast::new(BroadcastKind::SchedulePublished, event_id, snapshot);

        let json = broadcast.to_json().unwrap();
        assert!(json.contains("\"schedule.published\""));

        let parsed: Broadcast<ScheduleSnapshot> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, BroadcastKind::SchedulePublished);
        assert_eq!(parsed.event_id, event_id);
        assert_eq!(parsed.payload.entries.len(), 1);
    }
}
