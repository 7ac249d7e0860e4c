//! The scheduling facade the backend drives.
//!
//! `Scheduler` is constructed with explicit storage and notifier handles
//! (no process-global connections); the embedding binary owns their
//! lifecycles. It layers the tagged success/failure surface over the
//! infallible allocation core: inputs are validated here, allocation
//! itself never errors, and publication is delegated to the transactional
//! writer with the broadcast emitted strictly after a successful commit.

use async_trait::async_trait;
use barcamp_allocator::{
    allocate, validate_inputs, AllocationOutcome, Room, ScheduleProposal, Session, TimeSlot,
    ValidationError,
};
use barcamp_events::{Broadcast, BroadcastKind, ScheduleSnapshot, ScheduledSession};
use barcamp_id::EventId;
use thiserror::Error;
use tracing::info;

use crate::db::{DbError, ScheduleRow, ScheduleStore};
use crate::notify::ScheduleNotifier;

/// Failures surfaced by the scheduling facade.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The caller handed over malformed input.
    #[error("invalid scheduling input: {0}")]
    Validation(#[from] ValidationError),

    /// Durable storage failed; nothing was partially written.
    #[error("schedule storage failed: {0}")]
    Store(#[from] DbError),
}

impl SchedulerError {
    /// Returns true if retrying the failed operation can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulerError::Store(e) if e.is_retryable())
    }
}

/// The output collaborator: transactional storage for published schedules.
#[async_trait]
pub trait ScheduleWriter: Send + Sync {
    /// Atomically replace the event's schedule with the given proposals.
    async fn publish(
        &self,
        event_id: EventId,
        proposals: &[ScheduleProposal],
    ) -> Result<(), DbError>;

    /// Drop the event's schedule; clearing an empty schedule succeeds.
    async fn clear(&self, event_id: EventId) -> Result<(), DbError>;

    /// Read the committed schedule rows for the event.
    async fn get(&self, event_id: EventId) -> Result<Vec<ScheduleRow>, DbError>;
}

#[async_trait]
impl ScheduleWriter for ScheduleStore {
    async fn publish(
        &self,
        event_id: EventId,
        proposals: &[ScheduleProposal],
    ) -> Result<(), DbError> {
        ScheduleStore::publish(self, event_id, proposals).await
    }

    async fn clear(&self, event_id: EventId) -> Result<(), DbError> {
        ScheduleStore::clear(self, event_id).await
    }

    async fn get(&self, event_id: EventId) -> Result<Vec<ScheduleRow>, DbError> {
        ScheduleStore::get(self, event_id).await
    }
}

/// The scheduling service: allocation, publication, and post-commit
/// announcement for one barcamp deployment.
pub struct Scheduler<W, N> {
    writer: W,
    notifier: N,
}

impl<W: ScheduleWriter, N: ScheduleNotifier> Scheduler<W, N> {
    /// Create a scheduler with injected storage and notifier handles.
    pub fn new(writer: W, notifier: N) -> Self {
        Self { writer, notifier }
    }

    /// Validate the snapshots and compute a schedule proposal.
    ///
    /// Infeasible sessions are not failures; they show up as
    /// `metrics.conflicts` in the outcome.
    pub fn propose(
        &self,
        sessions: &[Session],
        rooms: &[Room],
        slots: &[TimeSlot],
    ) -> Result<AllocationOutcome, SchedulerError> {
        validate_inputs(sessions, rooms, slots)?;
        Ok(allocate(sessions, rooms, slots))
    }

    /// Durably replace the event's schedule, then announce it.
    ///
    /// The broadcast goes out strictly after the commit and is
    /// fire-and-forget: a lost announcement never invalidates the
    /// persisted schedule.
    pub async fn publish(
        &self,
        event_id: EventId,
        proposals: &[ScheduleProposal],
    ) -> Result<(), SchedulerError> {
        self.writer.publish(event_id, proposals).await?;

        let snapshot = ScheduleSnapshot {
            event_id,
            entries: proposals
                .iter()
                .map(|p| ScheduledSession {
                    session_id: p.session_id,
                    room_id: p.room_id,
                    time_slot_id: p.time_slot_id,
                    starts_at: p.starts_at,
                })
                .collect(),
        };
        self.notifier
            .notify(Broadcast::new(
                BroadcastKind::SchedulePublished,
                event_id,
                snapshot,
            ))
            .await;

        info!(event_id = %event_id, entries = proposals.len(), "Schedule published and announced");
        Ok(())
    }

    /// Drop the event's schedule.
    pub async fn clear(&self, event_id: EventId) -> Result<(), SchedulerError> {
        Ok(self.writer.clear(event_id).await?)
    }

    /// Read the committed schedule.
    pub async fn get(&self, event_id: EventId) -> Result<Vec<ScheduleRow>, SchedulerError> {
        Ok(self.writer.get(event_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};
    use barcamp_allocator::{Capability, SessionStatus, SlotCategory};
    use barcamp_id::{RoomId, SessionId, TimeSlotId};

    use super::*;

    /// In-memory stand-in for the transactional store: replaces the rows
    /// wholesale on success, leaves them untouched on injected failure.
    #[derive(Default)]
    struct FakeWriter {
        rows: Mutex<HashMap<EventId, Vec<ScheduleRow>>>,
        fail_next_publish: AtomicBool,
    }

    impl FakeWriter {
        fn inject_publish_failure(&self) {
            self.fail_next_publish.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ScheduleWriter for FakeWriter {
        async fn publish(
            &self,
            event_id: EventId,
            proposals: &[ScheduleProposal],
        ) -> Result<(), DbError> {
            if self.fail_next_publish.swap(false, Ordering::SeqCst) {
                return Err(DbError::Query(sqlx::Error::PoolTimedOut));
            }
            let rows = proposals
                .iter()
                .map(|p| ScheduleRow {
                    session_id: p.session_id,
                    room_id: p.room_id,
                    time_slot_id: p.time_slot_id,
                    starts_at: p.starts_at,
                    created_at: Utc::now(),
                })
                .collect();
            self.rows.lock().unwrap().insert(event_id, rows);
            Ok(())
        }

        async fn clear(&self, event_id: EventId) -> Result<(), DbError> {
            self.rows.lock().unwrap().remove(&event_id);
            Ok(())
        }

        async fn get(&self, event_id: EventId) -> Result<Vec<ScheduleRow>, DbError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .get(&event_id)
                .cloned()
                .unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<Broadcast<ScheduleSnapshot>>>,
    }

    #[async_trait]
    impl ScheduleNotifier for RecordingNotifier {
        async fn notify(&self, message: Broadcast<ScheduleSnapshot>) {
            self.messages.lock().unwrap().push(message);
        }
    }

    fn proposal() -> ScheduleProposal {
        ScheduleProposal {
            session_id: SessionId::new(),
            room_id: RoomId::new(),
            time_slot_id: TimeSlotId::new(),
            starts_at: Utc.with_ymd_and_hms(2026, 9, 12, 10, 0, 0).unwrap(),
        }
    }

    fn scheduler() -> Scheduler<FakeWriter, RecordingNotifier> {
        Scheduler::new(FakeWriter::default(), RecordingNotifier::default())
    }

    #[tokio::test]
    async fn test_publish_announces_after_commit() {
        let scheduler = scheduler();
        let event_id = EventId::new();
        let proposals = vec![proposal(), proposal()];

        scheduler.publish(event_id, &proposals).await.unwrap();

        let rows = scheduler.get(event_id).await.unwrap();
        assert_eq!(rows.len(), 2);

        let messages = scheduler.notifier.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, BroadcastKind::SchedulePublished);
        assert_eq!(messages[0].payload.entries.len(), 2);
        assert_eq!(
            messages[0].payload.entries[0].session_id,
            proposals[0].session_id
        );
    }

    #[tokio::test]
    async fn test_failed_publish_keeps_prior_schedule_and_stays_silent() {
        let scheduler = scheduler();
        let event_id = EventId::new();
        let committed = vec![proposal()];
        scheduler.publish(event_id, &committed).await.unwrap();

        scheduler.writer.inject_publish_failure();
        let err = scheduler
            .publish(event_id, &[proposal(), proposal()])
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulerError::Store(_)));
        assert!(!err.is_retryable());

        // Prior committed rows are intact and only the first publish was
        // announced.
        let rows = scheduler.get(event_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].session_id, committed[0].session_id);
        assert_eq!(scheduler.notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_retryable_store_error_is_flagged() {
        let err = SchedulerError::Store(DbError::Contention { attempts: 3 });
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let scheduler = scheduler();
        let event_id = EventId::new();
        scheduler.publish(event_id, &[proposal()]).await.unwrap();

        scheduler.clear(event_id).await.unwrap();
        assert!(scheduler.get(event_id).await.unwrap().is_empty());

        // Clearing an already-empty schedule succeeds silently.
        scheduler.clear(event_id).await.unwrap();
        assert!(scheduler.get(event_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_propose_rejects_malformed_slot() {
        let scheduler = scheduler();
        let event_id = EventId::new();
        let starts_at = Utc.with_ymd_and_hms(2026, 9, 12, 10, 0, 0).unwrap();
        let slot = TimeSlot {
            id: TimeSlotId::new(),
            event_id,
            starts_at,
            ends_at: starts_at,
            category: SlotCategory::Talk,
            label: None,
        };

        let err = scheduler.propose(&[], &[], &[slot]).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::Validation(ValidationError::MalformedTimeRange { .. })
        ));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_propose_runs_the_allocator() {
        let scheduler = scheduler();
        let event_id = EventId::new();
        let session = Session {
            id: SessionId::new(),
            event_id,
            title: "Intro to lockpicking".to_owned(),
            description: String::new(),
            presenter: "sam".to_owned(),
            duration_minutes: 45,
            required: BTreeSet::from([Capability::Beamer]),
            vote_count: 12,
            status: SessionStatus::Created,
        };
        let room = Room {
            id: RoomId::new(),
            event_id,
            name: "Auditorium".to_owned(),
            capacity: 80,
            capabilities: BTreeSet::from([Capability::Beamer, Capability::Whiteboard]),
        };
        let slot = TimeSlot {
            id: TimeSlotId::new(),
            event_id,
            starts_at: Utc.with_ymd_and_hms(2026, 9, 12, 10, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 9, 12, 10, 45, 0).unwrap(),
            category: SlotCategory::Talk,
            label: Some("Morning block".to_owned()),
        };

        let outcome = scheduler
            .propose(&[session.clone()], &[room.clone()], &[slot.clone()])
            .unwrap();

        assert_eq!(outcome.assignments.len(), 1);
        assert_eq!(outcome.assignments[0].session_id, session.id);
        assert_eq!(outcome.assignments[0].room_id, room.id);
        assert_eq!(outcome.metrics.conflicts, 0);
    }
}
