//! Transactional store for published schedules.
//!
//! The store provides:
//! - `publish`: replace an event's schedule as one atomic unit
//! - `clear`: drop an event's schedule, idempotently
//! - `get`: read the committed schedule rows
//!
//! Publishing deletes the previous rows, inserts the new ones and flips the
//! scheduled sessions to `SCHEDULED` inside a single transaction; any
//! failure rolls the whole unit back, so a mix of old and new rows is never
//! visible. Concurrent publishes for one event serialize on the row locks
//! the delete takes; different events touch disjoint rows and do not block
//! each other.

use std::time::Duration;

use chrono::{DateTime, Utc};
use barcamp_allocator::{ScheduleProposal, SessionStatus};
use barcamp_id::{EventId, RoomId, SessionId, TimeSlotId};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::{info, warn};

use super::DbError;

/// Transaction aborts worth retrying before giving up.
const MAX_PUBLISH_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// A committed row from the schedules table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub session_id: SessionId,
    pub room_id: RoomId,
    pub time_slot_id: TimeSlotId,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for ScheduleRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: parse_id(row, "session_id", SessionId::parse)?,
            room_id: parse_id(row, "room_id", RoomId::parse)?,
            time_slot_id: parse_id(row, "time_slot_id", TimeSlotId::parse)?,
            starts_at: row.try_get("starts_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

fn parse_id<T>(
    row: &PgRow,
    column: &str,
    parse: impl Fn(&str) -> Result<T, barcamp_id::IdError>,
) -> Result<T, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Store for managing published schedules.
#[derive(Clone)]
pub struct ScheduleStore {
    pool: PgPool,
}

impl ScheduleStore {
    /// Create a new schedule store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically replace the published schedule of an event.
    ///
    /// Deletes every schedule row belonging to the event's sessions,
    /// inserts one row per proposal and marks each proposal's session as
    /// `SCHEDULED`, all in one transaction. On a serialization or deadlock
    /// abort the transaction is retried with backoff; when the retries are
    /// exhausted the caller gets [`DbError::Contention`] and decides
    /// whether to try again.
    pub async fn publish(
        &self,
        event_id: EventId,
        proposals: &[ScheduleProposal],
    ) -> Result<(), DbError> {
        let mut attempt = 1;
        loop {
            match self.publish_once(event_id, proposals).await {
                Ok(()) => {
                    info!(
                        event_id = %event_id,
                        rows = proposals.len(),
                        "Schedule published"
                    );
                    return Ok(());
                }
                Err(e) if is_transient_abort(&e) => {
                    if attempt >= MAX_PUBLISH_ATTEMPTS {
                        return Err(DbError::Contention { attempts: attempt });
                    }
                    warn!(
                        event_id = %event_id,
                        attempt,
                        error = %e,
                        "Publish transaction aborted, retrying"
                    );
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(DbError::Query(e)),
            }
        }
    }

    async fn publish_once(
        &self,
        event_id: EventId,
        proposals: &[ScheduleProposal],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM schedules
            WHERE session_id IN (
                SELECT id FROM sessions WHERE event_id = $1
            )
            "#,
        )
        .bind(event_id.to_string())
        .execute(&mut *tx)
        .await?;

        for proposal in proposals {
            sqlx::query(
                r#"
                INSERT INTO schedules (session_id, room_id, time_slot_id, starts_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(proposal.session_id.to_string())
            .bind(proposal.room_id.to_string())
            .bind(proposal.time_slot_id.to_string())
            .bind(proposal.starts_at)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE sessions SET status = $1 WHERE id = $2")
                .bind(SessionStatus::Scheduled.as_str())
                .bind(proposal.session_id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await
    }

    /// Delete every schedule row for the event's sessions.
    ///
    /// Clearing an already-empty schedule succeeds silently.
    pub async fn clear(&self, event_id: EventId) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            DELETE FROM schedules
            WHERE session_id IN (
                SELECT id FROM sessions WHERE event_id = $1
            )
            "#,
        )
        .bind(event_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(DbError::Query)?;

        info!(
            event_id = %event_id,
            rows = result.rows_affected(),
            "Schedule cleared"
        );
        Ok(())
    }

    /// Read the committed schedule rows for an event, in storage order.
    pub async fn get(&self, event_id: EventId) -> Result<Vec<ScheduleRow>, DbError> {
        sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT s.session_id, s.room_id, s.time_slot_id, s.starts_at, s.created_at
            FROM schedules s
            JOIN sessions sess ON s.session_id = sess.id
            WHERE sess.event_id = $1
            "#,
        )
        .bind(event_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::Query)
    }
}

/// Serialization failures (40001) and deadlocks (40P01) abort the
/// transaction but leave the database unchanged; the transaction can be
/// replayed as-is.
fn is_transient_abort(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.code().as_deref(), Some("40001") | Some("40P01"))
        }
        _ => false,
    }
}
