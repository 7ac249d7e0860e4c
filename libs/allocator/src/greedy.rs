//! Greedy first-fit schedule assignment.
//!
//! Sessions are placed most-voted first into the first free (room, time
//! slot) pair that satisfies their requirements. First fit, not best fit:
//! the scan stops at the first feasible pair, which keeps a full run at
//! O(sessions × slots × rooms) and makes the outcome reproducible. The
//! packing is deliberately not globally optimal; scheduling happens
//! interactively and an organizer reviews the proposal before publishing.

use std::collections::{HashMap, HashSet};

use barcamp_id::{RoomId, TimeSlotId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability;
use crate::domain::{Room, ScheduleProposal, Session, TimeSlot};
use crate::metrics::OptimizationMetrics;

/// Vote count above which a session is considered high-demand and is kept
/// out of rooms smaller than its tally. Sessions at or below the threshold
/// bypass the capacity check entirely.
const HIGH_DEMAND_VOTES: u32 = 50;

/// The result of one allocation run: the proposed assignments in placement
/// order, plus the quality metrics derived from them.
///
/// Producing this never fails. A run that places nothing is a valid outcome
/// with `metrics.conflicts == sessions.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub assignments: Vec<ScheduleProposal>,
    pub metrics: OptimizationMetrics,
}

/// Assigns sessions to (room, time slot) pairs.
///
/// Sessions are ordered by vote count descending; equal tallies are broken
/// by session id ascending, which for ULID-based ids means creation time
/// ascending. The ordering is therefore fixed by the data itself, not by
/// the iteration order of the caller's collections.
///
/// Time slots are scanned in their given order (callers pass them sorted by
/// start time), rooms in their given order within each slot. A (room, slot)
/// pair is skipped when the room is already occupied in that slot, when the
/// room lacks a required capability, or when a high-demand session exceeds
/// the room's capacity. The first pair passing all checks wins.
///
/// A session with no feasible pair anywhere is left unscheduled and counted
/// in `metrics.conflicts`; that is an expected outcome, not a failure.
pub fn allocate(sessions: &[Session], rooms: &[Room], slots: &[TimeSlot]) -> AllocationOutcome {
    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by(|a, b| {
        b.vote_count
            .cmp(&a.vote_count)
            .then_with(|| a.id.cmp(&b.id))
    });

    // Occupancy index scoped to this run: room -> slots already taken.
    let mut occupancy: HashMap<RoomId, HashSet<TimeSlotId>> = HashMap::new();
    let mut assignments = Vec::new();

    for session in ordered {
        'placement: for slot in slots {
            for room in rooms {
                if occupancy
                    .get(&room.id)
                    .is_some_and(|taken| taken.contains(&slot.id))
                {
                    continue;
                }

                if !capability::satisfies(&session.required, &room.capabilities) {
                    continue;
                }

                if session.vote_count > HIGH_DEMAND_VOTES && session.vote_count > room.capacity {
                    continue;
                }

                assignments.push(ScheduleProposal {
                    session_id: session.id,
                    room_id: room.id,
                    time_slot_id: slot.id,
                    starts_at: slot.starts_at,
                });
                occupancy.entry(room.id).or_default().insert(slot.id);
                break 'placement;
            }
        }
    }

    let metrics = OptimizationMetrics::compute(sessions, &assignments, rooms.len(), slots.len());

    debug!(
        sessions = sessions.len(),
        rooms = rooms.len(),
        slots = slots.len(),
        assigned = assignments.len(),
        conflicts = metrics.conflicts,
        "Allocation pass complete"
    );

    AllocationOutcome {
        assignments,
        metrics,
    }
}
