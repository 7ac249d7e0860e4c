//! Quality metrics derived from an allocation run.

use std::collections::HashSet;

use barcamp_id::SessionId;
use serde::{Deserialize, Serialize};

use crate::domain::{ScheduleProposal, Session};

/// Aggregate quality indicators for a produced assignment.
///
/// Both ratios are always well-defined values in `[0, 1]`, never NaN: a
/// zero denominator yields `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    /// Votes for scheduled sessions over total votes cast.
    pub vote_satisfaction: f64,
    /// Sessions the allocator could not place.
    pub conflicts: usize,
    /// Occupied room-slot cells over total available cells.
    pub room_utilization: f64,
}

impl OptimizationMetrics {
    /// Derives metrics from the full input session list (before any
    /// filtering) and the produced assignment.
    pub fn compute(
        sessions: &[Session],
        assignments: &[ScheduleProposal],
        room_count: usize,
        slot_count: usize,
    ) -> Self {
        let total_votes: u64 = sessions.iter().map(|s| u64::from(s.vote_count)).sum();

        let scheduled: HashSet<SessionId> =
            assignments.iter().map(|a| a.session_id).collect();
        let scheduled_votes: u64 = sessions
            .iter()
            .filter(|s| scheduled.contains(&s.id))
            .map(|s| u64::from(s.vote_count))
            .sum();

        let vote_satisfaction = if total_votes > 0 {
            scheduled_votes as f64 / total_votes as f64
        } else {
            0.0
        };

        let cells = room_count * slot_count;
        let room_utilization = if cells > 0 {
            assignments.len() as f64 / cells as f64
        } else {
            0.0
        };

        Self {
            vote_satisfaction,
            conflicts: sessions.len() - assignments.len(),
            room_utilization,
        }
    }
}
