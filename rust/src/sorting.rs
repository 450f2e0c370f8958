//! Ordering helpers shared by the scheduling engines.
//!
//! Two orderings matter for the simulation:
//! - arrival order: stable by `arrival_time`, equal arrivals keep input order
//! - shortest-job order: smallest key (burst or remaining time), ties go to the
//!   earliest position in arrival order

use std::cmp::Ordering;

use crate::models::ProcessRecord;

/// Sort key used to pick the next process for SJF and SRT.
///
/// Implements `Ord` so candidates can be compared directly (lower = runs first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortestKey {
    /// Burst time (SJF) or remaining time (SRT).
    pub time: i64,
    /// Position in the arrival-ordered batch; breaks ties.
    pub position: usize,
}

impl Ord for ShortestKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then(self.position.cmp(&other.position))
    }
}

impl PartialOrd for ShortestKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort records by arrival time, preserving input order among equal arrivals.
pub fn sort_by_arrival(records: &mut [ProcessRecord]) {
    // slice::sort_by_key is stable
    records.sort_by_key(|r| r.arrival_time);
}

/// Positions of records that have arrived by `current_time` and are not completed.
pub fn ready_positions(records: &[ProcessRecord], current_time: i64) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.completed && r.arrival_time <= current_time)
        .map(|(i, _)| i)
        .collect()
}

/// Earliest arrival among records that have not completed yet.
pub fn next_arrival(records: &[ProcessRecord]) -> Option<i64> {
    records
        .iter()
        .filter(|r| !r.completed)
        .map(|r| r.arrival_time)
        .min()
}

/// Pick the candidate with the smallest key.
///
/// Returns `None` when there are no candidates.
pub fn select_shortest<F>(candidates: &[usize], time_of: F) -> Option<usize>
where
    F: Fn(usize) -> i64,
{
    candidates
        .iter()
        .map(|&position| ShortestKey {
            time: time_of(position),
            position,
        })
        .min()
        .map(|key| key.position)
}
