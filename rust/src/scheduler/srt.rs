//! Shortest Remaining Time (preemptive SJF).
//!
//! The scheduling decision is re-evaluated every time unit: a newly arrived
//! process with less remaining work preempts the running one at the next
//! unit boundary.

use std::collections::HashMap;

use crate::config::SimulationConfig;
use crate::models::{Process, ScheduleResult};
use crate::sorting::{next_arrival, ready_positions, select_shortest};
use crate::{log_checks, log_debug};

use super::core::{prepare_records, Algorithm, Cpu, SimulationError};

/// Run SRT over the batch.
///
/// Ties on remaining time go to the earliest arrival (then input order), so
/// the running process keeps the CPU against an equal challenger that
/// arrived later. Results are returned in completion order.
pub fn srt(
    processes: &[Process],
    config: &SimulationConfig,
) -> Result<ScheduleResult, SimulationError> {
    let mut records = prepare_records(processes)?;
    let mut cpu = Cpu::new(config);
    let mut completion_order: Vec<usize> = Vec::with_capacity(records.len());
    let mut previous: Option<usize> = None;

    while completion_order.len() < records.len() {
        let ready = ready_positions(&records, cpu.clock());
        let Some(position) = select_shortest(&ready, |i| records[i].remaining_time) else {
            match next_arrival(&records) {
                Some(arrival) => cpu.idle_until(arrival),
                None => break,
            }
            previous = None;
            continue;
        };

        if let Some(preempted) = previous.filter(|&p| p != position && !records[p].completed) {
            log_checks!(
                cpu.verbosity(),
                "  t={}: {} (remaining={}) preempts {} (remaining={})",
                cpu.clock(),
                records[position].id,
                records[position].remaining_time,
                records[preempted].id,
                records[preempted].remaining_time
            );
        }
        log_debug!(
            cpu.verbosity(),
            "  t={}: ready={:?}, running {}",
            cpu.clock(),
            ready.iter().map(|&i| records[i].id.as_str()).collect::<Vec<_>>(),
            records[position].id
        );

        if cpu.run(position, &mut records[position], 1) {
            completion_order.push(position);
        }
        previous = Some(position);
    }

    let ordered = completion_order
        .into_iter()
        .map(|i| records[i].clone())
        .collect();
    cpu.finish(Algorithm::Srt, ordered, HashMap::new())
}
