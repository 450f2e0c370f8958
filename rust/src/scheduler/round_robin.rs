//! Round-Robin with a fixed quantum.

use std::collections::{HashMap, VecDeque};

use crate::config::SimulationConfig;
use crate::models::{Process, ProcessRecord, ScheduleResult};
use crate::{log_changes, log_debug};

use super::core::{prepare_records, validate_quantum, Algorithm, Cpu, SimulationError};

/// Push every not-yet-admitted record that has arrived by `current_time`.
///
/// `records` is in arrival order, so admission is a moving cursor. Returns
/// the new cursor.
fn admit_arrivals(
    records: &[ProcessRecord],
    mut next: usize,
    current_time: i64,
    ready: &mut VecDeque<usize>,
) -> usize {
    while next < records.len() && records[next].arrival_time <= current_time {
        ready.push_back(next);
        next += 1;
    }
    next
}

/// Run Round-Robin over the batch with `config.quantum`.
///
/// Processes that arrive during (or exactly at the end of) a slice join the
/// queue ahead of the process whose slice just ended. When the queue is
/// empty the clock jumps straight to the next arrival. Results are returned
/// in arrival order.
pub fn round_robin(
    processes: &[Process],
    config: &SimulationConfig,
) -> Result<ScheduleResult, SimulationError> {
    validate_quantum(config.quantum)?;
    let mut records = prepare_records(processes)?;
    let mut cpu = Cpu::new(config);
    let mut ready: VecDeque<usize> = VecDeque::with_capacity(records.len());
    let mut next = 0;
    let mut completed = 0;

    while completed < records.len() {
        next = admit_arrivals(&records, next, cpu.clock(), &mut ready);

        let Some(position) = ready.pop_front() else {
            match records.get(next) {
                Some(record) => cpu.idle_until(record.arrival_time),
                None => break,
            }
            continue;
        };

        let slice = config.quantum.min(records[position].remaining_time);
        let done = cpu.run(position, &mut records[position], slice);

        next = admit_arrivals(&records, next, cpu.clock(), &mut ready);

        if done {
            completed += 1;
        } else {
            log_changes!(
                cpu.verbosity(),
                "  t={}: quantum expired for {} (remaining={})",
                cpu.clock(),
                records[position].id,
                records[position].remaining_time
            );
            ready.push_back(position);
        }
        log_debug!(
            cpu.verbosity(),
            "  t={}: queue={:?}",
            cpu.clock(),
            ready.iter().map(|&i| records[i].id.as_str()).collect::<Vec<_>>()
        );
    }

    let mut metadata = HashMap::new();
    metadata.insert("quantum".to_string(), config.quantum.to_string());
    cpu.finish(Algorithm::RoundRobin, records, metadata)
}
