//! First-Come, First-Served: jobs run to completion in arrival order.

use std::collections::HashMap;

use crate::config::SimulationConfig;
use crate::models::{Process, ScheduleResult};

use super::core::{prepare_records, Algorithm, Cpu, SimulationError};

/// Run FCFS over the batch.
///
/// Results are returned in arrival order (equal arrivals keep input order).
pub fn fcfs(
    processes: &[Process],
    config: &SimulationConfig,
) -> Result<ScheduleResult, SimulationError> {
    let mut records = prepare_records(processes)?;
    let mut cpu = Cpu::new(config);

    for (position, record) in records.iter_mut().enumerate() {
        cpu.idle_until(record.arrival_time);
        let burst = record.burst_time;
        cpu.run(position, record, burst);
    }

    cpu.finish(Algorithm::Fcfs, records, HashMap::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::core::tests::{approx_eq, make_batch, reference_batch};

    #[test]
    fn test_two_jobs() {
        let batch = make_batch(&[("A", 0, 16), ("B", 2, 2)]);
        let result = fcfs(&batch, &SimulationConfig::default()).unwrap();

        let a = result.record("A").unwrap();
        let b = result.record("B").unwrap();
        assert_eq!((a.waiting_time, a.turnaround_time), (0, 16));
        assert_eq!((b.waiting_time, b.turnaround_time), (14, 16));
        assert!(approx_eq(result.avg_waiting_time, 7.0));
        assert!(approx_eq(result.avg_turnaround_time, 16.0));
    }

    #[test]
    fn test_deterministic() {
        let batch = make_batch(&[("A", 0, 16), ("B", 2, 2)]);
        let first = fcfs(&batch, &SimulationConfig::default()).unwrap();
        let second = fcfs(&batch, &SimulationConfig::default()).unwrap();
        assert_eq!(first.processes, second.processes);
    }

    #[test]
    fn test_output_in_arrival_order() {
        let batch = make_batch(&[("late", 5, 1), ("early", 0, 2), ("tie", 5, 3)]);
        let result = fcfs(&batch, &SimulationConfig::default()).unwrap();
        let ids: Vec<&str> = result.processes.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "tie"]);
    }

    #[test]
    fn test_idle_gap_advances_clock() {
        let batch = make_batch(&[("A", 0, 2), ("B", 10, 3)]);
        let result = fcfs(&batch, &SimulationConfig::default()).unwrap();
        let b = result.record("B").unwrap();
        assert_eq!(b.waiting_time, 0);
        assert_eq!(b.finish_time, 13);
        assert_eq!(result.algorithm_metadata.get("idle_time"), Some(&"8".to_string()));
    }

    #[test]
    fn test_reference_batch() {
        let result = fcfs(&reference_batch(), &SimulationConfig::default()).unwrap();
        let waits: Vec<i64> = result.processes.iter().map(|p| p.waiting_time).collect();
        assert_eq!(waits, vec![0, 14, 14, 18, 20, 28, 32, 38, 48, 49]);
        assert!(approx_eq(result.avg_waiting_time, 26.1));
        assert!(approx_eq(result.avg_turnaround_time, 33.5));
    }

    #[test]
    fn test_response_equals_waiting() {
        let result = fcfs(&reference_batch(), &SimulationConfig::default()).unwrap();
        for record in &result.processes {
            assert_eq!(record.response_time, Some(record.waiting_time));
        }
    }
}
