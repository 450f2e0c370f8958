//! Shortest Job First (non-preemptive).

use std::collections::HashMap;

use crate::config::SimulationConfig;
use crate::log_checks;
use crate::models::{Process, ScheduleResult};
use crate::sorting::{next_arrival, ready_positions, select_shortest};

use super::core::{prepare_records, Algorithm, Cpu, SimulationError};

/// Run non-preemptive SJF over the batch.
///
/// Among arrived jobs the one with the smallest burst runs to completion;
/// ties go to the earliest arrival (then input order). When nothing has
/// arrived the clock jumps to the next arrival. Results are returned in
/// completion order.
pub fn sjf(
    processes: &[Process],
    config: &SimulationConfig,
) -> Result<ScheduleResult, SimulationError> {
    let mut records = prepare_records(processes)?;
    let mut cpu = Cpu::new(config);
    let mut completion_order: Vec<usize> = Vec::with_capacity(records.len());

    while completion_order.len() < records.len() {
        let ready = ready_positions(&records, cpu.clock());
        let Some(position) = select_shortest(&ready, |i| records[i].burst_time) else {
            match next_arrival(&records) {
                Some(arrival) => cpu.idle_until(arrival),
                None => break,
            }
            continue;
        };

        log_checks!(
            cpu.verbosity(),
            "  t={}: ready={:?}, picked {} (burst={})",
            cpu.clock(),
            ready.iter().map(|&i| records[i].id.as_str()).collect::<Vec<_>>(),
            records[position].id,
            records[position].burst_time
        );

        let burst = records[position].burst_time;
        cpu.run(position, &mut records[position], burst);
        completion_order.push(position);
    }

    let ordered = completion_order
        .into_iter()
        .map(|i| records[i].clone())
        .collect();
    cpu.finish(Algorithm::Sjf, ordered, HashMap::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::core::tests::{approx_eq, make_batch, reference_batch};

    fn ids(result: &ScheduleResult) -> Vec<&str> {
        result.processes.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_textbook_batch() {
        let batch = make_batch(&[("A", 0, 7), ("B", 2, 4), ("C", 4, 1), ("D", 5, 4)]);
        let result = sjf(&batch, &SimulationConfig::default()).unwrap();

        assert_eq!(ids(&result), vec!["A", "C", "B", "D"]);
        assert_eq!(result.record("A").unwrap().waiting_time, 0);
        assert_eq!(result.record("C").unwrap().waiting_time, 3);
        assert_eq!(result.record("B").unwrap().waiting_time, 6);
        assert_eq!(result.record("D").unwrap().waiting_time, 7);
        assert!(approx_eq(result.avg_waiting_time, 4.0));
        assert!(approx_eq(result.avg_turnaround_time, 8.0));
    }

    #[test]
    fn test_equal_burst_tie_goes_to_earlier_arrival() {
        let batch = make_batch(&[("A", 0, 3), ("C", 2, 2), ("B", 1, 2)]);
        let result = sjf(&batch, &SimulationConfig::default()).unwrap();
        assert_eq!(ids(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_equal_burst_and_arrival_keeps_input_order() {
        let batch = make_batch(&[("Y", 0, 2), ("X", 0, 2)]);
        let result = sjf(&batch, &SimulationConfig::default()).unwrap();
        assert_eq!(ids(&result), vec!["Y", "X"]);
    }

    #[test]
    fn test_not_preemptive() {
        // B arrives shorter while A is running, but A still finishes first
        let batch = make_batch(&[("A", 0, 8), ("B", 1, 1)]);
        let result = sjf(&batch, &SimulationConfig::default()).unwrap();
        assert_eq!(result.record("A").unwrap().finish_time, 8);
        assert_eq!(result.record("B").unwrap().waiting_time, 7);
    }

    #[test]
    fn test_idle_jump_matches_unit_stepping() {
        let batch = make_batch(&[("A", 3, 2), ("B", 9, 1)]);
        let result = sjf(&batch, &SimulationConfig::default()).unwrap();
        assert_eq!(result.record("A").unwrap().finish_time, 5);
        assert_eq!(result.record("B").unwrap().finish_time, 10);
        assert!(approx_eq(result.avg_waiting_time, 0.0));
    }

    #[test]
    fn test_reference_batch() {
        let result = sjf(&reference_batch(), &SimulationConfig::default()).unwrap();
        assert_eq!(
            ids(&result),
            vec!["A", "B", "D", "I", "C", "F", "J", "G", "E", "H"]
        );
        assert!(approx_eq(result.avg_waiting_time, 21.9));
        assert!(approx_eq(result.avg_turnaround_time, 29.3));
    }
}
