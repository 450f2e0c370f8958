//! Batch statistics over completed process records.

use std::collections::HashMap;

use crate::models::ProcessRecord;
use crate::scheduler::SimulationError;

fn mean<F>(records: &[ProcessRecord], value: F) -> Result<f64, SimulationError>
where
    F: Fn(&ProcessRecord) -> i64,
{
    if records.is_empty() {
        return Err(SimulationError::EmptyBatch);
    }
    // Widened so that many long-running records cannot overflow the sum
    let total: i128 = records.iter().map(|r| i128::from(value(r))).sum();
    Ok(total as f64 / records.len() as f64)
}

/// Average waiting time and average turnaround time over a completed batch.
///
/// # Returns
/// * `Ok((avg_waiting, avg_turnaround))`
/// * `Err(SimulationError::EmptyBatch)` for an empty batch
pub fn compute_averages(records: &[ProcessRecord]) -> Result<(f64, f64), SimulationError> {
    Ok((
        mean(records, |r| r.waiting_time)?,
        mean(records, |r| r.turnaround_time)?,
    ))
}

/// Average response time; processes that never ran count as zero.
pub fn average_response_time(records: &[ProcessRecord]) -> Result<f64, SimulationError> {
    mean(records, |r| r.response_time.unwrap_or(0))
}

/// CPU-level statistics for one run, measured from time 0.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Time at which the last process finished.
    pub makespan: i64,
    /// Total time the CPU spent executing processes.
    pub busy_time: i64,
    pub idle_time: i64,
    /// busy_time / makespan
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
}

impl RunSummary {
    pub fn from_records(records: &[ProcessRecord]) -> Result<Self, SimulationError> {
        let makespan = records
            .iter()
            .map(|r| r.finish_time)
            .max()
            .ok_or(SimulationError::EmptyBatch)?;
        let busy_time: i64 = records.iter().map(|r| r.burst_time).sum();
        let (cpu_utilization, throughput) = if makespan > 0 {
            (
                busy_time as f64 / makespan as f64,
                records.len() as f64 / makespan as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Ok(Self {
            makespan,
            busy_time,
            idle_time: makespan - busy_time,
            cpu_utilization,
            throughput,
        })
    }

    pub fn write_metadata(&self, metadata: &mut HashMap<String, String>) {
        metadata.insert("makespan".to_string(), self.makespan.to_string());
        metadata.insert("busy_time".to_string(), self.busy_time.to_string());
        metadata.insert("idle_time".to_string(), self.idle_time.to_string());
        metadata.insert(
            "cpu_utilization".to_string(),
            format!("{:.4}", self.cpu_utilization),
        );
        metadata.insert("throughput".to_string(), format!("{:.4}", self.throughput));
    }
}
