//! Core data types for the simulator.

use pyo3::prelude::*;
use std::collections::HashMap;

use crate::scheduler::Trace;

// Note: We use std HashMap here for PyO3 interface compatibility

/// A process descriptor as supplied by the loader.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub arrival_time: i64,
    #[pyo3(get, set)]
    pub burst_time: i64,
}

impl Process {
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
        }
    }
}

#[pymethods]
impl Process {
    #[new]
    fn py_new(id: String, arrival_time: i64, burst_time: i64) -> Self {
        Self::new(id, arrival_time, burst_time)
    }

    fn __repr__(&self) -> String {
        format!(
            "Process(id={:?}, arrival_time={}, burst_time={})",
            self.id, self.arrival_time, self.burst_time
        )
    }
}

/// Per-run state and results for one process.
///
/// Every engine invocation builds its own records from the input descriptors,
/// so no state leaks between runs.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRecord {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub arrival_time: i64,
    #[pyo3(get)]
    pub burst_time: i64,
    #[pyo3(get)]
    pub remaining_time: i64,
    #[pyo3(get)]
    pub waiting_time: i64,
    #[pyo3(get)]
    pub turnaround_time: i64,
    #[pyo3(get)]
    pub finish_time: i64,
    /// Time from arrival to first dispatch; `None` until the process has run.
    #[pyo3(get)]
    pub response_time: Option<i64>,
    #[pyo3(get)]
    pub completed: bool,
}

impl From<&Process> for ProcessRecord {
    fn from(process: &Process) -> Self {
        Self {
            id: process.id.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            remaining_time: process.burst_time,
            waiting_time: 0,
            turnaround_time: 0,
            finish_time: 0,
            response_time: None,
            completed: false,
        }
    }
}

impl ProcessRecord {
    /// Record the first dispatch. Later dispatches leave the response time untouched.
    pub fn mark_dispatched(&mut self, current_time: i64) {
        if self.response_time.is_none() {
            self.response_time = Some(current_time - self.arrival_time);
        }
    }

    /// Run the process for `units` time units and return the remaining time.
    ///
    /// Never runs past completion.
    pub fn execute(&mut self, units: i64) -> i64 {
        let units = units.min(self.remaining_time);
        self.remaining_time -= units;
        self.remaining_time
    }

    /// Finalize timing fields once the process has finished at `finish_time`.
    pub fn complete(&mut self, finish_time: i64) {
        debug_assert!(!self.completed, "process {} completed twice", self.id);
        debug_assert!(finish_time - self.burst_time >= self.arrival_time);
        self.remaining_time = 0;
        self.completed = true;
        self.finish_time = finish_time;
        self.turnaround_time = finish_time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }
}

#[pymethods]
impl ProcessRecord {
    fn __repr__(&self) -> String {
        format!(
            "ProcessRecord(id={:?}, arrival={}, burst={}, finish={}, waiting={}, turnaround={})",
            self.id,
            self.arrival_time,
            self.burst_time,
            self.finish_time,
            self.waiting_time,
            self.turnaround_time
        )
    }
}

/// Result from one scheduling algorithm run.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    #[pyo3(get)]
    pub algorithm: String,
    #[pyo3(get)]
    pub processes: Vec<ProcessRecord>,
    #[pyo3(get)]
    pub avg_waiting_time: f64,
    #[pyo3(get)]
    pub avg_turnaround_time: f64,
    #[pyo3(get)]
    pub avg_response_time: f64,
    #[pyo3(get)]
    pub trace: Option<Trace>,
    #[pyo3(get)]
    pub algorithm_metadata: HashMap<String, String>,
}

impl ScheduleResult {
    /// Look up a process record by id.
    pub fn record(&self, id: &str) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.id == id)
    }
}

#[pymethods]
impl ScheduleResult {
    #[pyo3(name = "record")]
    fn py_record(&self, id: &str) -> Option<ProcessRecord> {
        self.record(id).cloned()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(algorithm={:?}, processes={}, avg_waiting={:.2}, avg_turnaround={:.2})",
            self.algorithm,
            self.processes.len(),
            self.avg_waiting_time,
            self.avg_turnaround_time
        )
    }
}
