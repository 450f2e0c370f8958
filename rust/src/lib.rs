//! Rust core of the CPU scheduling simulator.
//!
//! This module provides the scheduling engines (FCFS, SJF, SRT, Round-Robin)
//! and their statistics; loading process tables and printing reports is left
//! to the Python driver.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

pub mod aggregate;
mod config;
pub mod logging;
mod models;
pub mod scheduler;
pub mod sorting;

pub use aggregate::{average_response_time, compute_averages, RunSummary};
pub use config::{SimulationConfig, DEFAULT_QUANTUM};
pub use models::{Process, ProcessRecord, ScheduleResult};
pub use scheduler::{
    fcfs, round_robin, run_all, simulate, sjf, srt, validate_batch, Algorithm, GanttSegment,
    SimulationError, Trace, TraceAction, TraceEvent,
};

fn to_py_err(err: SimulationError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Round-Robin with an optional quantum that takes precedence over the config's.
fn round_robin_with_quantum(
    processes: &[Process],
    quantum: Option<i64>,
    config: Option<SimulationConfig>,
) -> Result<ScheduleResult, SimulationError> {
    let mut config = config.unwrap_or_default();
    if let Some(quantum) = quantum {
        config.quantum = quantum;
    }
    round_robin(processes, &config)
}

fn simulate_by_name(
    algorithm: &str,
    processes: &[Process],
    config: Option<SimulationConfig>,
) -> Result<ScheduleResult, SimulationError> {
    let algorithm: Algorithm = algorithm.parse()?;
    simulate(algorithm, processes, &config.unwrap_or_default())
}

/// Run First-Come, First-Served.
///
/// # Raises
/// * ValueError if the batch is empty or contains an invalid process
#[pyfunction]
#[pyo3(name = "fcfs", signature = (processes, config=None))]
fn py_fcfs(
    processes: Vec<Process>,
    config: Option<SimulationConfig>,
) -> PyResult<ScheduleResult> {
    fcfs(&processes, &config.unwrap_or_default()).map_err(to_py_err)
}

/// Run non-preemptive Shortest Job First.
#[pyfunction]
#[pyo3(name = "sjf", signature = (processes, config=None))]
fn py_sjf(processes: Vec<Process>, config: Option<SimulationConfig>) -> PyResult<ScheduleResult> {
    sjf(&processes, &config.unwrap_or_default()).map_err(to_py_err)
}

/// Run preemptive Shortest Remaining Time.
#[pyfunction]
#[pyo3(name = "srt", signature = (processes, config=None))]
fn py_srt(processes: Vec<Process>, config: Option<SimulationConfig>) -> PyResult<ScheduleResult> {
    srt(&processes, &config.unwrap_or_default()).map_err(to_py_err)
}

/// Run Round-Robin.
///
/// # Arguments
/// * `processes` - Process descriptors
/// * `quantum` - Time slice (default 4); overrides `config.quantum` when given
/// * `config` - Simulation configuration (trace, verbosity)
///
/// # Raises
/// * ValueError if the batch is invalid or quantum <= 0
#[pyfunction]
#[pyo3(name = "round_robin", signature = (processes, quantum=None, config=None))]
fn py_round_robin(
    processes: Vec<Process>,
    quantum: Option<i64>,
    config: Option<SimulationConfig>,
) -> PyResult<ScheduleResult> {
    round_robin_with_quantum(&processes, quantum, config).map_err(to_py_err)
}

/// Run one algorithm by name: "fcfs", "sjf", "srt" or "rr".
#[pyfunction]
#[pyo3(name = "simulate", signature = (algorithm, processes, config=None))]
fn py_simulate(
    algorithm: &str,
    processes: Vec<Process>,
    config: Option<SimulationConfig>,
) -> PyResult<ScheduleResult> {
    simulate_by_name(algorithm, &processes, config).map_err(to_py_err)
}

/// Run every algorithm on independent copies of the batch.
///
/// # Returns
/// * Results in order FCFS, SJF, SRT, RR
#[pyfunction]
#[pyo3(name = "run_all", signature = (processes, config=None))]
fn py_run_all(
    processes: Vec<Process>,
    config: Option<SimulationConfig>,
) -> PyResult<Vec<ScheduleResult>> {
    run_all(&processes, &config.unwrap_or_default()).map_err(to_py_err)
}

/// Average waiting and turnaround time of completed records.
#[pyfunction]
#[pyo3(name = "compute_averages")]
fn py_compute_averages(records: Vec<ProcessRecord>) -> PyResult<(f64, f64)> {
    compute_averages(&records).map_err(to_py_err)
}

/// The cpusim.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Process>()?;
    m.add_class::<ProcessRecord>()?;
    m.add_class::<ScheduleResult>()?;
    m.add_class::<Trace>()?;
    m.add_class::<TraceEvent>()?;
    m.add_class::<GanttSegment>()?;
    m.add_class::<TraceAction>()?;

    // Config types
    m.add_class::<SimulationConfig>()?;
    m.add("DEFAULT_QUANTUM", DEFAULT_QUANTUM)?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_fcfs, m)?)?;
    m.add_function(wrap_pyfunction!(py_sjf, m)?)?;
    m.add_function(wrap_pyfunction!(py_srt, m)?)?;
    m.add_function(wrap_pyfunction!(py_round_robin, m)?)?;
    m.add_function(wrap_pyfunction!(py_simulate, m)?)?;
    m.add_function(wrap_pyfunction!(py_run_all, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_averages, m)?)?;

    Ok(())
}
