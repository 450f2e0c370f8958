//! Shared simulation machinery: errors, validation, the CPU clock and dispatch.

use rustc_hash::FxHashSet;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::aggregate::{average_response_time, compute_averages, RunSummary};
use crate::config::SimulationConfig;
use crate::models::{Process, ProcessRecord, ScheduleResult};
use crate::sorting::sort_by_arrival;
use crate::{log_changes, log_debug};

use super::trace::Tracer;
use super::{fcfs, round_robin, sjf, srt};

/// Errors that can occur during a simulation run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Empty batch: at least one process is required")]
    EmptyBatch,
    #[error("Invalid arrival time for process {id}: {arrival_time} (must be >= 0)")]
    InvalidArrival { id: String, arrival_time: i64 },
    #[error("Invalid burst time for process {id}: {burst_time} (must be > 0)")]
    InvalidBurst { id: String, burst_time: i64 },
    #[error("Duplicate process id: {0}")]
    DuplicateId(String),
    #[error("Invalid quantum: {0} (must be > 0)")]
    InvalidQuantum(i64),
    #[error("Unknown scheduling algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Time overflow: latest arrival plus total burst time exceeds {}", i64::MAX)]
    TimeOverflow,
}

/// The scheduling algorithms the simulator knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Srt,
    RoundRobin,
}

impl Algorithm {
    /// All algorithms, in the order `run_all` executes them.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srt,
        Algorithm::RoundRobin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Srt => "srt",
            Self::RoundRobin => "rr",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "srt" | "srtf" => Ok(Self::Srt),
            "rr" | "round_robin" => Ok(Self::RoundRobin),
            _ => Err(SimulationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Reject batches the engines cannot simulate.
///
/// Runs before any simulation step so that failures never happen mid-run.
/// No schedule can finish later than the latest arrival plus the total burst
/// time, so bounding that sum keeps every clock value inside `i64`.
pub fn validate_batch(processes: &[Process]) -> Result<(), SimulationError> {
    if processes.is_empty() {
        return Err(SimulationError::EmptyBatch);
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut latest_arrival: i64 = 0;
    let mut total_burst: i64 = 0;
    for process in processes {
        if process.arrival_time < 0 {
            return Err(SimulationError::InvalidArrival {
                id: process.id.clone(),
                arrival_time: process.arrival_time,
            });
        }
        if process.burst_time <= 0 {
            return Err(SimulationError::InvalidBurst {
                id: process.id.clone(),
                burst_time: process.burst_time,
            });
        }
        if !seen.insert(process.id.as_str()) {
            return Err(SimulationError::DuplicateId(process.id.clone()));
        }
        latest_arrival = latest_arrival.max(process.arrival_time);
        total_burst = total_burst
            .checked_add(process.burst_time)
            .ok_or(SimulationError::TimeOverflow)?;
    }

    latest_arrival
        .checked_add(total_burst)
        .ok_or(SimulationError::TimeOverflow)?;
    Ok(())
}

pub fn validate_quantum(quantum: i64) -> Result<(), SimulationError> {
    if quantum <= 0 {
        return Err(SimulationError::InvalidQuantum(quantum));
    }
    Ok(())
}

/// Validate the batch and build fresh records in stable arrival order.
pub(crate) fn prepare_records(
    processes: &[Process],
) -> Result<Vec<ProcessRecord>, SimulationError> {
    validate_batch(processes)?;
    let mut records: Vec<ProcessRecord> = processes.iter().map(ProcessRecord::from).collect();
    sort_by_arrival(&mut records);
    Ok(records)
}

/// The simulated CPU: clock, dispatch bookkeeping and the optional trace.
pub(crate) struct Cpu {
    clock: i64,
    last_dispatched: Option<usize>,
    context_switches: usize,
    tracer: Tracer,
    verbosity: u8,
}

impl Cpu {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            clock: 0,
            last_dispatched: None,
            context_switches: 0,
            tracer: Tracer::new(config.trace),
            verbosity: config.verbosity,
        }
    }

    #[inline]
    pub fn clock(&self) -> i64 {
        self.clock
    }

    #[inline]
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Leave the CPU idle until `time`. No-op if the clock is already there.
    pub fn idle_until(&mut self, time: i64) {
        if time <= self.clock {
            return;
        }
        log_debug!(self.verbosity, "  t={}: CPU idle until {}", self.clock, time);
        self.tracer.idle(self.clock, time);
        self.clock = time;
        self.last_dispatched = None;
    }

    /// Run `record` (at `position` in the batch) for up to `units` time units.
    ///
    /// Returns `true` if the process completed during this slice.
    pub fn run(&mut self, position: usize, record: &mut ProcessRecord, units: i64) -> bool {
        let start = self.clock;
        let units = units.min(record.remaining_time);

        if self.last_dispatched.is_some_and(|last| last != position) {
            self.context_switches += 1;
        }
        if self.last_dispatched != Some(position) {
            log_changes!(
                self.verbosity,
                "  t={}: dispatch {} (remaining={})",
                start,
                record.id,
                record.remaining_time
            );
        }
        self.last_dispatched = Some(position);

        record.mark_dispatched(start);
        let remaining = record.execute(units);
        self.clock += units;
        self.tracer.run(start, &record.id, units, remaining);

        if remaining == 0 {
            record.complete(self.clock);
            log_changes!(
                self.verbosity,
                "  t={}: completed {} (waiting={}, turnaround={})",
                self.clock,
                record.id,
                record.waiting_time,
                record.turnaround_time
            );
            return true;
        }
        false
    }

    /// Package completed records into a result with averages and run metadata.
    pub fn finish(
        self,
        algorithm: Algorithm,
        processes: Vec<ProcessRecord>,
        mut metadata: HashMap<String, String>,
    ) -> Result<ScheduleResult, SimulationError> {
        let (avg_waiting_time, avg_turnaround_time) = compute_averages(&processes)?;
        let avg_response_time = average_response_time(&processes)?;
        let summary = RunSummary::from_records(&processes)?;

        metadata.insert("algorithm".to_string(), algorithm.name().to_string());
        metadata.insert(
            "context_switches".to_string(),
            self.context_switches.to_string(),
        );
        summary.write_metadata(&mut metadata);

        log_changes!(
            self.verbosity,
            "{}: avg_waiting={:.2}, avg_turnaround={:.2}",
            algorithm,
            avg_waiting_time,
            avg_turnaround_time
        );

        Ok(ScheduleResult {
            algorithm: algorithm.name().to_string(),
            processes,
            avg_waiting_time,
            avg_turnaround_time,
            avg_response_time,
            trace: self.tracer.finish(),
            algorithm_metadata: metadata,
        })
    }
}

/// Run one algorithm over the batch.
pub fn simulate(
    algorithm: Algorithm,
    processes: &[Process],
    config: &SimulationConfig,
) -> Result<ScheduleResult, SimulationError> {
    match algorithm {
        Algorithm::Fcfs => fcfs::fcfs(processes, config),
        Algorithm::Sjf => sjf::sjf(processes, config),
        Algorithm::Srt => srt::srt(processes, config),
        Algorithm::RoundRobin => round_robin::round_robin(processes, config),
    }
}

/// Run every algorithm over the batch, each on its own fresh set of records.
///
/// Input is validated once up front so that no algorithm runs on a bad batch.
pub fn run_all(
    processes: &[Process],
    config: &SimulationConfig,
) -> Result<Vec<ScheduleResult>, SimulationError> {
    validate_batch(processes)?;
    validate_quantum(config.quantum)?;
    Algorithm::ALL
        .iter()
        .map(|&algorithm| simulate(algorithm, processes, config))
        .collect()
}
