//! Configuration types for the simulator.

use pyo3::prelude::*;

/// Default Round-Robin time slice.
pub const DEFAULT_QUANTUM: i64 = 4;

/// Configuration shared by every scheduling engine.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Round-Robin time slice in time units (must be > 0)
    #[pyo3(get, set)]
    pub quantum: i64,
    /// Record the execution trace and Gantt segments
    #[pyo3(get, set)]
    pub trace: bool,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            trace: false,
            verbosity: 0,
        }
    }
}

impl SimulationConfig {
    /// Default configuration with a different Round-Robin quantum.
    pub fn with_quantum(quantum: i64) -> Self {
        Self {
            quantum,
            ..Self::default()
        }
    }
}

#[pymethods]
impl SimulationConfig {
    #[new]
    #[pyo3(signature = (quantum=None, trace=None, verbosity=None))]
    fn new(quantum: Option<i64>, trace: Option<bool>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            quantum: quantum.unwrap_or(defaults.quantum),
            trace: trace.unwrap_or(defaults.trace),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationConfig(quantum={}, trace={}, verbosity={})",
            self.quantum, self.trace, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.quantum, 4);
        assert!(!config.trace);
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn test_with_quantum_keeps_other_defaults() {
        let config = SimulationConfig::with_quantum(2);
        assert_eq!(config.quantum, 2);
        assert!(!config.trace);
    }
}
