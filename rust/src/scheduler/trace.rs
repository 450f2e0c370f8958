//! Execution trace and Gantt timeline rendering.
//!
//! The trace is a pure observer: engines feed it the same dispatch decisions
//! they act on, and it never influences them.

use pyo3::prelude::*;

/// Label used for idle CPU time in the Gantt chart.
pub const IDLE_LABEL: &str = "IDLE";
/// Symbol used for idle CPU time in the per-unit timeline.
pub const IDLE_SYMBOL: &str = "-";

/// What happened on the CPU during a traced slice.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceAction {
    Running,
    ContextSwitch,
    Idle,
    Completed,
}

impl TraceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::ContextSwitch => "Context Switch",
            Self::Idle => "Idle",
            Self::Completed => "Completed",
        }
    }
}

/// One traced slice of CPU time.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Time at which the slice started
    #[pyo3(get)]
    pub time: i64,
    /// Process owning the CPU, `None` when idle
    #[pyo3(get)]
    pub process_id: Option<String>,
    /// Remaining time of the process after the slice
    #[pyo3(get)]
    pub remaining_time: Option<i64>,
    #[pyo3(get)]
    pub action: TraceAction,
}

#[pymethods]
impl TraceEvent {
    fn __repr__(&self) -> String {
        format!(
            "TraceEvent(time={}, process={:?}, remaining={:?}, action={})",
            self.time,
            self.process_id,
            self.remaining_time,
            self.action.as_str()
        )
    }
}

/// A contiguous run of time owned by one process (or idle).
#[pyclass(get_all)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GanttSegment {
    /// Process owning the CPU, `None` when idle
    pub process_id: Option<String>,
    pub start: i64,
    pub end: i64,
}

impl GanttSegment {
    pub fn label(&self) -> &str {
        self.process_id.as_deref().unwrap_or(IDLE_LABEL)
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Recorded execution of one simulation run.
///
/// CPU ownership is stored as run-length segments, so memory grows with the
/// number of dispatches and idle gaps rather than with elapsed time. Only
/// `timeline` and `render_timeline` expand to one entry per time unit.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    #[pyo3(get)]
    pub events: Vec<TraceEvent>,
    /// Consecutive owners of the CPU, starting at time 0.
    #[pyo3(get)]
    pub segments: Vec<GanttSegment>,
}

impl Trace {
    fn push_segment(&mut self, process_id: Option<&str>, start: i64, end: i64) {
        if end <= start {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.end == start && last.process_id.as_deref() == process_id => {
                last.end = end;
            }
            _ => self.segments.push(GanttSegment {
                process_id: process_id.map(str::to_string),
                start,
                end,
            }),
        }
    }

    /// Total traced time units.
    pub fn units(&self) -> i64 {
        self.segments.iter().map(GanttSegment::len).sum()
    }

    /// Time units during which some process owned the CPU.
    pub fn busy_units(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.process_id.is_some())
            .map(GanttSegment::len)
            .sum()
    }

    /// Owner of the CPU for each time unit. Allocates one entry per unit.
    pub fn timeline(&self) -> Vec<Option<String>> {
        self.segments
            .iter()
            .flat_map(|s| (s.start..s.end).map(move |_| s.process_id.clone()))
            .collect()
    }

    /// One symbol per time unit: `|A|A|B|-|`.
    pub fn render_timeline(&self) -> String {
        let mut out = String::from("|");
        for segment in &self.segments {
            let symbol = segment.process_id.as_deref().unwrap_or(IDLE_SYMBOL);
            for _ in segment.start..segment.end {
                out.push_str(symbol);
                out.push('|');
            }
        }
        out
    }

    /// Merged-segment chart with a time axis underneath:
    ///
    /// ```text
    /// | A | B | A |
    /// 0   1   5   12
    /// ```
    pub fn render_gantt(&self) -> String {
        let Some(first) = self.segments.first() else {
            return String::new();
        };

        let mut bar = String::from("|");
        let mut axis = first.start.to_string();
        for segment in &self.segments {
            bar.push_str(&format!(" {} |", segment.label()));
            // Align each end time under the segment's closing bar
            let target = bar.len() - 1;
            if axis.len() < target {
                axis.push_str(&" ".repeat(target - axis.len()));
            } else {
                axis.push(' ');
            }
            axis.push_str(&segment.end.to_string());
        }
        format!("{}\n{}", bar, axis)
    }
}

#[pymethods]
impl Trace {
    #[pyo3(name = "timeline")]
    fn py_timeline(&self) -> Vec<Option<String>> {
        self.timeline()
    }

    #[pyo3(name = "render_timeline")]
    fn py_render_timeline(&self) -> String {
        self.render_timeline()
    }

    #[pyo3(name = "render_gantt")]
    fn py_render_gantt(&self) -> String {
        self.render_gantt()
    }

    fn __repr__(&self) -> String {
        format!(
            "Trace(events={}, segments={}, units={})",
            self.events.len(),
            self.segments.len(),
            self.units()
        )
    }
}

/// Optional trace recorder handed to the engines.
///
/// Does nothing when tracing is disabled.
#[derive(Debug, Default)]
pub(crate) struct Tracer {
    trace: Option<Trace>,
    last_process: Option<String>,
}

impl Tracer {
    pub fn new(enabled: bool) -> Self {
        Self {
            trace: enabled.then(Trace::default),
            last_process: None,
        }
    }

    /// Record `units` of execution of `process_id` starting at `start`.
    pub fn run(&mut self, start: i64, process_id: &str, units: i64, remaining: i64) {
        let Some(trace) = self.trace.as_mut() else {
            return;
        };

        let action = if remaining == 0 {
            TraceAction::Completed
        } else {
            match &self.last_process {
                Some(last) if last != process_id => TraceAction::ContextSwitch,
                _ => TraceAction::Running,
            }
        };

        trace.events.push(TraceEvent {
            time: start,
            process_id: Some(process_id.to_string()),
            remaining_time: Some(remaining),
            action,
        });
        trace.push_segment(Some(process_id), start, start + units);
        self.last_process = Some(process_id.to_string());
    }

    /// Record idle CPU time over `[from, to)` as a single event.
    pub fn idle(&mut self, from: i64, to: i64) {
        let Some(trace) = self.trace.as_mut() else {
            return;
        };
        if to <= from {
            return;
        }

        trace.events.push(TraceEvent {
            time: from,
            process_id: None,
            remaining_time: None,
            action: TraceAction::Idle,
        });
        trace.push_segment(None, from, to);
        self.last_process = None;
    }

    pub fn finish(self) -> Option<Trace> {
        self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_tracer_records_nothing() {
        let mut tracer = Tracer::new(false);
        tracer.run(0, "A", 3, 0);
        tracer.idle(3, 5);
        assert!(tracer.finish().is_none());
    }

    #[test]
    fn test_actions() {
        let mut tracer = Tracer::new(true);
        tracer.run(0, "A", 1, 2);
        tracer.run(1, "A", 1, 1);
        tracer.run(2, "B", 1, 0);
        tracer.idle(3, 4);
        tracer.run(4, "A", 1, 0);
        let trace = tracer.finish().unwrap();

        let actions: Vec<TraceAction> = trace.events.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                TraceAction::Running,
                TraceAction::Running,
                TraceAction::Completed,
                TraceAction::Idle,
                TraceAction::Completed,
            ]
        );
        assert_eq!(trace.events[3].process_id, None);
    }

    #[test]
    fn test_context_switch_after_other_process() {
        let mut tracer = Tracer::new(true);
        tracer.run(0, "A", 1, 7);
        tracer.run(1, "B", 1, 3);
        let trace = tracer.finish().unwrap();
        assert_eq!(trace.events[1].action, TraceAction::ContextSwitch);
    }

    #[test]
    fn test_render_timeline() {
        let mut tracer = Tracer::new(true);
        tracer.idle(0, 2);
        tracer.run(2, "A", 3, 0);
        let trace = tracer.finish().unwrap();
        assert_eq!(trace.render_timeline(), "|-|-|A|A|A|");
    }

    #[test]
    fn test_render_gantt() {
        let mut tracer = Tracer::new(true);
        tracer.run(0, "A", 1, 7);
        tracer.run(1, "B", 4, 0);
        tracer.run(5, "A", 7, 0);
        let trace = tracer.finish().unwrap();
        assert_eq!(trace.render_gantt(), "| A | B | A |\n0   1   5   12");
    }

    #[test]
    fn test_render_gantt_with_idle_and_wide_numbers() {
        let mut tracer = Tracer::new(true);
        tracer.idle(0, 2);
        tracer.run(2, "A", 100, 0);
        let trace = tracer.finish().unwrap();
        assert_eq!(trace.render_gantt(), "| IDLE | A |\n0      2   102");
    }

    #[test]
    fn test_long_idle_gap_is_one_segment() {
        let mut tracer = Tracer::new(true);
        tracer.idle(0, 10_000_000_000);
        tracer.run(10_000_000_000, "A", 1, 0);
        let trace = tracer.finish().unwrap();

        assert_eq!(trace.events.len(), 2);
        assert_eq!(trace.events[0].action, TraceAction::Idle);
        assert_eq!(
            trace.segments,
            vec![
                GanttSegment {
                    process_id: None,
                    start: 0,
                    end: 10_000_000_000,
                },
                GanttSegment {
                    process_id: Some("A".to_string()),
                    start: 10_000_000_000,
                    end: 10_000_000_001,
                },
            ]
        );
        assert_eq!(trace.units(), 10_000_000_001);
        assert_eq!(trace.busy_units(), 1);
    }

    #[test]
    fn test_consecutive_slices_merge() {
        let mut tracer = Tracer::new(true);
        tracer.run(0, "A", 1, 2);
        tracer.run(1, "A", 1, 1);
        tracer.run(2, "A", 1, 0);
        let trace = tracer.finish().unwrap();
        assert_eq!(trace.events.len(), 3);
        assert_eq!(trace.segments.len(), 1);
        assert_eq!(
            trace.timeline(),
            vec![Some("A".to_string()), Some("A".to_string()), Some("A".to_string())]
        );
    }

    #[test]
    fn test_empty_trace_renders_empty() {
        assert_eq!(Trace::default().render_gantt(), "");
        assert_eq!(Trace::default().render_timeline(), "|");
    }
}
