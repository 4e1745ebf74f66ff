//! Measures time taken by single phases of the compiler.
//!
//! This is NOT an utility that should be used for benchmarking!
//! Benchmarking involves running a program multiple times with
//! warm up phases and median/avg/stddev of measurements.
//!
//! Measurements belong to the `Timings` of one run (see `Context`), so
//! elaborating many programs in one process does not accumulate them.

use failure::Error;
use std::{
    cell::RefCell,
    fmt,
    fs::File,
    io,
    time::{Duration, Instant},
};

/// Completed measurements of one run.
#[derive(Debug, Default)]
pub struct Timings {
    measurements: RefCell<Vec<CompletedMeasurement>>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a measurement that is recorded when the guard is dropped.
    pub fn guard(&self, label: &str) -> MeasurementGuard<'_> {
        MeasurementGuard {
            timings: self,
            start: Instant::now(),
            label: label.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.measurements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.borrow().is_empty()
    }

    /// Nested view of everything measured so far in this run.
    pub fn snapshot(&self) -> CompilerMeasurements {
        freeze(self.measurements.borrow().clone())
    }

    pub fn write_json<W: io::Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, &self.snapshot())?;
        Ok(())
    }

    /// Emit the measurements as requested through the environment:
    /// `MEASURE_STDERR` prints a table to stderr, `MEASURE_JSON=<path>`
    /// writes them as JSON to `path`.
    pub fn print(&self) -> Result<(), Error> {
        if std::env::var("MEASURE_STDERR").is_ok() {
            eprintln!("Performance Analysis");
            eprintln!("====================\n");
            eprintln!("{}", AsciiDisp(&self.snapshot()));
        }

        if let Ok(path) = std::env::var("MEASURE_JSON") {
            self.write_json(File::create(path)?)?;
        }

        Ok(())
    }
}

pub struct MeasurementGuard<'t> {
    timings: &'t Timings,
    start: Instant,
    label: String,
}

impl<'t> Drop for MeasurementGuard<'t> {
    fn drop(&mut self) {
        let measurement = CompletedMeasurement {
            label: std::mem::replace(&mut self.label, String::new()),
            start: self.start,
            stop: Instant::now(),
        };
        self.timings.measurements.borrow_mut().push(measurement);
    }
}

/// Measure the remainder of the enclosing scope under `label` in the given
/// `Timings`.
#[macro_export]
macro_rules! timed_scope {
    ($timings:expr, $label:expr) => {
        let _measurement = $timings.guard($label);
    };
}

#[derive(Debug, Clone)]
struct CompletedMeasurement {
    start: Instant,
    stop: Instant,
    label: String,
}

impl CompletedMeasurement {
    fn duration(&self) -> Duration {
        self.stop.duration_since(self.start)
    }
}

/// Frozen and completed measurements that can be serialized
pub type CompilerMeasurements = Vec<SingleMeasurement>;
pub struct AsciiDisp<'a>(pub &'a CompilerMeasurements);

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct SingleMeasurement {
    pub label: String,
    /// number of measurements that were still running when this one started
    pub indent: usize,
    pub duration: Duration,
}

fn freeze(mut listing: Vec<CompletedMeasurement>) -> CompilerMeasurements {
    let mut frozen = vec![];
    let mut active = vec![];

    // on equal starts the enclosing (longer) measurement comes first
    listing.sort_by(|a, b| a.start.cmp(&b.start).then(b.stop.cmp(&a.stop)));

    for timing in listing.into_iter() {
        active.retain(|measurement: &CompletedMeasurement| measurement.stop > timing.start);

        frozen.push(SingleMeasurement {
            label: timing.label.clone(),
            indent: active.len(),
            duration: timing.duration(),
        });

        active.push(timing);
    }

    frozen
}

impl<'a> fmt::Display for AsciiDisp<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min_label_width = 40;

        for timing in self.0 {
            let indent = "  ".repeat(timing.indent);

            writeln!(
                f,
                "{nesting}{: <label_width$}    {: >us_width$}us",
                timing.label,
                timing.duration.as_micros(),
                nesting = indent,
                label_width = min_label_width - indent.len().min(min_label_width),
                us_width = 8
            )?;
        }

        Ok(())
    }
}
