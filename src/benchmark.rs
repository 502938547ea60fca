//! Measures how long building an `OffsetHeap` takes depending on the offset
//! of its root.
//!
//! Every offset is timed over the same input, and compared to the baseline
//! obtained with the root at the beginning of the storage.
use crate::error::HeapError;
use crate::heap::OffsetHeap;
use itertools::Itertools;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::hint::black_box;
use std::ops::Range;
use std::time::Instant;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

/// Result type alias using the benchmark error
pub type Result<T> = std::result::Result<T, BenchError>;

/// Failures aborting a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BenchError {
    /// No construction to average over
    #[error("the number of trials must not be zero")]
    NoTrials,

    /// A heap could not be built
    #[error("heap construction failed: {0}")]
    Heap(#[from] HeapError),
}

/// The order in which the values `1..=size` are fed to the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrder {
    Descending,
    Ascending,
    Shuffled { seed: u64 },
}

impl InputOrder {
    /// Generates the values from 1 to `size`, in this order.
    ///
    /// # Example
    /// ```
    /// use offset_heap::benchmark::InputOrder;
    ///
    /// assert_eq!(InputOrder::Descending.generate(3), vec![3.0, 2.0, 1.0]);
    /// assert_eq!(InputOrder::Ascending.generate(3), vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn generate(&self, size: usize) -> Vec<f32> {
        let mut values = (1..=size).map(|i| i as f32).collect::<Vec<f32>>();

        match *self {
            InputOrder::Ascending => {}
            InputOrder::Descending => values.reverse(),
            InputOrder::Shuffled { seed } => values.shuffle(&mut StdRng::seed_from_u64(seed)),
        }

        values
    }
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of elements in each heap
    pub size: usize,
    /// Number of constructions averaged for each offset
    pub trials: usize,
    /// Offsets to compare with the baseline
    pub offsets: Range<usize>,
    /// Builds `trials` heaps before measuring anything
    pub warmup: bool,
    pub input: InputOrder,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            size: 5000,
            trials: 50,
            offsets: 0..10,
            warmup: true,
            input: InputOrder::Descending,
        }
    }
}

/// The average construction time at one offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTiming {
    pub offset: usize,
    pub mean: Duration,
    /// `mean` divided by the baseline
    pub ratio: f64,
}

#[derive(Debug, Clone)]
pub struct BenchReport {
    pub started: OffsetDateTime,
    pub size: usize,
    pub trials: usize,
    /// Average construction time with the root at offset 0
    pub baseline: Duration,
    pub timings: Vec<OffsetTiming>,
}

/// Builds `trials` heaps from `values` at `offset` and returns the average
/// construction time. Dropping the heaps is not measured.
pub fn time_construction(values: &[f32], offset: usize, trials: usize) -> Result<Duration> {
    if trials == 0 {
        return Err(BenchError::NoTrials);
    }

    let mut total = std::time::Duration::ZERO;

    for _ in 0..trials {
        let start = Instant::now();
        let heap = OffsetHeap::from_slice_with_offset(values, offset)?;
        total += start.elapsed();

        black_box(heap);
    }

    Ok(Duration::seconds_f64(
        total.as_secs_f64() / trials as f64,
    ))
}

/// Runs the whole benchmark. Any failure to build a heap aborts the run, and
/// so does a configuration without trials.
///
/// # Example
/// ```
/// use offset_heap::benchmark::{run, BenchConfig};
///
/// let config = BenchConfig {
///     size: 100,
///     trials: 2,
///     offsets: 0..3,
///     ..BenchConfig::default()
/// };
///
/// let report = run(&config).unwrap();
///
/// assert_eq!(report.timings.len(), 3);
/// assert_eq!(report.timings[2].offset, 2);
/// ```
pub fn run(config: &BenchConfig) -> Result<BenchReport> {
    if config.trials == 0 {
        return Err(BenchError::NoTrials);
    }

    let started = OffsetDateTime::now_utc();
    let values = config.input.generate(config.size);

    if config.warmup {
        info!("warming up cache with {} constructions", config.trials);
        for _ in 0..config.trials {
            black_box(OffsetHeap::from_slice(&values));
        }
    }

    info!(
        "timing {} elements over {} trials, input {:?}",
        config.size, config.trials, config.input
    );
    let baseline = time_construction(&values, 0, config.trials)?;
    debug!("baseline: {} s", baseline.as_seconds_f64());

    let timings = config
        .offsets
        .clone()
        .map(|offset| {
            let mean = time_construction(&values, offset, config.trials)?;
            debug!("offset {}: {} s", offset, mean.as_seconds_f64());

            Ok(OffsetTiming {
                offset,
                mean,
                ratio: mean.as_seconds_f64() / baseline.as_seconds_f64(),
            })
        })
        .collect::<Result<Vec<OffsetTiming>>>()?;

    Ok(BenchReport {
        started,
        size: config.size,
        trials: config.trials,
        baseline,
        timings,
    })
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run started at {}, {} elements", self.started, self.size)?;
        writeln!(f, "Averaged over {} runs", self.trials)?;
        writeln!(
            f,
            "\tStandard layout heap built in {} seconds",
            self.baseline.as_seconds_f64()
        )?;
        write!(
            f,
            "{}",
            self.timings.iter().format_with("", |t, f| f(&format_args!(
                "\tHeap offset used: {} heap built in {} seconds ({:.1}% of standard)\n",
                t.offset,
                t.mean.as_seconds_f64(),
                t.ratio * 100.0
            )))
        )
    }
}
