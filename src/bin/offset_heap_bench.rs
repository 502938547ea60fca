//! Times heap construction for a range of root offsets.
//!
//! ```bash
//! # Original layout : 5000 descending floats, 50 trials, offsets 0 to 9
//! offset_heap_bench
//!
//! # Shuffled input, more offsets
//! offset_heap_bench --order shuffled --seed 7 --max-offset 32
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use offset_heap::benchmark::{self, BenchConfig, InputOrder};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    Descending,
    Ascending,
    Shuffled,
}

#[derive(Parser)]
#[command(name = "offset_heap_bench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Measures the effect of the root offset on heap construction", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Number of elements in each heap
    #[arg(long, default_value_t = 5000)]
    size: usize,

    /// Number of constructions averaged per offset
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    trials: u32,

    /// Offsets from 0 up to this value (excluded) are measured
    #[arg(long, default_value_t = 10)]
    max_offset: usize,

    /// Skip the cache warm-up constructions
    #[arg(long)]
    no_warmup: bool,

    /// Order of the input values
    #[arg(long, value_enum, default_value_t = Order::Descending)]
    order: Order,

    /// Seed used by the shuffled order
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = BenchConfig {
        size: cli.size,
        trials: cli.trials as usize,
        offsets: 0..cli.max_offset,
        warmup: !cli.no_warmup,
        input: match cli.order {
            Order::Descending => InputOrder::Descending,
            Order::Ascending => InputOrder::Ascending,
            Order::Shuffled => InputOrder::Shuffled { seed: cli.seed },
        },
    };

    println!("#######\n START\n#######");

    let report = benchmark::run(&config)
        .with_context(|| format!("benchmark aborted for {} elements", config.size))?;

    print!("{}", report);

    Ok(())
}
