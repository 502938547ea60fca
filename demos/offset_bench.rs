use offset_heap::benchmark::{self, BenchConfig};

fn main() {
    match benchmark::run(&BenchConfig::default()) {
        Ok(report) => print!("{}", report),
        Err(error) => {
            eprintln!("benchmark aborted: {}", error);
            std::process::exit(1);
        }
    }
}
