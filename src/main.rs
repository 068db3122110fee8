use clap::Parser;
use fat_graphs::bench::{Benchmark, Config};
use fat_graphs::FatGraphError;

/// Enumerates the connected fat graphs of a given genus with given numbers of faces and
/// vertices up to isomorphism, reporting their number and the sum of the inverses of their
/// automorphism group orders.
#[derive(Clone, Debug, Parser, PartialEq)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    config: Config,

    /// Log the enumeration progress, repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn benchmark(self) -> Benchmark {
        Benchmark { config: self.config }
    }

    fn max_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

fn main() -> Result<(), FatGraphError> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_target(false).with_max_level(args.max_level()).with_writer(std::io::stderr).init();
    args.benchmark().timed_run()
}
