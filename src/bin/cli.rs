use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vector_bench::config::BenchConfig;
use vector_bench::error::Result;
use vector_bench::vector::{NumericKind, HARDWARE_ACCELERATED, VECTOR_BYTES};
use vector_bench::{registry, BenchmarkRun};

/// Vectorized vs scalar arithmetic benchmark
#[derive(Debug, Parser)]
#[clap(name = "vector-bench", version = "0.1.0")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run every registered benchmark and print the time tree
    Run {
        /// JSON configuration file; flags below override its fields
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Smallest size exponent (arrays hold 2^exp elements)
        #[clap(long)]
        min_exp: Option<u32>,

        /// Largest size exponent
        #[clap(long)]
        max_exp: Option<u32>,

        /// Exponent increment
        #[clap(long)]
        step: Option<u32>,

        /// Element type to run; repeat for several (default: all)
        #[clap(short, long = "kind")]
        kinds: Vec<NumericKind>,

        /// Seed for operand generation
        #[clap(long)]
        seed: Option<u64>,
    },

    /// List registered benchmarks and lane widths
    List,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            min_exp,
            max_exp,
            step,
            kinds,
            seed,
        } => {
            let mut config = match config {
                Some(path) => BenchConfig::from_file(path)?,
                None => BenchConfig::new(),
            };
            if let Some(min) = min_exp {
                config.min_exponent = min;
            }
            if let Some(max) = max_exp {
                config.max_exponent = max;
            }
            if let Some(step) = step {
                config.exponent_step = step;
            }
            if !kinds.is_empty() {
                config = config.kinds(kinds);
            }
            if let Some(seed) = seed {
                config = config.seed(seed);
            }
            config.validate()?;

            let units = registry(&config);
            let mut run = BenchmarkRun::start(config.root_label.clone());
            let outcome = run.execute(&units);
            print!("{}", run.finish());

            if let Err(err) = outcome {
                eprintln!("error: {}", err);
                std::process::exit(1);
            }
        }
        Commands::List => {
            for unit in registry(&BenchConfig::new()) {
                println!("{}", unit.name());
            }
            println!();
            println!(
                "vector register: {} bytes, hardware acceleration {}",
                VECTOR_BYTES,
                if HARDWARE_ACCELERATED { "on" } else { "off" }
            );
            for kind in NumericKind::ALL {
                println!("{:>4}\t{} bytes\t{} lanes", kind, kind.byte_width(), kind.lanes());
            }
        }
    }

    Ok(())
}
