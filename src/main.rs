use clap::{ArgGroup, Parser};
use env_logger::Builder;
use log::LevelFilter;
use perfect_graph::perfect::DecisionConfig;
use perfect_graph::runner::{RunOptions, Runner};
use perfect_graph::validate::validate_known_graphs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "is_perfect")]
#[command(
    about = "Determine whether a graph is perfect. Can also enumerate the odd holes and odd antiholes present in the graph. The input is either a single graph or a folder of graphs."
)]
#[command(arg_required_else_help = true)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "folder", "validate"])))]
struct Args {
    /// Path to input graph file
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to folder which contains the graph files
    #[arg(short = 'f', long, value_name = "FOLDER")]
    folder: Option<PathBuf>,

    /// Log perfect graphs
    #[arg(short = 'p', long)]
    perfect: bool,

    /// Log non-perfect graphs
    #[arg(short = 'n', long)]
    nonperfect: bool,

    /// Log odd holes and odd antiholes
    #[arg(short = 'o', long)]
    holes: bool,

    /// Append one benchmark row per graph to this CSV file
    #[arg(short = 'c', long, value_name = "CSV")]
    csv: Option<PathBuf>,

    /// Split each search by start vertex across all cores
    #[arg(long)]
    parallel: bool,

    /// Check the bundled reference graphs and exit
    #[arg(long)]
    validate: bool,

    /// Logging verbosity (use -v for info, or -v=LEVEL for specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    println!();

    if args.validate {
        match validate_known_graphs() {
            Ok(()) => {
                println!("Validation OK: bundled graphs have the expected verdicts.");
                return;
            }
            Err(e) => {
                eprintln!("Validation FAILED: {e}");
                std::process::exit(1);
            }
        }
    }

    // A single input file is always reported, whatever its verdict.
    let single = args.input.is_some();
    let options = RunOptions {
        verbose_perfect: args.perfect || single,
        verbose_nonperfect: args.nonperfect || single,
        verbose_holes: args.holes,
        decision: DecisionConfig {
            parallel: args.parallel,
        },
        experiment_csv: args.csv,
    };

    let start = Instant::now();
    let mut runner = Runner::new(options, std::io::stdout());
    let result = match (&args.input, &args.folder) {
        (Some(file), _) => runner.run_file(file),
        (None, Some(folder)) => runner.run_folder(folder),
        (None, None) => unreachable!("the source group requires --input or --folder here"),
    };
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }

    println!("\nTotal Runtime: {} seconds\n", start.elapsed().as_secs());
}
