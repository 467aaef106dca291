use std::io::BufRead;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{Args, Parser, Subcommand};
use sortbench::benchmark::{
    BenchmarkConfig, BenchmarkRunner, ConsoleProgressBar, DEFAULT_LOG_PATH, DISPLAY_RECORDS,
    PermutationVerifier, RECORD_PRESETS, print_algorithm_info, print_comparison_table,
    print_controls, print_history, print_records_sample, print_run_metrics, results_to_csv,
    spawn_key_watcher,
};
use sortbench::dataset::{CsvDataset, generate_records};
use sortbench::sort::{estimated_expensive, expected_duration_hint};
use sortbench::{InMemDataset, RecordSource, SortAlgorithm, SortKey};

#[derive(Parser)]
#[command(name = "sortbench")]
#[command(about = "Benchmark bubble, insertion and merge sort over a record dataset")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single algorithm
    Run {
        /// bubble, insertion or merge
        #[arg(short, long)]
        algorithm: SortAlgorithm,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Run all three algorithms on the same column and size
    Compare {
        #[command(flatten)]
        common: CommonArgs,

        /// Also print the results as CSV
        #[arg(long)]
        csv: bool,
    },
    /// Print complexity notes for each algorithm
    Info,
}

#[derive(Args)]
struct CommonArgs {
    /// Column to sort by: id, first-name or last-name
    #[arg(short, long, default_value = "id")]
    key: SortKey,

    /// Number of records to sort
    #[arg(short, long, default_value = "1000")]
    records: usize,

    /// Use a record count preset instead: 1 = 1000, 2 = 10000, 3 = 100000
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3), conflicts_with = "records")]
    preset: Option<u8>,

    /// Input CSV file (ID,FirstName,LastName). Synthetic data is used if omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Seed for synthetic data
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Skip the confirmation prompt for slow quadratic runs
    #[arg(short, long)]
    yes: bool,

    /// Verify sorted output
    #[arg(short, long)]
    verify: bool,

    /// Disable the live progress bar
    #[arg(long)]
    no_progress: bool,

    /// Run log file
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Do not write the run log
    #[arg(long)]
    no_log: bool,

    /// Number of sorted records to display after a single run
    #[arg(long, default_value_t = DISPLAY_RECORDS)]
    display: usize,
}

impl CommonArgs {
    fn record_count(&self) -> usize {
        match self.preset {
            Some(p) => RECORD_PRESETS[usize::from(p) - 1],
            None => self.records,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run { algorithm, common } => run_single(algorithm, common),
        Command::Compare { common, csv } => run_comparison(common, csv),
        Command::Info => {
            print_algorithm_info();
            Ok(())
        }
    }
}

fn build_runner(args: &CommonArgs) -> Result<BenchmarkRunner, Box<dyn std::error::Error>> {
    let source: Box<dyn RecordSource> = match &args.input {
        Some(path) => Box::new(CsvDataset::open(path)?),
        None => Box::new(InMemDataset::new(generate_records(args.record_count(), args.seed))),
    };

    let config = BenchmarkConfig {
        verify: args.verify,
        show_progress: !args.no_progress,
        log_path: (!args.no_log).then(|| args.log.clone()),
        display_records: args.display,
    };

    println!("\n=== SORTING ALGORITHM BENCHMARK ===");
    println!("{}", source.description());
    println!("Sort column: {}", args.key);
    println!("Records: {}", args.record_count());
    println!("Verify output: {}", args.verify);
    println!();

    let mut runner = BenchmarkRunner::new(config, source);
    runner.set_progress_sink(Box::new(ConsoleProgressBar::default()));
    if args.verify {
        runner.set_verifier(Box::new(PermutationVerifier::new()));
    }

    // First Ctrl-C cancels the running algorithm, a second one quits.
    let control = runner.control();
    let interrupts = AtomicUsize::new(0);
    ctrlc::set_handler(move || {
        if interrupts.fetch_add(1, Ordering::SeqCst) == 0 {
            eprintln!("\nCancelling... press Ctrl-C again to quit.");
            control.cancel();
        } else {
            eprintln!("\nQuitting.");
            std::process::exit(130);
        }
    })?;
    spawn_key_watcher(runner.control());

    Ok(runner)
}

/// Asks for confirmation on stdin. Must run before the key watcher starts.
fn confirm(prompt: &str) -> bool {
    println!("{} (y/n): ", prompt);
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y")
}

fn run_single(
    algorithm: SortAlgorithm,
    args: CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let record_count = args.record_count();
    if estimated_expensive(algorithm, record_count) && !args.yes {
        println!(
            "WARNING: Sorting {} records with {} may take a long time!",
            record_count, algorithm
        );
        println!("Estimated time: {}", expected_duration_hint(record_count));
        if !confirm("Do you want to continue?") {
            return Ok(());
        }
    }

    let mut runner = build_runner(&args)?;
    print_controls();

    let outcome = runner.run_one_with_records(algorithm, args.key, record_count)?;
    println!();
    print_run_metrics(&outcome.result);
    print_records_sample(&outcome.records, args.key, runner.config().display_records);

    Ok(())
}

fn run_comparison(args: CommonArgs, csv: bool) -> Result<(), Box<dyn std::error::Error>> {
    let record_count = args.record_count();
    let slow = SortAlgorithm::ALL
        .iter()
        .any(|&algorithm| estimated_expensive(algorithm, record_count));
    if slow && !args.yes {
        println!(
            "Note: O(n²) algorithms (Bubble, Insertion) may be slow with {} records.",
            record_count
        );
        println!("Recommended: Use <= 10,000 records for comparison benchmarks.");
        if !confirm("Continue anyway?") {
            return Ok(());
        }
    }

    let mut runner = build_runner(&args)?;
    print_controls();

    let results = runner.run_all(args.key, record_count)?;
    print_comparison_table(&results);

    println!("\nCOMPLEXITY ANALYSIS:");
    for algorithm in SortAlgorithm::ALL {
        println!("  {:<16} {}", algorithm.name(), algorithm.complexity());
    }

    print_history(runner.history());

    if csv {
        println!("\n{}", results_to_csv(&results));
    }

    Ok(())
}
