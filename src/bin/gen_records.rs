use std::path::PathBuf;

use clap::Parser;

use sortbench::dataset::{MAX_RECORDS, generate_records, write_csv};

#[derive(Parser, Debug)]
#[command(
    name = "gen_records",
    version,
    about = "Synthetic ID,FirstName,LastName dataset generator"
)]
struct Args {
    #[arg(long, default_value = "data/generated_data.csv")]
    output: PathBuf,

    /// Number of records to write
    #[arg(long, default_value_t = MAX_RECORDS)]
    count: usize,

    /// RNG seed; the same seed always produces the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.count == 0 {
        eprintln!("ERROR: --count must be at least 1");
        std::process::exit(2);
    }
    if args.count > MAX_RECORDS {
        log::warn!(
            "Writing {} records; the loader only reads the first {}",
            args.count,
            MAX_RECORDS
        );
    }

    let records = generate_records(args.count, args.seed);
    write_csv(&args.output, &records)?;

    eprintln!(
        "Done. Wrote {} records to {}",
        records.len(),
        args.output.display()
    );
    Ok(())
}
