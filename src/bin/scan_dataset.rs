use std::{error::Error, path::PathBuf, time::Instant};

use bbox_dataset::{scan_datasets, DEFAULT_FOLDERS, DEFAULT_SIZES};
use clap::Parser;
use log::info;

/// Load generated datasets back, validate every row and time the load
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the data_<i> folders
    #[arg(long, short, default_value = ".")]
    root: PathBuf,

    /// Number of data_<i> folders
    #[arg(long, short, default_value_t = DEFAULT_FOLDERS)]
    folders: usize,

    /// Rows per file, comma separated (default: 100,500,...,1000000)
    #[arg(long, short, value_delimiter = ',')]
    sizes: Vec<usize>,

    /// Print per-file summaries as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let sizes = if args.sizes.is_empty() {
        DEFAULT_SIZES.to_vec()
    } else {
        args.sizes
    };

    info!(
        "Scanning {} folders x {} sizes under {}",
        args.folders,
        sizes.len(),
        args.root.display()
    );

    let start_time = Instant::now();
    let summaries = scan_datasets(&args.root, args.folders, &sizes)?;
    let end_time = Instant::now();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let rows: usize = summaries.iter().map(|s| s.rows).sum();

    for s in &summaries {
        println!(
            "data_{}/{}.csv: {} rows, mean area {:.1}",
            s.folder, s.size, s.rows, s.mean_area
        );
    }
    println!("Total = {} seconds", (end_time - start_time).as_secs_f32());
    println!(
        "Throughput = {} rows/second",
        rows as f32 / (end_time - start_time).as_secs_f32()
    );

    Ok(())
}
