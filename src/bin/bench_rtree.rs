use std::{error::Error, path::PathBuf};

use bbox_dataset::{bench_datasets, DEFAULT_FOLDERS, SEARCH_RECT};
use clap::Parser;
use log::info;

/// Time R-tree insert, search and remove-all over data_<i>/<size>.csv
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the data_<i> folders
    #[arg(long, short, default_value = ".")]
    root: PathBuf,

    /// Number of data_<i> folders
    #[arg(long, short, default_value_t = DEFAULT_FOLDERS)]
    folders: usize,

    /// Which <size>.csv to load from every folder
    #[arg(long, short, default_value_t = 100)]
    size: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    info!(
        "Benchmarking {}.csv in {} folders under {}",
        args.size,
        args.folders,
        args.root.display()
    );

    let results = bench_datasets(&args.root, args.folders, args.size, &SEARCH_RECT)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for r in &results {
        println!("{}", r.timing.hits);
        println!(
            "{}\t{}\t{}",
            r.timing.insert_ns, r.timing.search_ns, r.timing.remove_ns
        );
    }

    Ok(())
}
