use std::{error::Error, path::PathBuf};

use bbox_dataset::{
    generate_datasets, DatasetError, ExistingFolderPolicy, GeneratorConfig, DEFAULT_FOLDERS,
    DEFAULT_SIZES,
};
use clap::Parser;
use log::info;

/// Generate random bounding box CSV datasets into data_1 .. data_N
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the data_<i> folders are created in
    #[arg(long, short, default_value = ".")]
    root: PathBuf,

    /// Number of data_<i> folders
    #[arg(long, short, default_value_t = DEFAULT_FOLDERS)]
    folders: usize,

    /// Rows per file, comma separated (default: 100,500,...,1000000)
    #[arg(long, short, value_delimiter = ',')]
    sizes: Vec<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// What to do when a data_<i> folder already exists
    #[arg(long, value_enum, default_value_t = ExistingFolderPolicy::Stop)]
    on_existing: ExistingFolderPolicy,
}

impl Args {
    fn into_config(self) -> GeneratorConfig {
        let sizes = if self.sizes.is_empty() {
            DEFAULT_SIZES.to_vec()
        } else {
            self.sizes
        };

        GeneratorConfig {
            root: self.root,
            sizes,
            folders: self.folders,
            seed: self.seed,
            on_existing: self.on_existing,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config();

    info!(
        "Generating {} folders x {} sizes ({} rows) under {}",
        config.folders,
        config.sizes.len(),
        config.total_rows(),
        config.root.display()
    );

    let report = match generate_datasets(&config) {
        Ok(report) => report,
        Err(DatasetError::FolderExists { path, .. }) => {
            println!("Folder exists! ({})", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Files = {}", report.files.len());
    if !report.skipped.is_empty() {
        println!("Skipped folders = {}", report.skipped.len());
    }
    println!("Total = {} seconds", report.elapsed.as_secs_f32());
    println!(
        "Throughput = {} rows/second",
        report.rows as f32 / report.elapsed.as_secs_f32()
    );

    Ok(())
}
