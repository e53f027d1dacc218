pub mod bbox;
pub mod bench;
pub mod config;
pub mod error;
pub mod generate;
pub mod rtree;
pub mod scan;
pub mod writer;

pub use bbox::{BoundingBox, BoundingBoxRow, COORD_MAX};
pub use bench::{bench_datasets, bench_rows, FileBench, RTreeTiming, SEARCH_RECT};
pub use config::{
    ConfigError, ExistingFolderPolicy, GeneratorConfig, DEFAULT_FOLDERS, DEFAULT_SIZES,
};
pub use error::DatasetError;
pub use generate::{generate_datasets, generate_with_rng, GenerationReport};
pub use rtree::RTree;
pub use scan::{read_dataset_file, scan_datasets, summarize_file, FileSummary};
pub use writer::{dataset_file_path, folder_path, write_dataset_file, write_rows};
