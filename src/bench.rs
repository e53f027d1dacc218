use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use log::debug;
use serde::Serialize;

use crate::{
    bbox::{BoundingBox, BoundingBoxRow},
    error::DatasetError,
    rtree::RTree,
    scan::read_dataset_file,
    writer::dataset_file_path,
};

/// Fixed query window, inside the coordinate range.
pub const SEARCH_RECT: BoundingBox = BoundingBox {
    x_min: 238_130,
    y_min: 986_192,
    x_max: 468_585,
    y_max: 989_623,
};

/// Nanoseconds spent inserting every row, running one search and clearing the tree.
#[derive(Default, Debug, Clone, Serialize)]
pub struct RTreeTiming {
    pub hits: usize,
    pub insert_ns: u64,
    pub search_ns: u64,
    pub remove_ns: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileBench {
    pub path: PathBuf,
    pub folder: usize,
    pub rows: usize,
    #[serde(flatten)]
    pub timing: RTreeTiming,
}

pub fn bench_rows(rows: &[BoundingBoxRow], search: &BoundingBox) -> RTreeTiming {
    let mut tree = RTree::new();

    let start_time = Instant::now();
    for row in rows {
        tree.insert(row.bbox(), row.index);
    }
    let insert_time = Instant::now();

    let hits = tree.search_count(search);
    let search_time = Instant::now();

    tree.remove_all();
    let end_time = Instant::now();

    RTreeTiming {
        hits,
        insert_ns: (insert_time - start_time).as_nanos() as u64,
        search_ns: (search_time - insert_time).as_nanos() as u64,
        remove_ns: (end_time - search_time).as_nanos() as u64,
    }
}

/// Times `data_<i>/<size>.csv` for every folder, one after another so runs
/// don't compete for cores.
pub fn bench_datasets(
    root: &Path,
    folders: usize,
    size: usize,
    search: &BoundingBox,
) -> Result<Vec<FileBench>, DatasetError> {
    let mut out = Vec::with_capacity(folders);

    for folder_index in 0..folders {
        let path = dataset_file_path(root, folder_index, size);
        let rows = read_dataset_file(&path)?;
        let timing = bench_rows(&rows, search);

        debug!("Benchmarked {} ({} hits)", path.display(), timing.hits);

        out.push(FileBench {
            path,
            folder: folder_index + 1,
            rows: rows.len(),
            timing,
        });
    }

    Ok(out)
}
