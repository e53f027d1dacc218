use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::{bbox::BoundingBoxRow, error::DatasetError, writer::dataset_file_path};

const FIELDS_PER_ROW: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub folder: usize,
    pub size: usize,
    pub rows: usize,
    pub mean_area: f64,
}

fn malformed(path: &Path, line: u64, reason: String) -> DatasetError {
    DatasetError::MalformedRow {
        path: path.to_path_buf(),
        line,
        reason,
    }
}

/// Loads a headerless bounding box CSV and checks every row.
///
/// Rows must have five integer fields, be indexed `1..=n` in order, and hold a
/// box with `x_min < x_max` and `y_min <= y_max` inside the coordinate range.
pub fn read_dataset_file(path: &Path) -> Result<Vec<BoundingBoxRow>, DatasetError> {
    let csv_error = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let line = i as u64 + 1;
        let record = record.map_err(csv_error)?;

        if record.len() != FIELDS_PER_ROW {
            return Err(malformed(
                path,
                line,
                format!("expected {FIELDS_PER_ROW} fields, got {}", record.len()),
            ));
        }

        let row: BoundingBoxRow = record
            .deserialize(None)
            .map_err(|e| malformed(path, line, e.to_string()))?;

        if row.index != line {
            return Err(malformed(
                path,
                line,
                format!("expected index {line}, got {}", row.index),
            ));
        }

        if !row.bbox().is_valid() {
            return Err(malformed(
                path,
                line,
                format!("invalid box {:?}", row.bbox()),
            ));
        }

        rows.push(row);
    }

    Ok(rows)
}

/// Reads `data_<folder + 1>/<size>.csv` and checks it holds exactly `size` rows.
pub fn summarize_file(
    root: &Path,
    folder_index: usize,
    size: usize,
) -> Result<FileSummary, DatasetError> {
    let path = dataset_file_path(root, folder_index, size);
    let rows = read_dataset_file(&path)?;

    if rows.len() != size {
        return Err(malformed(
            &path,
            rows.len() as u64 + 1,
            format!("expected {size} rows, found {}", rows.len()),
        ));
    }

    let mean_area = if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|r| r.bbox().area() as f64).sum::<f64>() / rows.len() as f64
    };

    debug!("Scanned {} ({} rows)", path.display(), rows.len());

    Ok(FileSummary {
        path,
        folder: folder_index + 1,
        size,
        rows: rows.len(),
        mean_area,
    })
}

/// Scans every (folder, size) file in parallel. Results come back in folder
/// order, then in the order `sizes` was given.
pub fn scan_datasets(
    root: &Path,
    folders: usize,
    sizes: &[usize],
) -> Result<Vec<FileSummary>, DatasetError> {
    let jobs: Vec<(usize, usize)> = (0..folders)
        .flat_map(|folder| sizes.iter().map(move |&size| (folder, size)))
        .collect();

    jobs.par_iter()
        .map(|&(folder, size)| summarize_file(root, folder, size))
        .collect()
}
