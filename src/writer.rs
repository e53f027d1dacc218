use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::debug;
use rand::Rng;

use crate::{
    bbox::{BoundingBox, BoundingBoxRow},
    error::DatasetError,
};

/// `<root>/data_<folder_index + 1>`
pub fn folder_path(root: &Path, folder_index: usize) -> PathBuf {
    root.join(format!("data_{}", folder_index + 1))
}

/// `<root>/data_<folder_index + 1>/<row_count>.csv`
pub fn dataset_file_path(root: &Path, folder_index: usize, row_count: usize) -> PathBuf {
    folder_path(root, folder_index).join(format!("{row_count}.csv"))
}

/// Writes `row_count` headerless, CRLF-terminated rows indexed from 1 and hands
/// the sink back flushed.
pub fn write_rows<W: Write, R: Rng + ?Sized>(
    out: W,
    row_count: usize,
    rng: &mut R,
) -> Result<W, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    for step in 1..=row_count as u64 {
        writer.serialize(BoundingBoxRow::new(step, BoundingBox::random(rng)))?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Creates (or truncates) one dataset file and fills it with random rows.
///
/// The folder must already exist. The file is synced to storage before this
/// returns; on an error the handle is dropped and the error propagated.
pub fn write_dataset_file<R: Rng + ?Sized>(
    root: &Path,
    folder_index: usize,
    row_count: usize,
    rng: &mut R,
) -> Result<PathBuf, DatasetError> {
    let path = dataset_file_path(root, folder_index, row_count);

    let file = File::create(&path)?;
    let file = write_rows(file, row_count, rng).map_err(|source| DatasetError::Csv {
        path: path.clone(),
        source,
    })?;
    file.sync_all()?;

    debug!("Wrote {} rows to {}", row_count, path.display());

    Ok(path)
}
