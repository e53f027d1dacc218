use std::{
    fs, io,
    path::PathBuf,
    time::{Duration, Instant},
};

use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{ExistingFolderPolicy, GeneratorConfig},
    error::DatasetError,
    writer::{folder_path, write_dataset_file},
};

#[derive(Default, Debug)]
pub struct GenerationReport {
    /// Every file written, in the order it was written.
    pub files: Vec<PathBuf>,
    /// Folders left alone under `ExistingFolderPolicy::Skip`.
    pub skipped: Vec<PathBuf>,
    pub rows: u64,
    pub elapsed: Duration,
}

/// Runs the whole generation described by `config`.
///
/// Seeds a `StdRng` when `config.seed` is set, otherwise draws from the thread RNG.
pub fn generate_datasets(config: &GeneratorConfig) -> Result<GenerationReport, DatasetError> {
    config.validate()?;

    match config.seed {
        Some(seed) => generate_with_rng(config, &mut StdRng::seed_from_u64(seed)),
        None => generate_with_rng(config, &mut rand::thread_rng()),
    }
}

/// Folder by folder, size by size (ascending). A folder that already exists
/// either ends the run with `DatasetError::FolderExists` or is skipped,
/// depending on `config.on_existing`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GenerationReport, DatasetError> {
    let start_time = Instant::now();
    let sizes = config.sorted_sizes();
    let mut report = GenerationReport::default();

    fs::create_dir_all(&config.root)?;

    for folder_index in 0..config.folders {
        let folder = folder_path(&config.root, folder_index);

        match fs::create_dir(&folder) {
            Ok(()) => info!("Created {}", folder.display()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => match config.on_existing {
                ExistingFolderPolicy::Stop => {
                    warn!("Folder {} exists, stopping", folder.display());
                    return Err(DatasetError::FolderExists {
                        path: folder,
                        source: e,
                    });
                }
                ExistingFolderPolicy::Skip => {
                    warn!("Folder {} exists, skipping", folder.display());
                    report.skipped.push(folder);
                    continue;
                }
            },
            Err(e) => return Err(e.into()),
        }

        for &size in &sizes {
            let path = write_dataset_file(&config.root, folder_index, size, rng)?;
            report.files.push(path);
            report.rows += size as u64;
        }
    }

    report.elapsed = start_time.elapsed();

    Ok(report)
}
