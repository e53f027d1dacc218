use std::{collections::HashSet, fmt, path::PathBuf};

/// Row counts written into every folder, smallest first.
pub const DEFAULT_SIZES: &[usize] = &[
    100, 500, 1_000, 5_000, 10_000, 25_000, 50_000, 100_000, 500_000, 1_000_000,
];

pub const DEFAULT_FOLDERS: usize = 10;

/// What to do when `data_<i>` is already on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExistingFolderPolicy {
    /// Report the collision and end the run.
    #[default]
    Stop,
    /// Leave the folder untouched and move on to the next one.
    Skip,
}

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub root: PathBuf,
    pub sizes: Vec<usize>,
    pub folders: usize,
    pub seed: Option<u64>,
    pub on_existing: ExistingFolderPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            sizes: DEFAULT_SIZES.to_vec(),
            folders: DEFAULT_FOLDERS,
            seed: None,
            on_existing: ExistingFolderPolicy::Stop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoFolders,
    NoSizes,
    DuplicateSize { size: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoFolders => write!(f, "folder count must be > 0"),
            ConfigError::NoSizes => write!(f, "at least one dataset size is required"),
            ConfigError::DuplicateSize { size } => {
                write!(f, "dataset size {} is listed more than once", size)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.folders == 0 {
            return Err(ConfigError::NoFolders);
        }
        if self.sizes.is_empty() {
            return Err(ConfigError::NoSizes);
        }

        let mut seen = HashSet::new();
        for &size in &self.sizes {
            if !seen.insert(size) {
                return Err(ConfigError::DuplicateSize { size });
            }
        }

        Ok(())
    }

    pub fn sorted_sizes(&self) -> Vec<usize> {
        let mut sizes = self.sizes.clone();
        sizes.sort_unstable();
        sizes
    }

    pub fn total_rows(&self) -> u64 {
        self.sizes.iter().map(|&s| s as u64).sum::<u64>() * self.folders as u64
    }
}
