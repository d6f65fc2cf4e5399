//! Directory batch runs: simulate every input file and write one transition
//! file per input
//!
//! A file that fails to load or save is logged and skipped; the rest of the
//! batch still runs. Forests share no state, so files can be processed in
//! parallel.

use crate::grid::{load_forest, LoadError};
use crate::simulation::{save_transitions, FireSimulator, PersistenceError, RunSummary};
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Batch run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Directory scanned for input files (not recursive)
    pub input_dir: PathBuf,
    /// Directory receiving one output file per input, created if missing
    pub output_dir: PathBuf,
    /// Input file extension, matched case-insensitively
    pub extension: String,
    /// Process files on the rayon thread pool
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            extension: "txt".to_string(),
            parallel: false,
        }
    }
}

/// Why a single file was skipped
#[derive(Debug)]
pub enum FileError {
    Load(LoadError),
    Save(PersistenceError),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Load(err) => write!(f, "{err}"),
            FileError::Save(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Load(err) => Some(err),
            FileError::Save(err) => Some(err),
        }
    }
}

/// Result of processing one input file
#[derive(Debug)]
pub enum FileOutcome {
    Completed {
        input: PathBuf,
        output: PathBuf,
        summary: RunSummary,
    },
    Failed {
        input: PathBuf,
        error: FileError,
    },
}

impl FileOutcome {
    pub fn input(&self) -> &Path {
        match self {
            FileOutcome::Completed { input, .. } | FileOutcome::Failed { input, .. } => input,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, FileOutcome::Completed { .. })
    }
}

/// Per-file outcomes of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Errors that stop a batch before any file is processed
#[derive(Debug)]
pub enum BatchError {
    /// The input path does not exist or is not a directory
    InputDirUnavailable(PathBuf),
    /// The input directory could not be listed
    ReadDir { path: PathBuf, source: io::Error },
    /// No file in the input directory has the configured extension
    NoInputFiles { dir: PathBuf, extension: String },
    /// The output directory could not be created
    OutputDir { path: PathBuf, source: io::Error },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::InputDirUnavailable(path) => {
                write!(f, "Input directory {} is not a valid directory", path.display())
            }
            BatchError::ReadDir { path, source } => {
                write!(f, "Failed to list {}: {source}", path.display())
            }
            BatchError::NoInputFiles { dir, extension } => {
                write!(f, "No .{extension} input files found in {}", dir.display())
            }
            BatchError::OutputDir { path, source } => write!(
                f,
                "Failed to create output directory {}: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::ReadDir { source, .. } | BatchError::OutputDir { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Simulate every input file in `config.input_dir`
///
/// # Errors
/// Returns a [`BatchError`] if the input directory is missing, unreadable or
/// holds no matching files, or if the output directory cannot be created.
/// Failures of individual files are reported in the [`BatchReport`] instead.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport, BatchError> {
    let jobs = collect_jobs(config)?;

    fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    info!(
        "Processing {} input files from {} (parallel={})",
        jobs.len(),
        config.input_dir.display(),
        config.parallel
    );

    let outcomes: Vec<FileOutcome> = if config.parallel {
        jobs.into_par_iter()
            .map(|(input, output)| process_file(input, output))
            .collect()
    } else {
        jobs.into_iter()
            .map(|(input, output)| process_file(input, output))
            .collect()
    };

    let report = BatchReport { outcomes };
    info!(
        "Batch finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

/// (input, output) path pairs sorted by input path
fn collect_jobs(config: &BatchConfig) -> Result<Vec<(PathBuf, PathBuf)>, BatchError> {
    if !config.input_dir.is_dir() {
        return Err(BatchError::InputDirUnavailable(config.input_dir.clone()));
    }

    let read_dir_err = |source: io::Error| BatchError::ReadDir {
        path: config.input_dir.clone(),
        source,
    };
    let mut jobs = Vec::new();
    for entry in fs::read_dir(&config.input_dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&config.extension));
        if !matches || !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name() {
            let output = config.output_dir.join(name);
            jobs.push((path, output));
        }
    }

    if jobs.is_empty() {
        return Err(BatchError::NoInputFiles {
            dir: config.input_dir.clone(),
            extension: config.extension.clone(),
        });
    }
    jobs.sort();
    Ok(jobs)
}

fn process_file(input: PathBuf, output: PathBuf) -> FileOutcome {
    let forest = match load_forest(&input) {
        Ok(forest) => forest,
        Err(err) => {
            warn!("Skipping {}: {}", input.display(), err);
            return FileOutcome::Failed {
                input,
                error: FileError::Load(err),
            };
        }
    };

    let mut sim = FireSimulator::new(forest);
    let summary = sim.run();

    if let Err(err) = save_transitions(sim.forest(), &output) {
        warn!("Skipping {}: {}", input.display(), err);
        return FileOutcome::Failed {
            input,
            error: FileError::Save(err),
        };
    }

    info!(
        "{} -> {}: {} steps, {} cells burnt, peak {} burning",
        input.display(),
        output.display(),
        summary.steps,
        summary.cells_burnt,
        summary.peak_burning
    );
    FileOutcome::Completed {
        input,
        output,
        summary,
    }
}
