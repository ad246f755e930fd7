//! Batch filtering driver
//!
//! Runs the full filter sweep over a list of PGM files: both Laplacian
//! kernels on the original image, a Gaussian blur for every
//! (size, sigma) pair, and both Laplacian kernels on every blurred
//! image. Each result is written next to its input (or into an output
//! directory) under a name derived from the input stem and the step.
//!
//! A failing input or step is logged and recorded, and the run moves on
//! to the next one.

use graymap_core::Image;
use graymap_filter::{
    FilterError, LaplacianKernel, gaussian_blur, gaussian_laplacian, laplacian_edge,
};
use graymap_io::{IoError, read_image, write_image};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default Gaussian kernel sizes
pub const DEFAULT_SIZES: [u32; 3] = [3, 5, 7];

/// Default Gaussian sigmas
pub const DEFAULT_SIGMAS: [f64; 3] = [1.0, 2.0, 4.0];

/// Errors recorded by the batch driver
#[derive(Debug, Error)]
pub enum BatchError {
    /// Decoding or encoding failed
    #[error("io error: {0}")]
    Io(#[from] IoError),

    /// A filter rejected its parameters or could not allocate
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// The output directory could not be created
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for batch operations
pub type BatchResult<T> = Result<T, BatchError>;

/// Batch run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Input PGM files
    pub inputs: Vec<PathBuf>,
    /// Directory for outputs; `None` writes next to each input
    pub output_dir: Option<PathBuf>,
    /// Gaussian kernel sizes (odd)
    pub sizes: Vec<u32>,
    /// Gaussian sigmas
    pub sigmas: Vec<f64>,
    /// Laplacian kernels to apply
    pub laplacians: Vec<LaplacianKernel>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: None,
            sizes: DEFAULT_SIZES.to_vec(),
            sigmas: DEFAULT_SIGMAS.to_vec(),
            laplacians: LaplacianKernel::ALL.to_vec(),
        }
    }
}

impl BatchConfig {
    /// Create a configuration with the default sweep for `inputs`.
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    /// All steps run for each input, in execution order.
    pub fn steps(&self) -> Vec<FilterStep> {
        let mut steps: Vec<FilterStep> = self
            .laplacians
            .iter()
            .map(|&kind| FilterStep::Laplacian(kind))
            .collect();
        for &size in &self.sizes {
            for &sigma in &self.sigmas {
                steps.push(FilterStep::Gaussian { size, sigma });
                steps.extend(
                    self.laplacians
                        .iter()
                        .map(|&kind| FilterStep::GaussianLaplacian { size, sigma, kind }),
                );
            }
        }
        steps
    }
}

/// One filter applied to an input image
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterStep {
    /// Laplacian on the original image
    Laplacian(LaplacianKernel),
    /// Gaussian smoothing
    Gaussian { size: u32, sigma: f64 },
    /// Laplacian on the Gaussian-smoothed image
    GaussianLaplacian {
        size: u32,
        sigma: f64,
        kind: LaplacianKernel,
    },
}

impl FilterStep {
    /// Suffix appended to the input stem to name this step's output.
    ///
    /// e.g. `_laplacian_cross`, `_gauss_5_sigma_2.0`,
    /// `_gauss_5_sigma_2.0_laplacian_full`
    pub fn file_suffix(&self) -> String {
        match *self {
            Self::Laplacian(kind) => format!("_laplacian_{}", kind.name()),
            Self::Gaussian { size, sigma } => format!("_gauss_{}_sigma_{:.1}", size, sigma),
            Self::GaussianLaplacian { size, sigma, kind } => format!(
                "_gauss_{}_sigma_{:.1}_laplacian_{}",
                size,
                sigma,
                kind.name()
            ),
        }
    }

    /// Apply this step to `img`.
    pub fn apply(&self, img: &Image) -> BatchResult<Image> {
        let out = match *self {
            Self::Laplacian(kind) => laplacian_edge(img, kind)?,
            Self::Gaussian { size, sigma } => gaussian_blur(img, size, sigma)?,
            Self::GaussianLaplacian { size, sigma, kind } => {
                gaussian_laplacian(img, size, sigma, kind)?
            }
        };
        Ok(out)
    }
}

/// A failed input or step
#[derive(Debug)]
pub struct BatchFailure {
    /// The input file, or the output directory
    pub path: PathBuf,
    /// The step that failed; `None` if the input itself failed
    pub step: Option<FilterStep>,
    /// What went wrong
    pub error: BatchError,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, in order
    pub written: Vec<PathBuf>,
    /// Failures, in order
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// `true` if nothing failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: &Path, step: Option<FilterStep>, error: BatchError) {
        match &step {
            Some(step) => warn!("{}: step {:?} failed: {}", path.display(), step, error),
            None => warn!("{}: {}", path.display(), error),
        }
        self.failures.push(BatchFailure {
            path: path.to_path_buf(),
            step,
            error,
        });
    }
}

/// Output path for `step` applied to `input`.
///
/// The name is the input file name without its last extension, followed
/// by the step suffix and `.pgm`. It is placed in `output_dir` if given,
/// otherwise next to the input.
pub fn output_path(input: &Path, output_dir: Option<&Path>, step: &FilterStep) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let name = format!("{}{}.pgm", stem, step.file_suffix());
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Run every configured step over every input.
pub fn run_batch(config: &BatchConfig) -> BatchReport {
    let mut report = BatchReport::default();

    if let Some(dir) = &config.output_dir {
        if let Err(source) = fs::create_dir_all(dir) {
            let error = BatchError::OutputDir {
                path: dir.clone(),
                source,
            };
            report.record(dir, None, error);
            return report;
        }
    }

    for input in &config.inputs {
        run_input(config, input, &mut report);
    }

    info!(
        "batch finished: {} inputs, {} files written, {} failures",
        config.inputs.len(),
        report.written.len(),
        report.failures.len()
    );
    report
}

fn run_input(config: &BatchConfig, input: &Path, report: &mut BatchReport) {
    let img = match read_image(input) {
        Ok(img) => img,
        Err(e) => {
            report.record(input, None, e.into());
            return;
        }
    };
    debug!("{}: {}x{}", input.display(), img.width(), img.height());

    for &kind in &config.laplacians {
        let step = FilterStep::Laplacian(kind);
        match step.apply(&img) {
            Ok(edges) => save(config, input, step, &edges, report),
            Err(e) => report.record(input, Some(step), e),
        }
    }

    for &size in &config.sizes {
        for &sigma in &config.sigmas {
            let step = FilterStep::Gaussian { size, sigma };
            let blurred = match step.apply(&img) {
                Ok(blurred) => blurred,
                Err(e) => {
                    // The dependent edge steps are skipped with it
                    report.record(input, Some(step), e);
                    continue;
                }
            };
            save(config, input, step, &blurred, report);

            for &kind in &config.laplacians {
                let step = FilterStep::GaussianLaplacian { size, sigma, kind };
                // Reuses the blurred image instead of smoothing again
                match FilterStep::Laplacian(kind).apply(&blurred) {
                    Ok(edges) => save(config, input, step, &edges, report),
                    Err(e) => report.record(input, Some(step), e),
                }
            }
        }
    }
}

fn save(config: &BatchConfig, input: &Path, step: FilterStep, img: &Image, report: &mut BatchReport) {
    let path = output_path(input, config.output_dir.as_deref(), &step);
    match write_image(img, &path) {
        Ok(()) => {
            debug!("wrote {}", path.display());
            report.written.push(path);
        }
        Err(e) => report.record(input, Some(step), e.into()),
    }
}
