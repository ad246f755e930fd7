use argh::FromArgs;
use std::path::PathBuf;

use graymap::batch::{BatchConfig, run_batch};
use graymap::filter::LaplacianKernel;

#[derive(FromArgs)]
/// Apply Gaussian smoothing and Laplacian edge detection to PGM images
struct Args {
    /// input PGM files
    #[argh(positional)]
    inputs: Vec<PathBuf>,

    /// directory for output files (default: next to each input)
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,

    /// gaussian kernel size, odd, repeatable (default: 3 5 7)
    #[argh(option, short = 's')]
    size: Vec<u32>,

    /// gaussian sigma, repeatable (default: 1.0 2.0 4.0)
    #[argh(option)]
    sigma: Vec<f64>,

    /// laplacian kernel: cross or full, repeatable (default: both)
    #[argh(option, short = 'l')]
    laplacian: Vec<LaplacianKernel>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = BatchConfig::new(args.inputs);
    config.output_dir = args.output_dir;
    if !args.size.is_empty() {
        config.sizes = args.size;
    }
    if !args.sigma.is_empty() {
        config.sigmas = args.sigma;
    }
    if !args.laplacian.is_empty() {
        config.laplacians = args.laplacian;
    }

    let report = run_batch(&config);
    for path in &report.written {
        println!("{}", path.display());
    }

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("{}: {}", failure.path.display(), failure.error);
        }
        return Err(format!("{} step(s) failed", report.failures.len()).into());
    }
    Ok(())
}
