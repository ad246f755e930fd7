//! Batch driver regression test
//!
//! Runs the filter sweep over PGM files on disk and checks the set of
//! outputs, their contents, and how failures are reported.

use graymap::batch::{BatchConfig, BatchError, FilterStep, output_path, run_batch};
use graymap::filter::{LaplacianKernel, gaussian_blur, laplacian_edge};
use graymap::io::{read_image, write_image};
use graymap_test::{RegParams, synth};
use std::fs;

#[test]
fn batch_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("batch");
    let dir = tempfile::tempdir().expect("create temp dir");

    let pixs = synth::checkerboard(24, 16, 4, 30, 220).expect("checkerboard");
    let input = dir.path().join("board.pgm");
    write_image(&pixs, &input).expect("write input");

    // --- Test 1: default sweep writes every step next to the input ---
    let config = BatchConfig::new(vec![input.clone()]);
    let steps = config.steps();
    let report = run_batch(&config);
    rp.compare_values(1.0, if report.is_success() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(29.0, report.written.len() as f64, 0.0);
    for step in &steps {
        let path = output_path(&input, None, step);
        rp.compare_values(1.0, if path.exists() { 1.0 } else { 0.0 }, 0.0);
    }
    let expected: Vec<_> = steps.iter().map(|s| output_path(&input, None, s)).collect();
    rp.compare_values(1.0, if expected == report.written { 1.0 } else { 0.0 }, 0.0);
    eprintln!("  default sweep: {} files", report.written.len());

    // --- Test 2: outputs match the filters applied directly ---
    let step = FilterStep::Laplacian(LaplacianKernel::Full);
    let written = read_image(output_path(&input, None, &step)).expect("read laplacian");
    let direct = laplacian_edge(&pixs, LaplacianKernel::Full).expect("laplacian");
    rp.compare_images(&direct, &written);

    let step = FilterStep::Gaussian { size: 5, sigma: 2.0 };
    let written = read_image(output_path(&input, None, &step)).expect("read gauss");
    let blurred = gaussian_blur(&pixs, 5, 2.0).expect("gauss");
    rp.compare_images(&blurred, &written);

    let step = FilterStep::GaussianLaplacian {
        size: 5,
        sigma: 2.0,
        kind: LaplacianKernel::Cross,
    };
    let written = read_image(output_path(&input, None, &step)).expect("read gauss laplacian");
    rp.compare_images(&step.apply(&pixs).expect("apply"), &written);

    // --- Test 3: output directory is created and used ---
    let out_dir = dir.path().join("out/nested");
    let config = BatchConfig {
        inputs: vec![input.clone()],
        output_dir: Some(out_dir.clone()),
        sizes: vec![3],
        sigmas: vec![1.0],
        laplacians: vec![LaplacianKernel::Cross],
    };
    let report = run_batch(&config);
    rp.compare_values(3.0, report.written.len() as f64, 0.0);
    let names: Vec<String> = fs::read_dir(&out_dir)
        .expect("list output dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    for name in [
        "board_laplacian_cross.pgm",
        "board_gauss_3_sigma_1.0.pgm",
        "board_gauss_3_sigma_1.0_laplacian_cross.pgm",
    ] {
        let found = names.iter().any(|n| n == name);
        rp.compare_values(1.0, if found { 1.0 } else { 0.0 }, 0.0);
    }

    // --- Test 4: bad inputs and bad steps are recorded, the run continues ---
    let missing = dir.path().join("missing.pgm");
    let garbage = dir.path().join("garbage.pgm");
    fs::write(&garbage, b"P6\n1 1\n255\n\x00\x00\x00").expect("write garbage");
    let config = BatchConfig {
        inputs: vec![missing.clone(), garbage.clone(), input.clone()],
        output_dir: Some(dir.path().join("mixed")),
        sizes: vec![4, 3],
        sigmas: vec![1.0],
        laplacians: vec![LaplacianKernel::Full],
    };
    let report = run_batch(&config);
    // missing, garbage, and the even size on the good input
    rp.compare_values(3.0, report.failures.len() as f64, 0.0);
    // laplacian, gauss 3, gauss 3 + laplacian
    rp.compare_values(3.0, report.written.len() as f64, 0.0);

    let first = &report.failures[0];
    rp.compare_values(1.0, if first.path == missing && first.step.is_none() { 1.0 } else { 0.0 }, 0.0);
    let io = matches!(&first.error, BatchError::Io(e) if !e.is_format_error());
    rp.compare_values(1.0, if io { 1.0 } else { 0.0 }, 0.0);

    let second = &report.failures[1];
    let format = matches!(&second.error, BatchError::Io(e) if e.is_format_error());
    rp.compare_values(1.0, if second.path == garbage && format { 1.0 } else { 0.0 }, 0.0);

    let third = &report.failures[2];
    let even = third.step == Some(FilterStep::Gaussian { size: 4, sigma: 1.0 })
        && matches!(third.error, BatchError::Filter(_));
    rp.compare_values(1.0, if even { 1.0 } else { 0.0 }, 0.0);

    // --- Test 5: unusable output directory fails the whole run ---
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").expect("write blocker");
    let config = BatchConfig {
        output_dir: Some(blocker.join("sub")),
        ..BatchConfig::new(vec![input.clone()])
    };
    let report = run_batch(&config);
    rp.compare_values(0.0, report.written.len() as f64, 0.0);
    let dir_err = matches!(
        report.failures.first().map(|f| &f.error),
        Some(BatchError::OutputDir { .. })
    );
    rp.compare_values(1.0, if dir_err { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "batch regression test failed");
}
