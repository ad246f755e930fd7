//! PGM I/O regression test
//!
//! Reads and writes graymaps through files and memory:
//! - binary roundtrip through a file and through memory
//! - ASCII and binary encodings of the same samples decode identically
//! - header comments at the two accepted positions
//! - I/O and format errors are distinguishable

use graymap_core::Image;
use graymap_io::{
    IoError, PgmVariant, detect_variant, read_image, read_image_header, read_image_mem,
    write_image, write_image_mem,
};
use graymap_test::{RegParams, synth};
use std::fs;

fn ascii_encoding(img: &Image, comments: bool) -> Vec<u8> {
    let mut text = String::from("P2\n");
    if comments {
        text.push_str("# generated for pgmio_reg\n");
    }
    text.push_str(&format!("{} {}\n", img.width(), img.height()));
    if comments {
        text.push_str("# max value follows\n");
    }
    text.push_str(&format!("{}\n", img.max_value()));
    for y in 0..img.height() {
        let row: Vec<String> = img.row(y).iter().map(|v| v.to_string()).collect();
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text.into_bytes()
}

#[test]
fn pgmio_reg() {
    let mut rp = RegParams::new("pgmio");
    let dir = tempfile::tempdir().expect("create temp dir");

    // --- Test 1: binary file roundtrip ---
    let pix1 = synth::ramp(37, 23).expect("ramp");
    let path = dir.path().join("ramp.pgm");
    write_image(&pix1, &path).expect("write ramp");
    let pix2 = read_image(&path).expect("read ramp");
    rp.compare_images(&pix1, &pix2);

    let header = read_image_header(&path).expect("read header");
    rp.compare_values(37.0, header.width as f64, 0.0);
    rp.compare_values(23.0, header.height as f64, 0.0);
    rp.compare_values(1.0, (header.variant == PgmVariant::Binary) as u8 as f64, 0.0);

    // --- Test 2: memory roundtrip keeps a non-default max value ---
    let mut pix3 = synth::checkerboard(8, 5, 2, 10, 90).expect("checkerboard").into_mut();
    pix3.set_max_value(90).expect("max value");
    let pix3: Image = pix3.into();
    let data = write_image_mem(&pix3).expect("write mem");
    let pix4 = read_image_mem(&data).expect("read mem");
    rp.compare_images(&pix3, &pix4);

    // Writing twice produces identical bytes
    let data2 = write_image_mem(&pix4).expect("write mem (2)");
    rp.compare_strings(&data, &data2);

    // File and memory encoders agree
    let path3 = dir.path().join("checker.pgm");
    write_image(&pix3, &path3).expect("write checker");
    let file_bytes = fs::read(&path3).expect("read back bytes");
    rp.compare_strings(&data, &file_bytes);

    // --- Test 3: ASCII and binary encodings are equivalent ---
    let ascii = ascii_encoding(&pix1, false);
    rp.compare_values(
        1.0,
        (detect_variant(&ascii).expect("detect") == PgmVariant::Ascii) as u8 as f64,
        0.0,
    );
    let from_ascii = read_image_mem(&ascii).expect("read ascii");
    rp.compare_images(&pix1, &from_ascii);

    let commented = ascii_encoding(&pix1, true);
    let from_commented = read_image_mem(&commented).expect("read commented ascii");
    rp.compare_images(&pix1, &from_commented);

    // --- Test 4: a 1x1 image survives the roundtrip ---
    let tiny = synth::constant(1, 1, 255).expect("tiny");
    let tiny2 = read_image_mem(&write_image_mem(&tiny).expect("write tiny")).expect("read tiny");
    rp.compare_images(&tiny, &tiny2);

    assert!(rp.cleanup(), "pgmio regression test failed");
}

#[test]
fn pgmio_errors_reg() {
    let mut rp = RegParams::new("pgmio_errors");
    let dir = tempfile::tempdir().expect("create temp dir");

    // Missing file is an I/O error, not a format error
    let missing = read_image(dir.path().join("does_not_exist.pgm"));
    let is_io = matches!(missing, Err(IoError::Io(_)));
    rp.compare_values(1.0, is_io as u8 as f64, 0.0);

    // Unknown magic is a format error
    let path = dir.path().join("color.ppm");
    fs::write(&path, b"P6\n1 1\n255\n\x01\x02\x03").expect("write ppm");
    let err = read_image(&path).expect_err("ppm must be rejected");
    rp.compare_values(1.0, err.is_format_error() as u8 as f64, 0.0);

    // Comment before the magic number is not accepted
    let err = read_image_mem(b"# note\nP5\n1 1\n255\n\x00").expect_err("leading comment");
    rp.compare_values(
        1.0,
        matches!(err, IoError::UnsupportedFormat(_)) as u8 as f64,
        0.0,
    );

    // Truncated raster is a format error and yields no image
    let err = read_image_mem(b"P5\n4 4\n255\n\x00\x01").expect_err("truncated");
    rp.compare_values(1.0, err.is_format_error() as u8 as f64, 0.0);

    // Writing into a missing directory is an I/O error
    let img = synth::constant(2, 2, 1).expect("constant");
    let err = write_image(&img, dir.path().join("no/such/dir/out.pgm")).expect_err("bad dir");
    rp.compare_values(1.0, matches!(err, IoError::Io(_)) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pgmio_errors regression test failed");
}
