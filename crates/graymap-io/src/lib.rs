//! graymap-io - Image I/O for the graymap filtering library
//!
//! Reads portable graymaps in the ASCII (`P2`) and binary (`P5`)
//! variants and writes the binary variant.
//!
//! # Example
//!
//! ```no_run
//! use graymap_io::{read_image, write_image};
//!
//! let img = read_image("input.pgm").unwrap();
//! write_image(&img, "output.pgm").unwrap();
//! ```

pub mod cursor;
mod error;
pub mod format;
pub mod pgm;

pub use error::{IoError, IoResult};
pub use format::{PgmVariant, detect_variant};
pub use pgm::{PgmHeader, read_header_pgm, read_pgm, write_pgm};

use graymap_core::Image;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Read an image from a file path.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let file = File::open(path)?;
    debug!("reading {}", path.display());
    read_pgm(BufReader::new(file))
}

/// Read an image from memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    pgm::decode_pgm(data)
}

/// Read only the header of a graymap file.
pub fn read_image_header<P: AsRef<Path>>(path: P) -> IoResult<PgmHeader> {
    let file = File::open(path)?;
    let mut data = Vec::new();
    BufReader::new(file).read_to_end(&mut data)?;
    read_header_pgm(&data)
}

/// Write an image to a file path as a binary graymap.
///
/// The file is closed on every return path; buffered bytes are flushed
/// explicitly so that write errors are reported rather than lost on drop.
pub fn write_image<P: AsRef<Path>>(img: &Image, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_pgm(img, &mut writer)?;
    writer.flush()?;
    debug!(
        "wrote {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(())
}

/// Write an image to memory as a binary graymap.
pub fn write_image_mem(img: &Image) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_pgm(img, &mut buffer)?;
    Ok(buffer)
}
