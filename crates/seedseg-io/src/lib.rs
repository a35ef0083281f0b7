//! seedseg-io - Image I/O for seedseg
//!
//! Decodes images into [`Pix`] buffers and encodes masks back to disk.
//!
//! Supported formats (feature-gated):
//! - PNG (`png-format`, default) via the `png` crate
//! - Binary PNM, P5/P6 (`pnm`, default)
//!
//! Formats are detected from magic bytes on read and chosen explicitly
//! (or from the file extension via [`ImageFormat::from_path`]) on write.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use seedseg_core::ImageFormat;

use log::debug;
use seedseg_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened,
/// [`IoError::UnsupportedFormat`] if the format is not recognized or not
/// enabled, and a decode error for malformed data.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    let pix = read_image_format(BufReader::new(file), format)?;
    debug!(
        "read {} ({:?}): {}x{}, {} channel(s)",
        path.display(),
        format,
        pix.width(),
        pix.height(),
        pix.channels().count()
    );
    Ok(pix)
}

/// Read an image from an in-memory encoded buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

#[allow(unused_variables)]
fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        other => Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Write an image to a file path in the given format.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for [`ImageFormat::Unknown`] or
/// a format whose feature is disabled.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    // Refuse before touching the filesystem
    check_writable(format)?;
    let file = File::create(path)?;
    write_image_format(pix, BufWriter::new(file), format)?;
    debug!(
        "wrote {} ({:?}): {}x{}",
        path.display(),
        format,
        pix.width(),
        pix.height()
    );
    Ok(())
}

/// Encode an image into a byte vector.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    check_writable(format)?;
    let mut buf = Vec::new();
    write_image_format(pix, &mut buf, format)?;
    Ok(buf)
}

fn check_writable(format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => Ok(()),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => Ok(()),
        other => Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    }
}

#[allow(unused_variables)]
fn write_image_format<W: std::io::Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        other => Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedseg_core::Channels;

    #[test]
    fn test_mem_roundtrip_all_formats() {
        let pix = Pix::from_raw(2, 2, Channels::Gray, vec![0, 255, 255, 0]).unwrap();
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let bytes = write_image_mem(&pix, format).unwrap();
            let back = read_image_mem(&bytes).unwrap();
            assert_eq!(back.data(), pix.data(), "{:?}", format);
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let pix = Pix::new(1, 1, Channels::Gray).unwrap();
        assert!(matches!(
            write_image_mem(&pix, ImageFormat::Unknown),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_image_mem(b"not an image"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_image("/definitely/not/here.png");
        assert!(matches!(result, Err(IoError::Io(_))));
    }
}
