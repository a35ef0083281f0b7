//! PNM (Portable Any Map) format support
//!
//! Reads and writes PGM (P5 binary) and PPM (P6 binary) with a maxval
//! of 255. ASCII variants (P2/P3), bitmaps (P4) and 16-bit samples are
//! not supported.

use crate::{IoError, IoResult};
use seedseg_core::{Channels, Pix};
use std::io::{BufRead, Read, Write};

const MAXVAL: u32 = 255;

/// Read a PNM image (P5/P6) from a reader.
///
/// # Returns
/// A 1-channel `Pix` for P5 and a 3-channel `Pix` for P6.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let magic = next_token(&mut reader)?;
    let channels = match magic.as_str() {
        "P5" => Channels::Gray,
        "P6" => Channels::Rgb,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM magic: {other}"
            )));
        }
    };

    let width = next_number(&mut reader, "width")?;
    let height = next_number(&mut reader, "height")?;
    let maxval = next_number(&mut reader, "maxval")?;
    if maxval != MAXVAL {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {maxval}"
        )));
    }

    let len = Pix::sample_len(width, height, channels)
        .map_err(|e| IoError::InvalidData(format!("bad PNM geometry: {e}")))?;

    // Grow with the input rather than trusting the header for the allocation
    let mut data = Vec::new();
    (&mut reader).take(len as u64).read_to_end(&mut data)?;
    if data.len() != len {
        return Err(IoError::DecodeError(format!(
            "truncated PNM raster: expected {len} bytes, got {}",
            data.len()
        )));
    }

    Ok(Pix::from_raw(width, height, channels, data)?)
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P5 for 1-channel and P6 for 3-channel buffers.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let magic = match pix.channels() {
        Channels::Gray => "P5",
        Channels::Rgb => "P6",
    };
    write!(
        writer,
        "{magic}\n{} {}\n{MAXVAL}\n",
        pix.width(),
        pix.height()
    )?;
    writer.write_all(pix.data())?;
    writer.flush()?;
    Ok(())
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// Consumes exactly one whitespace byte after the token, which is what
/// separates the maxval from the raster.
fn next_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::DecodeError("unexpected end of PNM header".into()));
            }
            return Ok(token);
        }
        let c = byte[0];
        if c == b'#' && token.is_empty() {
            let mut comment = Vec::new();
            reader.read_until(b'\n', &mut comment)?;
            continue;
        }
        if c.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            return Ok(token);
        }
        token.push(c as char);
    }
}

fn next_number<R: BufRead>(reader: &mut R, field: &str) -> IoResult<u32> {
    let token = next_token(reader)?;
    token
        .parse::<u32>()
        .map_err(|_| IoError::InvalidData(format!("bad PNM {field}: {token:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pgm_roundtrip() {
        let pix = Pix::from_raw(3, 2, Channels::Gray, vec![0, 255, 0, 255, 0, 255]).unwrap();
        let mut buf = Vec::new();
        write_pnm(&pix, &mut buf).unwrap();
        assert!(buf.starts_with(b"P5\n3 2\n255\n"));

        let back = read_pnm(Cursor::new(buf)).unwrap();
        assert!(back.sizes_equal(&pix));
        assert_eq!(back.data(), pix.data());
    }

    #[test]
    fn test_ppm_with_comment() {
        let mut data = b"P6\n# made by hand\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        let pix = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(pix.channels(), Channels::Rgb);
        assert_eq!(pix.width(), 2);
        assert_eq!(pix.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_raster_starting_with_whitespace_byte() {
        // First sample is 0x0A ('\n'); only one separator byte may be eaten
        let mut data = b"P5 2 1 255\n".to_vec();
        data.extend_from_slice(&[b'\n', 7]);
        let pix = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(pix.data(), &[b'\n', 7]);
    }

    #[test]
    fn test_truncated_raster() {
        let data = b"P5\n4 4\n255\n\x00\x00".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn test_unsupported_variants() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P2\n1 1\n255\n0".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n1 1\n65535\n\x00\x00".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_bad_geometry_is_invalid_data() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n0 3\n255\n".to_vec())),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\n4294967295 4294967295\n255\n\0\0\0".to_vec())),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_header_larger_than_raster() {
        // Within the pixel limit, but the file ends long before
        let data = b"P6\n16384 16384\n255\n\x01\x02\x03".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::DecodeError(_))
        ));
    }
}
