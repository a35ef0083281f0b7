//! PNG image format support

use crate::{IoError, IoResult};
use seedseg_core::{Channels, Pix, PixMut};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Palette and sub-byte images are expanded and 16-bit samples are
/// stripped to 8 bits by the decoder. Gray images become 1-channel;
/// color images become 3-channel with any alpha channel dropped.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG bit depth after expansion: {:?}",
            output_info.bit_depth
        )));
    }

    // (output channels, samples per decoded pixel)
    let (channels, spp) = match output_info.color_type {
        ColorType::Grayscale => (Channels::Gray, 1),
        ColorType::GrayscaleAlpha => (Channels::Gray, 2),
        ColorType::Rgb => (Channels::Rgb, 3),
        ColorType::Rgba => (Channels::Rgb, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG color type after expansion: {:?}",
                other
            )));
        }
    };

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pix_mut = PixMut::new(width, height, channels)?;
    let keep = channels.count() as usize;
    for y in 0..height {
        let src = &data[y as usize * bytes_per_row..][..width as usize * spp];
        let dst = pix_mut.row_data_mut(y);
        for (out_px, in_px) in dst.chunks_exact_mut(keep).zip(src.chunks_exact(spp)) {
            out_px.copy_from_slice(&in_px[..keep]);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 1-channel buffers are written as 8-bit grayscale, 3-channel buffers
/// as 8-bit RGB.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let color_type = match pix.channels() {
        Channels::Gray => ColorType::Grayscale,
        Channels::Rgb => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    // Rows are tightly packed, so the sample buffer is already in PNG order
    writer
        .write_image_data(pix.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
