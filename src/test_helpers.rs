//! Shared helpers for building synthetic image fixtures in tests.

use std::path::Path;

use image::{ImageEncoder, RgbImage};

/// Gradient test image; distinct enough per-pixel to survive lossy encodes.
pub(crate) fn rgb_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encode a gradient image as baseline JPEG bytes.
pub(crate) fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = rgb_image(width, height);
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

pub(crate) fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, jpeg_bytes(width, height)).unwrap();
}

pub(crate) fn write_png(path: &Path, width: u32, height: u32) {
    let img = rgb_image(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// JPEG with an EXIF APP1 segment carrying the given orientation code.
pub(crate) fn write_jpeg_with_orientation(path: &Path, width: u32, height: u32, code: u16) {
    let tiff = tiff_stream(code, None);
    std::fs::write(path, splice_app1(jpeg_bytes(width, height), &tiff)).unwrap();
}

/// JPEG whose EXIF IFD1 embeds a ready-made thumbnail of the given size.
pub(crate) fn write_jpeg_with_embedded_thumbnail(
    path: &Path,
    width: u32,
    height: u32,
    thumb_width: u32,
    thumb_height: u32,
) {
    let tiff = tiff_stream(1, Some(&jpeg_bytes(thumb_width, thumb_height)));
    std::fs::write(path, splice_app1(jpeg_bytes(width, height), &tiff)).unwrap();
}

/// Insert an EXIF APP1 segment right after the SOI marker.
fn splice_app1(jpeg: Vec<u8>, tiff: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Minimal little-endian TIFF stream: IFD0 with one orientation entry,
/// optionally chained to an IFD1 with an embedded thumbnail.
fn tiff_stream(orientation: u16, thumbnail: Option<&[u8]>) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 at offset 8

    tiff.extend_from_slice(&1u16.to_le_bytes()); // one entry
    tiff.extend_from_slice(&274u16.to_le_bytes()); // Orientation
    tiff.extend_from_slice(&3u16.to_le_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]); // value padding

    match thumbnail {
        None => tiff.extend_from_slice(&0u32.to_le_bytes()),
        Some(jpeg) => {
            let ifd1_offset = tiff.len() as u32 + 4;
            tiff.extend_from_slice(&ifd1_offset.to_le_bytes());

            let payload_offset = ifd1_offset + 2 + 2 * 12 + 4;
            tiff.extend_from_slice(&2u16.to_le_bytes()); // two entries
            tiff.extend_from_slice(&513u16.to_le_bytes()); // JPEGInterchangeFormat
            tiff.extend_from_slice(&4u16.to_le_bytes()); // LONG
            tiff.extend_from_slice(&1u32.to_le_bytes());
            tiff.extend_from_slice(&payload_offset.to_le_bytes());
            tiff.extend_from_slice(&514u16.to_le_bytes()); // ...Length
            tiff.extend_from_slice(&4u16.to_le_bytes());
            tiff.extend_from_slice(&1u32.to_le_bytes());
            tiff.extend_from_slice(&(jpeg.len() as u32).to_le_bytes());
            tiff.extend_from_slice(&0u32.to_le_bytes()); // no IFD2
            tiff.extend_from_slice(jpeg);
        }
    }

    tiff
}
