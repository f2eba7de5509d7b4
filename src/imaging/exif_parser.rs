//! Minimal EXIF/TIFF/IPTC tag reader for JPEG and TIFF files.
//!
//! Extracts exactly what the metadata reader needs and nothing more:
//! - TIFF orientation: IFD0 tag 274
//! - Embedded thumbnail: IFD1 tags 513/514 (JPEG interchange format)
//! - IPTC orientation: IIM dataset 2:131, from the APP13 Photoshop segment
//!   (JPEG) or the IPTC-NAA tag 33723 (TIFF)
//!
//! For JPEG the TIFF stream lives in the APP1 "Exif" segment; a TIFF file is
//! the stream itself. Any parse failure yields empty sources — absence of
//! metadata is never an error at this layer.

use std::path::Path;

/// Orientation tags and thumbnail bytes found in one file's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TagSources {
    /// Raw orientation code from the TIFF directory (tag 274).
    pub tiff_orientation: Option<u16>,
    /// Raw orientation code derived from IPTC-IIM Image Orientation (2:131).
    pub iptc_orientation: Option<u16>,
    /// Embedded thumbnail, as the raw JPEG bytes from IFD1.
    pub thumbnail: Option<Vec<u8>>,
}

/// Read tag sources from a file's bytes, dispatching by extension.
pub(crate) fn read_tag_sources(path: &Path, bytes: &[u8]) -> TagSources {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => from_jpeg(bytes),
        "tif" | "tiff" => {
            let mut sources = TagSources::default();
            walk_tiff(bytes, &mut sources);
            sources
        }
        _ => TagSources::default(),
    }
}

// ---------------------------------------------------------------------------
// JPEG: segment scan for APP1 (Exif) and APP13 (Photoshop/IPTC)
// ---------------------------------------------------------------------------

const EXIF_HEADER: &[u8] = b"Exif\0\0";
const PHOTOSHOP_HEADER: &[u8] = b"Photoshop 3.0\0";
const BIM_MARKER: &[u8] = b"8BIM";
const IPTC_RESOURCE_ID: u16 = 0x0404;

fn from_jpeg(data: &[u8]) -> TagSources {
    let mut sources = TagSources::default();
    if !data.starts_with(&[0xFF, 0xD8]) {
        return sources;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            break;
        }
        let marker = data[pos + 1];

        // SOS (0xDA) means entropy-coded data starts; EOI ends the file.
        if marker == 0xDA || marker == 0xD9 {
            break;
        }
        // Standalone markers carry no length field.
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }

        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if length < 2 {
            break;
        }
        let seg_start = pos + 4;
        let seg_end = (pos + 2 + length).min(data.len());
        let segment = &data[seg_start..seg_end];

        match marker {
            0xE1 if segment.starts_with(EXIF_HEADER) => {
                walk_tiff(&segment[EXIF_HEADER.len()..], &mut sources);
            }
            0xED => {
                if let Some(iim) = extract_iptc_from_8bim(segment) {
                    if sources.iptc_orientation.is_none() {
                        sources.iptc_orientation = parse_iim_orientation(iim);
                    }
                }
            }
            _ => {}
        }

        pos += 2 + length;
    }

    sources
}

// ---------------------------------------------------------------------------
// TIFF: IFD chain walk
// ---------------------------------------------------------------------------

const TAG_ORIENTATION: u16 = 274;
const TAG_IPTC_NAA: u16 = 33723;
const TAG_THUMBNAIL_OFFSET: u16 = 513;
const TAG_THUMBNAIL_LENGTH: u16 = 514;

/// Walk a TIFF stream, filling `sources` from IFD0 (orientation, IPTC-NAA)
/// and IFD1 (embedded thumbnail).
fn walk_tiff(data: &[u8], sources: &mut TagSources) {
    if data.len() < 8 {
        return;
    }

    let big_endian = match &data[0..2] {
        b"MM" => true,
        b"II" => false,
        _ => return,
    };

    let read_u16 = |offset: usize| -> Option<u16> {
        let bytes = data.get(offset..offset + 2)?;
        Some(if big_endian {
            u16::from_be_bytes([bytes[0], bytes[1]])
        } else {
            u16::from_le_bytes([bytes[0], bytes[1]])
        })
    };
    let read_u32 = |offset: usize| -> Option<u32> {
        let bytes = data.get(offset..offset + 4)?;
        Some(if big_endian {
            u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
        } else {
            u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
        })
    };

    // TIFF magic.
    if read_u16(2) != Some(42) {
        return;
    }

    // Bytes per value, by TIFF type. Entry values of 4 bytes or fewer are
    // stored inline in the offset field.
    let type_size = |typ: u16| -> usize {
        match typ {
            1 | 2 | 6 | 7 => 1, // BYTE, ASCII, SBYTE, UNDEFINED
            3 | 8 => 2,         // SHORT, SSHORT
            4 | 9 | 11 => 4,    // LONG, SLONG, FLOAT
            5 | 10 | 12 => 8,   // RATIONAL, SRATIONAL, DOUBLE
            _ => 1,
        }
    };

    let mut ifd_offset = match read_u32(4) {
        Some(offset) => offset as usize,
        None => return,
    };
    let mut ifd_index = 0usize;
    let mut thumbnail_offset = None;
    let mut thumbnail_length = None;

    while ifd_offset > 0 && ifd_index < 2 {
        let entry_count = match read_u16(ifd_offset) {
            Some(count) => count as usize,
            None => return,
        };
        let entries_start = ifd_offset + 2;

        for i in 0..entry_count {
            let entry = entries_start + i * 12;
            let (Some(tag), Some(typ), Some(count)) =
                (read_u16(entry), read_u16(entry + 2), read_u32(entry + 4))
            else {
                return;
            };
            let byte_len = count as usize * type_size(typ);
            let value_pos = if byte_len <= 4 {
                entry + 8
            } else {
                match read_u32(entry + 8) {
                    Some(offset) => offset as usize,
                    None => return,
                }
            };

            match (ifd_index, tag) {
                (0, TAG_ORIENTATION) => {
                    if sources.tiff_orientation.is_none() {
                        sources.tiff_orientation = read_u16(value_pos);
                    }
                }
                (0, TAG_IPTC_NAA) => {
                    if sources.iptc_orientation.is_none() {
                        if let Some(iim) = data.get(value_pos..value_pos + byte_len) {
                            sources.iptc_orientation = parse_iim_orientation(iim);
                        }
                    }
                }
                (1, TAG_THUMBNAIL_OFFSET) => thumbnail_offset = read_u32(value_pos),
                (1, TAG_THUMBNAIL_LENGTH) => thumbnail_length = read_u32(value_pos),
                _ => {}
            }
        }

        ifd_offset = match read_u32(entries_start + entry_count * 12) {
            Some(offset) => offset as usize,
            None => return,
        };
        ifd_index += 1;
    }

    if let (Some(offset), Some(length)) = (thumbnail_offset, thumbnail_length) {
        let (offset, length) = (offset as usize, length as usize);
        if let Some(jpeg) = data.get(offset..offset + length) {
            sources.thumbnail = Some(jpeg.to_vec());
        }
    }
}

// ---------------------------------------------------------------------------
// IPTC-IIM: Image Orientation dataset
// ---------------------------------------------------------------------------

/// Find the raw IPTC-IIM bytes inside an APP13 Photoshop 8BIM resource
/// block (resource id 0x0404).
fn extract_iptc_from_8bim(segment: &[u8]) -> Option<&[u8]> {
    let data = if segment.starts_with(PHOTOSHOP_HEADER) {
        &segment[PHOTOSHOP_HEADER.len()..]
    } else {
        segment
    };

    let mut pos = 0;
    while pos + 12 <= data.len() {
        // Each resource: "8BIM" (4) + resource_id (2) + pascal string + data_len (4) + data
        if &data[pos..pos + 4] != BIM_MARKER {
            pos += 1;
            continue;
        }
        pos += 4;

        if pos + 2 > data.len() {
            break;
        }
        let resource_id = u16::from_be_bytes([data[pos], data[pos + 1]]);
        pos += 2;

        // Pascal string: 1 byte length + string, padded to even total.
        if pos >= data.len() {
            break;
        }
        let pascal_len = data[pos] as usize;
        pos += 1 + pascal_len + ((1 + pascal_len) % 2);

        if pos + 4 > data.len() {
            break;
        }
        let res_len =
            u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]) as usize;
        pos += 4;

        if pos + res_len > data.len() {
            break;
        }
        if resource_id == IPTC_RESOURCE_ID {
            return Some(&data[pos..pos + res_len]);
        }

        pos += res_len + (res_len % 2);
    }

    None
}

/// Parse raw IPTC-IIM bytes, returning the Image Orientation dataset
/// (record 2, dataset 131) as an EXIF-style code.
///
/// IIM record format (each dataset):
///   Byte 0:    0x1C (tag marker)
///   Byte 1:    Record number
///   Byte 2:    Dataset number
///   Bytes 3-4: Data length (big-endian u16)
///   Bytes 5+:  Data
fn parse_iim_orientation(data: &[u8]) -> Option<u16> {
    let mut pos = 0;
    while pos + 5 <= data.len() {
        if data[pos] != 0x1C {
            pos += 1;
            continue;
        }

        let record = data[pos + 1];
        let dataset = data[pos + 2];
        let length = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as usize;
        pos += 5;

        if pos + length > data.len() {
            break;
        }
        if record == 2 && dataset == 131 {
            return iim_orientation_code(&data[pos..pos + length]);
        }

        pos += length;
    }

    None
}

/// Map the IIM Image Orientation value to an EXIF-style code.
///
/// Numeric content is taken as the code itself. The single-letter form maps
/// Landscape and Square to upright; Portrait to the common
/// stored-90-degrees case.
fn iim_orientation_code(value: &[u8]) -> Option<u16> {
    let text = std::str::from_utf8(value).ok()?.trim();
    if let Ok(code) = text.parse::<u16>() {
        return Some(code);
    }
    match text.bytes().next()? {
        b'L' | b'S' => Some(1),
        b'P' => Some(6),
        _ => None,
    }
}
