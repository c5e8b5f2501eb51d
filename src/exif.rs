//! Minimal EXIF orientation reader for JPEG and TIFF files.
//!
//! Extracts a single field: the orientation tag (0x0112, values 1-8) that
//! records how the camera was held when the picture was taken.
//!
//! For JPEG: reads from the APP1 marker (`Exif\0\0` header + embedded TIFF).
//! For TIFF: walks the IFD chain directly.
//!
//! Zero external dependencies — pure Rust. Any parse failure yields `None`;
//! a missing or malformed tag is treated the same as an untagged image.

const ORIENTATION_TAG: u16 = 0x0112;

/// Upper bound on the IFD chain walk. A malformed next-IFD pointer can form
/// a cycle; real files carry only a handful of IFDs.
const MAX_IFD_CHAIN: usize = 8;

/// Read the EXIF orientation from encoded image bytes.
///
/// Returns `Some(1..=8)` when a valid tag is present, `None` otherwise.
/// Dispatches on the container signature, not the file extension.
pub fn orientation_from_bytes(data: &[u8]) -> Option<u8> {
    if data.starts_with(&[0xFF, 0xD8]) {
        orientation_from_jpeg(data)
    } else if data.starts_with(b"II") || data.starts_with(b"MM") {
        orientation_from_tiff(data)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// JPEG: locate the APP1 Exif segment
// ---------------------------------------------------------------------------

const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// Scan JPEG markers for APP1 (0xFF 0xE1) carrying an Exif payload.
fn orientation_from_jpeg(data: &[u8]) -> Option<u8> {
    let mut pos = 2; // skip SOI
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        // SOS means entropy-coded image data starts — no metadata past here
        if marker == 0xDA {
            return None;
        }
        // Standalone markers without a length field
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }
        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if seg_len < 2 {
            return None;
        }
        let seg_start = pos + 4;
        let seg_end = (pos + 2 + seg_len).min(data.len());

        if marker == 0xE1 {
            let segment = &data[seg_start..seg_end];
            if let Some(tiff) = segment.strip_prefix(EXIF_HEADER) {
                return orientation_from_tiff(tiff);
            }
        }

        pos += 2 + seg_len;
    }
    None
}

// ---------------------------------------------------------------------------
// TIFF: walk the IFD chain for tag 0x0112
// ---------------------------------------------------------------------------

/// Read the orientation tag from a TIFF structure (bare file or Exif payload).
fn orientation_from_tiff(data: &[u8]) -> Option<u8> {
    if data.len() < 8 {
        return None;
    }

    let big_endian = match &data[0..2] {
        b"MM" => true,
        b"II" => false,
        _ => return None,
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

    // TIFF magic
    if read_u16(2)? != 42 {
        return None;
    }

    let mut ifd_offset = read_u32(4)? as usize;

    for _ in 0..MAX_IFD_CHAIN {
        if ifd_offset == 0 || ifd_offset + 2 > data.len() {
            return None;
        }
        let entry_count = read_u16(ifd_offset)? as usize;
        let entries_start = ifd_offset + 2;

        for i in 0..entry_count {
            let entry = entries_start + i * 12;
            let tag = read_u16(entry)?;
            let typ = read_u16(entry + 2)?;
            let count = read_u32(entry + 4)?;

            // Orientation is a single SHORT; its value is stored inline in
            // the 4-byte value field, endian-ordered like everything else.
            if tag == ORIENTATION_TAG && typ == 3 && count == 1 {
                let value = read_u16(entry + 8)? as u8;
                return (1..=8).contains(&value).then_some(value);
            }
        }

        let next = entries_start + entry_count * 12;
        ifd_offset = read_u32(next)? as usize;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal TIFF holding only the orientation tag.
    fn tiff_with_orientation(value: u8, big_endian: bool) -> Vec<u8> {
        let mut out = Vec::new();
        let u16b = |v: u16| {
            if big_endian {
                v.to_be_bytes()
            } else {
                v.to_le_bytes()
            }
        };
        let u32b = |v: u32| {
            if big_endian {
                v.to_be_bytes()
            } else {
                v.to_le_bytes()
            }
        };

        out.extend_from_slice(if big_endian { b"MM" } else { b"II" });
        out.extend_from_slice(&u16b(42));
        out.extend_from_slice(&u32b(8)); // IFD starts right after the header
        out.extend_from_slice(&u16b(1)); // one entry
        out.extend_from_slice(&u16b(ORIENTATION_TAG));
        out.extend_from_slice(&u16b(3)); // SHORT
        out.extend_from_slice(&u32b(1)); // count
        out.extend_from_slice(&u16b(value as u16));
        out.extend_from_slice(&u16b(0)); // value field padding
        out.extend_from_slice(&u32b(0)); // no next IFD
        out
    }

    #[test]
    fn tiff_little_endian() {
        let data = tiff_with_orientation(6, false);
        assert_eq!(orientation_from_bytes(&data), Some(6));
    }

    #[test]
    fn tiff_big_endian() {
        let data = tiff_with_orientation(8, true);
        assert_eq!(orientation_from_bytes(&data), Some(8));
    }

    #[test]
    fn out_of_range_value_is_ignored() {
        let data = tiff_with_orientation(9, false);
        assert_eq!(orientation_from_bytes(&data), None);
    }

    #[test]
    fn jpeg_app1_payload() {
        let tiff = tiff_with_orientation(3, true);
        let mut jpeg = vec![0xFF, 0xD8];
        let seg_len = (2 + EXIF_HEADER.len() + tiff.len()) as u16;
        jpeg.extend_from_slice(&[0xFF, 0xE1]);
        jpeg.extend_from_slice(&seg_len.to_be_bytes());
        jpeg.extend_from_slice(EXIF_HEADER);
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);

        assert_eq!(orientation_from_bytes(&jpeg), Some(3));
    }

    #[test]
    fn jpeg_without_app1() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xD9];
        assert_eq!(orientation_from_bytes(&jpeg), None);
    }

    #[test]
    fn non_image_bytes() {
        assert_eq!(orientation_from_bytes(b"not an image"), None);
        assert_eq!(orientation_from_bytes(&[]), None);
    }

    #[test]
    fn cyclic_ifd_chain_terminates_with_none() {
        // One IFD without the orientation tag whose next-IFD pointer loops
        // back to itself. The walk must give up, not spin.
        let mut data = Vec::new();
        data.extend_from_slice(b"II");
        data.extend_from_slice(&42u16.to_le_bytes());
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&0x0100u16.to_le_bytes()); // ImageWidth, not orientation
        data.extend_from_slice(&3u16.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&640u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&8u32.to_le_bytes()); // next IFD: back to the first

        assert_eq!(orientation_from_bytes(&data), None);
    }

    #[test]
    fn truncated_tiff_is_none() {
        let mut data = tiff_with_orientation(6, false);
        data.truncate(10);
        assert_eq!(orientation_from_bytes(&data), None);
    }
}
