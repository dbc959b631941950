use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{SpliceError, SpliceResult},
    layout::SPLICE_LAYOUT,
    parser_config::ParserConfig,
};

/// Fixed-size part of a `.splice` file, everything before the first track
#[derive(Default, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HeaderData {
    /// Bytes following the length field, fixed fields included
    pub body_length: u64,
    pub hardware_revision: String,
    pub tempo: f32,
}

impl HeaderData {
    /// Read and check the header, in file order.
    pub fn from_bytes(data: &[u8]) -> SpliceResult<Self> {
        validate_magic(data)?;
        let body_length = read_body_length(data)?;
        let hardware_revision = read_hardware_revision(data)?;
        let tempo = read_tempo(data)?;

        Ok(HeaderData {
            body_length,
            hardware_revision,
            tempo,
        })
    }

    /// Bytes of track records that follow the fixed fields
    pub fn track_budget(&self, config: &ParserConfig) -> SpliceResult<u64> {
        track_region_budget(self.body_length, config)
    }
}

/// Fails unless `data` starts with the magic cookie.
pub fn validate_magic(data: &[u8]) -> SpliceResult<()> {
    let magic = SPLICE_LAYOUT.magic;
    let range = SPLICE_LAYOUT.magic_range.clone();

    match data.get(range) {
        Some(found) if found == magic => Ok(()),
        found => {
            let found = found.unwrap_or(data);
            Err(SpliceError::NotRecognizedFormat {
                found: String::from_utf8_lossy(found).to_string(),
            })
        },
    }
}

/// Read the big-endian body length and make sure the buffer actually holds
/// that many bytes after the length field.
pub fn read_body_length(data: &[u8]) -> SpliceResult<u64> {
    let range = SPLICE_LAYOUT.body_length_range.clone();
    let end = range.end;
    let field = data
        .get(range)
        .ok_or_else(|| SpliceError::InsufficientHeaderData {
            field: "body_length".to_string(),
            needed: end,
            available: data.len(),
        })?;
    let body_length = BigEndian::read_u64(field);

    let remaining = data.len() - end;
    if (remaining as u64) < body_length {
        return Err(SpliceError::TruncatedFile {
            expected: body_length,
            actual: remaining,
        });
    }

    Ok(body_length)
}

/// Track-region size derived from the body length.
///
/// The body length also counts the hardware revision and tempo, so those are
/// subtracted once here.
pub fn track_region_budget(body_length: u64, config: &ParserConfig) -> SpliceResult<u64> {
    let fixed = SPLICE_LAYOUT.fixed_fields_len();
    match body_length.checked_sub(fixed as u64) {
        Some(budget) => Ok(budget),
        None if config.is_strict() => Err(SpliceError::UnderrunTrackRegion {
            declared: body_length,
            required: fixed,
        }),
        None => {
            tracing::warn!(
                body_length,
                required = fixed,
                "body length does not cover the fixed header fields, reading no tracks"
            );
            Ok(0)
        },
    }
}

/// Hardware revision text with trailing zero padding removed.
///
/// Only trailing NUL bytes go; leading or interior ones and whitespace stay.
pub fn read_hardware_revision(data: &[u8]) -> SpliceResult<String> {
    let range = SPLICE_LAYOUT.hardware_revision_range.clone();
    let end = range.end;
    let raw = data
        .get(range)
        .ok_or_else(|| SpliceError::InsufficientHeaderData {
            field: "hardware_revision".to_string(),
            needed: end,
            available: data.len(),
        })?;

    let text_len = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    Ok(String::from_utf8_lossy(&raw[..text_len]).into_owned())
}

pub fn read_tempo(data: &[u8]) -> SpliceResult<f32> {
    let range = SPLICE_LAYOUT.tempo_range.clone();
    let end = range.end;
    let raw = data
        .get(range)
        .ok_or_else(|| SpliceError::InsufficientHeaderData {
            field: "tempo".to_string(),
            needed: end,
            available: data.len(),
        })?;

    Ok(LittleEndian::read_f32(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_config::TrackRegionPolicy;

    /// Magic, length, revision and tempo with no track records
    fn header_bytes(body_length: u64, revision: &[u8], tempo: f32) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"SPLICE");
        buf.extend_from_slice(&body_length.to_be_bytes());
        let mut rev = [0u8; 32];
        rev[..revision.len()].copy_from_slice(revision);
        buf.extend_from_slice(&rev);
        buf.extend_from_slice(&tempo.to_le_bytes());
        buf
    }

    #[test]
    fn test_header_from_bytes() {
        let data = header_bytes(36, b"0.808-alpha", 120.0);
        let header = HeaderData::from_bytes(&data).unwrap();
        assert_eq!(header.body_length, 36);
        assert_eq!(header.hardware_revision, "0.808-alpha");
        assert_eq!(header.tempo, 120.0);
        assert_eq!(header.track_budget(&ParserConfig::default()).unwrap(), 0);
    }

    #[test]
    fn test_validate_magic_mismatch() {
        let mut data = header_bytes(36, b"0.808", 120.0);
        data[0] = b'X';
        let err = validate_magic(&data).unwrap_err();
        assert_eq!(
            err,
            SpliceError::NotRecognizedFormat {
                found: "XPLICE".to_string()
            }
        );
    }

    #[test]
    fn test_validate_magic_short_buffer() {
        assert!(matches!(
            validate_magic(b"SPLI"),
            Err(SpliceError::NotRecognizedFormat { found }) if found == "SPLI"
        ));
        assert!(matches!(
            validate_magic(b""),
            Err(SpliceError::NotRecognizedFormat { .. })
        ));
        // exactly the token is enough for this stage
        assert!(validate_magic(b"SPLICE").is_ok());
    }

    #[test]
    fn test_body_length_is_big_endian() {
        let mut data = b"SPLICE".to_vec();
        data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0x01, 0x02]);
        data.resize(14 + 0x0102, 0);
        assert_eq!(read_body_length(&data).unwrap(), 0x0102);
    }

    #[test]
    fn test_body_length_insufficient_header() {
        let data = b"SPLICE\x00\x00\x00";
        let err = read_body_length(data).unwrap_err();
        assert_eq!(
            err,
            SpliceError::InsufficientHeaderData {
                field: "body_length".to_string(),
                needed: 14,
                available: 9,
            }
        );
    }

    #[test]
    fn test_body_length_truncated_file() {
        let data = header_bytes(100, b"0.808", 120.0);
        let err = read_body_length(&data).unwrap_err();
        assert_eq!(
            err,
            SpliceError::TruncatedFile {
                expected: 100,
                actual: 36,
            }
        );
    }

    #[test]
    fn test_hardware_revision_strips_only_trailing_zeros() {
        let data = header_bytes(36, b"\x00v1 \x00x", 98.4);
        assert_eq!(read_hardware_revision(&data).unwrap(), "\u{0}v1 \u{0}x");

        let data = header_bytes(36, b"0.909 ", 98.4);
        assert_eq!(read_hardware_revision(&data).unwrap(), "0.909 ");

        let data = header_bytes(36, b"", 98.4);
        assert_eq!(read_hardware_revision(&data).unwrap(), "");
    }

    #[test]
    fn test_hardware_revision_full_width() {
        let data = header_bytes(36, &[b'a'; 32], 1.0);
        assert_eq!(read_hardware_revision(&data).unwrap(), "a".repeat(32));
    }

    #[test]
    fn test_tempo_is_little_endian() {
        let data = header_bytes(36, b"0.808", 98.4);
        assert_eq!(read_tempo(&data).unwrap(), 98.4f32);
    }

    #[test]
    fn test_fixed_fields_insufficient() {
        let data = header_bytes(0, b"0.808", 120.0);

        let err = read_hardware_revision(&data[..40]).unwrap_err();
        assert!(matches!(err, SpliceError::InsufficientHeaderData { field, needed: 46, available: 40 } if field == "hardware_revision"));

        let err = read_tempo(&data[..48]).unwrap_err();
        assert!(matches!(err, SpliceError::InsufficientHeaderData { field, needed: 50, available: 48 } if field == "tempo"));
    }

    #[test]
    fn test_track_region_budget() {
        let lenient = ParserConfig::default();
        assert_eq!(track_region_budget(87, &lenient).unwrap(), 51);
        assert_eq!(track_region_budget(36, &lenient).unwrap(), 0);
        assert_eq!(track_region_budget(10, &lenient).unwrap(), 0);

        let strict = ParserConfig {
            track_region_policy: TrackRegionPolicy::Strict,
            ..Default::default()
        };
        assert_eq!(track_region_budget(87, &strict).unwrap(), 51);
        assert_eq!(
            track_region_budget(10, &strict).unwrap_err(),
            SpliceError::UnderrunTrackRegion {
                declared: 10,
                required: 36,
            }
        );
    }
}
