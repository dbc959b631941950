pub mod errors;
pub mod header;
pub mod layout;
pub mod parser_config;
pub mod render;
pub mod track;
pub mod traits;
pub mod validation;

pub use errors::*;
pub use header::HeaderData;
pub use layout::{PatternLayout, MAGIC_COOKIE, SPLICE_LAYOUT, STEP_COUNT};
pub use parser_config::*;
pub use render::{render_pattern, render_track};
pub use track::{parse_tracks, Track};
pub use traits::*;
pub use validation::*;

use std::path::Path;

use bytes::{Buf, Bytes};
use serde::{Deserialize, Serialize};

/// A decoded `.splice` drum pattern.
///
/// Built in one go by the decoder and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    hardware_revision: String,
    tempo: f32,
    tracks: Vec<Track>,
}

impl Pattern {
    pub fn new(hardware_revision: impl Into<String>, tempo: f32, tracks: Vec<Track>) -> Self {
        Pattern {
            hardware_revision: hardware_revision.into(),
            tempo,
            tracks,
        }
    }

    pub fn hardware_revision(&self) -> &str {
        &self.hardware_revision
    }

    pub fn tempo(&self) -> f32 {
        self.tempo
    }

    /// Tracks in file order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Decode the file at `path` with the default parser configuration
    pub fn from_path<P: AsRef<Path>>(path: P) -> SpliceResult<Self> {
        Self::from_path_with_config(path, &ParserConfig::default())
    }

    pub fn from_path_with_config<P: AsRef<Path>>(
        path: P,
        config: &ParserConfig,
    ) -> SpliceResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| SpliceError::from_io(e, &path.display().to_string()))?;
        tracing::debug!(path = %path.display(), size = data.len(), "read splice file");

        Self::decode_with_config(&data, config)
    }

    /// Decode a complete in-memory file with the default parser configuration
    pub fn decode(data: &[u8]) -> SpliceResult<Self> {
        Self::decode_with_config(data, &ParserConfig::default())
    }

    pub fn decode_with_config(data: &[u8], config: &ParserConfig) -> SpliceResult<Self> {
        config.check_file_size(data.len())?;
        Self::decode_internal(data, config).map(|(pattern, _)| pattern)
    }

    /// Decode, then run semantic validation on the result
    pub fn decode_validated(data: &[u8], config: ValidationConfig) -> SpliceResult<Self> {
        let pattern = Self::decode(data)?;
        pattern.validate(&config)?;
        Ok(pattern)
    }

    /// Text form of the pattern, see [`render_pattern`]
    pub fn render(&self) -> SpliceResult<String> {
        render_pattern(self)
    }

    /// Returns the pattern and the number of leading bytes of `data` it spans,
    /// the magic cookie, length field and declared body.
    fn decode_internal(data: &[u8], config: &ParserConfig) -> SpliceResult<(Self, usize)> {
        let header = HeaderData::from_bytes(data)?;
        let declared_end = usize::try_from(header.body_length)
            .ok()
            .and_then(|len| len.checked_add(SPLICE_LAYOUT.body_length_end()))
            .ok_or_else(|| SpliceError::IntegerOverflow {
                operation: "declared body end".to_string(),
                details: format!("body length {} + {}", header.body_length, SPLICE_LAYOUT.body_length_end()),
            })?;
        config.check_file_size(declared_end)?;

        let budget = header.track_budget(config)?;
        let (tracks, consumed) = parse_tracks(data, budget, config)?;

        tracing::debug!(
            hardware_revision = %header.hardware_revision,
            tempo = header.tempo,
            tracks = tracks.len(),
            budget,
            consumed,
            "decoded pattern"
        );

        let pattern = Pattern {
            hardware_revision: header.hardware_revision,
            tempo: header.tempo,
            tracks,
        };
        Ok((pattern, declared_end))
    }
}

impl SpliceParser for Pattern {
    /// Leaves any bytes after the pattern (trailing garbage, a second file) in `data`.
    fn from_bytes(data: &mut Bytes) -> SpliceResult<Self> {
        let (pattern, used) = Self::decode_internal(data, &ParserConfig::default())?;
        data.advance(used);
        Ok(pattern)
    }
}
