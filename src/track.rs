use bytes::Buf;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{SpliceError, SpliceResult},
    layout::{SPLICE_LAYOUT, STEP_COUNT, TRACK_REGION_SLACK},
    parser_config::{ParserConfig, ResourceTracker},
};

/// One instrument lane of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    id: u8,
    name: String,
    /// Raw step bytes, 0 = no hit and 1 = hit. Other values are kept as read.
    steps: [u8; STEP_COUNT],
}

impl Track {
    pub fn new(id: u8, name: impl Into<String>, steps: [u8; STEP_COUNT]) -> Self {
        Track {
            id,
            name: name.into(),
            steps,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[u8; STEP_COUNT] {
        &self.steps
    }

    /// Any nonzero step byte counts as a hit here; rendering is stricter.
    pub fn is_hit(&self, step: usize) -> bool {
        self.steps.get(step).is_some_and(|&s| s != 0)
    }

    pub fn hit_count(&self) -> usize {
        self.steps.iter().filter(|&&s| s != 0).count()
    }

    /// Decode one record from the front of `data`.
    ///
    /// `offset` is the record's absolute position in the file and only feeds
    /// error reports. Returns the track and the number of bytes it occupied.
    pub fn from_bytes(data: &[u8], offset: usize) -> SpliceResult<(Track, usize)> {
        let layout = &SPLICE_LAYOUT;
        let prefix_len = layout.track_prefix_len();
        if data.len() < prefix_len {
            return Err(SpliceError::InsufficientTrackData {
                offset,
                needed: prefix_len,
                available: data.len(),
            });
        }

        let mut buf: &[u8] = data;
        let id = buf.get_u8();
        // bytes 1..4 of the id slot are reserved
        buf.advance(layout.track_id_slot - 1);
        let name_len = usize::from(buf.get_u8());

        if buf.remaining() < name_len {
            return Err(SpliceError::InsufficientTrackData {
                offset,
                needed: prefix_len + name_len,
                available: data.len(),
            });
        }
        let name = String::from_utf8_lossy(&buf[..name_len]).into_owned();
        buf.advance(name_len);

        if buf.remaining() < layout.track_step_count {
            return Err(SpliceError::TruncatedTrack {
                offset,
                expected: layout.track_step_count,
                available: buf.remaining(),
            });
        }
        let mut steps = [0u8; STEP_COUNT];
        buf.copy_to_slice(&mut steps);

        Ok((Track { id, name, steps }, layout.track_record_len(name_len)))
    }
}

/// Parse records from the track region until `budget` bytes are used up.
///
/// `data` is the whole file. The region starts at offset 50 and ends
/// [`TRACK_REGION_SLACK`] bytes past the budget (or at the end of `data`);
/// a record that does not fit in what is left of it fails the decode. The
/// budget, not a record count, decides when to stop. Returns the tracks in
/// file order and the bytes they occupied.
pub fn parse_tracks(
    data: &[u8],
    budget: u64,
    config: &ParserConfig,
) -> SpliceResult<(Vec<Track>, u64)> {
    let region_start = SPLICE_LAYOUT.track_start;
    let region_len = usize::try_from(budget)
        .unwrap_or(usize::MAX)
        .saturating_add(TRACK_REGION_SLACK);
    let region_end = region_start.saturating_add(region_len).min(data.len());
    let region = data.get(region_start..region_end).unwrap_or(&[]);

    let mut tracker = ResourceTracker::new();
    let mut tracks = Vec::new();
    let mut cursor = 0usize;

    while tracker.bytes_consumed < budget {
        let (track, len) = Track::from_bytes(&region[cursor..], region_start + cursor)?;
        tracing::debug!(
            offset = region_start + cursor,
            id = track.id,
            name = %track.name,
            len,
            "parsed track record"
        );

        tracker.track_record(config, len)?;
        cursor += len;
        tracks.push(track);
    }

    if tracker.bytes_consumed > budget {
        if config.is_strict() {
            return Err(SpliceError::OverrunTrackRegion {
                budget,
                consumed: tracker.bytes_consumed,
            });
        }
        tracing::warn!(
            budget,
            consumed = tracker.bytes_consumed,
            "last track record ends past the track budget"
        );
    }

    Ok((tracks, tracker.bytes_consumed))
}
