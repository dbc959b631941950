//! Byte layout of a `.splice` drum pattern file.
//!
//! ```text
//! offset  size  field
//! 0       6     magic cookie "SPLICE"
//! 6       8     body length (u64 big endian), counts every byte after itself
//! 14      32    hardware revision (ASCII, zero padded)
//! 46      4     tempo (f32 little endian)
//! 50      ..    track records until the body length is used up
//!
//! track record (offsets relative to the record start)
//! 0       4     id slot, only byte 0 is significant
//! 4       1     name length L
//! 5       L     name
//! 5+L     16    steps, one byte each
//! ```

use std::ops::Range;

/// Offsets and sizes of every field in a `.splice` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternLayout {
    pub magic: &'static [u8],
    pub magic_range: Range<usize>,
    pub body_length_range: Range<usize>,
    pub hardware_revision_range: Range<usize>,
    pub tempo_range: Range<usize>,
    pub track_start: usize,

    // relative to the start of a track record
    pub track_id_slot: usize,
    pub track_name_length_offset: usize,
    pub track_step_count: usize,
}

impl PatternLayout {
    pub const fn magic_len(&self) -> usize {
        self.magic_range.end - self.magic_range.start
    }

    pub const fn body_length_end(&self) -> usize {
        self.body_length_range.end
    }

    /// Bytes between the end of the length field and the first track record.
    pub const fn fixed_fields_len(&self) -> usize {
        self.track_start - self.body_length_range.end
    }

    /// Bytes of a track record that precede the name.
    pub const fn track_prefix_len(&self) -> usize {
        self.track_name_length_offset + 1
    }

    /// Total size of a record whose name is `name_len` bytes long.
    pub const fn track_record_len(&self, name_len: usize) -> usize {
        self.track_prefix_len() + name_len + self.track_step_count
    }
}

pub const MAGIC_COOKIE: &[u8; 6] = b"SPLICE";
pub const STEP_COUNT: usize = 16;

pub const BODY_LENGTH_OFFSET: usize = 6;
pub const HARDWARE_REVISION_OFFSET: usize = 14;
pub const HARDWARE_REVISION_LEN: usize = 32;
pub const TEMPO_OFFSET: usize = 46;
pub const TEMPO_LEN: usize = 4;
pub const TRACK_START: usize = 50;

pub const TRACK_ID_SLOT_LEN: usize = 4;
pub const TRACK_NAME_LENGTH_OFFSET: usize = 4;

/// Bytes past the track budget that a record may still read from. Files from
/// the hardware were read with a region one byte longer than the budget.
pub const TRACK_REGION_SLACK: usize = 1;

pub const SPLICE_LAYOUT: PatternLayout = PatternLayout {
    magic: MAGIC_COOKIE,
    magic_range: 0..BODY_LENGTH_OFFSET,
    body_length_range: BODY_LENGTH_OFFSET..HARDWARE_REVISION_OFFSET,
    hardware_revision_range: HARDWARE_REVISION_OFFSET
        ..HARDWARE_REVISION_OFFSET + HARDWARE_REVISION_LEN,
    tempo_range: TEMPO_OFFSET..TEMPO_OFFSET + TEMPO_LEN,
    track_start: TRACK_START,
    track_id_slot: TRACK_ID_SLOT_LEN,
    track_name_length_offset: TRACK_NAME_LENGTH_OFFSET,
    track_step_count: STEP_COUNT,
};
