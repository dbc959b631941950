//! `.splice` test data builders
//!
//! The library only decodes, so tests assemble their input bytes here.

use bytes::{BufMut, BytesMut};

/// One track record as it will be written
#[derive(Debug, Clone)]
pub struct TrackSpec {
    pub id: u8,
    /// Bytes 1..4 of the id slot
    pub reserved: [u8; 3],
    pub name: Vec<u8>,
    pub steps: Vec<u8>,
}

impl TrackSpec {
    pub fn new(id: u8, name: &str, steps: [u8; 16]) -> Self {
        Self {
            id,
            reserved: [0; 3],
            name: name.as_bytes().to_vec(),
            steps: steps.to_vec(),
        }
    }

    /// Size of the record once written
    pub fn len(&self) -> usize {
        4 + 1 + self.name.len() + self.steps.len()
    }

    fn write(&self, buffer: &mut BytesMut) {
        buffer.put_u8(self.id);
        buffer.put_slice(&self.reserved);
        buffer.put_u8(self.name.len() as u8);
        buffer.put_slice(&self.name);
        buffer.put_slice(&self.steps);
    }
}

/// Builder for complete `.splice` files with a fluent API
#[derive(Debug, Clone)]
pub struct SpliceBuilder {
    magic: Vec<u8>,
    hardware_revision: Vec<u8>,
    tempo: f32,
    tracks: Vec<TrackSpec>,
    body_length: Option<u64>,
    trailing: Vec<u8>,
}

impl Default for SpliceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SpliceBuilder {
    pub fn new() -> Self {
        Self {
            magic: b"SPLICE".to_vec(),
            hardware_revision: b"0.808-alpha".to_vec(),
            tempo: 120.0,
            tracks: Vec::new(),
            body_length: None,
            trailing: Vec::new(),
        }
    }

    pub fn magic(mut self, magic: &[u8]) -> Self {
        self.magic = magic.to_vec();
        self
    }

    /// Raw revision bytes, zero padded to 32 when written
    pub fn hardware_revision(mut self, revision: &[u8]) -> Self {
        assert!(revision.len() <= 32, "hardware revision is a 32-byte field");
        self.hardware_revision = revision.to_vec();
        self
    }

    pub fn tempo(mut self, tempo: f32) -> Self {
        self.tempo = tempo;
        self
    }

    pub fn track(mut self, track: TrackSpec) -> Self {
        self.tracks.push(track);
        self
    }

    /// Override the computed body length
    pub fn body_length(mut self, length: u64) -> Self {
        self.body_length = Some(length);
        self
    }

    /// Bytes appended after the body, outside the declared length
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing = bytes.to_vec();
        self
    }

    /// Body length that exactly covers revision, tempo and every track
    pub fn computed_body_length(&self) -> u64 {
        (32 + 4 + self.tracks.iter().map(TrackSpec::len).sum::<usize>()) as u64
    }

    pub fn build_bytes(self) -> Vec<u8> {
        let mut buffer = BytesMut::new();
        buffer.put_slice(&self.magic);
        buffer.put_u64(self.body_length.unwrap_or_else(|| self.computed_body_length()));

        let mut revision = [0u8; 32];
        revision[..self.hardware_revision.len()].copy_from_slice(&self.hardware_revision);
        buffer.put_slice(&revision);
        buffer.put_f32_le(self.tempo);

        for track in &self.tracks {
            track.write(&mut buffer);
        }
        buffer.put_slice(&self.trailing);
        buffer.to_vec()
    }
}

pub const KICK_STEPS: [u8; 16] = [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0];
pub const SNARE_STEPS: [u8; 16] = [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0];
pub const HIHAT_STEPS: [u8; 16] = [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0];

/// Generators for the common shapes of pattern file
pub struct PatternGenerators;

impl PatternGenerators {
    /// Single `kick` track, steps 1,0,0,0 x4
    pub fn kick_only() -> SpliceBuilder {
        SpliceBuilder::new().track(TrackSpec::new(0, "kick", KICK_STEPS))
    }

    /// Classic 808 layout with several tracks and a wide id range
    pub fn four_piece() -> SpliceBuilder {
        SpliceBuilder::new()
            .hardware_revision(b"0.808-alpha")
            .tempo(120.0)
            .track(TrackSpec::new(0, "kick", KICK_STEPS))
            .track(TrackSpec::new(1, "snare", SNARE_STEPS))
            .track(TrackSpec::new(2, "clap", [0; 16]))
            .track(TrackSpec::new(40, "hh-open", HIHAT_STEPS))
    }

    /// Header only, no tracks
    pub fn empty() -> SpliceBuilder {
        SpliceBuilder::new().hardware_revision(b"0.909").tempo(98.4)
    }
}
