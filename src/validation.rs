use crate::errors::{SpliceError, SpliceResult};
use crate::render::step_glyph;
use crate::{Pattern, Track};

/// Configuration for semantic checks on a decoded pattern
///
/// Decoding alone never applies these; see [`Pattern::decode_validated`].
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Lowest accepted tempo (BPM)
    pub min_tempo: f32,
    /// Highest accepted tempo (BPM)
    pub max_tempo: f32,
    /// Reject step bytes that have no display glyph
    pub require_renderable_steps: bool,
    /// Reject patterns without tracks
    pub require_tracks: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_tempo: 1.0,
            max_tempo: 999.0,
            require_renderable_steps: true,
            require_tracks: false,
        }
    }
}

/// Trait for validatable pattern components
pub trait SpliceValidate {
    fn validate(&self, config: &ValidationConfig) -> SpliceResult<()>;

    fn quick_validate(&self) -> SpliceResult<()> {
        self.validate(&ValidationConfig::default())
    }
}

impl SpliceValidate for Track {
    fn validate(&self, config: &ValidationConfig) -> SpliceResult<()> {
        if !config.require_renderable_steps {
            return Ok(());
        }
        for (step, &value) in self.steps().iter().enumerate() {
            if step_glyph(value).is_none() {
                return Err(SpliceError::InvalidStepValue {
                    track_id: self.id(),
                    step,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl SpliceValidate for Pattern {
    fn validate(&self, config: &ValidationConfig) -> SpliceResult<()> {
        let tempo = self.tempo();
        if !tempo.is_finite() || tempo < config.min_tempo || tempo > config.max_tempo {
            return Err(SpliceError::ValidationFailed {
                field: "tempo".to_string(),
                reason: format!(
                    "{} outside {}..={}",
                    tempo, config.min_tempo, config.max_tempo
                ),
            });
        }

        if config.require_tracks && self.tracks().is_empty() {
            return Err(SpliceError::ValidationFailed {
                field: "tracks".to_string(),
                reason: "pattern has no tracks".to_string(),
            });
        }

        for track in self.tracks() {
            track.validate(config)?;
        }
        Ok(())
    }
}
