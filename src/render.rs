//! Text rendering of a decoded pattern.
//!
//! ```text
//! Saved with HW Version: 0.808-alpha
//! Tempo: 120
//! (0) kick	|x---|x---|x---|x---|
//! ```

use std::fmt;

use phf::phf_map;

use crate::{
    errors::{SpliceError, SpliceResult},
    layout::STEP_COUNT,
    track::Track,
    Pattern,
};

/// Glyph for each legal step byte
static STEP_GLYPHS: phf::Map<u8, char> = phf_map! {
    0u8 => '-',
    1u8 => 'x',
};

const STEPS_PER_BAR: usize = 4;

/// Shown by `Display` for a step byte with no entry in the glyph table
pub const UNKNOWN_STEP_GLYPH: char = '?';

pub fn step_glyph(value: u8) -> Option<char> {
    STEP_GLYPHS.get(&value).copied()
}

/// `|` before every fourth step and once at the end.
pub fn render_steps(track: &Track) -> SpliceResult<String> {
    let mut row = String::with_capacity(STEP_COUNT + STEP_COUNT / STEPS_PER_BAR + 1);
    for (step, &value) in track.steps().iter().enumerate() {
        if step % STEPS_PER_BAR == 0 {
            row.push('|');
        }
        let glyph = step_glyph(value).ok_or(SpliceError::InvalidStepValue {
            track_id: track.id(),
            step,
            value,
        })?;
        row.push(glyph);
    }
    row.push('|');
    Ok(row)
}

/// Same layout as [`render_steps`], with [`UNKNOWN_STEP_GLYPH`] for bytes
/// outside the glyph table.
pub fn render_steps_lossy(track: &Track) -> String {
    let mut row = String::with_capacity(STEP_COUNT + STEP_COUNT / STEPS_PER_BAR + 1);
    for (step, &value) in track.steps().iter().enumerate() {
        if step % STEPS_PER_BAR == 0 {
            row.push('|');
        }
        row.push(step_glyph(value).unwrap_or(UNKNOWN_STEP_GLYPH));
    }
    row.push('|');
    row
}

fn header_lines(pattern: &Pattern) -> String {
    format!(
        "Saved with HW Version: {}\nTempo: {}\n",
        pattern.hardware_revision(),
        format_tempo(pattern.tempo())
    )
}

pub fn render_track(track: &Track) -> SpliceResult<String> {
    Ok(format!(
        "({}) {}\t{}",
        track.id(),
        track.name(),
        render_steps(track)?
    ))
}

/// Shortest round-trip digits, switching to exponent form outside
/// `1e-4 <= |v| < 1e6`, exponent written with a sign and at least two digits.
pub fn format_tempo(tempo: f32) -> String {
    if tempo.is_nan() {
        return "NaN".to_string();
    }
    if tempo.is_infinite() {
        return if tempo > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let sci = format!("{:e}", tempo);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if tempo == 0.0 || (-4..6).contains(&exp) {
        return format!("{}", tempo);
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exp.abs())
}

pub fn render_pattern(pattern: &Pattern) -> SpliceResult<String> {
    let mut out = header_lines(pattern);
    for track in pattern.tracks() {
        out.push_str(&render_track(track)?);
        out.push('\n');
    }
    Ok(out)
}

impl fmt::Display for Pattern {
    /// Never fails; step bytes other than 0 or 1 show as
    /// [`UNKNOWN_STEP_GLYPH`]. [`Pattern::render`] rejects them instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&header_lines(self))?;
        for track in self.tracks() {
            writeln!(
                f,
                "({}) {}\t{}",
                track.id(),
                track.name(),
                render_steps_lossy(track)
            )?;
        }
        Ok(())
    }
}
