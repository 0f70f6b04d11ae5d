//! Conversion options

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do with ready notes that find no free channel in a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Keep them active; they are picked up again at the next step
    #[default]
    Delay,
    /// Consume them without writing anything
    Drop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConvertOptions {
    #[serde(default = "ConvertOptions::default_ticks_per_second")]
    pub ticks_per_second: u64,
    #[serde(default = "ConvertOptions::default_segment_seconds")]
    pub segment_seconds: u64,
    /// Maximum compressed length of all channels before simulation halts
    #[serde(default = "ConvertOptions::default_max_length")]
    pub max_length: usize,
    /// Duration value written after every note and unit rest
    #[serde(default = "ConvertOptions::default_note_length")]
    pub note_length: u32,
    #[serde(default = "ConvertOptions::default_channel_count")]
    pub channel_count: usize,
    /// Largest octave distance written with `<`/`>` instead of `o<n>`
    #[serde(default = "ConvertOptions::default_octave_jump_threshold")]
    pub octave_jump_threshold: i32,
    #[serde(default = "ConvertOptions::default_volume")]
    pub volume: u32,
    #[serde(default = "ConvertOptions::default_tempo")]
    pub tempo: u32,
    /// Emit `s1` after volume and tempo
    #[serde(default = "ConvertOptions::default_pan_out")]
    pub pan_out: bool,
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

impl ConvertOptions {
    /// Subdivisions of one segment; the step size is one of these
    pub const SEGMENT_DIVISIONS: u64 = 64;

    fn default_ticks_per_second() -> u64 {
        960 * 4
    }
    fn default_segment_seconds() -> u64 {
        2
    }
    fn default_max_length() -> usize {
        4750
    }
    fn default_note_length() -> u32 {
        8
    }
    fn default_channel_count() -> usize {
        10
    }
    fn default_octave_jump_threshold() -> i32 {
        2
    }
    fn default_volume() -> u32 {
        15
    }
    fn default_tempo() -> u32 {
        124
    }
    fn default_pan_out() -> bool {
        true
    }

    /// Load options from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let options: Self = serde_json::from_str(&text)?;
        options.validate()?;
        Ok(options)
    }

    /// Simulation step size in ticks (the smallest duration)
    pub fn step_size(&self) -> u64 {
        self.ticks_per_second * self.segment_seconds / Self::SEGMENT_DIVISIONS
    }

    pub fn validate(&self) -> Result<()> {
        if self.step_size() == 0 {
            return Err(Error::Config(format!(
                "step size is zero ({} ticks/s over {} s)",
                self.ticks_per_second, self.segment_seconds
            )));
        }
        if self.channel_count == 0 {
            return Err(Error::Config("channel count must be at least 1".into()));
        }
        if self.note_length == 0 {
            return Err(Error::Config("note length must be at least 1".into()));
        }
        if self.octave_jump_threshold < 0 {
            return Err(Error::Config("octave jump threshold must not be negative".into()));
        }
        Ok(())
    }

    /// Fixed configuration prefix of every output line
    pub fn line_prefix(&self) -> String {
        let mut prefix = format!("v{}t{}", self.volume, self.tempo);
        if self.pan_out {
            prefix.push_str("s1");
        }
        prefix
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            ticks_per_second: Self::default_ticks_per_second(),
            segment_seconds: Self::default_segment_seconds(),
            max_length: Self::default_max_length(),
            note_length: Self::default_note_length(),
            channel_count: Self::default_channel_count(),
            octave_jump_threshold: Self::default_octave_jump_threshold(),
            volume: Self::default_volume(),
            tempo: Self::default_tempo(),
            pan_out: Self::default_pan_out(),
            overflow: OverflowPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.step_size(), 120);
        assert_eq!(options.note_length, 8);
        assert_eq!(options.line_prefix(), "v15t124s1");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_line_prefix_without_pan() {
        let options = ConvertOptions {
            pan_out: false,
            volume: 12,
            tempo: 90,
            ..Default::default()
        };
        assert_eq!(options.line_prefix(), "v12t90");
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let options = ConvertOptions {
            ticks_per_second: 10,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_length() {
        let options = ConvertOptions {
            note_length: 0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tempo": 150, "pan-out": false, "overflow": "drop"}}"#).unwrap();

        let options = ConvertOptions::load(file.path()).unwrap();
        assert_eq!(options.tempo, 150);
        assert!(!options.pan_out);
        assert_eq!(options.overflow, OverflowPolicy::Drop);
        assert_eq!(options.max_length, 4750);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConvertOptions::load(Path::new("/nonexistent/options.json"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
