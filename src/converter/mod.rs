//! MIDI note to MML conversion
//!
//! Notes are quantized onto a fixed grid of steps. At every step each
//! channel receives either a note or a unit rest, then runs of rests are
//! folded into longer ones and silent channels are left out.

pub mod channel;
pub mod format;
pub mod note;
pub mod octave;
pub mod options;
pub mod pitch;
pub mod rest;
pub mod simulator;
pub mod token;

pub use note::Note;
pub use options::{ConvertOptions, OverflowPolicy};

use crate::error::Result;
use crate::midi::Track;
use serde::Serialize;
use simulator::Simulator;
use std::io::{self, Write};
use tracing::{info, warn};

/// Result of converting a set of notes
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Prefix written before each channel's text
    pub prefix: String,
    /// Compressed text per channel; `None` for silent channels
    pub channels: Vec<Option<String>>,
    pub steps: usize,
    pub assigned: usize,
    pub dropped: usize,
    pub unassigned: usize,
    /// Simulation stopped on the length budget before every note was written
    pub truncated: bool,
}

impl Conversion {
    /// Write the MML text: a separator line and one line per audible channel
    pub fn write_mml<W: Write>(&self, out: &mut W) -> io::Result<()> {
        format::write_tracks(out, &self.prefix, &self.channels)
    }

    pub fn to_mml(&self) -> String {
        let mut out = Vec::new();
        self.write_mml(&mut out).expect("writing to a Vec cannot fail");
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Channels that produce output
    pub fn audible_channels(&self) -> usize {
        self.channels.iter().filter(|c| c.is_some()).count()
    }
}

/// Converter state
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConvertOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert parsed MIDI tracks
    pub fn convert(&self, tracks: &[Track]) -> Result<Conversion> {
        let notes = note::materialize(tracks);
        self.convert_notes(&notes)
    }

    /// Convert an already materialized note list, in list order
    pub fn convert_notes(&self, notes: &[Note]) -> Result<Conversion> {
        let outcome = Simulator::new(notes, &self.options)?.run();

        if outcome.truncated {
            warn!(
                unassigned = outcome.unassigned,
                max_length = self.options.max_length,
                "output length limit reached, remaining notes left out"
            );
        }
        if outcome.dropped > 0 {
            warn!(dropped = outcome.dropped, "notes dropped for lack of free channels");
        }

        let channels: Vec<Option<String>> =
            outcome.channels.iter().map(format::format_channel).collect();

        let conversion = Conversion {
            prefix: self.options.line_prefix(),
            channels,
            steps: outcome.steps,
            assigned: outcome.assigned,
            dropped: outcome.dropped,
            unassigned: outcome.unassigned,
            truncated: outcome.truncated,
        };
        info!(
            notes = notes.len(),
            steps = conversion.steps,
            channels = conversion.audible_channels(),
            "conversion finished"
        );
        Ok(conversion)
    }
}
