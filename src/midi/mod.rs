//! Standard MIDI File loading
//!
//! Parsing is delegated to `midly`; this module flattens its event types into
//! [`TrackEvent`]s and handles gzip-compressed input.

pub mod event;

pub use event::{EventKind, Track, TrackEvent};

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use midly::{MidiMessage, Smf, Timing, TrackEventKind};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

/// Gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read a MIDI file, decompressing it if it is gzipped
pub fn read_midi_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;

    let is_gzip = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("midz"))
        .unwrap_or(false);

    if is_gzip {
        let mut decoder = GzDecoder::new(file);
        let mut data = Vec::new();
        decoder.read_to_end(&mut data)?;
        return Ok(data);
    }

    let mut data = Vec::new();
    file.read_to_end(&mut data)?;

    // Check for gzip magic even if extension doesn't indicate it
    if data.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(Cursor::new(data));
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        Ok(decompressed)
    } else {
        Ok(data)
    }
}

/// Parse SMF bytes into one [`Track`] per MIDI track
pub fn parse_tracks(data: &[u8]) -> Result<Vec<Track>> {
    let smf = Smf::parse(data)?;

    if let Timing::Timecode(fps, subframe) = smf.header.timing {
        return Err(Error::UnsupportedTiming(format!(
            "SMPTE timecode ({} fps, {} subframes)",
            fps.as_int(),
            subframe
        )));
    }

    let tracks = smf
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let events: Track = track.iter().map(convert_event).collect();
            debug!(track = index, events = events.len(), "parsed MIDI track");
            events
        })
        .collect();

    Ok(tracks)
}

/// Load and parse a MIDI file in one go
pub fn load_tracks(path: &Path) -> Result<Vec<Track>> {
    let data = read_midi_file(path)?;
    parse_tracks(&data)
}

fn convert_event(event: &midly::TrackEvent) -> TrackEvent {
    let delta = event.delta.as_int() as u64;
    match event.kind {
        TrackEventKind::Meta(_) => TrackEvent::meta(delta),
        TrackEventKind::Midi {
            message: MidiMessage::NoteOn { key, vel },
            ..
        } => TrackEvent::note_on(delta, key.as_int() as i32, vel.as_int()),
        _ => TrackEvent::other(delta),
    }
}
