//! Track event model handed to the converter

use serde::Serialize;

/// Event payload, reduced to what the converter cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Meta event (tempo, track name, end of track, ...)
    Meta,
    /// Note activation; a zero velocity releases the key
    NoteOn { key: i32, velocity: u8 },
    /// Any other channel or system event
    Other,
}

/// Event with its delta time relative to the previous event in the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackEvent {
    /// Ticks since the previous event
    pub delta: u64,
    /// Event payload
    #[serde(flatten)]
    pub kind: EventKind,
}

impl TrackEvent {
    pub fn new(delta: u64, kind: EventKind) -> Self {
        Self { delta, kind }
    }

    pub fn meta(delta: u64) -> Self {
        Self::new(delta, EventKind::Meta)
    }

    pub fn note_on(delta: u64, key: i32, velocity: u8) -> Self {
        Self::new(delta, EventKind::NoteOn { key, velocity })
    }

    pub fn other(delta: u64) -> Self {
        Self::new(delta, EventKind::Other)
    }
}

/// Ordered list of events from one source track
pub type Track = Vec<TrackEvent>;
