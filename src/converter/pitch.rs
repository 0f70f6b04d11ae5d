//! Pitch code to octave / pitch class mapping

use serde::Serialize;
use std::fmt;

/// Pitch code of the first pitch class of octave 0
pub const ZERO_OCTAVE_START: i32 = 12;
/// Pitch classes per octave
pub const OCTAVE_SIZE: i32 = 12;

/// One of the twelve pitch classes, spelled with flats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PitchClass {
    C,
    DFlat,
    D,
    EFlat,
    E,
    F,
    GFlat,
    G,
    AFlat,
    A,
    BFlat,
    B,
}

impl PitchClass {
    /// All pitch classes in semitone order from C
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::DFlat,
        PitchClass::D,
        PitchClass::EFlat,
        PitchClass::E,
        PitchClass::F,
        PitchClass::GFlat,
        PitchClass::G,
        PitchClass::AFlat,
        PitchClass::A,
        PitchClass::BFlat,
        PitchClass::B,
    ];

    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(OCTAVE_SIZE) as usize]
    }

    /// MML spelling
    pub fn as_str(self) -> &'static str {
        match self {
            PitchClass::C => "c",
            PitchClass::DFlat => "d-",
            PitchClass::D => "d",
            PitchClass::EFlat => "e-",
            PitchClass::E => "e",
            PitchClass::F => "f",
            PitchClass::GFlat => "g-",
            PitchClass::G => "g",
            PitchClass::AFlat => "a-",
            PitchClass::A => "a",
            PitchClass::BFlat => "b-",
            PitchClass::B => "b",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of mapping a note activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    Note { octave: i32, class: PitchClass },
    Rest,
}

/// Map a pitch code and velocity to a pitch, or a rest when the velocity is zero
///
/// Codes outside the MIDI range are not clamped; they just land in unusual octaves.
pub fn map_pitch(code: i32, velocity: u8) -> Pitch {
    if velocity == 0 {
        return Pitch::Rest;
    }
    Pitch::Note {
        octave: code.div_euclid(OCTAVE_SIZE) - ZERO_OCTAVE_START / OCTAVE_SIZE,
        class: PitchClass::from_index(code),
    }
}
