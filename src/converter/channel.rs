//! Output channel state

use super::note::Note;
use super::octave::octave_prefix;
use super::token::Token;

/// One voice of the output, filled one step at a time
#[derive(Debug, Clone, Default)]
pub struct Channel {
    tokens: Vec<Token>,
    /// Octave of the last note written, `None` until the first one
    last_octave: Option<i32>,
    /// Steps written so far
    steps: usize,
}

impl Channel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn last_octave(&self) -> Option<i32> {
        self.last_octave
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Write a note, preceded by whatever octave change it needs
    pub fn write_note(&mut self, note: &Note, length: u32, jump_threshold: i32) {
        if let Some(shift) = octave_prefix(self.last_octave, note.octave, jump_threshold) {
            self.tokens.push(Token::Octave(shift));
        }
        self.tokens.push(Token::Note {
            class: note.pitch_class,
            length,
        });
        self.last_octave = Some(note.octave);
        self.steps += 1;
    }

    pub fn write_rest(&mut self, length: u32) {
        self.tokens.push(Token::Rest(length));
        self.steps += 1;
    }

    /// True if anything other than rests has been written
    pub fn has_notes(&self) -> bool {
        self.tokens.iter().any(|t| !t.is_rest())
    }
}
