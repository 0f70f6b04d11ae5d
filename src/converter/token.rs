//! MML tokens written into channels

use super::pitch::PitchClass;
use std::fmt;

/// Octave change written before a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctaveShift {
    /// `>` repeated
    Up(u32),
    /// `<` repeated
    Down(u32),
    /// `o<n>`
    Absolute(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Octave(OctaveShift),
    Note { class: PitchClass, length: u32 },
    Rest(u32),
}

impl Token {
    pub fn is_rest(&self) -> bool {
        matches!(self, Token::Rest(_))
    }

    /// Length of the rendered text in bytes
    pub fn text_len(&self) -> usize {
        match self {
            Token::Octave(OctaveShift::Up(n)) | Token::Octave(OctaveShift::Down(n)) => {
                *n as usize
            }
            Token::Octave(OctaveShift::Absolute(octave)) => {
                1 + usize::from(*octave < 0) + decimal_len(octave.unsigned_abs())
            }
            Token::Note { class, length } => class.as_str().len() + decimal_len(*length),
            Token::Rest(length) => 1 + decimal_len(*length),
        }
    }
}

fn decimal_len(value: u32) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Octave(OctaveShift::Up(n)) => {
                for _ in 0..*n {
                    f.write_str(">")?;
                }
                Ok(())
            }
            Token::Octave(OctaveShift::Down(n)) => {
                for _ in 0..*n {
                    f.write_str("<")?;
                }
                Ok(())
            }
            Token::Octave(OctaveShift::Absolute(octave)) => write!(f, "o{}", octave),
            Token::Note { class, length } => write!(f, "{}{}", class, length),
            Token::Rest(length) => write!(f, "r{}", length),
        }
    }
}

/// Render a token sequence as MML text
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_string()).collect()
}
