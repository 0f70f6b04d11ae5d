//! Final text layout of the converted channels

use super::channel::Channel;
use super::rest::compress;
use super::token::render;
use std::io::{self, Write};

/// Line printed before each channel
pub const SEPARATOR: &str = "##";

/// Compressed text of a channel, or `None` if it never plays a note
pub fn format_channel(channel: &Channel) -> Option<String> {
    if !channel.has_notes() {
        return None;
    }
    Some(render(&compress(channel.tokens())))
}

/// Write every non-silent channel, in index order
pub fn write_tracks<W: Write>(out: &mut W, prefix: &str, tracks: &[Option<String>]) -> io::Result<()> {
    for text in tracks.iter().flatten() {
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "{}{}", prefix, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::note::Note;
    use crate::converter::pitch::PitchClass;

    #[test]
    fn test_silent_channel_dropped() {
        let mut channel = Channel::new();
        for _ in 0..8 {
            channel.write_rest(8);
        }
        assert_eq!(format_channel(&channel), None);
    }

    #[test]
    fn test_channel_compressed() {
        let mut channel = Channel::new();
        channel.write_note(&Note::new(0, 4, PitchClass::C), 8, 2);
        for _ in 0..7 {
            channel.write_rest(8);
        }
        channel.write_note(&Note::new(0, 4, PitchClass::D), 8, 2);
        assert_eq!(format_channel(&channel).as_deref(), Some("o4c8r2r4r8d8"));
    }

    #[test]
    fn test_write_tracks() {
        let tracks = vec![
            Some("o4c8".to_string()),
            None,
            Some("o3e8r8".to_string()),
        ];
        let mut out = Vec::new();
        write_tracks(&mut out, "v15t124s1", &tracks).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "##\nv15t124s1o4c8\n##\nv15t124s1o3e8r8\n"
        );
    }

    #[test]
    fn test_write_nothing() {
        let mut out = Vec::new();
        write_tracks(&mut out, "v15t124", &[None, None]).unwrap();
        assert!(out.is_empty());
    }
}
