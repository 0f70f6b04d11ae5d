//! Rest compression
//!
//! Adjacent pairs of equal rests are merged into the next coarser rest, one
//! level at a time from 64th rests up to whole rests. Each level is a single
//! left-to-right pass, so `r8r8r8` becomes `r4r8`, never anything shorter.

use super::token::Token;

/// Rest lengths that get paired, finest first
pub const LEVELS: [u32; 6] = [64, 32, 16, 8, 4, 2];

/// Run of identical tokens
type Run = (Token, usize);

fn push_run(runs: &mut Vec<Run>, token: Token, count: usize) {
    if count == 0 {
        return;
    }
    match runs.last_mut() {
        Some((last, n)) if *last == token => *n += count,
        _ => runs.push((token, count)),
    }
}

fn compress_runs<'a, I>(tokens: I) -> Vec<Run>
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut runs = Vec::new();
    for token in tokens {
        push_run(&mut runs, *token, 1);
    }

    for level in LEVELS {
        let rest = Token::Rest(level);
        let mut next = Vec::with_capacity(runs.len());
        for (token, count) in runs {
            if token == rest && count >= 2 {
                push_run(&mut next, Token::Rest(level / 2), count / 2);
                push_run(&mut next, rest, count % 2);
            } else {
                push_run(&mut next, token, count);
            }
        }
        runs = next;
    }

    runs
}

/// Compress a token sequence
pub fn compress(tokens: &[Token]) -> Vec<Token> {
    compress_runs(tokens)
        .into_iter()
        .flat_map(|(token, count)| std::iter::repeat(token).take(count))
        .collect()
}

/// Rendered length of `tokens` after compression, without building the result
pub fn compressed_len<'a, I>(tokens: I) -> usize
where
    I: IntoIterator<Item = &'a Token>,
{
    compress_runs(tokens)
        .iter()
        .map(|(token, count)| token.text_len() * count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::pitch::PitchClass;
    use crate::converter::token::render;

    fn rests(length: u32, count: usize) -> Vec<Token> {
        vec![Token::Rest(length); count]
    }

    /// Text-level reference: the same six replacements done on strings
    fn compress_text(text: &str) -> String {
        let mut text = text.to_string();
        for level in LEVELS {
            let pair = format!("r{}r{}", level, level);
            text = text.replace(&pair, &format!("r{}", level / 2));
        }
        text
    }

    #[test]
    fn test_powers_of_two_collapse() {
        for (count, expected) in [(2, 32), (4, 16), (8, 8), (16, 4), (32, 2), (64, 1)] {
            assert_eq!(compress(&rests(64, count)), vec![Token::Rest(expected)]);
        }
        assert_eq!(compress(&rests(8, 8)), vec![Token::Rest(1)]);
    }

    #[test]
    fn test_odd_runs() {
        assert_eq!(render(&compress(&rests(8, 3))), "r4r8");
        assert_eq!(render(&compress(&rests(8, 5))), "r2r8");
        assert_eq!(render(&compress(&rests(8, 7))), "r2r4r8");
        assert_eq!(render(&compress(&rests(8, 6))), "r2r4");
    }

    #[test]
    fn test_whole_rests_do_not_merge() {
        assert_eq!(render(&compress(&rests(8, 16))), "r1r1");
        assert_eq!(render(&compress(&rests(8, 17))), "r1r1r8");
    }

    #[test]
    fn test_merges_across_levels() {
        let tokens = [Token::Rest(4), Token::Rest(8), Token::Rest(8)];
        assert_eq!(render(&compress(&tokens)), "r2");
    }

    #[test]
    fn test_notes_break_runs() {
        let note = Token::Note { class: PitchClass::C, length: 8 };
        let mut tokens = rests(8, 3);
        tokens.push(note);
        tokens.extend(rests(8, 2));
        assert_eq!(render(&compress(&tokens)), "r4r8c8r4");
    }

    #[test]
    fn test_idempotent() {
        let note = Token::Note { class: PitchClass::A, length: 8 };
        let mut tokens = rests(8, 13);
        tokens.push(note);
        tokens.extend(rests(8, 6));
        let once = compress(&tokens);
        assert_eq!(compress(&once), once);
    }

    #[test]
    fn test_matches_text_replacement() {
        let note = Token::Note { class: PitchClass::EFlat, length: 8 };
        for count_a in 0..20 {
            for count_b in 0..20 {
                let mut tokens = rests(8, count_a);
                tokens.push(note);
                tokens.extend(rests(8, count_b));
                let text = render(&tokens);
                assert_eq!(render(&compress(&tokens)), compress_text(&text));
                assert_eq!(compressed_len(&tokens), compress_text(&text).len());
            }
        }
    }

    #[test]
    fn test_empty() {
        assert!(compress(&[]).is_empty());
        assert_eq!(compressed_len(&[]), 0);
    }
}
