//! Literal special-token splitting.
//!
//! Special tokens are matched verbatim with an Aho-Corasick automaton, so
//! tokens containing characters like `|`, `(` or `.` need no escaping.
//! Overlapping candidates resolve leftmost first, then longest.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::error::TokenizerError;
use crate::vocab::SpecialToken;

/// A piece of input text produced by [`SpecialMatcher::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text between special tokens, to be byte-pair encoded.
    Text(&'a str),
    /// A special token occurrence, carrying its ID.
    Special(u32),
}

/// Matcher over the registered special-token strings.
#[derive(Debug, Clone)]
pub struct SpecialMatcher {
    automaton: AhoCorasick,
    ids: Vec<u32>,
}

impl SpecialMatcher {
    /// Build a matcher; returns `Ok(None)` when there is nothing to match.
    pub fn build(tokens: &[SpecialToken]) -> Result<Option<Self>, TokenizerError> {
        if tokens.is_empty() {
            return Ok(None);
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(tokens.iter().map(|t| t.token.as_str()))?;
        let ids = tokens.iter().map(|t| t.id).collect();

        Ok(Some(Self { automaton, ids }))
    }

    /// Split `text` into special and non-special segments, in order.
    /// Empty text spans are omitted.
    pub fn split<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut last_end = 0;

        for m in self.automaton.find_iter(text) {
            if m.start() > last_end {
                segments.push(Segment::Text(&text[last_end..m.start()]));
            }
            segments.push(Segment::Special(self.ids[m.pattern().as_usize()]));
            last_end = m.end();
        }

        if last_end < text.len() {
            segments.push(Segment::Text(&text[last_end..]));
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn special(token: &str, id: u32) -> SpecialToken {
        SpecialToken {
            token: token.to_string(),
            id,
        }
    }

    #[test]
    fn test_no_tokens_builds_nothing() {
        assert!(SpecialMatcher::build(&[]).unwrap().is_none());
    }

    #[test]
    fn test_split_preserves_order() {
        let matcher = SpecialMatcher::build(&[special("<|eot|>", 300)])
            .unwrap()
            .unwrap();
        let segments = matcher.split("hi<|eot|>there<|eot|>");
        assert_eq!(
            segments,
            vec![
                Segment::Text("hi"),
                Segment::Special(300),
                Segment::Text("there"),
                Segment::Special(300),
            ]
        );
    }

    #[test]
    fn test_adjacent_specials() {
        let matcher = SpecialMatcher::build(&[special("<a>", 1), special("<b>", 2)])
            .unwrap()
            .unwrap();
        assert_eq!(
            matcher.split("<a><b><a>"),
            vec![Segment::Special(1), Segment::Special(2), Segment::Special(1)]
        );
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matcher = SpecialMatcher::build(&[special("a.*(b)|[c]", 7)])
            .unwrap()
            .unwrap();
        assert_eq!(
            matcher.split("xa.*(b)|[c]y"),
            vec![Segment::Text("x"), Segment::Special(7), Segment::Text("y")]
        );
        // Would match as a regex, must not match literally
        assert_eq!(matcher.split("ab"), vec![Segment::Text("ab")]);
    }

    #[test]
    fn test_longest_match_wins() {
        let matcher = SpecialMatcher::build(&[special("<|end|>", 1), special("<|end|>x", 2)])
            .unwrap()
            .unwrap();
        assert_eq!(
            matcher.split("<|end|>x<|end|>"),
            vec![Segment::Special(2), Segment::Special(1)]
        );
    }

    #[test]
    fn test_no_match_is_single_text_span() {
        let matcher = SpecialMatcher::build(&[special("<|eot|>", 9)])
            .unwrap()
            .unwrap();
        assert_eq!(matcher.split("plain"), vec![Segment::Text("plain")]);
        assert!(matcher.split("").is_empty());
    }
}
