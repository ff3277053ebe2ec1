//! Parser for a separate answers block such as `1. A; 2. B,C; 3. D`.

use std::collections::BTreeSet;

use crate::error::ParseError;

use super::{split_letters, trim_blank};

const ENTRY_SEPARATOR: char = ';';

/// Parse an answers block into one correct-letter set per entry.
///
/// Entries are aligned to questions by position only. The number in front of
/// each entry is skipped, never checked. An entry with no `.` fails the whole
/// block. A blank entry after a final `;` is ignored.
pub fn parse_answers(answers_text: &str) -> Result<Vec<BTreeSet<String>>, ParseError> {
    let mut chunks: Vec<&str> = answers_text.split(ENTRY_SEPARATOR).collect();
    if chunks.last().is_some_and(|chunk| trim_blank(chunk).is_empty()) {
        chunks.pop();
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| match chunk.split_once('.') {
            Some((_number, letters)) => Ok(split_letters(letters)),
            None => Err(ParseError::MalformedAnswer {
                position: index + 1,
                chunk: trim_blank(chunk).to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_single_letters() {
        let answers = parse_answers("1. A; 2. B").unwrap();
        assert_eq!(answers, vec![set(&["A"]), set(&["B"])]);
    }

    #[test]
    fn parse_multiple_letters_per_entry() {
        let answers = parse_answers("1. A, C ;2.B,D").unwrap();
        assert_eq!(answers, vec![set(&["A", "C"]), set(&["B", "D"])]);
    }

    #[test]
    fn numbers_are_not_validated() {
        let answers = parse_answers("7. A; 3. B; x. C").unwrap();
        assert_eq!(answers, vec![set(&["A"]), set(&["B"]), set(&["C"])]);
    }

    #[test]
    fn everything_after_first_period_is_kept() {
        let answers = parse_answers("1. A.B").unwrap();
        assert_eq!(answers, vec![set(&["A.B"])]);
    }

    #[test]
    fn trailing_separator_is_ignored() {
        let answers = parse_answers("1. A; 2. B;\n").unwrap();
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn blank_text_gives_no_entries() {
        assert!(parse_answers("").unwrap().is_empty());
        assert!(parse_answers("   \n").unwrap().is_empty());
    }

    #[test]
    fn reject_entry_without_period() {
        let result = parse_answers("garbage");
        assert_eq!(
            result,
            Err(ParseError::MalformedAnswer {
                position: 1,
                chunk: "garbage".to_string(),
            })
        );
    }

    #[test]
    fn reject_blank_entry_in_the_middle() {
        let result = parse_answers("1. A;; 3. C");
        assert!(matches!(
            result,
            Err(ParseError::MalformedAnswer { position: 2, .. })
        ));
    }

    #[test]
    fn empty_letters_are_dropped() {
        let answers = parse_answers("1. A,; 2.").unwrap();
        assert_eq!(answers, vec![set(&["A"]), set(&[])]);
    }
}
