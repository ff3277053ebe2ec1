//! Turns pasted multiple-choice text into [`Question`](crate::Question)s.

mod answers;
mod grammar;
mod questions;

use std::collections::BTreeSet;

pub use answers::parse_answers;
pub use questions::{parse_questions, parse_questions_with, ParseOptions};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Trim whitespace and byte order marks, which `str::trim` leaves in place.
fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Split `A, C` style letter lists, trimming each piece and dropping empties.
fn split_letters(text: &str) -> BTreeSet<String> {
    text.split(',')
        .map(trim_blank)
        .filter(|letter| !letter.is_empty())
        .map(str::to_string)
        .collect()
}
