//! Line grammars, one per input format.
//!
//! Every format agrees on what an option line looks like (`B. text`); they
//! differ only in how a line says that an option is correct.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Format;

static OPTION_PATTERN: OnceLock<Regex> = OnceLock::new();

const ANSWER_KEY_PREFIX: &str = "Ans:";
const CORRECT_MARKER: char = '!';

/// What a single trimmed, non-blank line of a question block means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// An option line. `line` has any correct marker already removed.
    Option {
        line: &'a str,
        letter: &'a str,
        marked: bool,
    },
    /// An answer key; the text after the prefix. Ends the block.
    AnswerKey(&'a str),
    /// Anything else, ignored.
    Other,
}

pub(crate) trait LineGrammar {
    fn classify<'a>(&self, line: &'a str) -> LineKind<'a>;
}

/// `Ans: B,C` closes the block.
struct InlineGrammar;

/// Options only; correctness comes from the answer list.
struct SeparateGrammar;

/// `!B. text` marks B as correct.
struct MarkedGrammar;

impl LineGrammar for InlineGrammar {
    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        match line.strip_prefix(ANSWER_KEY_PREFIX) {
            Some(rest) => LineKind::AnswerKey(rest),
            None => match_option(line, false),
        }
    }
}

impl LineGrammar for SeparateGrammar {
    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        match_option(line, false)
    }
}

impl LineGrammar for MarkedGrammar {
    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        match line.strip_prefix(CORRECT_MARKER) {
            Some(rest) => match_option(rest, true),
            None => match_option(line, false),
        }
    }
}

impl Format {
    pub(crate) fn grammar(self) -> &'static dyn LineGrammar {
        match self {
            Format::Inline => &InlineGrammar,
            Format::Separate => &SeparateGrammar,
            Format::Markdown | Format::Docx => &MarkedGrammar,
        }
    }
}

fn option_pattern() -> &'static Regex {
    OPTION_PATTERN
        .get_or_init(|| Regex::new(r"^([A-Z])\.(.*)$").expect("option pattern is valid"))
}

fn match_option(line: &str, marked: bool) -> LineKind<'_> {
    match option_pattern().captures(line).and_then(|caps| caps.get(1)) {
        Some(letter) => LineKind::Option {
            line,
            letter: letter.as_str(),
            marked,
        },
        None => LineKind::Other,
    }
}
