//! Parser for the question text.
//!
//! # Format
//! ```text
//! 1. Which keyword declares a constant?
//! A. let
//! B. const
//! Ans: B
//!
//! 2. Pick the integer types
//! !A. u8
//! B. f32
//! !C. i64
//! ```
//!
//! Questions are split on their `N.` numbers. The first non-blank line of a
//! block is the question text; later lines are options or answer markers,
//! depending on the [`Format`].

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::models::{Format, Question};

use super::answers::parse_answers;
use super::grammar::{LineGrammar, LineKind};
use super::{split_letters, trim_blank};

static QUESTION_NUMBER: OnceLock<Regex> = OnceLock::new();

/// Knobs for [`parse_questions_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail when a separate answer list and the question text disagree on
    /// the number of questions, instead of aligning them by position.
    pub strict_alignment: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            strict_alignment: true,
        }
    }
}

/// Parse question text into questions using default options.
pub fn parse_questions(
    input: &str,
    answers: &str,
    format: Format,
) -> Result<Vec<Question>, ParseError> {
    parse_questions_with(input, answers, format, &ParseOptions::default())
}

/// Parse question text into questions.
///
/// `answers` is read only for [`Format::Separate`]. Any error aborts the
/// whole parse; no partial list is returned.
pub fn parse_questions_with(
    input: &str,
    answers: &str,
    format: Format,
    options: &ParseOptions,
) -> Result<Vec<Question>, ParseError> {
    let answer_list = if format.uses_answer_list() {
        Some(parse_answers(answers)?)
    } else {
        None
    };

    let blocks = split_blocks(input);

    if let Some(list) = &answer_list {
        if list.len() != blocks.len() {
            if options.strict_alignment {
                return Err(ParseError::AnswerCountMismatch {
                    questions: blocks.len(),
                    answers: list.len(),
                });
            }
            warn!(
                questions = blocks.len(),
                answers = list.len(),
                "answer list does not match question count, aligning by position"
            );
        }
    }

    let grammar = format.grammar();
    let questions = blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let mut question = parse_block(block, grammar);
            if let Some(list) = &answer_list {
                question.correct_answers = list.get(index).cloned().unwrap_or_default();
            }

            for letter in question.dangling_answers() {
                warn!(question = index + 1, letter, "answer letter without a matching option");
            }
            debug!(
                question = index + 1,
                options = question.options.len(),
                correct = question.correct_answers.len(),
                "parsed question"
            );
            question
        })
        .collect();

    Ok(questions)
}

/// Split on ASCII `N.` question numbers, dropping blank blocks.
fn split_blocks(input: &str) -> Vec<&str> {
    QUESTION_NUMBER
        .get_or_init(|| Regex::new(r"[0-9]+\.").expect("question number pattern is valid"))
        .split(input)
        .filter(|block| !trim_blank(block).is_empty())
        .collect()
}

fn parse_block(block: &str, grammar: &dyn LineGrammar) -> Question {
    let mut lines = block.lines().map(trim_blank).filter(|line| !line.is_empty());

    let text = lines.next().unwrap_or_default();
    let mut options = Vec::new();
    let mut correct_answers = BTreeSet::new();

    for line in lines {
        match grammar.classify(line) {
            LineKind::Option {
                line,
                letter,
                marked,
            } => {
                options.push(line.to_string());
                if marked {
                    correct_answers.insert(letter.to_string());
                }
            }
            LineKind::AnswerKey(letters) => {
                correct_answers = split_letters(letters);
                break;
            }
            LineKind::Other => {}
        }
    }

    Question::new(text, options, correct_answers)
}
