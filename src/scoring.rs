//! Scoring of selected options against a question's correct letters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{option_letter, Question};

/// Total score of one attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub correct: usize,
    pub total: usize,
}

impl Scorecard {
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.correct as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Whether the selected option lines name exactly the correct letters.
///
/// Selecting nothing on a question with no correct letters counts as a match.
pub fn is_match<'a, I>(question: &Question, selected_options: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let selected: BTreeSet<&str> = selected_options.into_iter().map(option_letter).collect();
    selected.len() == question.correct_answers.len()
        && selected
            .iter()
            .all(|letter| question.correct_answers.contains(*letter))
}

/// Score an attempt. `selections[i]` holds the option indices picked for
/// question `i`; missing entries count as an empty selection.
pub fn score(questions: &[Question], selections: &[BTreeSet<usize>]) -> Scorecard {
    let empty = BTreeSet::new();
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            let picked = selections.get(*index).unwrap_or(&empty);
            is_match(question, selected_options(question, picked))
        })
        .count();

    Scorecard {
        correct,
        total: questions.len(),
    }
}

/// The option lines behind a set of option indices.
pub fn selected_options<'q>(
    question: &'q Question,
    picked: &'q BTreeSet<usize>,
) -> impl Iterator<Item = &'q str> {
    picked
        .iter()
        .filter_map(|&index| question.options.get(index).map(String::as_str))
}
