use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One parsed multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    /// Option lines as written, e.g. `"B. Favorite"`.
    pub options: Vec<String>,
    pub correct_answers: BTreeSet<String>,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answers: BTreeSet<String>,
    ) -> Self {
        Self {
            text: text.into(),
            options,
            correct_answers,
        }
    }

    /// Whether the option at `index` carries one of the correct letters.
    pub fn is_correct_option(&self, index: usize) -> bool {
        self.options
            .get(index)
            .is_some_and(|option| self.correct_answers.contains(option_letter(option)))
    }

    /// Correct letters that no option line carries.
    pub fn dangling_answers(&self) -> Vec<&str> {
        self.correct_answers
            .iter()
            .map(String::as_str)
            .filter(|letter| {
                !self
                    .options
                    .iter()
                    .any(|option| option_letter(option) == *letter)
            })
            .collect()
    }
}

/// The key of an option line: everything before its first `.`.
pub fn option_letter(option: &str) -> &str {
    option.split_once('.').map_or(option, |(letter, _)| letter)
}

/// The display text of an option line: everything after its first `.`, trimmed.
pub fn option_label(option: &str) -> &str {
    option.split_once('.').map_or("", |(_, label)| label.trim())
}
