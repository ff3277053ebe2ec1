use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownFormat;

/// Convention the question text uses to mark correct options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Each question ends with an `Ans: B,C` line.
    #[default]
    Inline,
    /// Answers come in a separate `1. A; 2. B,C` block.
    Separate,
    /// Correct options are prefixed with `!`.
    Markdown,
    /// Text extracted from a .docx file, using the markdown conventions.
    Docx,
}

impl Format {
    pub const ALL: [Format; 4] = [
        Format::Inline,
        Format::Separate,
        Format::Markdown,
        Format::Docx,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Inline => "inline",
            Format::Separate => "separate",
            Format::Markdown => "markdown",
            Format::Docx => "docx",
        }
    }

    /// Whether correct answers are read from a separate answers text.
    pub fn uses_answer_list(self) -> bool {
        matches!(self, Format::Separate)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Format::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
