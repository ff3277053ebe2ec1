mod format;
mod question;

pub use format::Format;
pub use question::{option_label, option_letter, Question};

/// Screen the quiz is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
    Review,
}

/// How the quiz treats correct answers while it is being taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Answers stay hidden until the whole quiz is checked.
    #[default]
    Test,
    /// Correct answers can be revealed question by question.
    Revision,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Test => Mode::Revision,
            Mode::Revision => Mode::Test,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Test => "Test",
            Mode::Revision => "Revision",
        }
    }
}
