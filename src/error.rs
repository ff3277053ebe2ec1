//! Error types for mcq-quiz.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning question/answer text into questions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("could not parse answers: entry {position} ({chunk:?}) has no '.' after its number")]
    MalformedAnswer { position: usize, chunk: String },

    #[error("answer list has {answers} entries but there are {questions} questions")]
    AnswerCountMismatch { questions: usize, answers: usize },
}

/// Error returned when a format name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown format '{0}' (expected inline, separate, markdown or docx)")]
pub struct UnknownFormat(pub String);

/// Errors raised while reading input text files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is a binary .docx container; extract its text first", path.display())]
    BinaryDocument { path: PathBuf },

    #[error("{} is not valid UTF-8 text", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("{} contains no text", path.display())]
    Empty { path: PathBuf },
}

/// Errors raised by submission stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("store data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error parsing the question text.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Error loading question text from file.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    /// Error reading or writing stored submissions.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no questions found in the input text")]
    NoQuestions,
}
