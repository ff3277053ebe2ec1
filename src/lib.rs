//! # mcq-quiz
//!
//! Turns pasted multiple-choice question text into a quiz you can take,
//! score and review in the terminal.
//!
//! Four input conventions are understood (see [`Format`]):
//!
//! - `inline`: every question ends with an `Ans: B` line;
//! - `separate`: answers come in their own `1. A; 2. B,C` block;
//! - `markdown`: correct options are prefixed with `!`;
//! - `docx`: text extracted from a Word document, marked like `markdown`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mcq_quiz::{Format, Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let text = "1. Which keyword declares a constant?\nA. let\nB. const\nAns: B";
//!     let quiz = Quiz::from_text(text, "", Format::Inline)?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The parser alone is available through [`parse_questions`] and
//! [`parse_answers`]; it does no I/O and keeps no state.

mod app;
mod data;
pub mod error;
mod models;
pub mod parser;
pub mod scoring;
pub mod store;
pub mod terminal;
mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::info;

pub use app::App;
pub use data::{load_optional_text, load_text};
pub use error::{LoadError, ParseError, QuizError, StoreError, UnknownFormat};
pub use models::{option_label, option_letter, AppState, Format, Mode, Question};
pub use parser::{parse_answers, parse_questions, parse_questions_with, ParseOptions};
pub use scoring::Scorecard;
pub use store::{JsonFileStore, MemoryStore, Submission, SubmissionStore};

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from already parsed questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            app: App::with_questions(questions),
        }
    }

    /// Parse question text into a quiz.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mcq_quiz::{Format, Quiz};
    ///
    /// let quiz = Quiz::from_text("1. Q?\nA. x\n!B. y", "", Format::Markdown).unwrap();
    /// assert_eq!(quiz.app().total_questions(), 1);
    /// ```
    pub fn from_text(
        question_text: &str,
        answer_text: &str,
        format: Format,
    ) -> Result<Self, QuizError> {
        Self::from_text_with(question_text, answer_text, format, &ParseOptions::default())
    }

    pub fn from_text_with(
        question_text: &str,
        answer_text: &str,
        format: Format,
        options: &ParseOptions,
    ) -> Result<Self, QuizError> {
        let questions = parse_questions_with(question_text, answer_text, format, options)?;
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        info!(count = questions.len(), %format, "parsed questions");
        Ok(Self::new(questions))
    }

    /// Rebuild a quiz from a stored submission, titled after it.
    pub fn from_submission(
        submission: &Submission,
        options: &ParseOptions,
    ) -> Result<Self, QuizError> {
        let quiz = Self::from_text_with(
            &submission.question_text,
            &submission.answer_text,
            submission.format,
            options,
        )?;
        Ok(quiz.with_title(submission.title.as_str()))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.app = self.app.with_title(title);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.app = self.app.with_mode(mode);
        self
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// the last checked score when the user quits.
    pub fn run(mut self) -> Result<Option<Scorecard>, QuizError> {
        let mut session = terminal::TerminalSession::enter()?;
        run_event_loop(session.terminal_mut(), &mut self.app)?;
        Ok(self.app.scorecard())
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return true;
    }

    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
        AppState::Review => handle_review_input(app, key),
    }
    false
}

fn handle_welcome_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.start_quiz(),
        KeyCode::Tab => app.toggle_mode(),
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_option(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => app.next_question(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => app.previous_question(),
        KeyCode::Tab => app.toggle_mode(),
        KeyCode::Char('s') => app.toggle_reveal(),
        KeyCode::Char('c') if app.mode() == Mode::Test => app.check_answers(),
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('v') | KeyCode::Enter => app.open_review(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retest(),
        _ => {}
    }
}

fn handle_review_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => app.next_question(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => app.previous_question(),
        KeyCode::Esc | KeyCode::Backspace => app.close_review(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retest(),
        _ => {}
    }
}
