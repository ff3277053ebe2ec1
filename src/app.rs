use std::collections::BTreeSet;

use crate::models::{AppState, Mode, Question};
use crate::scoring::{self, Scorecard};

const DEFAULT_TITLE: &str = "MCQ QUIZ";

pub struct App {
    pub state: AppState,
    title: String,
    mode: Mode,
    questions: Vec<Question>,
    current_question_index: usize,
    selected_option: usize,
    selections: Vec<BTreeSet<usize>>,
    revealed: Vec<bool>,
    scorecard: Option<Scorecard>,
    result_scroll: usize,
}

impl App {
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let num_questions = questions.len();

        Self {
            state: AppState::Welcome,
            title: DEFAULT_TITLE.to_string(),
            mode: Mode::default(),
            questions,
            current_question_index: 0,
            selected_option: 0,
            selections: vec![BTreeSet::new(); num_questions],
            revealed: vec![false; num_questions],
            scorecard: None,
            result_scroll: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_question_index]
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selections(&self) -> &[BTreeSet<usize>] {
        &self.selections
    }

    pub fn is_selected(&self, question_index: usize, option_index: usize) -> bool {
        self.selections
            .get(question_index)
            .is_some_and(|picked| picked.contains(&option_index))
    }

    pub fn is_revealed(&self, question_index: usize) -> bool {
        self.revealed.get(question_index).copied().unwrap_or(false)
    }

    pub fn scorecard(&self) -> Option<Scorecard> {
        self.scorecard
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Whether the selection for a question matches its correct letters.
    pub fn is_answered_correctly(&self, question_index: usize) -> bool {
        match (
            self.questions.get(question_index),
            self.selections.get(question_index),
        ) {
            (Some(question), Some(picked)) => {
                scoring::is_match(question, scoring::selected_options(question, picked))
            }
            _ => false,
        }
    }

    fn option_count(&self) -> usize {
        self.questions
            .get(self.current_question_index)
            .map_or(0, |question| question.options.len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Add or remove the option under the cursor from the current selection.
    pub fn toggle_selected_option(&mut self) {
        if self.selected_option >= self.option_count() {
            return;
        }
        let picked = &mut self.selections[self.current_question_index];
        if !picked.remove(&self.selected_option) {
            picked.insert(self.selected_option);
        }
    }

    pub fn next_question(&mut self) {
        if self.current_question_index + 1 < self.questions.len() {
            self.current_question_index += 1;
            self.selected_option = 0;
        }
    }

    pub fn previous_question(&mut self) {
        if self.current_question_index > 0 {
            self.current_question_index -= 1;
            self.selected_option = 0;
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Show or hide the correct options of the current question.
    /// Only available in revision mode.
    pub fn toggle_reveal(&mut self) {
        if self.mode != Mode::Revision {
            return;
        }
        if let Some(shown) = self.revealed.get_mut(self.current_question_index) {
            *shown = !*shown;
        }
    }

    pub fn start_quiz(&mut self) {
        if !self.questions.is_empty() {
            self.state = AppState::Quiz;
        }
    }

    pub fn check_answers(&mut self) {
        self.scorecard = Some(scoring::score(&self.questions, &self.selections));
        self.result_scroll = 0;
        self.state = AppState::Result;
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.questions.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Review the question at the top of the results list.
    pub fn open_review(&mut self) {
        if self.questions.is_empty() {
            return;
        }
        self.current_question_index = self.result_scroll.min(self.questions.len() - 1);
        self.selected_option = 0;
        self.state = AppState::Review;
    }

    pub fn close_review(&mut self) {
        self.result_scroll = self.current_question_index;
        self.state = AppState::Result;
    }

    /// Clear every selection, reveal and score, and start over.
    pub fn retest(&mut self) {
        let num_questions = self.questions.len();
        self.current_question_index = 0;
        self.selected_option = 0;
        self.selections = vec![BTreeSet::new(); num_questions];
        self.revealed = vec![false; num_questions];
        self.scorecard = None;
        self.result_scroll = 0;
        self.state = AppState::Quiz;
    }
}
