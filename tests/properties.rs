use std::collections::BTreeSet;

use mcq_quiz::{parse_questions, Format, Question};
use proptest::prelude::*;

/// A generated question: prompt plus `(label, correct)` options lettered A, B, ...
#[derive(Debug, Clone)]
struct Sample {
    text: String,
    options: Vec<(String, bool)>,
}

impl Sample {
    fn letter(index: usize) -> char {
        char::from(b'A' + index as u8)
    }

    fn option_lines(&self) -> Vec<String> {
        self.options
            .iter()
            .enumerate()
            .map(|(i, (label, _))| format!("{}. {}", Self::letter(i), label))
            .collect()
    }

    fn correct(&self) -> BTreeSet<String> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, (_, correct))| *correct)
            .map(|(i, _)| Self::letter(i).to_string())
            .collect()
    }

    fn expected(&self) -> Question {
        Question::new(self.text.as_str(), self.option_lines(), self.correct())
    }
}

fn sample() -> impl Strategy<Value = Sample> {
    (
        "[a-z]{1,8}( [a-z]{1,8}){0,4}\\?",
        prop::collection::vec(("[a-z]{1,10}( [a-z]{1,6}){0,2}", any::<bool>()), 1..=6),
    )
        .prop_map(|(text, options)| Sample { text, options })
}

fn quiz() -> impl Strategy<Value = Vec<Sample>> {
    prop::collection::vec(sample(), 1..8)
}

fn letters(sample: &Sample) -> String {
    sample.correct().into_iter().collect::<Vec<_>>().join(", ")
}

fn render_inline(quiz: &[Sample]) -> String {
    let mut out = String::new();
    for (n, sample) in quiz.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", n + 1, sample.text));
        for line in sample.option_lines() {
            out.push_str(&format!("{line}\n"));
        }
        out.push_str(&format!("Ans: {}\n\n", letters(sample)));
    }
    out
}

fn render_marked(quiz: &[Sample]) -> String {
    let mut out = String::new();
    for (n, sample) in quiz.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", n + 1, sample.text));
        for (line, (_, correct)) in sample.option_lines().iter().zip(&sample.options) {
            let marker = if *correct { "!" } else { "" };
            out.push_str(&format!("{marker}{line}\n"));
        }
        out.push('\n');
    }
    out
}

fn render_separate(quiz: &[Sample]) -> (String, String) {
    let mut out = String::new();
    for (n, sample) in quiz.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", n + 1, sample.text));
        for line in sample.option_lines() {
            out.push_str(&format!("{line}\n"));
        }
        out.push('\n');
    }
    let answers = quiz
        .iter()
        .enumerate()
        .map(|(n, sample)| format!("{}. {}", n + 1, letters(sample)))
        .collect::<Vec<_>>()
        .join("; ");
    (out, answers)
}

fn render(quiz: &[Sample], format: Format) -> (String, String) {
    match format {
        Format::Inline => (render_inline(quiz), String::new()),
        Format::Separate => render_separate(quiz),
        Format::Markdown | Format::Docx => (render_marked(quiz), String::new()),
    }
}

fn any_format() -> impl Strategy<Value = Format> {
    prop::sample::select(Format::ALL.to_vec())
}

proptest! {
    #[test]
    fn every_block_becomes_one_question(quiz in quiz(), format in any_format()) {
        let (input, answers) = render(&quiz, format);
        let questions = parse_questions(&input, &answers, format).unwrap();

        let expected: Vec<Question> = quiz.iter().map(Sample::expected).collect();
        prop_assert_eq!(questions, expected);
    }

    #[test]
    fn marked_options_are_the_correct_set(quiz in quiz()) {
        let input = render_marked(&quiz);
        for format in [Format::Markdown, Format::Docx] {
            let questions = parse_questions(&input, "", format).unwrap();
            for (question, sample) in questions.iter().zip(&quiz) {
                prop_assert_eq!(&question.correct_answers, &sample.correct());
                prop_assert!(question.options.iter().all(|option| !option.starts_with('!')));
            }
        }
    }

    #[test]
    fn separate_answers_align_by_position(quiz in quiz()) {
        let (input, answers) = render_separate(&quiz);
        let questions = parse_questions(&input, &answers, Format::Separate).unwrap();
        let answer_list = mcq_quiz::parse_answers(&answers).unwrap();

        prop_assert_eq!(questions.len(), answer_list.len());
        for (question, expected) in questions.iter().zip(&answer_list) {
            prop_assert_eq!(&question.correct_answers, expected);
        }
    }

    #[test]
    fn parsing_is_idempotent(quiz in quiz(), format in any_format()) {
        let (input, answers) = render(&quiz, format);
        prop_assert_eq!(
            parse_questions(&input, &answers, format),
            parse_questions(&input, &answers, format)
        );
    }
}
