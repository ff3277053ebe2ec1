use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Mode, Question};

const MARGIN: u16 = 2;

/// Each option is followed by a blank spacer line.
const LINES_PER_OPTION: usize = 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let question_index = app.current_question_index();
    let chunks = create_layout(area, &question.text);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], &question.text);

    let revealed = app.is_revealed(question_index);
    let lines = option_lines(question, |option_index| {
        let is_cursor = option_index == app.selected_option();
        let style = if revealed && question.is_correct_option(option_index) {
            Style::default().fg(Color::Yellow).bold()
        } else if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        OptionLook {
            cursor: is_cursor,
            picked: app.is_selected(question_index, option_index),
            style,
        }
    });
    render_options(frame, chunks[2], lines, app.selected_option());

    render_controls(frame, chunks[3], app.mode());
}

/// How a single option line is drawn.
pub(super) struct OptionLook {
    pub cursor: bool,
    pub picked: bool,
    pub style: Style,
}

/// Progress, question text, options and controls. The question area is as
/// tall as its wrapped text, up to half of the screen.
pub(super) fn create_layout(area: Rect, question_text: &str) -> std::rc::Rc<[Rect]> {
    let width = area.width.saturating_sub(2 * MARGIN);
    let max_rows = (area.height.saturating_sub(2 * MARGIN + 2) / 2).max(1);
    let question_rows = wrapped_rows(&Text::raw(question_text).lines, width).clamp(1, max_rows);

    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(question_rows + 1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(MARGIN)
    .split(area)
}

/// Rows `lines` take up once wrapped to `width` columns.
fn wrapped_rows(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Vertical scroll that keeps the option at `cursor` fully on screen.
fn option_scroll(lines: &[Line], cursor: usize, area: Rect) -> u16 {
    let first = cursor * LINES_PER_OPTION;
    let Some(line) = lines.get(first) else {
        return 0;
    };
    let bottom = wrapped_rows(&lines[..first], area.width)
        + wrapped_rows(std::slice::from_ref(line), area.width);
    bottom.saturating_sub(area.height)
}

pub(super) fn render_options(frame: &mut Frame, area: Rect, lines: Vec<Line>, cursor: usize) {
    let scroll = option_scroll(&lines, cursor, area);
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "{} mode  ·  {}/{}",
        app.mode().label(),
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

pub(super) fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

pub(super) fn option_lines<'q>(
    question: &'q Question,
    look: impl Fn(usize) -> OptionLook,
) -> Vec<Line<'q>> {
    if question.options.is_empty() {
        return vec![Line::from(Span::styled(
            "   (no options found for this question)",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let OptionLook {
            cursor,
            picked,
            style,
        } = look(index);
        let marker = if cursor { ">" } else { " " };
        let check = if picked { "[x]" } else { "[ ]" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{} ", check), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    lines
}

fn render_controls(frame: &mut Frame, area: Rect, mode: Mode) {
    let hint = match mode {
        Mode::Test => "j/k move  ·  space pick  ·  h/l question  ·  c check  ·  tab mode  ·  q quit",
        Mode::Revision => "j/k move  ·  space pick  ·  h/l question  ·  s show answers  ·  tab mode  ·  q quit",
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    fn long_quiz(options: usize) -> App {
        let options = (0..options)
            .map(|i| format!("{}. option {}", char::from(b'A' + i as u8), i))
            .collect();
        let question = Question::new("Pick one", options, ["A".to_string()].into());
        let mut app = App::with_questions(vec![question]);
        app.start_quiz();
        app
    }

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, app);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_wrapped_rows() {
        let lines = vec![Line::raw("abcdefghij"), Line::raw(""), Line::raw("abc")];
        assert_eq!(wrapped_rows(&lines, 4), 3 + 1 + 1);
        assert_eq!(wrapped_rows(&lines, 10), 3);
        assert_eq!(wrapped_rows(&lines, 0), 10 + 1 + 3);
    }

    #[test]
    fn test_option_scroll_follows_cursor() {
        let app = long_quiz(20);
        let lines = option_lines(app.current_question(), |_| OptionLook {
            cursor: false,
            picked: false,
            style: Style::default(),
        });
        let area = Rect::new(0, 0, 40, 10);

        assert_eq!(option_scroll(&lines, 0, area), 0);
        assert_eq!(option_scroll(&lines, 4, area), 0);
        // Option 5 starts on row 10, one past the bottom.
        assert_eq!(option_scroll(&lines, 5, area), 1);
        assert_eq!(option_scroll(&lines, 19, area), 29);
    }

    #[test]
    fn test_last_option_is_visible_when_selected() {
        let mut app = long_quiz(20);
        app.select_previous_option();
        assert_eq!(app.selected_option(), 19);

        let screen = screen(&app, 40, 16);
        assert!(screen.contains("option 19"));
        assert!(!screen.contains("option 0 "));
    }

    #[test]
    fn test_long_option_wraps() {
        let tail = "visible-tail";
        let option = format!("A. {} {}", "word ".repeat(12), tail);
        let question = Question::new("Q?", vec![option], ["A".to_string()].into());
        let mut app = App::with_questions(vec![question]);
        app.start_quiz();

        assert!(screen(&app, 40, 16).contains(tail));
    }
}
