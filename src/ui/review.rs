use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::App;

use super::quiz::{create_layout, option_lines, render_options, render_question_text, OptionLook};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let question_index = app.current_question_index();
    let chunks = create_layout(area, &question.text);

    let (verdict, color) = if app.is_answered_correctly(question_index) {
        ("correct", Color::Green)
    } else {
        ("wrong", Color::Red)
    };
    let header = Line::from(vec![
        Span::styled(verdict, Style::default().fg(color).bold()),
        Span::styled(
            format!(
                "  ·  review {}/{}",
                app.current_question_number(),
                app.total_questions()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Right), chunks[0]);

    render_question_text(frame, chunks[1], &question.text);

    let lines = option_lines(question, |option_index| {
        let picked = app.is_selected(question_index, option_index);
        let style = if question.is_correct_option(option_index) {
            Style::default().fg(Color::Green).bold()
        } else if picked {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        OptionLook {
            cursor: option_index == app.selected_option(),
            picked,
            style,
        }
    });
    render_options(frame, chunks[2], lines, app.selected_option());

    let controls = Paragraph::new("j/k move  ·  h/l question  ·  esc results  ·  r retest  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}
