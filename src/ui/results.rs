use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::AnswerRecord;

const QUESTION_PREVIEW_LENGTH: usize = 55;
/// Lines each answer occupies in the breakdown.
const LINES_PER_ANSWER: usize = 4;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(results) = app.results() else {
        return;
    };

    let percentage = calculate_percentage(results.score, results.total_questions);
    let grade_color = get_grade_color(percentage);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(
        frame,
        chunks[1],
        results.score,
        results.total_questions,
        percentage,
        grade_color,
    );
    render_answer_breakdown(frame, chunks[2], &results.answers, app.results_scroll());
    render_export_notice(frame, chunks[3], app);
    render_controls(frame, chunks[4]);
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    score: usize,
    total: usize,
    percentage: f64,
    grade_color: Color,
) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RÉSULTATS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Tu as obtenu {}/{} bonnes réponses  ({:.0}%)",
                score, total, percentage
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_answer_breakdown(frame: &mut Frame, area: Rect, answers: &[AnswerRecord], scroll: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(answers.len() * LINES_PER_ANSWER);

    for (index, answer) in answers.iter().enumerate() {
        let (tag, color) = if answer.is_correct() {
            ("Bonne", Color::Green)
        } else {
            ("Mauvaise", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {:8} ", tag), Style::default().fg(color).bold()),
            Span::styled(
                format!("Q{}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_question(&answer.question_text),
                Style::default().fg(Color::Gray),
            ),
        ]));

        let chosen = answer
            .chosen_value
            .as_deref()
            .unwrap_or("Aucune réponse (temps écoulé)");
        lines.push(Line::from(vec![
            Span::raw("          "),
            Span::styled("Ta réponse : ", Style::default().fg(Color::DarkGray)),
            Span::styled(chosen, Style::default().fg(Color::White)),
            Span::styled("   Correcte : ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                answer.correct_value.as_str(),
                Style::default().fg(Color::White),
            ),
        ]));

        lines.push(Line::from(vec![
            Span::raw("          "),
            Span::styled(answer.explanation(), Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll(((scroll * LINES_PER_ANSWER) as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_export_notice(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(notice) = app.export_notice() {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(widget, area);
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k défiler  ·  s sauvegarder  ·  r rejouer  ·  q quitter")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
