use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::{App, Feedback};

const CHOICE_LABELS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };
    let has_code = question.code.is_some();
    let chunks = create_layout(area, has_code);

    render_header(frame, chunks[0], app);
    render_time_bar(frame, chunks[1], app);
    render_question_text(frame, chunks[2], &question.text);

    let choices_chunk = if has_code {
        render_code_block(frame, chunks[3], question.code.as_deref().unwrap_or(""));
        chunks[4]
    } else {
        chunks[3]
    };

    let choice_lines: Vec<&str> = question
        .choices
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    render_choices(
        frame,
        choices_chunk,
        &choice_lines,
        app.selected_choice(),
        app.feedback(),
    );

    let feedback_chunk = if has_code { chunks[5] } else { chunks[4] };
    render_feedback(frame, feedback_chunk, app);

    let controls_chunk = if has_code { chunks[6] } else { chunks[5] };
    render_controls(frame, controls_chunk, app);
}

fn create_layout(area: Rect, has_code: bool) -> std::rc::Rc<[Rect]> {
    if has_code {
        Layout::vertical([
            Constraint::Length(1),  // header
            Constraint::Length(1),  // time bar
            Constraint::Length(3),  // question text
            Constraint::Length(7),  // code block
            Constraint::Min(6),     // choices
            Constraint::Length(5),  // feedback
            Constraint::Length(1),  // controls
        ])
        .margin(1)
        .split(area)
    } else {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(area)
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let score = Paragraph::new(format!("Score : {}", app.score()))
        .alignment(Alignment::Left)
        .fg(Color::Cyan)
        .bold();
    frame.render_widget(score, halves[0]);

    let progress = format!("{}/{}", app.question_number(), app.total_questions());
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, halves[1]);
}

fn render_time_bar(frame: &mut Frame, area: Rect, app: &App) {
    let fraction = app.time_fraction().clamp(0.0, 1.0);
    let color = match fraction {
        f if f > 0.5 => Color::Green,
        f if f > 0.2 => Color::Yellow,
        _ => Color::Red,
    };

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .ratio(fraction)
        .label(format!("{}s", app.time_seconds()));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_code_block(frame: &mut Frame, area: Rect, code: &str) {
    let code_lines: Vec<Line> = code
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Yellow))))
        .collect();

    let widget = Paragraph::new(code_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_choices(
    frame: &mut Frame,
    area: Rect,
    labels: &[&str],
    selected: usize,
    feedback: Option<&Feedback>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(labels.len() * 2);

    for (index, label) in labels.iter().enumerate() {
        let is_selected = index == selected;
        let style = match feedback {
            // After grading, color the picked choice by its outcome.
            Some(f) if is_selected && !f.timed_out => {
                let color = if f.is_correct { Color::Green } else { Color::Red };
                Style::default().fg(color).bold()
            }
            Some(_) => Style::default().fg(Color::DarkGray),
            None if is_selected => Style::default().fg(Color::Cyan).bold(),
            None => Style::default().fg(Color::Gray),
        };
        let marker = if is_selected && feedback.is_none() {
            ">"
        } else {
            " "
        };

        let letter = CHOICE_LABELS.get(index).copied().unwrap_or('?');
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", letter), style),
            Span::styled(*label, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    let Some(feedback) = app.feedback() else {
        return;
    };

    let (verdict, color) = if feedback.is_correct {
        ("Bonne réponse", Color::Green)
    } else if feedback.timed_out {
        ("Temps écoulé — aucune réponse", Color::Red)
    } else {
        ("Mauvaise réponse", Color::Red)
    };

    let content = vec![
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(feedback.explanation.as_str().fg(Color::Gray)),
    ];

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.feedback().is_some() {
        if app.on_last_question() {
            "entrée terminer  ·  q quitter"
        } else {
            "entrée suivant  ·  q quitter"
        }
    } else {
        "j/k choisir  ·  entrée valider  ·  q quitter"
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
