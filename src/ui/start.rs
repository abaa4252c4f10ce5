use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "VIVANT OU MORT",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Objets C++ : encore vivants, ou déjà détruits ?".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(
            format!(
                "{} questions · {}s par question",
                app.total_questions(),
                app.seconds_per_question()
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "ENTRÉE",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("pour commencer".fg(Color::DarkGray)),
        Line::from(""),
        Line::from("r règles  ·  q quitter".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

pub fn render_rules(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(13),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(Span::styled(
            "RÈGLES",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Chaque question montre un extrait de code C++."),
        Line::from("Décide si l'objet est encore vivant ou déjà détruit."),
        Line::from(""),
        Line::from("Le chrono tourne : sans réponse à temps, la question"),
        Line::from("compte comme fausse (aucune réponse)."),
        Line::from(""),
        Line::from("Une bonne réponse vaut un point. L'explication"),
        Line::from("s'affiche après chaque réponse."),
        Line::from(""),
        Line::from("échap retour".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(2)),
        );

    frame.render_widget(widget, chunks[1]);
}
