use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .split(area);

    let step = if app.countdown_step() == 0 {
        "GO !".to_string()
    } else {
        app.countdown_step().to_string()
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            step,
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from("Prépare-toi...".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
