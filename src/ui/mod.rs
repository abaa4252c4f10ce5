mod countdown;
mod quiz;
mod results;
mod start;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Start => start::render(frame, area, app),
        Screen::Rules => start::render_rules(frame, area),
        Screen::Countdown => countdown::render(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Results => results::render(frame, area, app),
    }
}
