pub mod home;
pub mod tabs;

use ratatui::prelude::*;

use crate::app::{App, Tab};

/// Split the frame into the tab bar and the content area.
pub fn layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
        ])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn render(frame: &mut Frame, app: &App) {
    let (tab_bar, content) = layout(frame.area());

    tabs::render_tabs(frame, app, tab_bar);

    match (app.current_tab, app.active_game()) {
        (Tab::Home, _) | (_, None) => home::render_home(
            frame,
            content,
            app.selected_game,
            &app.last_scores,
            app.status.as_deref(),
        ),
        (_, Some(game)) => game.render(frame, content),
    }
}
