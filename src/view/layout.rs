//! Layout rendering (search bar and screen structure)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{Focus, GridView, UiState};

/// Screen areas: search bar, grid, transport bar.
pub struct Areas {
    pub search: Rect,
    pub grid: Rect,
    pub transport: Rect,
}

pub fn split(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Card grid
            Constraint::Length(3), // Transport bar
        ])
        .split(area);

    Areas {
        search: chunks[0],
        grid: chunks[1],
        transport: chunks[2],
    }
}

pub fn render_search_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, grid: &GridView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(18), // Track count
        ])
        .split(area);

    let focused = ui_state.focus == Focus::Search;
    let search_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = match (ui_state.search_query.is_empty(), focused) {
        (true, true) => "_".to_string(),
        (true, false) => "Press / to search songs or artists...".to_string(),
        (false, true) => format!("{}_", ui_state.search_query),
        (false, false) => ui_state.search_query.clone(),
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, chunks[0]);

    let count = if grid.initial_loading {
        "Loading...".to_string()
    } else {
        format!("{} tracks", grid.tracks.len())
    };
    let info = Paragraph::new(count)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Jamendo "));
    frame.render_widget(info, chunks[1]);
}
