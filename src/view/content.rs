//! Card grid rendering (skeleton, track cards, empty states)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{Focus, GridMetrics, GridView, UiState};
use crate::playback::{PlaybackPhase, PlaybackState};
use super::utils::{format_duration, spinner_frame, truncate_string, CARD_HEIGHT};

pub const NO_MATCHES: &str = "No songs found matching your search.";
pub const NO_SONGS: &str =
    "No songs available. Please check your internet connection and try again.";

pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    grid: &GridView,
    ui_state: &UiState,
    playback: &PlaybackState,
    tick: usize,
) {
    let border_style = if ui_state.focus == Focus::Grid {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(" Discover ")
        .border_style(border_style);
    if grid.loading_more {
        block = block.title_bottom(
            Line::from(format!(" {} Loading more tracks... ", spinner_frame(tick))).right_aligned(),
        );
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if grid.initial_loading {
        render_skeleton(frame, inner, grid.grid);
        return;
    }

    if grid.tracks.is_empty() {
        let message = if grid.searching { NO_MATCHES } else { NO_SONGS };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::uniform(1)));
        frame.render_widget(empty, inner);
        return;
    }

    let metrics = grid.grid;
    let columns = metrics.columns.max(1);
    let first = metrics.first_visible_row(grid.selected) * columns;
    let last = (first + columns * metrics.visible_rows.max(1)).min(grid.tracks.len());

    for (offset, track) in grid.tracks[first..last].iter().enumerate() {
        let index = first + offset;
        let Some(cell) = card_area(inner, metrics, offset) else {
            continue;
        };
        let selected = index == grid.selected && ui_state.focus == Focus::Grid;
        let phase = if playback.is_current(track) {
            Some(playback.phase)
        } else {
            None
        };
        let width = cell.width.saturating_sub(4) as usize;

        let marker = match phase {
            Some(PlaybackPhase::Playing) => Span::styled("▶ Playing", Style::default().fg(Color::Green)),
            Some(PlaybackPhase::Loading) => Span::styled(
                format!("{} Loading", spinner_frame(tick)),
                Style::default().fg(Color::Yellow),
            ),
            Some(_) => Span::styled("⏸ Paused", Style::default().fg(Color::Yellow)),
            None => Span::raw(""),
        };

        let lines = vec![
            Line::from(Span::styled(
                truncate_string(&track.name, width),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_string(&track.artist_name, width),
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::styled(
                    format_duration(f64::from(track.duration)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                marker,
            ]),
        ];

        let card_border = if selected {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if phase.is_some() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1))
                .border_style(card_border),
        );
        frame.render_widget(card, cell);
    }
}

/// Placeholder cards while the first page is outstanding.
fn render_skeleton(frame: &mut Frame, inner: Rect, metrics: GridMetrics) {
    let count = metrics.columns.max(1) * metrics.visible_rows.max(1);
    for offset in 0..count {
        let Some(cell) = card_area(inner, metrics, offset) else {
            continue;
        };
        let width = cell.width.saturating_sub(4) as usize;
        let bar = |fraction: usize| "░".repeat(width * fraction / 4);
        let lines = vec![
            Line::from(bar(3)),
            Line::from(bar(2)),
            Line::from(bar(1)),
        ];
        let card = Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(card, cell);
    }
}

/// Cell for the `offset`-th visible card, or `None` if it falls outside.
fn card_area(inner: Rect, metrics: GridMetrics, offset: usize) -> Option<Rect> {
    let columns = metrics.columns.max(1);
    let row = (offset / columns) as u16;
    let column = (offset % columns) as u16;
    let card_width = inner.width / columns as u16;

    let y = inner.y + row * CARD_HEIGHT;
    if card_width == 0 || y + CARD_HEIGHT > inner.y + inner.height {
        return None;
    }
    Some(Rect {
        x: inner.x + column * card_width,
        y,
        width: card_width,
        height: CARD_HEIGHT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_tile_the_inner_area() {
        let inner = Rect::new(1, 1, 80, 10);
        let metrics = GridMetrics {
            columns: 3,
            visible_rows: 2,
        };
        assert_eq!(card_area(inner, metrics, 0), Some(Rect::new(1, 1, 26, 5)));
        assert_eq!(card_area(inner, metrics, 4), Some(Rect::new(27, 6, 26, 5)));
        assert_eq!(card_area(inner, metrics, 6), None);
    }
}
