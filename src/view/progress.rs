//! Transport bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::model::TransportState;
use super::utils::{format_duration, spinner_frame};

pub fn render_transport(frame: &mut Frame, area: Rect, transport: &TransportState, tick: usize) {
    let playback = &transport.playback;
    let controls_info = controls_text(transport);

    let Some(track) = &playback.state.current else {
        let idle = Paragraph::new(" Nothing playing")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title_bottom(Line::from(controls_info).right_aligned()),
            );
        frame.render_widget(idle, area);
        return;
    };

    let marker = if transport.is_busy() {
        spinner_frame(tick)
    } else if playback.state.is_playing() {
        "▶"
    } else {
        "⏸"
    };
    let album = track
        .album_name
        .as_deref()
        .map(|a| format!(" ({a})"))
        .unwrap_or_default();
    let title = format!(" {} {} | {}{} ", marker, track.name, track.artist_name, album);

    let time_str = format!(
        "{} / {}",
        format_duration(playback.position_secs),
        format_duration(playback.duration_secs)
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio(playback.position_secs, playback.duration_secs))
        .label(time_str);

    frame.render_widget(gauge, area);
}

fn controls_text(transport: &TransportState) -> String {
    let state = &transport.playback.state;
    let shuffle_text = if state.shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let repeat_text = if state.looping { "Repeat: One" } else { "Repeat: Off" };
    let volume_text = if transport.volume.is_muted() {
        "Vol: Muted".to_string()
    } else {
        format!("Vol: {}%", transport.volume.percent())
    };
    format!(" {} | {} | {} ", shuffle_text, repeat_text, volume_text)
}

fn progress_ratio(position: f64, duration: f64) -> f64 {
    if duration > 0.0 && position.is_finite() {
        (position / duration).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
