//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{Focus, SelectionMove};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Ctrl+C always quits
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?')
            ) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Handle search input when the search box has focus
        if ui_state.focus == Focus::Search {
            match key.code {
                KeyCode::Esc => {
                    model.clear_search().await;
                    model.set_focus(Focus::Grid).await;
                }
                KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                    model.set_focus(Focus::Grid).await;
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                }
                KeyCode::Char(c) if !ctrl => {
                    model.append_to_search(c).await;
                }
                _ => {}
            }
            return Ok(());
        }

        // Ctrl+K focuses search
        if ctrl && matches!(key.code, KeyCode::Char('k') | KeyCode::Char('K')) {
            model.set_focus(Focus::Search).await;
            return Ok(());
        }

        // Grid keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Char('/') | KeyCode::Tab => {
                model.set_focus(Focus::Search).await;
            }
            KeyCode::Esc => {
                if ui_state.is_searching() {
                    model.clear_search().await;
                }
            }
            KeyCode::Left => model.move_selection(SelectionMove::Left).await,
            KeyCode::Right => model.move_selection(SelectionMove::Right).await,
            KeyCode::Up => model.move_selection(SelectionMove::Up).await,
            KeyCode::Down => model.move_selection(SelectionMove::Down).await,
            KeyCode::Enter => self.activate_selected().await,
            // Play/Pause toggle
            KeyCode::Char(' ') => self.toggle_playback().await,
            KeyCode::Char('n') | KeyCode::Char('N') => self.next_track().await,
            KeyCode::Char('p') | KeyCode::Char('P') => self.previous_track().await,
            KeyCode::Char('s') | KeyCode::Char('S') => self.toggle_shuffle().await,
            KeyCode::Char('r') | KeyCode::Char('R') => self.toggle_loop().await,
            KeyCode::Char('m') | KeyCode::Char('M') => self.toggle_mute().await,
            KeyCode::Char('+') | KeyCode::Char('=') => self.volume_up().await,
            KeyCode::Char('-') => self.volume_down().await,
            KeyCode::Char(']') => self.seek_forward().await,
            KeyCode::Char('[') => self.seek_backward().await,
            KeyCode::Char('c') | KeyCode::Char('C') => self.share().await,
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use crate::controller::testing::harness;
    use crate::model::Focus;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn typing_in_search_filters_grid() {
        let h = harness(&["a", "b"]);
        h.controller.load_next_page().await;

        h.controller.handle_key_event(press(KeyCode::Char('/'))).await.unwrap();
        for c in "song b".chars() {
            h.controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
        let model = h.controller.model();
        let view = model.grid_view().await;
        assert_eq!(view.tracks.len(), 1);
        // 'q' was typed into the box rather than quitting
        h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!model.should_quit().await);

        h.controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        let ui = model.get_ui_state().await;
        assert_eq!(ui.focus, Focus::Grid);
        assert!(ui.search_query.is_empty());
    }

    #[tokio::test]
    async fn ctrl_k_focuses_search() {
        let h = harness(&[]);
        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        h.controller.handle_key_event(key).await.unwrap();
        assert_eq!(h.controller.model().get_ui_state().await.focus, Focus::Search);
    }

    #[tokio::test]
    async fn help_popup_swallows_keys() {
        let h = harness(&[]);
        let model = h.controller.model();
        h.controller.handle_key_event(press(KeyCode::Char('h'))).await.unwrap();
        assert!(model.is_help_popup_open().await);

        h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!model.should_quit().await);

        h.controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert!(!model.is_help_popup_open().await);
        h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(model.should_quit().await);
    }

    #[tokio::test]
    async fn key_release_is_ignored() {
        let h = harness(&[]);
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        h.controller.handle_key_event(key).await.unwrap();
        assert!(!h.controller.model().should_quit().await);
    }
}
