//! Application state management for the ShoreSquad terminal UI
//!
//! `App` tracks input-driven state (quit, help, scrolling, refresh requests);
//! `ForecastPanel` is the view the forecast widget renders into.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use shoresquad::refresh::{LOADING_SUMMARY, REFRESH_LABEL};
use shoresquad::render::{ForecastView, RenderedEntry};

/// What the terminal shows for the forecast widget
#[derive(Debug, Clone)]
pub struct ForecastPanel {
    /// Summary line (today's conditions)
    pub summary: String,
    /// One entry per forecast day, or a single placeholder
    pub entries: Vec<RenderedEntry>,
    /// Current label of the refresh control
    pub refresh_label: String,
    /// When the entries were last replaced
    pub last_update: Option<DateTime<Local>>,
}

impl Default for ForecastPanel {
    fn default() -> Self {
        Self {
            summary: LOADING_SUMMARY.to_string(),
            entries: Vec::new(),
            refresh_label: REFRESH_LABEL.to_string(),
            last_update: None,
        }
    }
}

impl ForecastPanel {
    /// True until the first result has been rendered
    pub fn is_loading(&self) -> bool {
        self.last_update.is_none()
    }
}

impl ForecastView for ForecastPanel {
    fn set_summary(&mut self, text: &str) {
        self.summary = text.to_string();
    }

    fn set_entries(&mut self, entries: Vec<RenderedEntry>) {
        self.entries = entries;
        self.last_update = Some(Local::now());
    }

    fn set_refresh_label(&mut self, label: &str) {
        self.refresh_label = label.to_string();
    }
}

/// Main application struct managing input state
#[derive(Debug, Default)]
pub struct App {
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Scroll offset for the forecast list
    pub scroll_offset: u16,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit the application
    /// - `r`: Refresh the forecast
    /// - `Up`/`k`, `Down`/`j`: Scroll the forecast list
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.refresh_requested = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Keeps the scroll offset within the list, so the last entry stays visible
    pub fn clamp_scroll(&mut self, entry_count: usize) {
        let max = u16::try_from(entry_count.saturating_sub(1)).unwrap_or(u16::MAX);
        self.scroll_offset = self.scroll_offset.min(max);
    }

    /// Consumes a pending refresh request
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use shoresquad::refresh::REFRESHED_LABEL;

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_q_and_esc_quit() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_r_requests_refresh_once() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Char('r')));

        assert!(app.take_refresh_request());
        assert!(!app.take_refresh_request());
    }

    #[test]
    fn test_scroll_saturates_at_top() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Char('k')));
        assert_eq!(app.scroll_offset, 0);

        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Char('j')));
        assert_eq!(app.scroll_offset, 2);
    }

    #[test]
    fn test_scroll_clamps_to_last_entry() {
        let mut app = App::new();
        for _ in 0..10 {
            app.handle_key(key_event(KeyCode::Char('j')));
        }
        app.clamp_scroll(4);
        assert_eq!(app.scroll_offset, 3);

        app.clamp_scroll(0);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_help_intercepts_keys() {
        let mut app = App::new();
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Char('r')));
        assert!(!app.refresh_requested);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_panel_starts_loading() {
        let panel = ForecastPanel::default();
        assert!(panel.is_loading());
        assert_eq!(panel.summary, LOADING_SUMMARY);
        assert_eq!(panel.refresh_label, REFRESH_LABEL);
    }

    #[test]
    fn test_panel_records_rendered_entries() {
        let mut panel = ForecastPanel::default();
        panel.set_refresh_label(REFRESHED_LABEL);
        panel.show(shoresquad::render::render_unavailable());

        assert!(!panel.is_loading());
        assert_eq!(panel.summary, "Weather unavailable");
        assert_eq!(panel.entries.len(), 1);
        assert_eq!(panel.refresh_label, REFRESHED_LABEL);
    }
}
