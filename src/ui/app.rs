use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use ratatui::layout::{Position, Rect};
use rand::{Rng, SeedableRng};

use crate::analytics::RecorderHandle;
use crate::config::Config;
use crate::content::{ButtonConfig, EventConfig, RemoteContent};
use crate::session::{SessionIntent, SessionReducer, SessionScreen};
use crate::ui::mvi::Reducer;

/// Lifecycle of the one-shot content fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContentPhase {
    #[default]
    Loading,
    Ready(RemoteContent),
    /// The fetch failed. The kiosk stays on the loading screen (no retry),
    /// but the failure is logged and shown instead of degrading silently.
    Failed(String),
}

/// Owns the session screen plus everything around it that is not pure:
/// the RNG, the spin and inactivity deadlines, button selection, and the
/// analytics handle. All transitions go through [`SessionReducer`].
pub struct App {
    should_quit: bool,
    config: Config,
    content: ContentPhase,
    screen: SessionScreen,
    button_selection: usize,
    /// Screen rects of the revealed-screen buttons, refreshed on every
    /// draw, so touch presses can be hit-tested against what is on screen.
    button_zones: Vec<Rect>,
    rng: StdRng,
    /// One-shot deadline committing the final number.
    spin_deadline: Option<Instant>,
    /// Rearmed on every qualifying input; expiry forces Idle.
    idle_deadline: Option<Instant>,
    recorder: Option<RecorderHandle>,
    status_line: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests.
    pub fn with_seeded_rng(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: StdRng) -> Self {
        Self {
            should_quit: false,
            config,
            content: ContentPhase::Loading,
            screen: SessionScreen::Idle,
            button_selection: 0,
            button_zones: Vec::new(),
            rng,
            spin_deadline: None,
            idle_deadline: None,
            recorder: None,
            status_line: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn screen(&self) -> &SessionScreen {
        &self.screen
    }

    pub fn content(&self) -> &ContentPhase {
        &self.content
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn button_selection(&self) -> usize {
        self.button_selection
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn buttons(&self) -> &[ButtonConfig] {
        match &self.content {
            ContentPhase::Ready(content) => &content.buttons,
            _ => &[],
        }
    }

    pub fn events(&self) -> &[EventConfig] {
        match &self.content {
            ContentPhase::Ready(content) => &content.events,
            _ => &[],
        }
    }

    pub fn set_recorder(&mut self, recorder: RecorderHandle) {
        self.recorder = Some(recorder);
    }

    pub fn set_button_zones(&mut self, zones: Vec<Rect>) {
        self.button_zones = zones;
    }

    // ------------------------------------------------------------------
    // Background task results
    // ------------------------------------------------------------------

    pub fn on_content_loaded(&mut self, content: RemoteContent) {
        self.content = ContentPhase::Ready(content);
    }

    pub fn on_content_failed(&mut self, message: String) {
        tracing::error!(%message, "Content fetch failed, kiosk stays on loading screen");
        self.content = ContentPhase::Failed(message);
    }

    pub fn on_analytics_error(&mut self, message: String) {
        self.status_line = Some(message);
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn on_key(&mut self, key: KeyEvent) {
        self.handle_key(key, Instant::now());
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse, Instant::now());
    }

    pub fn on_paste(&mut self) {
        self.handle_paste(Instant::now());
    }

    pub fn on_tick(&mut self) {
        self.advance(Instant::now());
    }

    /// Any qualifying input rearms the inactivity countdown.
    pub fn note_activity(&mut self, now: Instant) {
        self.idle_deadline = Some(now + self.idle_timeout());
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.note_activity(now);

        if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
            self.request_quit();
            return;
        }

        if matches!(self.screen, SessionScreen::Idle) {
            self.tap(now);
            return;
        }
        if self.screen.is_spinning() {
            // Let the spin finish
            return;
        }
        if matches!(self.screen, SessionScreen::Revealed { .. }) {
            match key.code {
                KeyCode::Left | KeyCode::Up => self.move_button_selection(-1),
                KeyCode::Right | KeyCode::Down => self.move_button_selection(1),
                KeyCode::Enter | KeyCode::Char(' ') => self.select_button(self.button_selection),
                KeyCode::Char(ch) if ch.is_ascii_digit() => {
                    let index = ch.to_digit(10).unwrap_or(0) as usize;
                    if index > 0 {
                        self.select_button(index - 1);
                    }
                }
                _ => {}
            }
            return;
        }
        // Browsing or Embedded: explicit return to the revealed screen
        if matches!(key.code, KeyCode::Esc | KeyCode::Backspace) {
            self.dispatch(SessionIntent::Back);
        }
    }

    /// Touch input. Presses mirror the keyboard path on every screen:
    /// tap to spin, tap a button to select it, tap anywhere to go back.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        self.note_activity(now);
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return;
        }
        if matches!(self.screen, SessionScreen::Idle) {
            self.tap(now);
            return;
        }
        if self.screen.is_spinning() {
            // Let the spin finish
            return;
        }
        if matches!(self.screen, SessionScreen::Revealed { .. }) {
            let pressed = Position::new(mouse.column, mouse.row);
            let hit = self
                .button_zones
                .iter()
                .position(|zone| zone.contains(pressed));
            if let Some(index) = hit {
                self.select_button(index);
            }
            return;
        }
        // Browsing or Embedded: any press returns to the revealed screen
        self.dispatch(SessionIntent::Back);
    }

    /// Pasted text counts as activity only; it never taps or selects.
    pub fn handle_paste(&mut self, now: Instant) {
        self.note_activity(now);
    }

    /// Visitor tapped the attract screen. Ignored until content is loaded.
    pub fn tap(&mut self, now: Instant) {
        let ContentPhase::Ready(content) = &self.content else {
            return;
        };
        if self.screen != SessionScreen::Idle {
            return;
        }

        let spin = Duration::from_millis(content.settings.spin_duration_ms);
        let number = self.draw_number();
        self.dispatch(SessionIntent::Tap { number });
        self.spin_deadline = Some(now + spin);
        self.button_selection = 0;

        if let Some(recorder) = &self.recorder {
            recorder.record_tap();
        }
    }

    /// Selects the action button at `index`, if it exists.
    pub fn select_button(&mut self, index: usize) {
        let Some(button) = self.buttons().get(index) else {
            return;
        };
        let target = button.target();
        self.button_selection = index;
        self.dispatch(SessionIntent::Select { target });
    }

    pub fn move_button_selection(&mut self, direction: i32) {
        let len = self.buttons().len();
        if len == 0 {
            self.button_selection = 0;
            return;
        }
        let current = self.button_selection.min(len - 1);
        self.button_selection = if direction.is_negative() {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        } else if current + 1 >= len {
            0
        } else {
            current + 1
        };
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Drives both deadlines and the spin animation. Called on every tick;
    /// tests call it directly with simulated instants.
    pub fn advance(&mut self, now: Instant) {
        if let Some(deadline) = self.idle_deadline {
            if now >= deadline {
                self.idle_deadline = None;
                self.spin_deadline = None;
                self.status_line = None;
                self.dispatch(SessionIntent::IdleReset);
                return;
            }
        }

        if !self.screen.is_spinning() {
            return;
        }

        match self.spin_deadline {
            Some(deadline) if now >= deadline => {
                self.spin_deadline = None;
                let number = self.draw_number();
                self.dispatch(SessionIntent::Commit { number });
            }
            _ => {
                let number = self.draw_number();
                self.dispatch(SessionIntent::SpinTick { number });
            }
        }
    }

    fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.config.kiosk.idle_timeout_seconds)
    }

    /// Uniform inclusive draw from the configured range.
    fn draw_number(&mut self) -> u32 {
        let (min, max) = match &self.content {
            ContentPhase::Ready(content) => {
                (content.settings.number_min, content.settings.number_max)
            }
            _ => (1, 100),
        };
        self.rng.random_range(min..=max)
    }

    fn dispatch(&mut self, intent: SessionIntent) {
        self.screen = SessionReducer::reduce(std::mem::take(&mut self.screen), intent);
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentSettings, EVENTS_LINK};

    fn ready_content(min: u32, max: u32) -> RemoteContent {
        RemoteContent {
            settings: ContentSettings {
                number_min: min,
                number_max: max,
                spin_duration_ms: 2000,
                ..ContentSettings::default()
            },
            buttons: vec![
                ButtonConfig {
                    name: "Classes".to_string(),
                    link: EVENTS_LINK.to_string(),
                },
                ButtonConfig {
                    name: "Sign up".to_string(),
                    link: "https://x".to_string(),
                },
            ],
            events: Vec::new(),
        }
    }

    fn mouse_down(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn zone(x: u16, y: u16, width: u16) -> Rect {
        Rect {
            x,
            y,
            width,
            height: 1,
        }
    }

    fn make_app(min: u32, max: u32) -> App {
        let mut config = Config::default();
        config.remote.content_url = "https://example.com/content".to_string();
        let mut app = App::with_seeded_rng(config, 7);
        app.on_content_loaded(ready_content(min, max));
        app
    }

    #[test]
    fn tap_before_content_loads_is_ignored() {
        let config = Config::default();
        let mut app = App::with_seeded_rng(config, 7);
        app.tap(Instant::now());
        assert_eq!(app.screen(), &SessionScreen::Idle);
    }

    #[test]
    fn tap_starts_spin_and_arms_deadline() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.tap(start);
        assert!(app.screen().is_spinning());
        assert!(app.spin_deadline.is_some());
    }

    #[test]
    fn spin_commits_after_deadline_and_stops() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.note_activity(start);
        app.tap(start);

        // Intermediate ticks keep spinning
        app.advance(start + Duration::from_millis(50));
        assert!(app.screen().is_spinning());

        // Deadline commits
        app.advance(start + Duration::from_millis(2000));
        let committed = app.screen().number().unwrap();
        assert!(!app.screen().is_spinning());
        assert!(app.spin_deadline.is_none());

        // Further ticks never change the committed number
        app.advance(start + Duration::from_millis(2050));
        app.advance(start + Duration::from_millis(2100));
        assert_eq!(app.screen().number(), Some(committed));
    }

    #[test]
    fn draws_stay_in_configured_range() {
        let mut app = make_app(10, 40);
        let start = Instant::now();
        app.tap(start);
        for ms in (50..2000).step_by(50) {
            app.advance(start + Duration::from_millis(ms));
            let number = app.screen().number().unwrap();
            assert!((10..=40).contains(&number), "draw {} out of range", number);
        }
        app.advance(start + Duration::from_millis(2000));
        let number = app.screen().number().unwrap();
        assert!((10..=40).contains(&number));
    }

    #[test]
    fn degenerate_range_always_yields_that_number() {
        let mut app = make_app(10, 10);
        let start = Instant::now();
        app.tap(start);
        for ms in (50..2500).step_by(50) {
            app.advance(start + Duration::from_millis(ms));
            assert_eq!(app.screen().number(), Some(10));
        }
    }

    #[test]
    fn idle_reset_fires_after_timeout_from_any_state() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.note_activity(start);
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));
        app.select_button(1);
        assert!(app.screen().embedded_url().is_some());

        app.advance(start + Duration::from_secs(301));
        assert_eq!(app.screen(), &SessionScreen::Idle);
        assert_eq!(app.screen.number(), None);
    }

    #[test]
    fn activity_postpones_idle_reset() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.note_activity(start);
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));

        // Activity at 4 minutes pushes the deadline out
        app.note_activity(start + Duration::from_secs(240));
        app.advance(start + Duration::from_secs(301));
        assert_ne!(app.screen(), &SessionScreen::Idle);

        // Full five minutes after the last activity it fires
        app.advance(start + Duration::from_secs(240 + 301));
        assert_eq!(app.screen(), &SessionScreen::Idle);
    }

    #[test]
    fn idle_reset_cancels_pending_spin() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.note_activity(start);
        app.tap(start);
        assert!(app.screen().is_spinning());

        app.advance(start + Duration::from_secs(301));
        assert_eq!(app.screen(), &SessionScreen::Idle);
        assert!(app.spin_deadline.is_none());

        // A lingering tick draws nothing
        app.advance(start + Duration::from_secs(302));
        assert_eq!(app.screen(), &SessionScreen::Idle);
    }

    #[test]
    fn sentinel_button_browses_and_back_preserves_number() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));
        let number = app.screen().number().unwrap();

        app.select_button(0);
        assert_eq!(app.screen(), &SessionScreen::Browsing { number });

        app.dispatch(SessionIntent::Back);
        assert_eq!(app.screen(), &SessionScreen::Revealed { number });
    }

    #[test]
    fn link_button_embeds_exact_url() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));
        let events_before = app.events().to_vec();

        app.select_button(1);
        assert_eq!(app.screen().embedded_url(), Some("https://x"));
        assert_eq!(app.events(), events_before.as_slice());
    }

    #[test]
    fn out_of_range_button_index_is_ignored() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));
        let before = app.screen().clone();
        app.select_button(9);
        assert_eq!(app.screen(), &before);
    }

    #[test]
    fn button_selection_wraps_both_ways() {
        let mut app = make_app(1, 100);
        assert_eq!(app.button_selection(), 0);
        app.move_button_selection(-1);
        assert_eq!(app.button_selection(), 1);
        app.move_button_selection(1);
        assert_eq!(app.button_selection(), 0);
        app.move_button_selection(1);
        assert_eq!(app.button_selection(), 1);
    }

    #[test]
    fn mouse_press_on_idle_starts_spin() {
        let mut app = make_app(1, 100);
        app.handle_mouse(mouse_down(40, 12), Instant::now());
        assert!(app.screen().is_spinning());
    }

    #[test]
    fn mouse_press_during_spin_is_ignored() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.tap(start);
        app.handle_mouse(mouse_down(40, 12), start + Duration::from_millis(50));
        assert!(app.screen().is_spinning());
    }

    #[test]
    fn mouse_press_on_button_zone_selects_it() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));
        let number = app.screen().number().unwrap();

        app.set_button_zones(vec![zone(10, 20, 12), zone(30, 20, 10)]);
        app.handle_mouse(mouse_down(32, 20), start + Duration::from_secs(3));
        assert_eq!(app.screen().embedded_url(), Some("https://x"));
        assert_eq!(app.button_selection(), 1);

        app.dispatch(SessionIntent::Back);
        app.handle_mouse(mouse_down(10, 20), start + Duration::from_secs(4));
        assert_eq!(app.screen(), &SessionScreen::Browsing { number });
    }

    #[test]
    fn mouse_press_outside_button_zones_stays_revealed() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));
        let before = app.screen().clone();

        app.set_button_zones(vec![zone(10, 20, 12), zone(30, 20, 10)]);
        app.handle_mouse(mouse_down(0, 0), start + Duration::from_secs(3));
        app.handle_mouse(mouse_down(25, 20), start + Duration::from_secs(3));
        assert_eq!(app.screen(), &before);
    }

    #[test]
    fn mouse_press_returns_from_browsing_and_embedded() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));
        let number = app.screen().number().unwrap();

        app.select_button(0);
        assert_eq!(app.screen(), &SessionScreen::Browsing { number });
        app.handle_mouse(mouse_down(5, 5), start + Duration::from_secs(3));
        assert_eq!(app.screen(), &SessionScreen::Revealed { number });

        app.select_button(1);
        assert!(app.screen().embedded_url().is_some());
        app.handle_mouse(mouse_down(5, 5), start + Duration::from_secs(4));
        assert_eq!(app.screen(), &SessionScreen::Revealed { number });
    }

    #[test]
    fn paste_rearms_idle_without_changing_screen() {
        let mut app = make_app(1, 100);
        let start = Instant::now();
        app.note_activity(start);
        app.tap(start);
        app.advance(start + Duration::from_millis(2000));
        let before = app.screen().clone();

        app.handle_paste(start + Duration::from_secs(240));
        assert_eq!(app.screen(), &before);
        app.advance(start + Duration::from_secs(301));
        assert_ne!(app.screen(), &SessionScreen::Idle);
        app.advance(start + Duration::from_secs(240 + 301));
        assert_eq!(app.screen(), &SessionScreen::Idle);
    }

    #[test]
    fn content_failure_keeps_loading_screen() {
        let mut config = Config::default();
        config.remote.content_url = "https://example.com/content".to_string();
        let mut app = App::with_seeded_rng(config, 7);
        app.on_content_failed("HTTP 500".to_string());
        assert!(matches!(app.content(), ContentPhase::Failed(_)));
        app.tap(Instant::now());
        assert_eq!(app.screen(), &SessionScreen::Idle);
    }
}
