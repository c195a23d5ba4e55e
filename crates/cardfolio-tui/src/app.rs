use std::sync::Arc;
use std::time::Instant;

use cardfolio_core::card::{CardRecord, NavigationTarget, Wallet};
use cardfolio_core::progress::{ProgressAnimator, ProgressChannel, ProgressSource};
use cardfolio_core::reveal::RevealStateMachine;
use cardfolio_core::selection::{CommitSignal, SelectionController, TapOutcome};
use cardfolio_core::{AppConfig, StackLayoutEngine};
use tokio::sync::{mpsc, watch};
use tracing::info;

/// Scroll steps covered by a page scroll
const PAGE_STEPS: i32 = 4;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The scroll-driven card stack
    Wallet,
    /// A single card with the flip reveal, by wallet index
    Card(usize),
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub wallet: Wallet,
    pub engine: StackLayoutEngine,
    pub selection: SelectionController,
    pub animator: ProgressAnimator,
    pub reveal: RevealStateMachine,
    pub view: View,
    /// Card under the keyboard cursor
    pub cursor: usize,
    /// Pending key for multi-key sequences like "gg"
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    /// Where the last commit navigated to
    pub last_navigation: Option<NavigationTarget>,
    pub should_quit: bool,
    progress: ProgressChannel,
    progress_rx: watch::Receiver<f64>,
    commit_rx: mpsc::UnboundedReceiver<CommitSignal>,
    last_frame: Instant,
}

impl App {
    pub fn new(config: Arc<AppConfig>, wallet: Wallet) -> Self {
        let count = wallet.len();
        let (commit_tx, commit_rx) = mpsc::unbounded_channel();

        let mut engine = StackLayoutEngine::from_config(&config);
        engine.set_count(count);

        let progress = ProgressChannel::new(0.0);
        let progress_rx = progress.subscribe();

        // Bring the first card into view on open
        let mut animator = ProgressAnimator::new(config.scroll.clone());
        animator.scroll_to(config.scroll.initial_progress);

        Self {
            engine,
            selection: SelectionController::new(count).with_commit_sender(commit_tx),
            animator,
            reveal: RevealStateMachine::new(config.reveal),
            view: View::Wallet,
            cursor: 0,
            pending_key: None,
            status_message: None,
            last_navigation: None,
            should_quit: false,
            progress,
            progress_rx,
            commit_rx,
            last_frame: Instant::now(),
            config,
            wallet,
        }
    }

    /// Progress currently fed to the layout
    pub fn progress(&self) -> f64 {
        self.progress.current()
    }

    /// Advance animations to now; returns true while anything is moving
    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) -> bool {
        let value = self.animator.update_at(now);
        self.progress.set(value);
        if self.progress_rx.has_changed().unwrap_or(false) {
            let progress = *self.progress_rx.borrow_and_update();
            self.engine.set_progress(progress);
        }

        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.engine.tick(dt);

        self.process_commits();
        self.reveal.poll(tokio::time::Instant::from_std(now));

        self.needs_fast_update()
    }

    pub fn needs_fast_update(&self) -> bool {
        self.animator.needs_update()
            || !self.engine.is_settled()
            || self.reveal.is_pending()
            || self.reveal.snapshot().is_turning()
    }

    pub fn scroll_by(&mut self, steps: i32) {
        self.animator.scroll_by(steps);
    }

    pub fn scroll_page(&mut self, direction: i32) {
        self.animator.scroll_by(direction.saturating_mul(PAGE_STEPS));
    }

    pub fn jump_to(&mut self, progress: f64) {
        self.animator.scroll_to(progress);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.wallet.len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn tap_cursor(&mut self) {
        self.tap(self.cursor);
    }

    pub fn tap(&mut self, index: usize) {
        match self.selection.tap(index) {
            TapOutcome::Selected { index, .. } => {
                self.engine.set_active(Some(index));
                self.cursor = index;
                if let Some(card) = self.wallet.get(index) {
                    self.set_status(format!("{} selected, tap again to open", card.company));
                }
            }
            TapOutcome::Commit(_) => self.process_commits(),
            TapOutcome::Ignored => {}
        }
    }

    /// Open the card view for every pending commit
    pub fn process_commits(&mut self) {
        while let Ok(signal) = self.commit_rx.try_recv() {
            self.open_card(signal.index);
        }
    }

    pub fn open_card(&mut self, index: usize) {
        let Some(card) = self.wallet.get(index) else {
            return;
        };
        let target = card.navigation_target();
        info!(path = %target.path(), "Opening card");

        self.selection.clear();
        self.engine.set_active(None);
        self.reveal = RevealStateMachine::new(self.config.reveal);
        self.view = View::Card(index);
        self.last_navigation = Some(target);
        self.status_message = None;
    }

    /// Leave the card view, or drop the selection over the stack
    pub fn back(&mut self) {
        match self.view {
            View::Card(_) => {
                self.view = View::Wallet;
            }
            View::Wallet => {
                self.selection.clear();
                self.engine.set_active(None);
            }
        }
        self.status_message = None;
    }

    pub fn reveal(&mut self) {
        self.reveal.advance(tokio::time::Instant::now());
    }

    pub fn flip_back(&mut self) {
        self.reveal.reset(tokio::time::Instant::now());
    }

    /// Card shown in the card view
    pub fn current_card(&self) -> Option<&CardRecord> {
        match self.view {
            View::Card(index) => self.wallet.get(index),
            View::Wallet => None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cardfolio_core::RevealState;

    use super::*;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Wallet::sample())
    }

    #[test]
    fn test_opens_scrolled_to_initial_progress() {
        let mut app = app();
        assert_eq!(app.progress(), 0.0);
        assert!((app.animator.target() - 0.2).abs() < 1e-9);

        app.update_at(Instant::now() + Duration::from_secs(1));
        assert!((app.progress() - 0.2).abs() < 1e-9);
        assert!((app.engine.progress() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_tap_then_commit_opens_card() {
        let mut app = app();
        app.tap(2);
        assert_eq!(app.selection.active(), Some(2));
        assert_eq!(app.engine.active(), Some(2));
        assert_eq!(app.view, View::Wallet);

        app.tap(2);
        assert_eq!(app.view, View::Card(2));
        assert_eq!(app.selection.active(), None);
        assert_eq!(app.engine.active(), None);
        assert_eq!(
            app.last_navigation.as_ref().map(|t| t.slug.as_str()),
            Some("john-wick")
        );
    }

    #[test]
    fn test_tapping_another_card_moves_focus() {
        let mut app = app();
        app.tap(1);
        app.tap(4);
        assert_eq!(app.engine.active(), Some(4));
        assert_eq!(app.cursor, 4);
        assert_eq!(app.view, View::Wallet);
    }

    #[test]
    fn test_out_of_range_tap_is_ignored() {
        let mut app = app();
        app.tap(8);
        assert_eq!(app.selection.active(), None);
        assert_eq!(app.view, View::Wallet);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = app();
        app.move_cursor(-1);
        assert_eq!(app.cursor, 5);
        app.move_cursor(1);
        assert_eq!(app.cursor, 0);

        let mut empty = App::new(Arc::new(AppConfig::default()), Wallet::default());
        empty.move_cursor(1);
        assert_eq!(empty.cursor, 0);
        empty.tap_cursor();
        assert_eq!(empty.view, View::Wallet);
    }

    #[test]
    fn test_back_from_card_view() {
        let mut app = app();
        app.open_card(0);
        app.reveal();
        assert_eq!(app.reveal.state(), RevealState::Flipping);
        assert!(app.needs_fast_update());

        app.back();
        assert_eq!(app.view, View::Wallet);
        assert!(app.current_card().is_none());
    }

    #[test]
    fn test_back_over_stack_clears_selection() {
        let mut app = app();
        app.tap(3);
        app.back();
        assert_eq!(app.selection.active(), None);
        assert_eq!(app.engine.active(), None);
    }

    #[test]
    fn test_flip_back_before_flipped_is_ignored() {
        let mut app = app();
        app.open_card(1);
        app.flip_back();
        assert_eq!(app.reveal.state(), RevealState::Idle);
        assert_eq!(app.current_card().map(|c| c.owner.as_str()), Some("Sarah Connor"));
    }
}
