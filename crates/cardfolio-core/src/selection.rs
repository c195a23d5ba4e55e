use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Emitted when an already-active card is tapped again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSignal {
    pub index: usize,
}

/// Result of a tap on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tapped card became active
    Selected { index: usize, previous: Option<usize> },
    /// The tapped card was already active; navigate to it
    Commit(usize),
    /// The index does not name a card
    Ignored,
}

/// Exclusive single selection over the cards of a stack
///
/// Tapping a card makes it active. Tapping the active card again confirms it
/// and emits a commit every time, leaving the selection unchanged; clearing
/// it (e.g. after navigation) is up to the caller.
#[derive(Debug, Default)]
pub struct SelectionController {
    active: Option<usize>,
    len: usize,
    commit_tx: Option<mpsc::UnboundedSender<CommitSignal>>,
}

impl SelectionController {
    pub fn new(len: usize) -> Self {
        Self {
            active: None,
            len,
            commit_tx: None,
        }
    }

    /// Also deliver commits on a channel (e.g. to a router task)
    pub fn with_commit_sender(mut self, tx: mpsc::UnboundedSender<CommitSignal>) -> Self {
        self.commit_tx = Some(tx);
        self
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Update the number of cards; a selection past the end is dropped
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.active.is_some_and(|i| i >= len) {
            self.active = None;
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn tap(&mut self, index: usize) -> TapOutcome {
        if index >= self.len {
            debug!(index, len = self.len, "Ignoring tap outside the stack");
            return TapOutcome::Ignored;
        }

        if self.active == Some(index) {
            debug!(index, "Card committed");
            self.send_commit(index);
            return TapOutcome::Commit(index);
        }

        let previous = self.active.replace(index);
        debug!(index, ?previous, "Card selected");
        TapOutcome::Selected { index, previous }
    }

    fn send_commit(&self, index: usize) {
        if let Some(ref tx) = self.commit_tx {
            if tx.send(CommitSignal { index }).is_err() {
                warn!("Failed to send commit signal: receiver dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_selects() {
        let mut selection = SelectionController::new(4);
        assert_eq!(
            selection.tap(2),
            TapOutcome::Selected { index: 2, previous: None }
        );
        assert_eq!(selection.active(), Some(2));
    }

    #[test]
    fn test_second_tap_commits_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut selection = SelectionController::new(4).with_commit_sender(tx);

        assert!(matches!(selection.tap(2), TapOutcome::Selected { .. }));
        assert!(rx.try_recv().is_err());

        assert_eq!(selection.tap(2), TapOutcome::Commit(2));
        assert_eq!(rx.try_recv().unwrap(), CommitSignal { index: 2 });
        assert!(rx.try_recv().is_err());
        assert_eq!(selection.active(), Some(2));
    }

    #[test]
    fn test_repeated_taps_recommit() {
        let mut selection = SelectionController::new(3);
        selection.tap(1);
        assert_eq!(selection.tap(1), TapOutcome::Commit(1));
        assert_eq!(selection.tap(1), TapOutcome::Commit(1));
    }

    #[test]
    fn test_tapping_another_card_moves_selection() {
        let mut selection = SelectionController::new(5);
        selection.tap(1);
        assert_eq!(
            selection.tap(3),
            TapOutcome::Selected { index: 3, previous: Some(1) }
        );
        assert_eq!(selection.active(), Some(3));
        assert!(!selection.is_active(1));
    }

    #[test]
    fn test_out_of_range_and_empty() {
        let mut selection = SelectionController::new(0);
        assert_eq!(selection.tap(0), TapOutcome::Ignored);
        assert_eq!(selection.active(), None);

        selection.set_len(3);
        selection.tap(2);
        selection.set_len(2);
        assert_eq!(selection.active(), None);
    }

    #[test]
    fn test_dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut selection = SelectionController::new(1).with_commit_sender(tx);
        selection.tap(0);
        assert_eq!(selection.tap(0), TapOutcome::Commit(0));
    }
}
