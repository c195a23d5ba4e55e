use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::debug;

use crate::config::{EasingType, RevealConfig};
use crate::progress::{lerp_clamped, EasingTypeExt};

/// Flip angle at which the front face turns toward the viewer
const FRONT_FACING_ANGLE: f64 = 90.0;
const FLIPPED_ANGLE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Closed card, back face showing
    Idle,
    /// Turning toward the front
    Flipping,
    /// Front face showing
    Flipped,
    /// Turning back toward the closed face
    Resetting,
}

impl fmt::Display for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RevealState::Idle => "idle",
            RevealState::Flipping => "flipping",
            RevealState::Flipped => "flipped",
            RevealState::Resetting => "resetting",
        };
        f.write_str(name)
    }
}

/// Which face of the card is turned toward the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Back,
    Front,
}

/// Render-facing view of the reveal sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSnapshot {
    pub state: RevealState,
    pub zoomed: bool,
    /// When the current state was entered
    pub entered_at: Instant,
    pub flip_duration: Duration,
}

impl RevealSnapshot {
    /// Rotation of the card in degrees (0 = back, 180 = front)
    pub fn flip_angle(&self, now: Instant) -> f64 {
        let t = now.saturating_duration_since(self.entered_at).as_secs_f64()
            / self.flip_duration.as_secs_f64();
        let eased = EasingType::InOutQuad.apply(t);
        match self.state {
            RevealState::Idle => 0.0,
            RevealState::Flipping => lerp_clamped(0.0, FLIPPED_ANGLE, eased),
            RevealState::Flipped => FLIPPED_ANGLE,
            RevealState::Resetting => lerp_clamped(FLIPPED_ANGLE, 0.0, eased),
        }
    }

    pub fn face(&self, now: Instant) -> CardFace {
        if self.flip_angle(now) >= FRONT_FACING_ANGLE {
            CardFace::Front
        } else {
            CardFace::Back
        }
    }

    /// Whether the flip transform is in motion
    pub fn is_turning(&self) -> bool {
        matches!(self.state, RevealState::Flipping | RevealState::Resetting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    ZoomIn,
    EnterFlipped,
    EnterResetting,
    EnterIdle,
}

/// A transition scheduled for a later instant
#[derive(Debug, Clone, Copy)]
struct Deferred {
    due: Instant,
    /// Epoch of the state it was scheduled from
    epoch: u64,
    step: Step,
}

/// Timer-driven flip/zoom reveal sequence
///
/// `Idle → Flipping → Flipped` on `advance()`, `Flipped → Resetting → Idle`
/// on `reset()`. Follow-up transitions are deferred tasks tagged with the
/// epoch of the state that scheduled them. Entering a state bumps the epoch,
/// and a task from an older epoch is discarded unfired when it comes due, so
/// a task can only ever fire in the state it was scheduled for.
///
/// The clock is injected: callers pass `now` to every entry point and call
/// [`poll`](Self::poll) when [`next_deadline`](Self::next_deadline) passes.
#[derive(Debug, Clone)]
pub struct RevealStateMachine {
    flip_duration: Duration,
    zoom_in_delay: Duration,
    zoom_out_lead: Duration,
    state: RevealState,
    zoomed: bool,
    epoch: u64,
    entered_at: Instant,
    pending: Vec<Deferred>,
}

impl RevealStateMachine {
    pub fn new(config: RevealConfig) -> Self {
        Self::new_at(config, Instant::now())
    }

    pub fn new_at(config: RevealConfig, now: Instant) -> Self {
        Self {
            flip_duration: Duration::from_millis(config.flip_duration_ms),
            zoom_in_delay: Duration::from_millis(config.zoom_in_delay_ms),
            zoom_out_lead: Duration::from_millis(config.zoom_out_lead_ms),
            state: RevealState::Idle,
            zoomed: false,
            epoch: 0,
            entered_at: now,
            pending: Vec::with_capacity(2),
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn snapshot(&self) -> RevealSnapshot {
        RevealSnapshot {
            state: self.state,
            zoomed: self.zoomed,
            entered_at: self.entered_at,
            flip_duration: self.flip_duration,
        }
    }

    /// Earliest instant a scheduled transition is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.live().map(|d| d.due).min()
    }

    /// Whether any transition is still scheduled
    pub fn is_pending(&self) -> bool {
        self.live().next().is_some()
    }

    /// Start flipping the closed card open; no-op unless Idle
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.state != RevealState::Idle {
            debug!(state = %self.state, "Ignoring advance");
            return false;
        }

        self.enter(RevealState::Flipping, now);
        self.schedule(Step::ZoomIn, now + self.zoom_in_delay);
        self.schedule(Step::EnterFlipped, now + self.flip_duration);
        true
    }

    /// Zoom out and flip the card back; no-op unless Flipped and not already resetting
    pub fn reset(&mut self, now: Instant) -> bool {
        if self.state != RevealState::Flipped || self.has_step(Step::EnterResetting) {
            debug!(state = %self.state, "Ignoring reset");
            return false;
        }

        self.zoomed = false;
        debug!("Zoomed out");
        self.schedule(Step::EnterResetting, now + self.zoom_out_lead);
        true
    }

    /// Fire every transition due at or before `now`, in due order
    ///
    /// Returns true if the state or zoom flag changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;

        while let Some(position) = self.next_due(now) {
            let task = self.pending.remove(position);
            if task.epoch != self.epoch {
                debug!(step = ?task.step, epoch = task.epoch, "Dropping stale transition");
                continue;
            }
            self.fire(task);
            changed = true;
        }

        changed
    }

    fn next_due(&self, now: Instant) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, d)| d.due <= now)
            .min_by_key(|(_, d)| d.due)
            .map(|(position, _)| position)
    }

    fn fire(&mut self, task: Deferred) {
        match task.step {
            Step::ZoomIn => {
                self.zoomed = true;
                debug!("Zoomed in");
            }
            Step::EnterFlipped => self.enter(RevealState::Flipped, task.due),
            Step::EnterResetting => {
                self.enter(RevealState::Resetting, task.due);
                self.schedule(Step::EnterIdle, task.due + self.flip_duration);
            }
            Step::EnterIdle => self.enter(RevealState::Idle, task.due),
        }
    }

    fn enter(&mut self, state: RevealState, at: Instant) {
        self.epoch += 1;
        let epoch = self.epoch;
        self.state = state;
        self.entered_at = at;
        debug!(state = %state, epoch, "Reveal state entered");
    }

    fn schedule(&mut self, step: Step, due: Instant) {
        self.pending.retain(|d| d.step != step);
        self.pending.push(Deferred {
            due,
            epoch: self.epoch,
            step,
        });
    }

    fn has_step(&self, step: Step) -> bool {
        self.live().any(|d| d.step == step)
    }

    /// Tasks scheduled from the current state
    fn live(&self) -> impl Iterator<Item = &Deferred> {
        self.pending.iter().filter(move |d| d.epoch == self.epoch)
    }
}
