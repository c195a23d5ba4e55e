use tokio::sync::watch;

/// A bounded scalar producer driving the stack layout
///
/// Implementations report values in [0, 1]. Consumers either read the current
/// value or subscribe and react when it changes; nothing here assumes a
/// particular input device.
pub trait ProgressSource {
    /// Current progress value
    fn current(&self) -> f64;

    /// Receiver notified on every change
    fn subscribe(&self) -> watch::Receiver<f64>;
}

/// Clamp a raw input into the progress domain (NaN maps to 0)
#[inline]
pub fn clamp_progress(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Progress source backed by a `tokio::sync::watch` channel
#[derive(Debug)]
pub struct ProgressChannel {
    tx: watch::Sender<f64>,
}

impl ProgressChannel {
    pub fn new(initial: f64) -> Self {
        let (tx, _rx) = watch::channel(clamp_progress(initial));
        Self { tx }
    }

    /// Publish a new value; subscribers are only woken when it changes
    pub fn set(&self, value: f64) {
        let value = clamp_progress(value);
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}

impl Default for ProgressChannel {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ProgressSource for ProgressChannel {
    fn current(&self) -> f64 {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<f64> {
        self.tx.subscribe()
    }
}
