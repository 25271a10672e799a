//! Transient "added to cart" acknowledgement.

use std::time::{Duration, Instant};

/// Default time an acknowledgement stays up.
pub const DEFAULT_ACK_DURATION: Duration = Duration::from_millis(3000);

/// Shows the title of the last book added to the cart until a deadline.
///
/// Time is supplied by the caller, so nothing runs in the background. A newer
/// [`show`](Self::show) replaces the previous message and its deadline.
#[derive(Debug, Clone)]
pub struct AddedAck {
    duration: Duration,
    current: Option<(String, Instant)>,
}

impl AddedAck {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    /// How long each acknowledgement lasts.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Acknowledge `title`, visible until `now + duration`.
    pub fn show(&mut self, title: impl Into<String>, now: Instant) {
        self.current = Some((title.into(), now + self.duration));
    }

    /// The title being acknowledged, if its deadline has not passed.
    pub fn current(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|(_, deadline)| now < *deadline)
            .map(|(title, _)| title.as_str())
    }

    /// Hide immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Default for AddedAck {
    fn default() -> Self {
        Self::new(DEFAULT_ACK_DURATION)
    }
}
