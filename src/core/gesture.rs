//! Multi-click disambiguation for the toolbar icon.
//!
//! Each icon activation is classified immediately: the first click of a burst
//! is a Single, the second a Double, the third a Triple. There is no
//! wait-and-see buffering, so a double click fires the single action first
//! and a triple fires single, double, then triple. That matches the shipped
//! extension behavior and is covered by tests; do not "fix" it by debouncing.

use serde::Serialize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Classified icon activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    Single,
    Double,
    Triple,
}

/// Result of classifying one activation.
///
/// `idle_token` identifies this activation; pass it to
/// [`GestureClassifier::reset_if_stale`] after the idle window to clear a
/// click burst that never continued. A newer activation voids the token.
#[derive(Debug, Clone, Copy)]
pub struct Classified {
    pub gesture: Gesture,
    pub idle_token: u64,
}

#[derive(Debug, Default)]
struct GestureState {
    count: u32,
    last_event: Option<Instant>,
    generation: u64,
}

/// Stateful click counter over timestamped activation events.
///
/// The state lives behind a mutex so a multi-threaded host can share one
/// classifier; under the single event loop that drives the host there is no
/// contention.
pub struct GestureClassifier {
    threshold: Duration,
    idle_reset: Duration,
    state: Mutex<GestureState>,
}

impl GestureClassifier {
    pub fn new(threshold: Duration, idle_reset: Duration) -> Self {
        Self {
            threshold,
            idle_reset,
            state: Mutex::new(GestureState::default()),
        }
    }

    /// How long after the last activation the counter is forced back to 0.
    pub fn idle_reset(&self) -> Duration {
        self.idle_reset
    }

    /// Classify an activation at time `now`.
    ///
    /// Activations closer together than the threshold extend the burst,
    /// anything slower starts a new one. The counter resets to 0 right after
    /// a Triple is emitted, so a fourth rapid click starts over at Single.
    pub fn classify(&self, now: Instant) -> Classified {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.generation = state.generation.wrapping_add(1);

        let within_burst = match state.last_event {
            Some(last) => now.saturating_duration_since(last) < self.threshold,
            None => false,
        };
        if within_burst {
            state.count += 1;
        } else {
            state.count = 1;
        }
        state.last_event = Some(now);

        let gesture = match state.count {
            1 => Gesture::Single,
            2 => Gesture::Double,
            _ => {
                state.count = 0;
                Gesture::Triple
            }
        };

        Classified {
            gesture,
            idle_token: state.generation,
        }
    }

    /// Force the counter back to 0 unless a newer activation arrived.
    ///
    /// Called from the idle timer so a stale click is never stitched into a
    /// later unrelated burst.
    pub fn reset_if_stale(&self, idle_token: u64) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.generation == idle_token {
            state.count = 0;
        }
    }

    #[cfg(test)]
    fn count(&self) -> u32 {
        self.state.lock().unwrap().count
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1000))
    }
}
