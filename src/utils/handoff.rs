//! Single-slot hand-off buffer for the rendered payload.
//!
//! The popup cannot always receive the copy result directly (its context may
//! close before the host finishes), so the most recent payload is parked
//! here and fetched on demand. This is one slot with last-write-wins
//! semantics, not a queue: an unread value is silently replaced by a newer
//! write.

use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct HandoffSlot {
    slot: Mutex<Option<String>>,
}

impl HandoffSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a payload, replacing whatever was there.
    pub fn store(&self, text: String) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(text);
    }

    /// Remove and return the parked payload, if any.
    pub fn take(&self) -> Option<String> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.take()
    }
}
