//! Test and helper mocks for dimmer_core.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use dimmer_traits::{OneShot, TriggerLine};

/// One-shot timer that records arm requests instead of scheduling anything;
/// useful for asserting when and how the zero-cross path arms.
///
/// Clones share the same recording.
#[derive(Clone, Default)]
pub struct RecordingTimer {
    armed: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All arm requests seen so far, in order.
    pub fn armed(&self) -> Vec<Duration> {
        self.armed.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn arm_count(&self) -> usize {
        self.armed.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn last_armed(&self) -> Option<Duration> {
        self.armed.lock().ok().and_then(|v| v.last().copied())
    }
}

impl OneShot for RecordingTimer {
    fn arm(&mut self, delay: Duration) {
        if let Ok(mut v) = self.armed.lock() {
            v.push(delay);
        }
    }
}

/// Level transitions seen by a `RecordingLine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    Active,
    Inactive,
}

/// Trigger line that records every level transition. Clones share the same
/// recording, so a clone kept by the test observes the moved original.
#[derive(Clone, Default)]
pub struct RecordingLine {
    events: Arc<Mutex<Vec<LineEvent>>>,
}

impl RecordingLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LineEvent> {
        self.events.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl TriggerLine for RecordingLine {
    fn set_active(&mut self) {
        if let Ok(mut v) = self.events.lock() {
            v.push(LineEvent::Active);
        }
    }

    fn set_inactive(&mut self) {
        if let Ok(mut v) = self.events.lock() {
            v.push(LineEvent::Inactive);
        }
    }
}
