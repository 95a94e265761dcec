// ABOUTME: Fire-and-forget progress reporting for UI surfacing
// ABOUTME: ProgressReporter trait, ProgressEvent, and the NullProgress default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! Discrete progress events emitted at phase boundaries (fill start/end,
//! pre-loop, per-iteration, post-loop). Reporting has no return value and
//! must never block the algorithm; implementations should hand events off
//! cheaply.

use serde::{Deserialize, Serialize};

/// A single progress event for a caller to surface in a UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Human-readable step description
    pub step_description: String,
    /// Completion estimate for the current phase (0-100)
    pub percent_complete: u8,
}

impl ProgressEvent {
    /// Build an event, clamping the percentage to 100
    #[must_use]
    pub fn new(step_description: impl Into<String>, percent_complete: u8) -> Self {
        Self {
            step_description: step_description.into(),
            percent_complete: percent_complete.min(100),
        }
    }
}

/// Receiver for engine progress events
pub trait ProgressReporter {
    /// Accept one event; fire-and-forget, must not block
    fn report(&self, event: ProgressEvent);
}

/// Default reporter that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_clamped_to_100() {
        let event = ProgressEvent::new("filling slots", 140);
        assert_eq!(event.percent_complete, 100);
    }
}
