//! Enable/disable state machine.
//!
//! ```text
//!            enable()                 debounce elapsed
//! Disabled ───────────▶ Enabling ─────────────────────▶ Enabled
//!    ▲                     │                               │
//!    └──── disable() ──────┴────────── disable() ──────────┘
//! ```
//!
//! `Enabling` is the debounce window that keeps the click which enabled the
//! fan from also activating an element on the first frame. Input adapters
//! and the frame loop only run in `Enabled`. Both delayed transitions go
//! through the [`Schedule`] and are cancelled by the opposite call, so any
//! sequence of rapid toggles settles on the state of the last call.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use crate::config::FanConfig;
use crate::engine::Action;
use crate::schedule::{Deferred, Schedule, TimerId};

/// Current lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Disabled,
    /// Waiting out the enable debounce; the timer completes the transition.
    Enabling(TimerId),
    Enabled,
}

#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    phase: Phase,
    initialized: bool,
    pending_clear: Option<TimerId>,
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether adapters and the frame loop are live.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.phase == Phase::Enabled
    }

    /// Whether the last request was to enable (including the debounce window).
    #[must_use]
    pub fn wants_enabled(&self) -> bool {
        self.phase != Phase::Disabled
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Request the Enabled state. The first call also asks the host to set up
    /// the page. A no-op when already enabled or enabling.
    pub fn enable(&mut self, now_ms: f64, schedule: &mut Schedule, config: &FanConfig) -> Vec<Action> {
        if self.wants_enabled() {
            log::debug!("enable requested while {:?}; ignoring", self.phase);
            return Vec::new();
        }

        let mut actions = Vec::new();
        if !self.initialized {
            self.initialized = true;
            actions.push(Action::Initialize);
        }
        if let Some(timer) = self.pending_clear.take() {
            schedule.cancel(timer);
        }
        let timer = schedule.schedule(now_ms + config.enable_debounce_ms, Deferred::CompleteEnable);
        self.phase = Phase::Enabling(timer);
        log::info!("fan enabled");

        actions.push(Action::SetExpanded(true));
        actions.push(Action::PersistEnabled(true));
        actions
    }

    /// Enter the Disabled state immediately and queue the presentation clear.
    pub fn disable(&mut self, now_ms: f64, schedule: &mut Schedule, config: &FanConfig) -> Vec<Action> {
        if let Phase::Enabling(timer) = self.phase {
            schedule.cancel(timer);
        }
        self.phase = Phase::Disabled;
        if let Some(timer) = self.pending_clear.take() {
            schedule.cancel(timer);
        }
        self.pending_clear = Some(schedule.schedule(now_ms + config.disable_clear_ms, Deferred::ClearPresentation));
        log::info!("fan disabled");

        vec![Action::SetExpanded(false), Action::PersistEnabled(false)]
    }

    /// Flip toward the opposite of the last request.
    pub fn toggle(&mut self, now_ms: f64, schedule: &mut Schedule, config: &FanConfig) -> Vec<Action> {
        if self.wants_enabled() {
            self.disable(now_ms, schedule, config)
        } else {
            self.enable(now_ms, schedule, config)
        }
    }

    /// The enable debounce elapsed. Returns true if the fan is now enabled.
    pub fn complete_enable(&mut self) -> bool {
        if matches!(self.phase, Phase::Enabling(_)) {
            self.phase = Phase::Enabled;
            log::debug!("enable debounce elapsed; starting frame loop");
            return true;
        }
        false
    }

    /// The disable delay elapsed. Returns true if presentation should be cleared.
    pub fn complete_disable(&mut self) -> bool {
        self.pending_clear = None;
        self.phase == Phase::Disabled
    }
}
