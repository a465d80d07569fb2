//! Deferred actions with explicit cancellation.
//!
//! Delayed state changes (the enable debounce, clearing presentation after a
//! disable, dropping an element's activated flag) are queued here with a due
//! timestamp instead of being left to free-running timers. The host arms one
//! real timer for [`Schedule::next_deadline`] and calls back into the engine,
//! which drains whatever is due.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use crate::registry::ElementId;

/// Handle for cancelling a deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Work that runs once its due time has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Finish the enable debounce and start the frame loop.
    CompleteEnable,
    /// Clear hovered/activated flags on every element after a disable.
    ClearPresentation,
    /// Drop one element's activated flag.
    ClearActivated(ElementId),
}

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    due_ms: f64,
    action: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    next_id: u64,
    pending: Vec<Pending>,
}

impl Schedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run at `due_ms`.
    pub fn schedule(&mut self, due_ms: f64, action: Deferred) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, due_ms, action });
        id
    }

    /// Cancel a queued action. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel every queued action equal to `action`. Returns how many were dropped.
    pub fn cancel_matching(&mut self, action: &Deferred) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| &p.action != action);
        before - self.pending.len()
    }

    /// Remove and return every action due at `now_ms`, earliest first. Actions
    /// with equal due times keep their scheduling order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Deferred> {
        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then_with(|| a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|p| p.action).collect()
    }

    /// Earliest due time among queued actions.
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.iter().map(|p| p.due_ms).min_by(f64::total_cmp)
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
