//! Interaction reconciler: hover and activation against real page elements.
//!
//! Every frame the cursor's hotspot is hit-tested against each registered
//! element's bounding box. Flags flip to match the result and every flip is
//! reported as an [`Action`] so the host can mirror it onto the page. A
//! pending activation pulse is consumed by the first hovered element.
//!
//! Page geometry is read through the [`Page`] trait. A failure on one element
//! (usually because it left the document mid-frame) is logged and skipped;
//! it never aborts the rest of the frame.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use crate::config::FanConfig;
use crate::engine::Action;
use crate::error::PageError;
use crate::geometry::{Point, Rect, Size};
use crate::hit::hits;
use crate::input::ActivationPulse;
use crate::registry::{ElementId, ElementRegistry, Flag};
use crate::schedule::{Deferred, Schedule};

/// Read-only view of live page geometry, supplied by the host.
pub trait Page {
    /// Viewport-space bounding box of a registered element.
    ///
    /// # Errors
    ///
    /// [`PageError::ElementMissing`] when the element is gone, or
    /// [`PageError::Host`] when the host call fails.
    fn element_box(&self, id: &ElementId) -> Result<Rect, PageError>;

    /// Rendered size of the cursor image.
    ///
    /// # Errors
    ///
    /// Any [`PageError`]; the engine keeps the last known size.
    fn cursor_size(&self) -> Result<Size, PageError>;

    /// Total scrollable width and height of the document.
    ///
    /// # Errors
    ///
    /// Any [`PageError`]; the frame skips its scroll request.
    fn scroll_extent(&self) -> Result<Size, PageError>;
}

fn set_flag(actions: &mut Vec<Action>, current: &mut bool, id: &ElementId, flag: Flag, on: bool) {
    if *current != on {
        *current = on;
        actions.push(Action::SetFlag { id: id.clone(), flag, on });
    }
}

/// Hit-test every registered element against `hotspot`.
///
/// Returns the flag changes and activations the host must apply.
pub fn reconcile(
    registry: &mut ElementRegistry,
    page: &dyn Page,
    hotspot: &Rect,
    pulse: &mut ActivationPulse,
    schedule: &mut Schedule,
    config: &FanConfig,
    now_ms: f64,
) -> Vec<Action> {
    let mut actions = Vec::new();

    for element in registry.iter_mut() {
        let rect = match page.element_box(&element.id) {
            Ok(rect) => rect,
            Err(err) => {
                log::error!("error processing element `{}`: {err}", element.id);
                continue;
            }
        };

        if !hits(hotspot, &rect) {
            set_flag(&mut actions, &mut element.hovered, &element.id, Flag::Hovered, false);
            continue;
        }

        set_flag(&mut actions, &mut element.hovered, &element.id, Flag::Hovered, true);
        if pulse.is_pending(now_ms, config.activation_pulse_ms) {
            pulse.consume();
            set_flag(&mut actions, &mut element.activated, &element.id, Flag::Activated, true);
            actions.push(Action::Activate { id: element.id.clone(), activation: element.activation });

            let clear = Deferred::ClearActivated(element.id.clone());
            schedule.cancel_matching(&clear);
            schedule.schedule(now_ms + config.activated_hold_ms, clear);
            log::debug!("activated `{}`", element.id);
        } else {
            set_flag(&mut actions, &mut element.activated, &element.id, Flag::Activated, false);
        }
    }

    actions
}

fn scroll_axis(offset: f64, size: f64, viewport: f64, extent: f64) -> f64 {
    let max = (extent - viewport).max(0.0);
    if viewport <= 0.0 || max <= 0.0 {
        return 0.0;
    }
    (max * ((offset - size) / viewport)).clamp(0.0, max)
}

/// Page scroll offset that keeps the cursor container proportionally placed:
/// the cursor's position across the viewport maps linearly onto the page's
/// scrollable range.
#[must_use]
pub fn scroll_target(cursor: Point, cursor_size: Size, viewport: Size, extent: Size) -> Point {
    Point::new(
        scroll_axis(cursor.x, cursor_size.width, viewport.width, extent.width),
        scroll_axis(cursor.y, cursor_size.height, viewport.height, extent.height),
    )
}
