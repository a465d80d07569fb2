use crate::config::FanConfig;
use crate::diagnostics::Diagnostics;
use crate::geometry::{Point, Rect, Size};
use crate::hit::hotspot;
use crate::input::{FanState, InputState, TouchContact};
use crate::lifecycle::Lifecycle;
use crate::physics::{CursorState, PhysicsEngine};
use crate::reconcile::{Page, reconcile, scroll_target};
use crate::registry::{Activation, ElementId, ElementRegistry, Flag};
use crate::schedule::{Deferred, Schedule};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side effects returned from engine calls for the host to apply, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// One-time page setup: inject assets, discover elements, mirror hover rules.
    Initialize,
    /// Show or hide the fan container.
    SetExpanded(bool),
    /// Store the enabled flag for later page views.
    PersistEnabled(bool),
    /// Schedule one more animation frame.
    RequestFrame,
    /// Place the fan visual.
    MoveFan(Point),
    /// Rotate the fan visual to this heading (radians).
    RotateFan(f64),
    /// Place the simulated cursor container.
    MoveCursor(Point),
    /// Mirror a presentation flag onto an element's classes.
    SetFlag { id: ElementId, flag: Flag, on: bool },
    /// Deliver a synthetic click.
    Activate { id: ElementId, activation: Activation },
    /// Scroll the page to this offset, instantly.
    ScrollTo(Point),
    /// Show or hide the debug overlay.
    SetDebugView(bool),
    /// Redraw the debug overlay.
    ShowDiagnostics(Diagnostics),
}

/// Core engine state: all logic that doesn't depend on the DOM.
///
/// The host feeds it input events, frame timestamps and timer callbacks, and
/// applies the returned [`Action`]s to the page.
pub struct EngineCore {
    pub config: FanConfig,
    pub input: InputState,
    pub physics: PhysicsEngine,
    pub registry: ElementRegistry,
    pub schedule: Schedule,
    pub lifecycle: Lifecycle,
    pub viewport: Size,
    /// Thrust coefficient for the current viewport width.
    pub fan_speed: f64,
    /// Last measured size of the cursor image.
    pub cursor_size: Size,
    pub debug: bool,
    cursor_placed: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(FanConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: FanConfig) -> Self {
        Self {
            fan_speed: config.fan_speed,
            config,
            input: InputState::default(),
            physics: PhysicsEngine::default(),
            registry: ElementRegistry::new(),
            schedule: Schedule::new(),
            lifecycle: Lifecycle::new(),
            viewport: Size::default(),
            cursor_size: Size::default(),
            debug: false,
            cursor_placed: false,
        }
    }

    // --- Viewport ---

    /// Record new viewport dimensions (startup and every resize). The first
    /// call also drops the cursor in the middle of the viewport; later calls
    /// pull it back inside if the viewport shrank past it.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport = Size::new(width.max(0.0), height.max(0.0));
        self.fan_speed = self.config.fan_speed_for_width(self.viewport.width);
        if self.cursor_placed {
            if self.physics.confine(&self.bounds(), self.cursor_size) {
                log::debug!("viewport shrank; cursor confined");
                return vec![Action::MoveCursor(self.physics.cursor.position)];
            }
            return Vec::new();
        }
        self.cursor_placed = true;
        let center = Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
        self.physics = PhysicsEngine::new(center);
        vec![Action::MoveCursor(center)]
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }

    // --- Lifecycle ---

    pub fn enable(&mut self, now_ms: f64) -> Vec<Action> {
        self.lifecycle.enable(now_ms, &mut self.schedule, &self.config)
    }

    pub fn disable(&mut self, now_ms: f64) -> Vec<Action> {
        self.lifecycle.disable(now_ms, &mut self.schedule, &self.config)
    }

    pub fn toggle(&mut self, now_ms: f64) -> Vec<Action> {
        self.lifecycle.toggle(now_ms, &mut self.schedule, &self.config)
    }

    /// Flip the debug overlay.
    pub fn toggle_debug(&mut self) -> Vec<Action> {
        self.debug = !self.debug;
        log::debug!("diagnostics overlay {}", if self.debug { "on" } else { "off" });
        vec![Action::SetDebugView(self.debug)]
    }

    // --- Element registry ---

    /// Track an element. Returns its ID and whether that ID was generated and
    /// must be written back to the element.
    pub fn register_element(&mut self, existing_id: Option<&str>, activation: Activation) -> (ElementId, bool) {
        let (id, generated) = self.registry.resolve_id(existing_id);
        self.registry.register(id.clone(), activation);
        (id, generated)
    }

    /// Stop tracking an element, cancelling its pending flag clear.
    pub fn unregister_element(&mut self, id: &ElementId) -> bool {
        self.schedule.cancel_matching(&Deferred::ClearActivated(id.clone()));
        self.registry.unregister(id).is_some()
    }

    // --- Input adapters (inert unless enabled) ---

    pub fn on_pointer_move(&mut self, point: Point) -> Vec<Action> {
        if !self.lifecycle.is_enabled() {
            return Vec::new();
        }
        self.input.pointer_move(point);
        vec![Action::MoveFan(point)]
    }

    pub fn on_wheel(&mut self, delta_y: f64) -> Vec<Action> {
        if !self.lifecycle.is_enabled() {
            return Vec::new();
        }
        self.input.wheel(delta_y, &self.config);
        vec![Action::RotateFan(self.input.fan.angle)]
    }

    pub fn on_click(&mut self, now_ms: f64) -> Vec<Action> {
        if self.lifecycle.is_enabled() {
            self.input.click(now_ms);
        }
        Vec::new()
    }

    pub fn on_touch_start(&mut self, contacts: &[TouchContact], now_ms: f64) -> Vec<Action> {
        if !self.lifecycle.is_enabled() {
            return Vec::new();
        }
        self.input.touch_start(contacts, now_ms);
        self.fan_actions()
    }

    pub fn on_touch_move(&mut self, contacts: &[TouchContact]) -> Vec<Action> {
        if !self.lifecycle.is_enabled() {
            return Vec::new();
        }
        self.input.touch_move(contacts, &self.config);
        self.fan_actions()
    }

    pub fn on_touch_end(&mut self, remaining: usize, now_ms: f64) -> Vec<Action> {
        if self.lifecycle.is_enabled() {
            self.input.touch_end(remaining, now_ms, &self.config);
        }
        Vec::new()
    }

    fn fan_actions(&self) -> Vec<Action> {
        vec![Action::MoveFan(self.input.fan.position), Action::RotateFan(self.input.fan.angle)]
    }

    // --- Deferred actions ---

    /// Earliest pending deadline, for the host's timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.schedule.next_deadline()
    }

    /// Run every deferred action due at `now_ms`.
    pub fn fire_due(&mut self, now_ms: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        for deferred in self.schedule.take_due(now_ms) {
            match deferred {
                Deferred::CompleteEnable => {
                    if self.lifecycle.complete_enable() {
                        self.physics.reset_clock();
                        actions.push(Action::RequestFrame);
                    }
                }
                Deferred::ClearPresentation => {
                    if self.lifecycle.complete_disable() {
                        actions.extend(
                            self.registry
                                .clear_presentation()
                                .into_iter()
                                .map(|(id, flag)| Action::SetFlag { id, flag, on: false }),
                        );
                    }
                }
                Deferred::ClearActivated(id) => {
                    if let Some(element) = self.registry.get_mut(&id)
                        && element.activated
                    {
                        element.activated = false;
                        actions.push(Action::SetFlag { id, flag: Flag::Activated, on: false });
                    }
                }
            }
        }
        actions
    }

    // --- Frame loop ---

    /// Run one simulation frame at `timestamp_ms`.
    ///
    /// Returns nothing once the fan is disabled, which ends the loop. The first
    /// frame after enabling only records the time baseline.
    pub fn on_frame(&mut self, timestamp_ms: f64, page: &dyn Page) -> Vec<Action> {
        let mut actions = self.fire_due(timestamp_ms);
        if !self.lifecycle.is_enabled() {
            return actions;
        }
        actions.push(Action::RequestFrame);

        let Some(elapsed_ms) = self.physics.tick(timestamp_ms) else {
            return actions;
        };
        if self.input.pulse.expire(timestamp_ms, self.config.activation_pulse_ms) {
            log::debug!("activation pulse expired unused");
        }

        match page.cursor_size() {
            Ok(size) => self.cursor_size = size,
            Err(err) => log::warn!("keeping last cursor size: {err}"),
        }

        let step = self.physics.step(
            &self.input.fan,
            &self.bounds(),
            self.cursor_size,
            self.fan_speed,
            &self.config,
            elapsed_ms,
        );
        let cursor = self.physics.cursor.position;
        actions.push(Action::MoveCursor(cursor));

        match page.scroll_extent() {
            Ok(extent) => actions.push(Action::ScrollTo(scroll_target(cursor, self.cursor_size, self.viewport, extent))),
            Err(err) => log::warn!("skipping scroll follow: {err}"),
        }

        let spot = hotspot(cursor, self.config.hotspot_size);
        actions.extend(reconcile(
            &mut self.registry,
            page,
            &spot,
            &mut self.input.pulse,
            &mut self.schedule,
            &self.config,
            timestamp_ms,
        ));

        if self.debug {
            actions.push(Action::ShowDiagnostics(Diagnostics::capture(
                &self.physics.cursor,
                &self.input.fan,
                &step,
                self.input.touch.pinch_ratio,
            )));
        }
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn fan(&self) -> FanState {
        self.input.fan
    }

    #[must_use]
    pub fn cursor(&self) -> CursorState {
        self.physics.cursor
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.lifecycle.is_enabled()
    }
}
