#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;
use crate::error::PageError;
use crate::geometry::Vector;
use crate::lifecycle::Phase;

// =============================================================
// Helpers
// =============================================================

struct FakePage {
    boxes: HashMap<ElementId, Rect>,
    cursor_size: Result<Size, PageError>,
    extent: Result<Size, PageError>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            boxes: HashMap::new(),
            cursor_size: Ok(Size::new(20.0, 20.0)),
            extent: Ok(Size::new(800.0, 600.0)),
        }
    }
}

impl FakePage {
    fn with(mut self, id: &str, rect: Rect) -> Self {
        self.boxes.insert(ElementId::from(id), rect);
        self
    }
}

impl Page for FakePage {
    fn element_box(&self, id: &ElementId) -> Result<Rect, PageError> {
        self.boxes
            .get(id)
            .copied()
            .ok_or_else(|| PageError::ElementMissing(id.to_string()))
    }

    fn cursor_size(&self) -> Result<Size, PageError> {
        self.cursor_size.clone()
    }

    fn scroll_extent(&self) -> Result<Size, PageError> {
        self.extent.clone()
    }
}

fn id(s: &str) -> ElementId {
    ElementId::from(s)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Core with an 800x600 viewport that has finished its enable debounce at t=210.
fn enabled_core() -> EngineCore {
    let mut core = EngineCore::default();
    core.set_viewport(800.0, 600.0);
    core.enable(0.0);
    core.fire_due(210.0);
    core
}

/// Enabled core whose frame clock already has a baseline at t=1000.
fn running_core(page: &FakePage) -> EngineCore {
    let mut core = enabled_core();
    core.on_frame(1000.0, page);
    core
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn requests_frame(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RequestFrame))
}

fn activations(actions: &[Action]) -> Vec<ElementId> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Activate { id, .. } => Some(id.clone()),
            _ => None,
        })
        .collect()
}

/// Page with a button centred under the starting cursor position (400, 300).
fn page_with_button() -> FakePage {
    FakePage::default().with("buy", Rect::new(380.0, 280.0, 420.0, 320.0))
}

// =============================================================
// Construction and viewport
// =============================================================

#[test]
fn core_starts_disabled() {
    let core = EngineCore::default();
    assert!(!core.is_enabled());
    assert_eq!(core.lifecycle.phase(), Phase::Disabled);
    assert!(core.registry.is_empty());
    assert!(!core.debug);
}

#[test]
fn first_viewport_centers_cursor() {
    let mut core = EngineCore::default();
    let actions = core.set_viewport(800.0, 600.0);
    assert_eq!(actions, vec![Action::MoveCursor(pt(400.0, 300.0))]);
    assert_eq!(core.cursor().position, pt(400.0, 300.0));

    // Later resizes leave the cursor alone.
    assert!(core.set_viewport(1024.0, 768.0).is_empty());
    assert_eq!(core.cursor().position, pt(400.0, 300.0));
}

#[test]
fn shrinking_viewport_confines_cursor() {
    let page = FakePage::default();
    let mut core = running_core(&page);
    core.cursor_size = Size::new(20.0, 20.0);
    core.physics.cursor.position = pt(780.0, 300.0);

    let actions = core.set_viewport(500.0, 800.0);
    assert_eq!(actions, vec![Action::MoveCursor(pt(490.0, 300.0))]);
    assert_eq!(core.cursor().position, pt(490.0, 300.0));

    // Aimed back toward the inside, the next frames move it further in.
    core.on_pointer_move(pt(550.0, 300.0));
    core.input.fan.set_angle(std::f64::consts::PI);
    core.on_frame(1016.0, &page);
    assert!(core.cursor().position.x < 490.0);
}

#[test]
fn narrow_viewport_slows_fan() {
    let mut core = EngineCore::default();
    core.set_viewport(500.0, 800.0);
    assert_eq!(core.fan_speed, 0.05);
    core.set_viewport(1200.0, 800.0);
    assert_eq!(core.fan_speed, 0.1);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn enable_initializes_and_waits_for_debounce() {
    let mut core = EngineCore::default();
    let actions = core.enable(0.0);
    assert_eq!(
        actions,
        vec![Action::Initialize, Action::SetExpanded(true), Action::PersistEnabled(true)]
    );
    assert!(!core.is_enabled());
    assert_eq!(core.next_deadline(), Some(210.0));

    assert!(core.fire_due(209.0).is_empty());
    assert_eq!(core.fire_due(210.0), vec![Action::RequestFrame]);
    assert!(core.is_enabled());
}

#[test]
fn toggle_round_trip() {
    let mut core = enabled_core();
    let actions = core.toggle(500.0);
    assert_eq!(actions, vec![Action::SetExpanded(false), Action::PersistEnabled(false)]);
    assert!(!core.is_enabled());
    let actions = core.toggle(600.0);
    assert!(actions.contains(&Action::SetExpanded(true)));
    assert!(!actions.contains(&Action::Initialize));
}

#[test]
fn rapid_toggles_settle_on_last_request() {
    let mut core = EngineCore::default();
    core.enable(0.0);
    core.disable(20.0);
    core.enable(40.0);
    core.disable(60.0);
    core.enable(80.0);
    let actions = core.fire_due(1000.0);
    assert_eq!(actions.iter().filter(|a| matches!(a, Action::RequestFrame)).count(), 1);
    assert!(core.is_enabled());
}

#[test]
fn disable_clears_presentation_after_delay() {
    let page = page_with_button();
    let mut core = enabled_core();
    core.register_element(Some("buy"), Activation::Standard);
    core.on_frame(1000.0, &page);
    core.on_frame(1016.0, &page);
    assert!(core.registry.get(&id("buy")).is_some_and(|e| e.hovered));

    core.disable(1100.0);
    assert!(core.fire_due(1299.0).is_empty());
    let actions = core.fire_due(1300.0);
    assert_eq!(actions, vec![Action::SetFlag { id: id("buy"), flag: Flag::Hovered, on: false }]);
    assert!(core.registry.iter().all(|e| !e.hovered && !e.activated));
}

#[test]
fn reenable_within_clear_delay_keeps_presentation() {
    let page = page_with_button();
    let mut core = enabled_core();
    core.register_element(Some("buy"), Activation::Standard);
    core.on_frame(1000.0, &page);
    core.on_frame(1016.0, &page);

    core.disable(1100.0);
    core.enable(1150.0);
    let actions = core.fire_due(2000.0);
    assert_eq!(actions, vec![Action::RequestFrame]);
    assert!(core.registry.get(&id("buy")).is_some_and(|e| e.hovered));
}

// =============================================================
// Input adapters
// =============================================================

#[test]
fn adapters_are_inert_while_disabled() {
    let mut core = EngineCore::default();
    core.set_viewport(800.0, 600.0);
    let contact = TouchContact { id: 0, point: pt(5.0, 5.0) };

    assert!(core.on_pointer_move(pt(10.0, 10.0)).is_empty());
    assert!(core.on_wheel(300.0).is_empty());
    assert!(core.on_click(0.0).is_empty());
    assert!(core.on_touch_start(&[contact], 0.0).is_empty());
    assert!(core.on_touch_move(&[contact]).is_empty());
    assert!(core.on_touch_end(0, 10.0).is_empty());

    assert_eq!(core.fan(), FanState::default());
    assert!(!core.input.pulse.is_pending(10.0, 200.0));
}

#[test]
fn adapters_are_inert_during_debounce() {
    let mut core = EngineCore::default();
    core.enable(0.0);
    core.on_click(100.0);
    assert!(core.on_pointer_move(pt(10.0, 10.0)).is_empty());
    assert!(!core.input.pulse.is_pending(100.0, 200.0));
}

#[test]
fn pointer_move_places_fan() {
    let mut core = enabled_core();
    assert_eq!(core.on_pointer_move(pt(12.0, 34.0)), vec![Action::MoveFan(pt(12.0, 34.0))]);
    assert_eq!(core.fan().position, pt(12.0, 34.0));
}

#[test]
fn wheel_rotates_fan() {
    let mut core = enabled_core();
    let actions = core.on_wheel(150.0);
    assert_eq!(actions, vec![Action::RotateFan(0.5)]);
}

#[test]
fn touch_rotates_and_positions_fan() {
    let mut core = enabled_core();
    let a = TouchContact { id: 0, point: pt(100.0, 100.0) };
    let b = TouchContact { id: 1, point: pt(200.0, 100.0) };
    core.on_touch_start(&[a, b], 300.0);
    let b_moved = TouchContact { id: 1, point: pt(100.0, 200.0) };
    let actions = core.on_touch_move(&[a, b_moved]);
    let expected = std::f64::consts::FRAC_PI_2 * 1.5;
    assert!((core.fan().angle - expected).abs() < 1e-9);
    assert_eq!(actions.first(), Some(&Action::MoveFan(pt(100.0, 100.0))));
}

// =============================================================
// Frame loop
// =============================================================

#[test]
fn frame_while_disabled_ends_loop() {
    let mut core = EngineCore::default();
    core.set_viewport(800.0, 600.0);
    assert!(core.on_frame(0.0, &FakePage::default()).is_empty());
}

#[test]
fn frame_after_disable_ends_loop() {
    let page = FakePage::default();
    let mut core = running_core(&page);
    core.disable(1010.0);
    let actions = core.on_frame(1016.0, &page);
    assert!(!requests_frame(&actions));
    assert!(!has_action(&actions, |a| matches!(a, Action::MoveCursor(_))));
}

#[test]
fn first_frame_only_records_baseline() {
    let page = FakePage::default();
    let mut core = enabled_core();
    core.on_pointer_move(pt(350.0, 300.0));
    let actions = core.on_frame(1000.0, &page);
    assert_eq!(actions, vec![Action::RequestFrame]);
    assert_eq!(core.cursor().position, pt(400.0, 300.0));
}

#[test]
fn aimed_fan_pushes_cursor() {
    let page = FakePage::default();
    let mut core = running_core(&page);
    core.on_pointer_move(pt(350.0, 300.0));

    let actions = core.on_frame(1016.0, &page);
    assert!(requests_frame(&actions));
    let cursor = core.cursor();
    assert!(cursor.position.x > 400.0);
    assert_eq!(cursor.position.y, 300.0);
    assert!(has_action(&actions, |a| matches!(a, Action::MoveCursor(p) if *p == cursor.position)));
}

#[test]
fn reenable_does_not_integrate_the_gap() {
    let page = FakePage::default();
    let mut core = running_core(&page);
    core.disable(1010.0);
    core.on_frame(1016.0, &page);

    core.enable(60_000.0);
    core.fire_due(60_210.0);
    core.on_pointer_move(pt(350.0, 300.0));
    let actions = core.on_frame(60_300.0, &page);
    assert_eq!(actions, vec![Action::RequestFrame]);
    assert_eq!(core.cursor().position, pt(400.0, 300.0));
}

#[test]
fn frame_requests_scroll() {
    let page = FakePage { extent: Ok(Size::new(1600.0, 1200.0)), ..FakePage::default() };
    let mut core = running_core(&page);
    let actions = core.on_frame(1016.0, &page);
    let target = actions.iter().find_map(|a| match a {
        Action::ScrollTo(p) => Some(*p),
        _ => None,
    });
    // (400 - 20) / 800 * 800 and (300 - 20) / 600 * 600
    assert!(target.is_some_and(|p| (p.x - 380.0).abs() < 1e-9 && (p.y - 280.0).abs() < 1e-9));
}

#[test]
fn scroll_extent_failure_skips_scroll_only() {
    let page = FakePage { extent: Err(PageError::Host("boom".into())), ..page_with_button() };
    let mut core = running_core(&page);
    core.register_element(Some("buy"), Activation::Standard);
    let actions = core.on_frame(1016.0, &page);
    assert!(!has_action(&actions, |a| matches!(a, Action::ScrollTo(_))));
    assert!(actions.contains(&Action::SetFlag { id: id("buy"), flag: Flag::Hovered, on: true }));
    assert!(requests_frame(&actions));
}

#[test]
fn cursor_size_failure_keeps_last_size() {
    let good = FakePage::default();
    let mut core = running_core(&good);
    core.on_frame(1016.0, &good);
    assert_eq!(core.cursor_size, Size::new(20.0, 20.0));

    let bad = FakePage { cursor_size: Err(PageError::Host("detached".into())), ..FakePage::default() };
    core.on_frame(1032.0, &bad);
    assert_eq!(core.cursor_size, Size::new(20.0, 20.0));
}

#[test]
fn cursor_bounces_off_right_edge() {
    let page = FakePage::default();
    let mut core = running_core(&page);
    core.physics.cursor.position = pt(785.0, 300.0);
    core.physics.cursor.velocity = Vector::new(8.0, 0.0);
    core.on_frame(1001.0, &page);
    let cursor = core.cursor();
    assert!(cursor.velocity.x < 0.0);
    assert!(cursor.position.x < 785.0);
    assert!(cursor.position.x + 10.0 < 800.0);
}

// =============================================================
// Interaction
// =============================================================

#[test]
fn click_activates_hovered_element_once() {
    let page = page_with_button();
    let mut core = running_core(&page);
    core.register_element(Some("buy"), Activation::Standard);

    core.on_click(1010.0);
    let actions = core.on_frame(1016.0, &page);
    assert_eq!(activations(&actions), vec![id("buy")]);
    assert!(core.registry.get(&id("buy")).is_some_and(|e| e.hovered && e.activated));

    let next = core.on_frame(1032.0, &page);
    assert!(activations(&next).is_empty());
    assert!(next.contains(&Action::SetFlag { id: id("buy"), flag: Flag::Activated, on: false }));
}

#[test]
fn activated_flag_clears_after_hold_when_cursor_leaves() {
    let page = page_with_button();
    let mut core = running_core(&page);
    core.register_element(Some("buy"), Activation::Standard);
    core.on_click(1010.0);
    core.on_frame(1016.0, &page);

    // The button moves away; hover drops but the activated flag is held.
    let moved = FakePage::default().with("buy", Rect::new(0.0, 0.0, 10.0, 10.0));
    let actions = core.on_frame(1032.0, &moved);
    assert_eq!(actions.iter().filter(|a| matches!(a, Action::SetFlag { .. })).count(), 1);
    assert!(core.registry.get(&id("buy")).is_some_and(|e| !e.hovered && e.activated));

    let actions = core.fire_due(1216.0);
    assert_eq!(actions, vec![Action::SetFlag { id: id("buy"), flag: Flag::Activated, on: false }]);
}

#[test]
fn click_without_hover_expires_silently() {
    let page = FakePage::default().with("far", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut core = running_core(&page);
    core.register_element(Some("far"), Activation::Standard);
    core.on_click(1010.0);
    for t in [1016.0, 1100.0, 1300.0] {
        let actions = core.on_frame(t, &page);
        assert!(activations(&actions).is_empty());
    }
    assert!(!core.input.pulse.is_pending(1300.0, 200.0));
}

#[test]
fn tap_activates_like_click() {
    let page = page_with_button();
    let mut core = running_core(&page);
    core.register_element(Some("buy"), Activation::AttributeDriven);
    let finger = TouchContact { id: 0, point: pt(700.0, 500.0) };
    core.on_touch_start(&[finger], 1001.0);
    core.on_touch_end(0, 1050.0);
    let actions = core.on_frame(1060.0, &page);
    assert!(actions.contains(&Action::Activate { id: id("buy"), activation: Activation::AttributeDriven }));
}

#[test]
fn vanished_element_does_not_abort_frame() {
    let page = page_with_button();
    let mut core = running_core(&page);
    core.register_element(Some("gone"), Activation::Standard);
    core.register_element(Some("buy"), Activation::Standard);
    let actions = core.on_frame(1016.0, &page);
    assert!(actions.contains(&Action::SetFlag { id: id("buy"), flag: Flag::Hovered, on: true }));
    assert!(requests_frame(&actions));
}

// =============================================================
// Registry passthrough
// =============================================================

#[test]
fn register_element_generates_missing_ids() {
    let mut core = EngineCore::default();
    assert_eq!(core.register_element(None, Activation::Standard), (id("auto-id-0"), true));
    assert_eq!(core.register_element(Some("nav"), Activation::Standard), (id("nav"), false));
    assert_eq!(core.registry.len(), 2);
}

#[test]
fn unregister_element_cancels_pending_clear() {
    let page = page_with_button();
    let mut core = running_core(&page);
    core.register_element(Some("buy"), Activation::Standard);
    core.on_click(1010.0);
    core.on_frame(1016.0, &page);
    assert_eq!(core.next_deadline(), Some(1216.0));

    assert!(core.unregister_element(&id("buy")));
    assert_eq!(core.next_deadline(), None);
    assert!(!core.unregister_element(&id("buy")));
}

// =============================================================
// Diagnostics
// =============================================================

#[test]
fn debug_toggle_adds_diagnostics_to_frames() {
    let page = FakePage::default();
    let mut core = running_core(&page);
    assert_eq!(core.toggle_debug(), vec![Action::SetDebugView(true)]);
    let actions = core.on_frame(1016.0, &page);
    assert!(has_action(&actions, |a| matches!(a, Action::ShowDiagnostics(_))));

    assert_eq!(core.toggle_debug(), vec![Action::SetDebugView(false)]);
    let actions = core.on_frame(1032.0, &page);
    assert!(!has_action(&actions, |a| matches!(a, Action::ShowDiagnostics(_))));
}
