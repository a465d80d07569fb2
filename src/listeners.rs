//! Window event wiring. Each handler converts the DOM event into one engine
//! call; the engine itself ignores input while the fan is disabled.

use fan::error::PageError;
use fan::geometry::Point;
use fan::input::TouchContact;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget, MouseEvent, TouchEvent, TouchList, WheelEvent};

use crate::host::Host;
use crate::page::{self, js_err};

/// Add a listener that forwards `E` events to `handler` for as long as the
/// host is alive. Non-passive listeners may cancel the default action.
fn on<E: JsCast + 'static>(
    target: &EventTarget,
    name: &str,
    passive: bool,
    host: &Host,
    handler: fn(&Host, E),
) -> Result<(), PageError> {
    let weak = host.weak();
    let callback = Closure::wrap(Box::new(move |event: Event| {
        let (Some(host), Ok(event)) = (weak.upgrade(), event.dyn_into::<E>()) else {
            return;
        };
        handler(&host, event);
    }) as Box<dyn FnMut(Event)>);

    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            name,
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;
    callback.forget();
    Ok(())
}

fn client_point(x: i32, y: i32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

fn contacts(list: &TouchList) -> Vec<TouchContact> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|touch| TouchContact { id: touch.identifier(), point: client_point(touch.client_x(), touch.client_y()) })
        .collect()
}

/// Cancel the browser default while the fan owns the pointer.
fn capture(host: &Host, event: &Event) {
    if host.is_enabled() {
        event.prevent_default();
    }
}

/// Push the current window size into the engine.
pub fn sync_viewport(host: &Host) {
    match page::viewport() {
        Ok(size) => host.run(|core| core.set_viewport(size.width, size.height)),
        Err(err) => log::warn!("could not read viewport: {err}"),
    }
}

fn on_resize(host: &Host, _: Event) {
    sync_viewport(host);
}

fn on_mouse_move(host: &Host, event: MouseEvent) {
    let point = client_point(event.client_x(), event.client_y());
    host.run(|core| core.on_pointer_move(point));
}

fn on_wheel(host: &Host, event: WheelEvent) {
    capture(host, &event);
    host.run(|core| core.on_wheel(event.delta_y()));
}

fn on_click(host: &Host, event: MouseEvent) {
    // Clicks the fan delivers to elements come back through here untrusted.
    if !event.is_trusted() {
        return;
    }
    host.run(|core| core.on_click(page::now_ms()));
}

fn on_touch_start(host: &Host, event: TouchEvent) {
    capture(host, &event);
    let touches = contacts(&event.touches());
    host.run(|core| core.on_touch_start(&touches, page::now_ms()));
}

fn on_touch_move(host: &Host, event: TouchEvent) {
    capture(host, &event);
    let touches = contacts(&event.touches());
    host.run(|core| core.on_touch_move(&touches));
}

fn on_touch_end(host: &Host, event: TouchEvent) {
    capture(host, &event);
    let remaining = event.touches().length() as usize;
    host.run(|core| core.on_touch_end(remaining, page::now_ms()));
}

fn on_drag(host: &Host, event: Event) {
    capture(host, &event);
}

/// Register every window listener the fan needs.
pub fn attach(host: &Host) -> Result<(), PageError> {
    let window = page::window()?;
    let target: &EventTarget = window.as_ref();

    on(target, "resize", true, host, on_resize)?;
    on(target, "mousemove", true, host, on_mouse_move)?;
    on(target, "wheel", false, host, on_wheel)?;
    on(target, "click", true, host, on_click)?;
    on(target, "touchstart", false, host, on_touch_start)?;
    on(target, "touchmove", false, host, on_touch_move)?;
    on(target, "touchend", false, host, on_touch_end)?;
    on(target, "dragstart", false, host, on_drag)?;
    on(target, "dragover", false, host, on_drag)?;

    log::debug!("window listeners attached");
    Ok(())
}
