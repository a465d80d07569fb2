//! Applies engine [`Action`]s to the document.

#[cfg(test)]
#[path = "apply_test.rs"]
mod apply_test;

use fan::engine::Action;
use fan::error::PageError;
use fan::geometry::Point;
use fan::registry::{Activation, ElementId, Flag};
use fan::styles::{EXPANDED_CLASS, class_for};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, MouseEventInit, ScrollBehavior, ScrollToOptions};

use crate::host::Host;
use crate::page::{self, ids, js_err, px, set_style};
use crate::{assets, discovery, overlay, storage};

/// Apply actions in order. A failing action is logged and skipped; the rest
/// still run.
pub fn apply_all(host: &Host, actions: Vec<Action>) {
    if actions.is_empty() {
        return;
    }
    let document = match page::document() {
        Ok(document) => document,
        Err(err) => {
            log::error!("dropping {} actions: {err}", actions.len());
            return;
        }
    };
    for action in actions {
        if let Err(err) = apply(host, &document, action) {
            log::warn!("action failed: {err}");
        }
    }
}

fn apply(host: &Host, document: &Document, action: Action) -> Result<(), PageError> {
    match action {
        Action::Initialize => initialize(host, document),
        Action::SetExpanded(on) => set_class(document, ids::CONTAINER, EXPANDED_CLASS, on),
        Action::PersistEnabled(on) => storage::save_enabled(on),
        Action::RequestFrame => {
            host.request_frame();
            Ok(())
        }
        Action::MoveFan(p) => place(document, ids::FAN, p),
        Action::RotateFan(angle) => set_style(document, ids::FAN, "transform", &rotation(angle)),
        Action::MoveCursor(p) => place(document, ids::CURSOR_DIV, p),
        Action::SetFlag { id, flag, on } => set_flag(document, &id, flag, on),
        Action::Activate { id, activation } => activate(document, &id, activation),
        Action::ScrollTo(p) => scroll_to(p),
        Action::SetDebugView(on) => overlay::set_visible(document, on),
        Action::ShowDiagnostics(diagnostics) => overlay::render(document, &diagnostics),
    }
}

fn initialize(host: &Host, document: &Document) -> Result<(), PageError> {
    assets::inject(document, &host.asset_base)?;
    discovery::discover(host, document);
    discovery::observe(host, document)
}

#[must_use]
pub fn rotation(angle: f64) -> String {
    format!("rotate({angle}rad)")
}

fn place(document: &Document, id: &str, p: Point) -> Result<(), PageError> {
    set_style(document, id, "top", &px(p.y))?;
    set_style(document, id, "left", &px(p.x))
}

fn set_class(document: &Document, id: &str, class: &str, on: bool) -> Result<(), PageError> {
    page::element(document, id)?
        .class_list()
        .toggle_with_force(class, on)
        .map(|_| ())
        .map_err(js_err)
}

fn set_flag(document: &Document, id: &ElementId, flag: Flag, on: bool) -> Result<(), PageError> {
    set_class(document, id.as_str(), class_for(flag), on)
}

fn activate(document: &Document, id: &ElementId, activation: Activation) -> Result<(), PageError> {
    let element = page::element(document, id.as_str())?;
    if activation == Activation::Standard {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            html.click();
            return Ok(());
        }
    }
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).map_err(js_err)?;
    element.dispatch_event(&event).map(|_| ()).map_err(js_err)
}

fn scroll_to(p: Point) -> Result<(), PageError> {
    let options = ScrollToOptions::new();
    options.set_left(p.x);
    options.set_top(p.y);
    options.set_behavior(ScrollBehavior::Instant);
    page::window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}
