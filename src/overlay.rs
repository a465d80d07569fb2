//! Debug overlay: readout text, vector lines and crosshairs.

use fan::diagnostics::{Diagnostics, Segment};
use fan::error::PageError;
use web_sys::Document;

use crate::page::{self, ids, js_err, px, set_style};

const POINTER_DEBUG_FILL: &str = "red";

/// Show or hide the overlay. The pointer hotspot is filled while visible.
pub fn set_visible(document: &Document, visible: bool) -> Result<(), PageError> {
    set_style(document, ids::DEBUG_VIEW, "display", if visible { "block" } else { "none" })?;
    let fill = if visible { POINTER_DEBUG_FILL } else { "none" };
    page::element(document, ids::POINTER)?
        .set_attribute("style", &format!("fill: {fill}"))
        .map_err(js_err)
}

fn draw_line(document: &Document, id: &str, segment: Segment) -> Result<(), PageError> {
    let line = page::element(document, id)?;
    for (attr, value) in [
        ("x1", segment.from.x),
        ("y1", segment.from.y),
        ("x2", segment.to.x),
        ("y2", segment.to.y),
    ] {
        line.set_attribute(attr, &value.to_string()).map_err(js_err)?;
    }
    Ok(())
}

fn place_crosshair(document: &Document, id: &str, x: f64, y: f64) -> Result<(), PageError> {
    set_style(document, id, "top", &px(y))?;
    set_style(document, id, "left", &px(x))
}

pub fn render(document: &Document, diagnostics: &Diagnostics) -> Result<(), PageError> {
    page::element(document, ids::READOUT)?.set_inner_html(&diagnostics.readout());
    draw_line(document, ids::VELOCITY_LINE, diagnostics.velocity_line())?;
    draw_line(document, ids::ACCELERATION_LINE, diagnostics.acceleration_line())?;
    draw_line(document, ids::HEADING_LINE, diagnostics.heading_line())?;
    place_crosshair(document, ids::CURSOR_CROSSHAIR, diagnostics.cursor.x, diagnostics.cursor.y)?;
    place_crosshair(document, ids::FAN_CROSSHAIR, diagnostics.fan.x, diagnostics.fan.y)
}
