//! Fan markup and stylesheet injected into the page on first enable.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use fan::error::PageError;
use fan::styles::OWN_STYLESHEET;
use web_sys::Document;

use crate::page::{ids, js_err};

/// Class marking every element the fan adds to the page.
pub const FAN_MARKER_CLASS: &str = "fanstuff";

/// `base` joined with a relative asset path.
#[must_use]
pub fn asset_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() { format!("./{path}") } else { format!("{base}/{path}") }
}

/// Inner HTML of the fan container.
#[must_use]
pub fn container_html(base: &str) -> String {
    let image = |name: &str| asset_url(base, &format!("images/{name}"));
    format!(
        r#"<div id="{cursor_div}">
    <img id="{cursor}" src="{cursor_src}" alt="">
    <svg class="fsvg" id="pointerSVG">
        <circle id="{pointer}" r="4px" cx="4px" cy="4px"></circle>
    </svg>
</div>
<div id="{fan}">
    <img id="fan" src="{fan_src}" alt="">
    <img id="airflow" src="{airflow_src}" alt="">
</div>
<div id="{debug}">
    <span id="{readout}"></span>
    <img id="{cross1}" class="crosshair" src="{crosshair_src}" height="50px" alt="">
    <img id="{cross2}" class="crosshair" src="{crosshair_src}" height="50px" alt="">
    <svg class="fsvg">
        <line id="{accel}" x1="0" y1="0" x2="20" y2="20" stroke="red" fill="none" stroke-width="4"></line>
        <line id="{velocity}" x1="0" y1="0" x2="20" y2="20" stroke="blue" fill="none" stroke-width="2"></line>
        <line id="{heading}" x1="0" y1="0" x2="20" y2="20" stroke="blue" fill="none" stroke-width="2"></line>
    </svg>
</div>"#,
        cursor_div = ids::CURSOR_DIV,
        cursor = ids::CURSOR_IMAGE,
        cursor_src = image("cursor.webp"),
        pointer = ids::POINTER,
        fan = ids::FAN,
        fan_src = image("fancursor.webp"),
        airflow_src = image("airflow.svg"),
        debug = ids::DEBUG_VIEW,
        readout = ids::READOUT,
        cross1 = ids::CURSOR_CROSSHAIR,
        cross2 = ids::FAN_CROSSHAIR,
        crosshair_src = image("crosshair.svg"),
        accel = ids::ACCELERATION_LINE,
        velocity = ids::VELOCITY_LINE,
        heading = ids::HEADING_LINE,
    )
}

/// Add the fan stylesheet link and container to the document. Does nothing
/// if the container is already present.
pub fn inject(document: &Document, base: &str) -> Result<(), PageError> {
    if document.get_element_by_id(ids::CONTAINER).is_some() {
        log::debug!("fan markup already present");
        return Ok(());
    }

    let head = document.head().ok_or_else(|| PageError::Host("document has no <head>".into()))?;
    let link = document.create_element("link").map_err(js_err)?;
    link.set_attribute("rel", "stylesheet").map_err(js_err)?;
    link.set_attribute("type", "text/css").map_err(js_err)?;
    link.set_attribute("href", &asset_url(base, OWN_STYLESHEET)).map_err(js_err)?;
    head.append_child(&link).map_err(js_err)?;

    let body = document.body().ok_or_else(|| PageError::Host("document has no <body>".into()))?;
    let container = document.create_element("div").map_err(js_err)?;
    container.set_id(ids::CONTAINER);
    container.class_list().add_1(FAN_MARKER_CLASS).map_err(js_err)?;
    container.set_inner_html(&container_html(base));
    body.append_child(&container).map_err(js_err)?;

    log::debug!("fan markup injected from `{base}`");
    Ok(())
}
