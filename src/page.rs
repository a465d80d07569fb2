//! DOM access: element lookup, style writes, and the [`Page`] implementation
//! the engine reads layout through.

use fan::error::PageError;
use fan::geometry::{Rect, Size};
use fan::reconcile::Page;
use fan::registry::ElementId;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

/// Element ids of the injected fan markup.
pub mod ids {
    pub const CONTAINER: &str = "fanContainer";
    pub const CURSOR_DIV: &str = "cursorDiv";
    pub const CURSOR_IMAGE: &str = "cursor";
    pub const POINTER: &str = "pointer";
    pub const FAN: &str = "fanpointer";
    pub const DEBUG_VIEW: &str = "debuggingView";
    pub const READOUT: &str = "posSpan";
    pub const CURSOR_CROSSHAIR: &str = "crosshair1";
    pub const FAN_CROSSHAIR: &str = "crosshair2";
    pub const ACCELERATION_LINE: &str = "accelerationVector";
    pub const VELOCITY_LINE: &str = "speedVector";
    pub const HEADING_LINE: &str = "fanVector";
}

/// Convert a failed host call into a [`PageError`].
pub fn js_err(err: JsValue) -> PageError {
    PageError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or_else(|| PageError::Host("no window".into()))
}

pub fn document() -> Result<Document, PageError> {
    window()?.document().ok_or_else(|| PageError::Host("no document".into()))
}

/// Milliseconds on the same clock as animation-frame timestamps.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// Current viewport size in CSS pixels.
pub fn viewport() -> Result<Size, PageError> {
    let window = window()?;
    let width = window.inner_width().map_err(js_err)?.as_f64().unwrap_or(0.0);
    let height = window.inner_height().map_err(js_err)?.as_f64().unwrap_or(0.0);
    Ok(Size::new(width, height))
}

pub fn element(document: &Document, id: &str) -> Result<Element, PageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::ElementMissing(id.to_owned()))
}

pub fn html_element(document: &Document, id: &str) -> Result<HtmlElement, PageError> {
    element(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| PageError::Host(format!("`{id}` is not an HTML element")))
}

/// Set one inline style property on the element with `id`.
pub fn set_style(document: &Document, id: &str, property: &str, value: &str) -> Result<(), PageError> {
    html_element(document, id)?
        .style()
        .set_property(property, value)
        .map_err(js_err)
}

#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Layout reads backed by the live document.
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new() -> Result<Self, PageError> {
        Ok(Self { document: document()? })
    }
}

impl Page for DomPage {
    fn element_box(&self, id: &ElementId) -> Result<Rect, PageError> {
        let rect = element(&self.document, id.as_str())?.get_bounding_client_rect();
        Ok(Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom()))
    }

    fn cursor_size(&self) -> Result<Size, PageError> {
        let rect = element(&self.document, ids::CURSOR_IMAGE)?.get_bounding_client_rect();
        Ok(Size::new(rect.width(), rect.height()))
    }

    fn scroll_extent(&self) -> Result<Size, PageError> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| PageError::Host("no document element".into()))?;
        Ok(Size::new(f64::from(root.scroll_width()), f64::from(root.scroll_height())))
    }
}
