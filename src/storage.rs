//! Enabled flag kept in `sessionStorage` across page loads in one tab.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use fan::error::PageError;
use web_sys::Storage;

use crate::page::{self, js_err};

pub const ENABLED_KEY: &str = "isEnabled";

fn session() -> Result<Storage, PageError> {
    page::window()?
        .session_storage()
        .map_err(js_err)?
        .ok_or_else(|| PageError::Host("sessionStorage unavailable".into()))
}

/// Interpret a stored value. Anything but a JSON `true` means disabled.
#[must_use]
pub fn parse_enabled(raw: Option<&str>) -> bool {
    matches!(raw.map(|raw| serde_json::from_str::<bool>(raw.trim())), Some(Ok(true)))
}

/// Whether the fan was enabled when this tab last stored its state.
pub fn load_enabled() -> Result<bool, PageError> {
    let raw = session()?.get_item(ENABLED_KEY).map_err(js_err)?;
    Ok(parse_enabled(raw.as_deref()))
}

pub fn save_enabled(enabled: bool) -> Result<(), PageError> {
    let raw = serde_json::to_string(&enabled).map_err(|err| PageError::Host(err.to_string()))?;
    session()?.set_item(ENABLED_KEY, &raw).map_err(js_err)
}
