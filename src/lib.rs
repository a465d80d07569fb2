//! Browser host for the fan-pointer.
//!
//! Compiled to WebAssembly and loaded by the page. A page calls [`init`] once;
//! the fan then starts in whatever state this tab last left it, and the other
//! exports let page controls turn it on and off. All simulation lives in the
//! `fan` crate; this crate only wires the DOM to [`fan::engine::EngineCore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`host`] | Owns the engine, runs the frame loop and the deferred-action timer |
//! | [`listeners`] | Window event wiring |
//! | [`apply`] | Applies engine actions to the document |
//! | [`page`] | DOM helpers and the layout reads behind [`fan::reconcile::Page`] |
//! | [`discovery`] | Element discovery, `:hover` mirroring, mutation tracking |
//! | [`assets`] | Fan markup and stylesheet injection |
//! | [`overlay`] | Debug overlay rendering |
//! | [`storage`] | Enabled flag in `sessionStorage` |

pub mod apply;
pub mod assets;
pub mod discovery;
pub mod host;
pub mod listeners;
pub mod overlay;
pub mod page;
pub mod storage;


use std::cell::RefCell;
use std::rc::Rc;

use fan::config::FanConfig;
use wasm_bindgen::prelude::*;

use crate::host::Host;

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

fn with_host(f: impl FnOnce(&Host)) {
    let host = HOST.with(|slot| slot.borrow().clone());
    match host {
        Some(host) => f(&host),
        None => log::warn!("fan pointer not initialized; call init() first"),
    }
}

fn load_config(raw: Option<&str>) -> FanConfig {
    FanConfig::from_json(raw.unwrap_or_default()).unwrap_or_else(|err| {
        log::warn!("ignoring malformed fan config: {err}");
        FanConfig::default()
    })
}

/// Set up the fan pointer on this page.
///
/// `asset_base` is the URL prefix the fan's stylesheet and images are served
/// from. `config_json` optionally overrides any subset of the tunables.
#[wasm_bindgen]
pub fn init(asset_base: &str, config_json: Option<String>) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }

    if HOST.with(|slot| slot.borrow().is_some()) {
        log::warn!("fan pointer already initialized");
        return;
    }

    let host = Host::new(load_config(config_json.as_deref()), asset_base.to_owned());
    HOST.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&host)));

    if let Err(err) = listeners::attach(&host) {
        log::error!("could not attach listeners: {err}");
    }
    listeners::sync_viewport(&host);

    let enabled = storage::load_enabled().unwrap_or_else(|err| {
        log::warn!("could not read stored state: {err}");
        false
    });
    if enabled {
        host.run(|core| core.enable(page::now_ms()));
    }
    log::info!("fan pointer ready");
}

/// Switch the fan on or off.
#[wasm_bindgen]
pub fn toggle_fan() {
    with_host(|host| host.run(|core| core.toggle(page::now_ms())));
}

#[wasm_bindgen]
pub fn enable_fan() {
    with_host(|host| host.run(|core| core.enable(page::now_ms())));
}

#[wasm_bindgen]
pub fn disable_fan() {
    with_host(|host| host.run(|core| core.disable(page::now_ms())));
}

/// Show or hide the debug overlay.
#[wasm_bindgen]
pub fn toggle_debugger() {
    with_host(|host| host.run(fan::engine::EngineCore::toggle_debug));
}
