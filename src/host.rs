//! Owns the engine on the browser side and drives it.
//!
//! Every entry point goes through [`Host::run`]: borrow the engine, make one
//! call, release the borrow, then apply the returned actions. Applying an
//! action can call back into the host (discovery registers elements, a frame
//! request schedules the next callback), so the engine is never borrowed while
//! actions are applied. After each call the single deferred-action timer is
//! re-armed for the engine's earliest deadline.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use fan::config::FanConfig;
use fan::engine::{Action, EngineCore};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::apply;
use crate::page::{self, DomPage};

pub struct Host {
    core: RefCell<EngineCore>,
    /// Base URL the fan's images and stylesheet are served from.
    pub asset_base: String,
    /// Selectors discovered from mirrored `:hover` rules.
    pub hover_selectors: RefCell<Vec<String>>,
    timer: RefCell<Option<Timeout>>,
    raf_pending: Cell<bool>,
    frame_cb: Closure<dyn FnMut(f64)>,
    me: Weak<Host>,
}

impl Host {
    pub fn new(config: FanConfig, asset_base: String) -> Rc<Self> {
        Rc::new_cyclic(|me: &Weak<Host>| {
            let weak = me.clone();
            let frame_cb = Closure::wrap(Box::new(move |ts: f64| {
                if let Some(host) = weak.upgrade() {
                    host.on_animation_frame(ts);
                }
            }) as Box<dyn FnMut(f64)>);
            Self {
                core: RefCell::new(EngineCore::new(config)),
                asset_base,
                hover_selectors: RefCell::new(Vec::new()),
                timer: RefCell::new(None),
                raf_pending: Cell::new(false),
                frame_cb,
                me: me.clone(),
            }
        })
    }

    /// Borrow the engine for one call. Returns `None` if it is already
    /// borrowed further up the stack.
    pub fn with_core<R>(&self, f: impl FnOnce(&mut EngineCore) -> R) -> Option<R> {
        match self.core.try_borrow_mut() {
            Ok(mut core) => Some(f(&mut core)),
            Err(_) => {
                log::warn!("engine busy; dropping re-entrant call");
                None
            }
        }
    }

    /// Make one engine call and apply what it returns.
    pub fn run(&self, f: impl FnOnce(&mut EngineCore) -> Vec<Action>) {
        let Some(actions) = self.with_core(f) else {
            return;
        };
        apply::apply_all(self, actions);
        self.arm_timer();
    }

    /// Handle for callbacks that must not keep the host alive.
    pub fn weak(&self) -> Weak<Host> {
        self.me.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.with_core(|core| core.is_enabled()).unwrap_or(false)
    }

    // --- Frame loop ---

    /// Ask for one animation frame. A second request before the first fires
    /// is ignored, so there is never more than one loop.
    pub fn request_frame(&self) {
        if self.raf_pending.get() {
            return;
        }
        let requested = page::window()
            .and_then(|w| w.request_animation_frame(self.frame_cb.as_ref().unchecked_ref()).map_err(page::js_err));
        match requested {
            Ok(_) => self.raf_pending.set(true),
            Err(err) => log::error!("could not request animation frame: {err}"),
        }
    }

    fn on_animation_frame(&self, timestamp_ms: f64) {
        self.raf_pending.set(false);
        match DomPage::new() {
            Ok(dom) => self.run(|core| core.on_frame(timestamp_ms, &dom)),
            Err(err) => log::error!("skipping frame: {err}"),
        }
    }

    // --- Deferred actions ---

    fn arm_timer(&self) {
        let Some(deadline) = self.with_core(|core| core.next_deadline()) else {
            return;
        };
        let Some(deadline) = deadline else {
            self.timer.borrow_mut().take();
            return;
        };
        let weak = self.me.clone();
        let timeout = Timeout::new(delay_ms(deadline, page::now_ms()), move || {
            if let Some(host) = weak.upgrade() {
                host.run(|core| core.fire_due(page::now_ms()));
            }
        });
        // Replacing the handle cancels the previous timeout.
        *self.timer.borrow_mut() = Some(timeout);
    }
}

/// Whole milliseconds from `now` until `deadline`, rounded up so the timer
/// never fires before the action is due.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn delay_ms(deadline: f64, now: f64) -> u32 {
    (deadline - now).max(0.0).ceil().min(f64::from(u32::MAX)) as u32
}
