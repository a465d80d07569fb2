//! Fan-pointer physics core.
//!
//! The simulated cursor is pushed around the viewport by a virtual fan that
//! the user steers with the real pointer, wheel and touch. Everything in this
//! crate is DOM-free: the browser host feeds [`engine::EngineCore`] input
//! events, frame timestamps and timer callbacks, reads layout through the
//! [`reconcile::Page`] trait, and applies the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the [`engine::Action`] list |
//! | [`physics`] | Thrust, damping, integration and edge reflection |
//! | [`input`] | Fan state, activation pulse and touch gestures |
//! | [`lifecycle`] | Enable/disable state machine with debounce |
//! | [`schedule`] | Cancellable deferred actions keyed by deadline |
//! | [`registry`] | Interactive elements and their presentation flags |
//! | [`reconcile`] | Per-frame hit testing, activation and scroll follow |
//! | [`hit`] | Cursor hotspot box and overlap test |
//! | [`styles`] | Hover-rule mirroring and class names |
//! | [`diagnostics`] | Debug overlay snapshot and readout |
//! | [`geometry`] | Points, vectors, boxes and angle helpers |
//! | [`config`] | Tunable [`config::FanConfig`] with JSON overrides |
//! | [`consts`] | Default numeric constants |
//! | [`error`] | Host-boundary error types |

pub mod config;
pub mod consts;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod lifecycle;
pub mod physics;
pub mod reconcile;
pub mod registry;
pub mod schedule;
pub mod styles;
