//! # Signals, scopes and time
//!
//! The navigation layer is single-threaded and event driven. This crate holds
//! the few primitives it is built on:
//!
//! - `Signal<T>`: observable value; subscribers see every committed write.
//! - `Scope` / `Dispose`: ownership of cleanups, so whatever a screen opened
//!   is released when the screen goes away.
//! - `Clock`: injected time source (`SystemClock` in apps, `ManualClock` in
//!   tests).
//!
//! ## Signals
//!
//! ```rust
//! use lantern_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! `set_if_changed` skips the write (and the notification) when the new value
//! equals the old one. A write made from a subscriber supersedes the delivery
//! in progress, so no subscriber is left holding a stale value.
//!
//! ## Scopes
//!
//! ```rust
//! use lantern_core::*;
//! use std::{cell::Cell, rc::Rc};
//!
//! let released = Rc::new(Cell::new(false));
//! let scope = Scope::new();
//! let flag = released.clone();
//! on_unmount(move || flag.set(true)).bind(&scope);
//!
//! scope.dispose();
//! assert!(released.get());
//! ```
//!
//! ## Time
//!
//! Anything that schedules work takes an `Rc<dyn Clock>` and is polled by the
//! host loop; nothing here spawns threads or owns a timer wheel.

pub mod clock;
pub mod effects;
pub mod scope;
pub mod signal;
pub mod tests;

pub use clock::*;
pub use effects::*;
pub use scope::*;
pub use signal::*;

pub use web_time::{Duration, Instant};
