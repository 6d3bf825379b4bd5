//! # Navigation core
//!
//! One canonical [`Route`] per session decides what is on screen. Everything
//! else is derived from it or kept in sync with it:
//!
//! - [`project_visibility`] / [`project_tab`]: pure projections of the route.
//! - [`LayerStack`]: one entry per open overlay; popped by back.
//! - [`ReturnPathTracker`]: where the shared post-detail screen came from.
//! - [`ScreenRetention`]: keeps visited screens mounted for a while after
//!   they are hidden.
//! - [`Navigator`]: the store that owns all of the above and resolves back
//!   requests.
//!
//! ```rust
//! use lantern_core::ManualClock;
//! use lantern_navigation::*;
//! use std::rc::Rc;
//!
//! let nav = Navigator::new(&NavConfig::default(), Rc::new(ManualClock::default())).unwrap();
//! nav.go_my_page();
//! nav.request_route(Route::NotificationSettings).unwrap();
//! assert_eq!(nav.layer_stack(), vec![Layer::MyPage, Layer::NotificationSettings]);
//!
//! nav.request_back();
//! assert_eq!(nav.route(), Route::MyPage);
//! ```
//!
//! Screens never touch the layer stack or retention directly. They call
//! `request_route`, `open_detail`, or the close callback from
//! [`Navigator::back_action`], and the navigator does the rest.

pub mod back;
pub mod config;
pub mod error;
pub mod layers;
pub mod navigator;
pub mod retention;
pub mod return_path;
pub mod route;
pub mod visibility;

pub use back::{BackDispatcher, BackOutcome, BackStep, Closing, closing_rule, layerless_parent};
pub use config::NavConfig;
pub use error::{NavError, Result};
pub use layers::{Layer, LayerStack};
pub use navigator::{MountedScreen, NavState, Navigator};
pub use retention::{DEFAULT_RETENTION, ScreenRetention, TimerId};
pub use return_path::{DetailContext, DetailReturn, ReturnPathTracker};
pub use route::{ContentMode, DetailSource, FollowMode, ProfileSection, Route, Tab};
pub use visibility::{SYNC_ORDER, ScreenVisibility, project_tab, project_visibility};
