//! The per-session navigation store.
//!
//! `Navigator` is a cheap cloneable handle. It owns the canonical route (with
//! its projections), the layer stack, the return-path tracker and screen
//! retention. Leaf screens only ever *request* changes; the layer stack and
//! the visited-screen set are written exclusively by the sync step that runs
//! inside every route replacement.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use lantern_core::{Clock, Dispose, Scope, Signal, SubId, effect, on_unmount};
use serde::{Deserialize, Serialize};

use crate::back::{BackDispatcher, BackOutcome, BackStep, Closing, closing_rule, layerless_parent};
use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::layers::{Layer, LayerStack};
use crate::retention::ScreenRetention;
use crate::return_path::{DetailContext, DetailReturn, ReturnPathTracker};
use crate::route::{ContentMode, DetailSource, FollowMode, ProfileSection, Route, Tab};
use crate::visibility::{ScreenVisibility, project_tab, project_visibility};

/// Everything derived from one route, replaced as a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavState {
    pub route: Route,
    pub tab: Tab,
    pub visibility: ScreenVisibility,
    pub section: ProfileSection,
}

impl NavState {
    fn project(route: Route, section: ProfileSection) -> Self {
        let section = match route {
            Route::UserProfile { .. } => section,
            _ => ProfileSection::Profile,
        };
        Self {
            tab: project_tab(&route),
            visibility: project_visibility(&route),
            route,
            section,
        }
    }
}

/// A screen that has been visited and is still mounted.
#[derive(Clone, Debug)]
pub struct MountedScreen {
    pub layer: Layer,
    pub visible: bool,
    pub scope: Scope,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavSnapshot {
    route: Route,
    #[serde(default)]
    profile_section: ProfileSection,
    #[serde(default)]
    return_path: ReturnPathTracker,
}

struct NavInner {
    state: Signal<NavState>,
    layers: RefCell<LayerStack>,
    return_path: RefCell<ReturnPathTracker>,
    retention: RefCell<ScreenRetention<Layer>>,
    on_exit: RefCell<Option<Rc<dyn Fn()>>>,
    admin: bool,
}

#[derive(Clone)]
pub struct Navigator {
    inner: Rc<NavInner>,
}

impl Navigator {
    pub fn new(config: &NavConfig, clock: Rc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let nav = Self {
            inner: Rc::new(NavInner {
                state: Signal::new(NavState::project(Route::Home, ProfileSection::Profile)),
                layers: RefCell::new(LayerStack::new()),
                return_path: RefCell::new(ReturnPathTracker::new()),
                retention: RefCell::new(ScreenRetention::new(clock, config.retention_timeout())),
                on_exit: RefCell::new(None),
                admin: config.admin,
            }),
        };
        nav.apply(config.start_route(), ProfileSection::Profile);
        log::info!(
            "navigator ready at {} (retention {:?})",
            nav.route(),
            config.retention_timeout()
        );
        Ok(nav)
    }

    // ---- read side -------------------------------------------------------

    pub fn state(&self) -> NavState {
        self.inner.state.get()
    }

    pub fn route(&self) -> Route {
        self.inner.state.with(|s| s.route.clone())
    }

    pub fn tab(&self) -> Tab {
        self.inner.state.with(|s| s.tab)
    }

    pub fn visibility(&self) -> ScreenVisibility {
        self.inner.state.with(|s| s.visibility.clone())
    }

    pub fn profile_section(&self) -> ProfileSection {
        self.inner.state.with(|s| s.section)
    }

    /// Bottom to top.
    pub fn layer_stack(&self) -> Vec<Layer> {
        self.inner.layers.borrow().to_vec()
    }

    pub fn selected_post(&self) -> Option<String> {
        self.inner
            .return_path
            .borrow()
            .selected_post()
            .map(str::to_owned)
    }

    pub fn detail_source(&self) -> DetailSource {
        self.inner.return_path.borrow().source()
    }

    pub fn subscribe(&self, f: impl Fn(&NavState) + 'static) -> SubId {
        self.inner.state.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubId) {
        self.inner.state.unsubscribe(id)
    }

    // ---- route requests --------------------------------------------------

    pub fn request_route(&self, route: Route) -> Result<()> {
        route
            .validate()
            .inspect_err(|e| log::warn!("rejected route request: {e}"))?;
        if route.is_admin_only() && !self.inner.admin {
            log::warn!("rejected {route}: not an admin session");
            return Err(NavError::AdminOnly(route.name()));
        }
        if let Route::PostDetail { post_id, source } = route {
            return self.open_detail(post_id, source, DetailContext::default());
        }
        self.go(route);
        Ok(())
    }

    pub fn go_home(&self) {
        self.go(Route::Home);
    }

    pub fn go_ranking(&self) {
        self.go(Route::Ranking);
    }

    pub fn go_bookmarks(&self) {
        self.go(Route::Bookmarks);
    }

    pub fn go_my_page(&self) {
        self.go(Route::MyPage);
    }

    pub fn go_achievements(&self) {
        self.go(Route::Achievements);
    }

    pub fn go_follow_list(&self, mode: FollowMode) {
        self.go(Route::FollowList { mode });
    }

    pub fn go_my_content_list(&self, mode: ContentMode) {
        self.go(Route::MyContentList { mode });
    }

    pub fn start_writing(&self) {
        self.go(Route::Write);
    }

    pub fn go_user_profile(&self, nickname: impl Into<String>) -> Result<()> {
        self.request_route(Route::UserProfile {
            nickname: nickname.into(),
        })
    }

    /// Switches the section of the user profile currently shown.
    pub fn set_profile_section(&self, section: ProfileSection) {
        let route = self.route();
        if !matches!(route, Route::UserProfile { .. }) {
            log::warn!("profile section change ignored on {route}");
            return;
        }
        self.apply(route, section);
    }

    /// Opens the shared post-detail screen, remembering where it was opened
    /// from so closing it lands back there.
    pub fn open_detail(
        &self,
        post_id: impl Into<String>,
        source: DetailSource,
        extra: DetailContext,
    ) -> Result<()> {
        let post_id = post_id.into();
        if post_id.trim().is_empty() {
            return Err(NavError::MissingParam {
                route: "postDetail",
                param: "postId",
            });
        }
        let origin = self.route();
        let route = self
            .inner
            .return_path
            .borrow_mut()
            .open_detail(post_id, source, &origin, extra);
        self.apply(route, ProfileSection::Profile);
        Ok(())
    }

    /// Returns to wherever the detail was opened from. `None` (and no
    /// navigation) when no post is selected.
    pub fn close_detail(&self) -> Option<DetailReturn> {
        let ret = self.inner.return_path.borrow_mut().close_detail()?;
        self.apply(ret.route.clone(), ret.section);
        Some(ret)
    }

    // ---- back ------------------------------------------------------------

    pub fn set_exit_handler(&self, f: impl Fn() + 'static) {
        *self.inner.on_exit.borrow_mut() = Some(Rc::new(f));
    }

    /// Resolves one back request against the live state.
    pub fn request_back(&self) -> BackOutcome {
        let popped = self.inner.layers.borrow_mut().pop();
        if let Some(layer) = popped {
            return self.close_layer(layer);
        }

        let state = self.state();
        if let Some(parent) = layerless_parent(&state.route) {
            return self.navigate_back(parent, BackStep::LayerlessParent);
        }
        if state.route.is_admin_only() {
            return self.navigate_back(Route::Home, BackStep::AdminFallback);
        }
        let has_selection = self.inner.return_path.borrow().selected_post().is_some();
        if state.tab == Tab::Home && !has_selection {
            log::info!("back at {}: requesting exit confirmation", state.route);
            let handler = self.inner.on_exit.borrow().clone();
            match handler {
                Some(h) => h(),
                None => log::warn!("exit requested but no exit handler is set"),
            }
            return BackOutcome::ExitRequested;
        }
        self.navigate_back(Route::Home, BackStep::DefaultHome)
    }

    /// Closes one specific screen, even if other layers sit above it.
    /// `None` when that screen is not currently shown.
    pub fn close_screen(&self, layer: Layer) -> Option<BackOutcome> {
        if !self.inner.state.with(|s| s.visibility.is_visible(layer)) {
            log::debug!("close of hidden {layer} ignored");
            return None;
        }
        self.inner.layers.borrow_mut().remove(layer);
        Some(self.close_layer(layer))
    }

    /// Pre-wired close callback for the screen that owns `layer`. Safe to call
    /// after the navigator is gone.
    pub fn back_action(&self, layer: Layer) -> Rc<dyn Fn()> {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                Navigator { inner }.close_screen(layer);
            }
        })
    }

    /// Installs the back handler on `dispatcher` until the returned guard runs
    /// (or `scope` is disposed). The handler holds a weak handle and reads the
    /// navigator's state when the signal fires.
    pub fn install_back_handler(&self, dispatcher: &BackDispatcher, scope: Option<&Scope>) -> Dispose {
        let weak: Weak<NavInner> = Rc::downgrade(&self.inner);
        effect(scope, || {
            let token = dispatcher.install(move || match weak.upgrade() {
                Some(inner) => Navigator { inner }.request_back(),
                None => BackOutcome::Unhandled,
            });
            let dispatcher = dispatcher.clone();
            on_unmount(move || dispatcher.uninstall(token))
        })
    }

    // ---- retention -------------------------------------------------------

    /// Evicts screens whose retention timer expired. Called from the host loop.
    pub fn poll_retention(&self) -> Vec<Layer> {
        let expired = self.inner.retention.borrow_mut().take_expired();
        expired
            .into_iter()
            .map(|(layer, scope)| {
                scope.dispose();
                layer
            })
            .collect()
    }

    /// Visited screens still mounted, in first-visit order.
    pub fn mounted_screens(&self) -> Vec<MountedScreen> {
        let visibility = self.visibility();
        self.inner
            .retention
            .borrow()
            .mounted()
            .map(|(layer, scope)| MountedScreen {
                layer: *layer,
                visible: visibility.is_visible(*layer),
                scope: scope.clone(),
            })
            .collect()
    }

    pub fn is_mounted(&self, layer: Layer) -> bool {
        self.inner.retention.borrow().is_visited(&layer)
    }

    pub fn has_pending_eviction(&self, layer: Layer) -> bool {
        self.inner.retention.borrow().has_pending_eviction(&layer)
    }

    /// Scope of a mounted screen, for its data subscriptions.
    pub fn screen_scope(&self, layer: Layer) -> Option<Scope> {
        self.inner.retention.borrow().scope(&layer)
    }

    // ---- snapshot --------------------------------------------------------

    pub fn snapshot_json(&self) -> Result<String> {
        let state = self.state();
        let snap = NavSnapshot {
            route: state.route,
            profile_section: state.section,
            return_path: self.inner.return_path.borrow().clone(),
        };
        Ok(serde_json::to_string(&snap)?)
    }

    /// Replays a snapshot through the normal route replacement, so layers and
    /// retention resync to it. A selected post must agree with the route.
    pub fn restore_json(&self, json: &str) -> Result<()> {
        let snap: NavSnapshot = serde_json::from_str(json)?;
        snap.route.validate()?;
        if snap.route.is_admin_only() && !self.inner.admin {
            return Err(NavError::AdminOnly(snap.route.name()));
        }
        let selected = snap.return_path.selected_post();
        match &snap.route {
            Route::PostDetail { post_id, source }
                if selected != Some(post_id.as_str()) || *source != snap.return_path.source() =>
            {
                return Err(NavError::InvalidSnapshot(format!(
                    "post detail {post_id} does not match the selected post {selected:?}"
                )));
            }
            Route::PostDetail { .. } => {}
            route if selected.is_some() => {
                return Err(NavError::InvalidSnapshot(format!(
                    "post {selected:?} is selected but the route is {route}"
                )));
            }
            _ => {}
        }
        *self.inner.return_path.borrow_mut() = snap.return_path;
        self.apply(snap.route, snap.profile_section);
        Ok(())
    }

    /// Releases every mounted screen and forgets the layer stack.
    pub fn teardown(&self) {
        self.inner.layers.borrow_mut().clear();
        let mounted = self.inner.retention.borrow_mut().drain();
        for (layer, scope) in mounted {
            log::debug!("teardown: releasing {layer}");
            scope.dispose();
        }
    }

    // ---- internals -------------------------------------------------------

    fn go(&self, route: Route) {
        self.inner.return_path.borrow_mut().clear();
        self.apply(route, ProfileSection::Profile);
    }

    fn navigate_back(&self, to: Route, step: BackStep) -> BackOutcome {
        let from = self.route();
        log::debug!("back via {step:?}: {from} -> {to}");
        self.go(to.clone());
        BackOutcome::Navigated { from, to, step }
    }

    fn close_layer(&self, layer: Layer) -> BackOutcome {
        let state = self.state();
        let outcome = match closing_rule(layer, state.section) {
            Closing::To(route) => self.navigate_back(route, BackStep::Layer(layer)),
            Closing::ResetSection => match state.route {
                Route::UserProfile { nickname } => {
                    self.apply(
                        Route::UserProfile {
                            nickname: nickname.clone(),
                        },
                        ProfileSection::Profile,
                    );
                    BackOutcome::SectionReset { nickname }
                }
                _ => self.navigate_back(Route::Home, BackStep::Layer(layer)),
            },
            Closing::ReturnPath => match self.close_detail() {
                Some(ret) => BackOutcome::Navigated {
                    from: state.route,
                    to: ret.route,
                    step: BackStep::Layer(layer),
                },
                None => {
                    log::warn!("post detail closed with no selected post; going home");
                    self.navigate_back(Route::Home, BackStep::Layer(layer))
                }
            },
        };
        self.reconcile(layer);
        outcome
    }

    /// A closing rule that keeps its own screen visible puts the layer back.
    fn reconcile(&self, layer: Layer) {
        if self.inner.state.with(|s| s.visibility.is_visible(layer)) {
            self.inner.layers.borrow_mut().push(layer);
        }
    }

    /// Replaces the route. Projections are computed and layers/retention synced
    /// before observers are notified; an identical state is a no-op.
    fn apply(&self, route: Route, section: ProfileSection) {
        let next = NavState::project(route, section);
        let prev = self.state();
        if prev == next {
            return;
        }
        self.sync_layers(&prev.visibility, &next.visibility);
        log::debug!("route {} -> {} (tab {:?})", prev.route, next.route, next.tab);
        self.inner.state.set(next);
    }

    fn sync_layers(&self, prev: &ScreenVisibility, next: &ScreenVisibility) {
        let mut layers = self.inner.layers.borrow_mut();
        let mut retention = self.inner.retention.borrow_mut();
        for ((layer, was), (_, now)) in prev.layer_flags().zip(next.layer_flags()) {
            if was == now {
                continue;
            }
            layers.sync(layer, now);
            if now {
                retention.mark_active(layer);
            } else {
                retention.mark_inactive(layer);
            }
            log::debug!("layer {layer} {}", if now { "pushed" } else { "removed" });
        }
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("route", &self.route())
            .field("layers", &self.layer_stack())
            .field("selected_post", &self.selected_post())
            .finish()
    }
}
