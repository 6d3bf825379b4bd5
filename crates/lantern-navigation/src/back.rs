//! Back-signal rules and the dispatcher the platform calls into.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::layers::Layer;
use crate::route::{ProfileSection, Route};

/// What closing a layer does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Closing {
    To(Route),
    /// Resolved by the return-path tracker.
    ReturnPath,
    /// Profile showing posts/replies goes back to its main section first.
    ResetSection,
}

pub fn closing_rule(layer: Layer, section: ProfileSection) -> Closing {
    match layer {
        Layer::PostDetail => Closing::ReturnPath,
        Layer::UserProfile => match section {
            ProfileSection::Posts | ProfileSection::Replies => Closing::ResetSection,
            ProfileSection::Profile => Closing::To(Route::Home),
        },
        Layer::NoteDetail => Closing::To(Route::Notes),
        Layer::TitlesCollection
        | Layer::Achievements
        | Layer::MyContentList
        | Layer::FollowList
        | Layer::NotificationSettings
        | Layer::Theme => Closing::To(Route::MyPage),
        Layer::Write
        | Layer::QuestionCompose
        | Layer::TitleShop
        | Layer::MyPage
        | Layer::Notes
        | Layer::Category
        | Layer::Ranking
        | Layer::Bookmarks
        | Layer::Search
        | Layer::Quiz => Closing::To(Route::Home),
    }
}

/// Parent for overlay routes reached with an empty layer stack.
pub fn layerless_parent(route: &Route) -> Option<Route> {
    match route {
        Route::Theme | Route::NotificationSettings => Some(Route::MyPage),
        Route::MyPage => Some(Route::Home),
        _ => None,
    }
}

/// Which rule resolved a back request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackStep {
    Layer(Layer),
    LayerlessParent,
    AdminFallback,
    DefaultHome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackOutcome {
    Navigated {
        from: Route,
        to: Route,
        step: BackStep,
    },
    /// The user profile went back to its main section; the route is unchanged.
    SectionReset { nickname: String },
    ExitRequested,
    /// No handler was installed (or the navigator is gone).
    Unhandled,
}

type Handler = Rc<dyn Fn() -> BackOutcome>;

/// Slot for the single active back handler.
///
/// The platform calls [`BackDispatcher::dispatch`] for hardware back presses;
/// the shell installs a handler for as long as it is composed. Installing a new
/// handler replaces the old one, and a stale uninstall does not remove the
/// newer handler.
#[derive(Clone, Default)]
pub struct BackDispatcher {
    slot: Rc<RefCell<Option<(u64, Handler)>>>,
    next_token: Rc<Cell<u64>>,
}

impl BackDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a token for [`BackDispatcher::uninstall`].
    pub fn install(&self, handler: impl Fn() -> BackOutcome + 'static) -> u64 {
        let token = self.next_token.get() + 1;
        self.next_token.set(token);
        let previous = self.slot.borrow_mut().replace((token, Rc::new(handler)));
        if previous.is_some() {
            log::warn!("back handler replaced while another was installed");
        }
        token
    }

    pub fn uninstall(&self, token: u64) {
        let mut slot = self.slot.borrow_mut();
        if slot.as_ref().is_some_and(|(t, _)| *t == token) {
            *slot = None;
        }
    }

    pub fn is_installed(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn dispatch(&self) -> BackOutcome {
        let handler = self.slot.borrow().as_ref().map(|(_, h)| h.clone());
        match handler {
            Some(h) => h(),
            None => {
                log::debug!("back signal with no handler installed");
                BackOutcome::Unhandled
            }
        }
    }
}
