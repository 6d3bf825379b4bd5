//! Origin tracking for the shared post-detail screen.
//!
//! Post detail can be entered from more than a dozen places. The tracker
//! remembers where it was entered from, plus whatever that origin needs to be
//! rebuilt (note id, profile nickname, follow-list mode), and hands back the
//! exact destination once when the detail closes.

use serde::{Deserialize, Serialize};

use crate::route::{ContentMode, DetailSource, FollowMode, ProfileSection, Route, Tab};
use crate::visibility::project_tab;

/// Extra origin context captured when detail opens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailContext {
    pub note_id: Option<String>,
    pub nickname: Option<String>,
    pub follow_mode: Option<FollowMode>,
}

impl DetailContext {
    pub fn note(note_id: impl Into<String>) -> Self {
        Self {
            note_id: Some(note_id.into()),
            ..Self::default()
        }
    }

    pub fn nickname(nickname: impl Into<String>) -> Self {
        Self {
            nickname: Some(nickname.into()),
            ..Self::default()
        }
    }

    pub fn follow(mode: FollowMode) -> Self {
        Self {
            follow_mode: Some(mode),
            ..Self::default()
        }
    }

    /// Fills the gaps from the route the detail is opened on top of.
    /// Explicit values win; blank strings count as absent.
    fn completed_from(self, origin: &Route) -> Self {
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        let mut ctx = Self {
            note_id: non_blank(self.note_id),
            nickname: non_blank(self.nickname),
            follow_mode: self.follow_mode,
        };
        match origin {
            Route::NoteDetail { note_id } if ctx.note_id.is_none() => {
                ctx.note_id = non_blank(Some(note_id.clone()));
            }
            Route::UserProfile { nickname } if ctx.nickname.is_none() => {
                ctx.nickname = non_blank(Some(nickname.clone()));
            }
            Route::FollowList { mode } if ctx.follow_mode.is_none() => {
                ctx.follow_mode = Some(*mode);
            }
            _ => {}
        }
        ctx
    }

    /// Keeps what `earlier` remembered wherever `self` has nothing.
    fn or(self, earlier: Self) -> Self {
        Self {
            note_id: self.note_id.or(earlier.note_id),
            nickname: self.nickname.or(earlier.nickname),
            follow_mode: self.follow_mode.or(earlier.follow_mode),
        }
    }
}

/// Where closing the detail lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailReturn {
    pub route: Route,
    pub tab: Tab,
    pub section: ProfileSection,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnPathTracker {
    source: DetailSource,
    context: DetailContext,
    selected_post: Option<String>,
}

impl ReturnPathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> DetailSource {
        self.source
    }

    pub fn context(&self) -> &DetailContext {
        &self.context
    }

    pub fn selected_post(&self) -> Option<&str> {
        self.selected_post.as_deref()
    }

    /// Records the origin, selects `post_id`, and returns the detail route to activate.
    pub fn open_detail(
        &mut self,
        post_id: impl Into<String>,
        source: DetailSource,
        origin: &Route,
        extra: DetailContext,
    ) -> Route {
        let post_id = post_id.into();
        self.source = source;
        let context = extra.completed_from(origin);
        // A related post opened from detail still returns to the first origin.
        self.context = match origin {
            Route::PostDetail { .. } => context.or(std::mem::take(&mut self.context)),
            _ => context,
        };
        self.selected_post = Some(post_id.clone());
        log::debug!(
            "detail {post_id} opened from {source:?} on {origin} ({:?})",
            self.context
        );
        Route::PostDetail { post_id, source }
    }

    /// Single use: computes the destination, then forgets the selection and
    /// origin. `None` when nothing is selected.
    pub fn close_detail(&mut self) -> Option<DetailReturn> {
        let post_id = self.selected_post.take()?;
        let (route, section) = destination(self.source, &self.context);
        log::debug!(
            "detail {post_id} closed, {:?} -> {route} ({section:?})",
            self.source
        );
        self.clear();
        Some(DetailReturn {
            tab: project_tab(&route),
            route,
            section,
        })
    }

    /// Drops the selection without navigating anywhere.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn destination(source: DetailSource, ctx: &DetailContext) -> (Route, ProfileSection) {
    let plain = |route| (route, ProfileSection::Profile);
    match source {
        DetailSource::Notes => match &ctx.note_id {
            Some(note_id) => plain(Route::NoteDetail {
                note_id: note_id.clone(),
            }),
            None => {
                log::warn!("detail opened from notes without a note id; returning to notes");
                plain(Route::Notes)
            }
        },
        DetailSource::MyPostsList => plain(Route::MyContentList {
            mode: ContentMode::Posts,
        }),
        DetailSource::MyRepliesList => plain(Route::MyContentList {
            mode: ContentMode::Replies,
        }),
        DetailSource::UserProfilePosts => profile_return(ctx, ProfileSection::Posts),
        DetailSource::UserProfileReplies => profile_return(ctx, ProfileSection::Replies),
        DetailSource::FollowList => plain(Route::FollowList {
            mode: ctx.follow_mode.unwrap_or_default(),
        }),
        DetailSource::Category => plain(Route::Category),
        DetailSource::Search => plain(Route::Search),
        DetailSource::MyPage => plain(Route::MyPage),
        DetailSource::Home => plain(Route::Home),
    }
}

fn profile_return(ctx: &DetailContext, section: ProfileSection) -> (Route, ProfileSection) {
    match &ctx.nickname {
        Some(nickname) => (
            Route::UserProfile {
                nickname: nickname.clone(),
            },
            section,
        ),
        None => {
            log::warn!("detail opened from a profile without a nickname; returning home");
            (Route::Home, ProfileSection::Profile)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_close(source: DetailSource, origin: Route, extra: DetailContext) -> DetailReturn {
        let mut t = ReturnPathTracker::new();
        let route = t.open_detail("p1", source, &origin, extra);
        assert_eq!(
            route,
            Route::PostDetail {
                post_id: "p1".into(),
                source
            }
        );
        t.close_detail().expect("post was selected")
    }

    #[test]
    fn notes_returns_to_the_remembered_note() {
        let ret = open_close(DetailSource::Notes, Route::Home, DetailContext::note("n7"));
        assert_eq!(
            ret.route,
            Route::NoteDetail {
                note_id: "n7".into()
            }
        );
        assert_eq!(ret.tab, Tab::Home);
    }

    #[test]
    fn notes_without_id_falls_back_to_list() {
        let ret = open_close(DetailSource::Notes, Route::Home, DetailContext::default());
        assert_eq!(ret.route, Route::Notes);

        let ret = open_close(DetailSource::Notes, Route::Home, DetailContext::note(" "));
        assert_eq!(ret.route, Route::Notes);
    }

    #[test]
    fn note_id_is_captured_from_origin() {
        let origin = Route::NoteDetail {
            note_id: "n3".into(),
        };
        let ret = open_close(DetailSource::Notes, origin, DetailContext::default());
        assert_eq!(
            ret.route,
            Route::NoteDetail {
                note_id: "n3".into()
            }
        );
    }

    #[test]
    fn my_content_lists() {
        let ret = open_close(DetailSource::MyPostsList, Route::Home, DetailContext::default());
        assert_eq!(
            ret.route,
            Route::MyContentList {
                mode: ContentMode::Posts
            }
        );
        assert_eq!(ret.tab, Tab::Profile);
        let ret = open_close(DetailSource::MyRepliesList, Route::Home, DetailContext::default());
        assert_eq!(
            ret.route,
            Route::MyContentList {
                mode: ContentMode::Replies
            }
        );
    }

    #[test]
    fn profile_sources_restore_section() {
        let origin = Route::UserProfile {
            nickname: "moth".into(),
        };
        let ret = open_close(DetailSource::UserProfileReplies, origin, DetailContext::default());
        assert_eq!(
            ret.route,
            Route::UserProfile {
                nickname: "moth".into()
            }
        );
        assert_eq!(ret.section, ProfileSection::Replies);
        assert_eq!(ret.tab, Tab::Home);

        let ret = open_close(
            DetailSource::UserProfilePosts,
            Route::Home,
            DetailContext::nickname("wick"),
        );
        assert_eq!(ret.section, ProfileSection::Posts);
    }

    #[test]
    fn profile_without_nickname_goes_home() {
        let ret = open_close(DetailSource::UserProfilePosts, Route::Home, DetailContext::default());
        assert_eq!(ret.route, Route::Home);
        assert_eq!(ret.section, ProfileSection::Profile);
    }

    #[test]
    fn follow_list_mode() {
        let ret = open_close(
            DetailSource::FollowList,
            Route::Home,
            DetailContext::follow(FollowMode::Following),
        );
        assert_eq!(
            ret.route,
            Route::FollowList {
                mode: FollowMode::Following
            }
        );
        assert_eq!(ret.tab, Tab::Profile);

        let ret = open_close(DetailSource::FollowList, Route::Home, DetailContext::default());
        assert_eq!(
            ret.route,
            Route::FollowList {
                mode: FollowMode::Followers
            }
        );
    }

    #[test]
    fn root_sources() {
        for (source, route) in [
            (DetailSource::Category, Route::Category),
            (DetailSource::Search, Route::Search),
            (DetailSource::MyPage, Route::MyPage),
            (DetailSource::Home, Route::Home),
        ] {
            assert_eq!(
                open_close(source, Route::Home, DetailContext::default()).route,
                route
            );
        }
    }

    #[test]
    fn close_is_single_use() {
        let mut t = ReturnPathTracker::new();
        t.open_detail("p9", DetailSource::Search, &Route::Search, DetailContext::default());
        assert_eq!(t.selected_post(), Some("p9"));
        assert!(t.close_detail().is_some());
        assert_eq!(t.close_detail(), None);
        assert_eq!(t.source(), DetailSource::Home);
        assert_eq!(t.selected_post(), None);
    }

    #[test]
    fn explicit_context_wins_over_origin() {
        let mut t = ReturnPathTracker::new();
        t.open_detail(
            "p2",
            DetailSource::FollowList,
            &Route::FollowList {
                mode: FollowMode::Followers,
            },
            DetailContext::follow(FollowMode::Following),
        );
        assert_eq!(t.context().follow_mode, Some(FollowMode::Following));
    }

    #[test]
    fn related_post_keeps_earlier_context() {
        let mut t = ReturnPathTracker::new();
        let first = t.open_detail(
            "p1",
            DetailSource::UserProfilePosts,
            &Route::UserProfile {
                nickname: "moth".into(),
            },
            DetailContext::default(),
        );
        t.open_detail("p2", DetailSource::UserProfilePosts, &first, DetailContext::default());
        assert_eq!(t.selected_post(), Some("p2"));
        assert_eq!(t.context().nickname.as_deref(), Some("moth"));
    }

    #[test]
    fn context_is_not_carried_across_unrelated_opens() {
        let mut t = ReturnPathTracker::new();
        t.open_detail("p1", DetailSource::Notes, &Route::Home, DetailContext::note("n1"));
        t.open_detail("p2", DetailSource::Search, &Route::Search, DetailContext::default());
        assert_eq!(t.context().note_id, None);
    }
}
