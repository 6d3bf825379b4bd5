//! Pure projections from `Route` to what the shell renders.

use serde::Serialize;

use crate::layers::Layer;
use crate::route::{ContentMode, FollowMode, Route, Tab};

/// Order in which layer flags are synced when one route change flips several.
///
/// `MyPage` comes first so screens that sit on top of it (notification
/// settings, theme) end up above it in the layer stack.
pub const SYNC_ORDER: [Layer; 19] = [
    Layer::MyPage,
    Layer::Write,
    Layer::QuestionCompose,
    Layer::Notes,
    Layer::NoteDetail,
    Layer::PostDetail,
    Layer::TitlesCollection,
    Layer::TitleShop,
    Layer::Achievements,
    Layer::UserProfile,
    Layer::MyContentList,
    Layer::FollowList,
    Layer::Category,
    Layer::NotificationSettings,
    Layer::Ranking,
    Layer::Bookmarks,
    Layer::Search,
    Layer::Quiz,
    Layer::Theme,
];

/// Overlay visibility record. Only ever built by [`project_visibility`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenVisibility {
    pub my_page: bool,
    pub write: bool,
    pub question_compose: bool,
    pub notes: bool,
    pub note_detail: Option<String>,
    pub post_detail: Option<String>,
    pub titles_collection: bool,
    pub title_shop: bool,
    pub achievements: bool,
    pub user_profile: Option<String>,
    pub my_content_list: Option<ContentMode>,
    pub follow_list: Option<FollowMode>,
    pub category: bool,
    pub notification_settings: bool,
    pub ranking: bool,
    pub bookmarks: bool,
    pub search: bool,
    pub quiz: bool,
    pub theme: bool,
}

impl ScreenVisibility {
    pub fn is_visible(&self, layer: Layer) -> bool {
        match layer {
            Layer::MyPage => self.my_page,
            Layer::Write => self.write,
            Layer::QuestionCompose => self.question_compose,
            Layer::Notes => self.notes,
            Layer::NoteDetail => self.note_detail.is_some(),
            Layer::PostDetail => self.post_detail.is_some(),
            Layer::TitlesCollection => self.titles_collection,
            Layer::TitleShop => self.title_shop,
            Layer::Achievements => self.achievements,
            Layer::UserProfile => self.user_profile.is_some(),
            Layer::MyContentList => self.my_content_list.is_some(),
            Layer::FollowList => self.follow_list.is_some(),
            Layer::Category => self.category,
            Layer::NotificationSettings => self.notification_settings,
            Layer::Ranking => self.ranking,
            Layer::Bookmarks => self.bookmarks,
            Layer::Search => self.search,
            Layer::Quiz => self.quiz,
            Layer::Theme => self.theme,
        }
    }

    /// Every layer flag, in [`SYNC_ORDER`].
    pub fn layer_flags(&self) -> impl Iterator<Item = (Layer, bool)> + '_ {
        SYNC_ORDER.iter().map(|l| (*l, self.is_visible(*l)))
    }

    pub fn visible_layers(&self) -> Vec<Layer> {
        self.layer_flags()
            .filter_map(|(l, on)| on.then_some(l))
            .collect()
    }
}

pub fn project_visibility(route: &Route) -> ScreenVisibility {
    let base = ScreenVisibility::default();
    match route {
        Route::Home => base,
        Route::MyPage => ScreenVisibility {
            my_page: true,
            ..base
        },
        Route::Ranking => ScreenVisibility {
            ranking: true,
            ..base
        },
        Route::Bookmarks => ScreenVisibility {
            bookmarks: true,
            ..base
        },
        Route::Category => ScreenVisibility {
            category: true,
            ..base
        },
        Route::Search => ScreenVisibility {
            search: true,
            ..base
        },
        Route::TitleShop => ScreenVisibility {
            title_shop: true,
            ..base
        },
        Route::TitlesCollection => ScreenVisibility {
            titles_collection: true,
            ..base
        },
        Route::Achievements => ScreenVisibility {
            achievements: true,
            ..base
        },
        Route::Theme => ScreenVisibility {
            theme: true,
            ..base
        },
        Route::Quiz => ScreenVisibility {
            quiz: true,
            ..base
        },
        Route::Notes => ScreenVisibility {
            notes: true,
            ..base
        },
        Route::NoteDetail { note_id } => ScreenVisibility {
            note_detail: Some(note_id.clone()),
            ..base
        },
        Route::QuestionCompose => ScreenVisibility {
            question_compose: true,
            ..base
        },
        Route::Write => ScreenVisibility {
            write: true,
            ..base
        },
        Route::FollowList { mode } => ScreenVisibility {
            follow_list: Some(*mode),
            ..base
        },
        Route::MyContentList { mode } => ScreenVisibility {
            my_content_list: Some(*mode),
            ..base
        },
        Route::UserProfile { nickname } => ScreenVisibility {
            user_profile: Some(nickname.clone()),
            ..base
        },
        Route::PostDetail { post_id, .. } => ScreenVisibility {
            post_detail: Some(post_id.clone()),
            ..base
        },
        // Rendered by the shell itself, gated on the admin session.
        Route::AdminReports => base,
        Route::NotificationSettings => ScreenVisibility {
            my_page: true,
            notification_settings: true,
            ..base
        },
    }
}

pub fn project_tab(route: &Route) -> Tab {
    match route {
        Route::Home
        | Route::Quiz
        | Route::PostDetail { .. }
        | Route::UserProfile { .. }
        | Route::Category
        | Route::Search
        | Route::TitleShop
        | Route::AdminReports
        | Route::Notes
        | Route::NoteDetail { .. }
        | Route::QuestionCompose
        | Route::Write => Tab::Home,
        Route::Ranking => Tab::Ranking,
        Route::Bookmarks => Tab::Bookmarks,
        Route::MyPage
        | Route::FollowList { .. }
        | Route::MyContentList { .. }
        | Route::NotificationSettings
        | Route::Theme => Tab::Profile,
        Route::TitlesCollection => Tab::TitlesCollection,
        Route::Achievements => Tab::Achievements,
    }
}
