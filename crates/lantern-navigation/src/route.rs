use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FollowMode {
    #[default]
    Followers,
    Following,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentMode {
    #[default]
    Posts,
    Replies,
}

/// Where the shared post-detail screen was opened from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailSource {
    #[default]
    Home,
    MyPage,
    MyPostsList,
    MyRepliesList,
    FollowList,
    UserProfilePosts,
    UserProfileReplies,
    Search,
    Category,
    Notes,
}

/// Which section of another user's profile is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileSection {
    #[default]
    Profile,
    Posts,
    Replies,
}

/// Highlighted bottom tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    Home,
    Ranking,
    Bookmarks,
    Profile,
    TitlesCollection,
    Achievements,
}

/// Where the user currently is. Exactly one is active per session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    tag = "name",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Route {
    #[default]
    Home,
    MyPage,
    Ranking,
    Bookmarks,
    Category,
    Search,
    TitleShop,
    TitlesCollection,
    Achievements,
    Theme,
    Quiz,
    Notes,
    NoteDetail {
        note_id: String,
    },
    QuestionCompose,
    Write,
    FollowList {
        mode: FollowMode,
    },
    MyContentList {
        mode: ContentMode,
    },
    UserProfile {
        nickname: String,
    },
    PostDetail {
        post_id: String,
        source: DetailSource,
    },
    AdminReports,
    NotificationSettings,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::MyPage => "myPage",
            Route::Ranking => "ranking",
            Route::Bookmarks => "bookmarks",
            Route::Category => "category",
            Route::Search => "search",
            Route::TitleShop => "titleShop",
            Route::TitlesCollection => "titlesCollection",
            Route::Achievements => "achievements",
            Route::Theme => "theme",
            Route::Quiz => "quiz",
            Route::Notes => "notes",
            Route::NoteDetail { .. } => "noteDetail",
            Route::QuestionCompose => "questionCompose",
            Route::Write => "write",
            Route::FollowList { .. } => "followList",
            Route::MyContentList { .. } => "myContentList",
            Route::UserProfile { .. } => "userProfile",
            Route::PostDetail { .. } => "postDetail",
            Route::AdminReports => "adminReports",
            Route::NotificationSettings => "notificationSettings",
        }
    }

    pub fn is_admin_only(&self) -> bool {
        matches!(self, Route::AdminReports)
    }

    /// Rejects routes whose required parameter is blank.
    pub fn validate(&self) -> Result<()> {
        let missing = |param| NavError::MissingParam {
            route: self.name(),
            param,
        };
        match self {
            Route::NoteDetail { note_id } if note_id.trim().is_empty() => Err(missing("noteId")),
            Route::UserProfile { nickname } if nickname.trim().is_empty() => {
                Err(missing("nickname"))
            }
            Route::PostDetail { post_id, .. } if post_id.trim().is_empty() => {
                Err(missing("postId"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::NoteDetail { note_id } => write!(f, "noteDetail({note_id})"),
            Route::FollowList { mode } => write!(f, "followList({mode:?})"),
            Route::MyContentList { mode } => write!(f, "myContentList({mode:?})"),
            Route::UserProfile { nickname } => write!(f, "userProfile({nickname})"),
            Route::PostDetail { post_id, source } => {
                write!(f, "postDetail({post_id}, from {source:?})")
            }
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_serialize_with_name_tag() {
        let r = Route::NoteDetail {
            note_id: "n7".into(),
        };
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"name":"noteDetail","noteId":"n7"}"#);

        let back: Route =
            serde_json::from_str(r#"{"name":"followList","mode":"following"}"#).unwrap();
        assert_eq!(
            back,
            Route::FollowList {
                mode: FollowMode::Following
            }
        );
    }

    #[test]
    fn blank_parameters_are_rejected() {
        let err = Route::UserProfile {
            nickname: "  ".into(),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(
            err,
            NavError::MissingParam {
                route: "userProfile",
                param: "nickname"
            }
        ));
        assert!(
            Route::PostDetail {
                post_id: String::new(),
                source: DetailSource::Home
            }
            .validate()
            .is_err()
        );
        assert!(Route::Theme.validate().is_ok());
    }

    #[test]
    fn display_includes_parameters() {
        let r = Route::PostDetail {
            post_id: "p1".into(),
            source: DetailSource::Notes,
        };
        assert_eq!(r.to_string(), "postDetail(p1, from Notes)");
        assert_eq!(Route::TitleShop.to_string(), "titleShop");
    }
}
