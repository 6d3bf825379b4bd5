use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("route `{route}` requires a non-empty `{param}`")]
    MissingParam {
        route: &'static str,
        param: &'static str,
    },
    #[error("route `{0}` is only available to admin sessions")]
    AdminOnly(&'static str),
    #[error("invalid navigation config: {0}")]
    InvalidConfig(String),
    #[error("inconsistent navigation snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("malformed navigation json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
