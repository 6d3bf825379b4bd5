use lantern_core::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};
use crate::route::Route;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavConfig {
    /// How long a hidden screen stays mounted before it is released.
    pub retention_timeout_secs: u64,
    pub initial_route: Route,
    /// Land on MyPage instead of `initial_route` (e.g. right after sign-up).
    pub open_my_page_on_start: bool,
    pub admin: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            retention_timeout_secs: 120,
            initial_route: Route::Home,
            open_my_page_on_start: false,
            admin: false,
        }
    }
}

impl NavConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: NavConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn retention_timeout(&self) -> Duration {
        Duration::from_secs(self.retention_timeout_secs)
    }

    pub fn start_route(&self) -> Route {
        if self.open_my_page_on_start {
            Route::MyPage
        } else {
            self.initial_route.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.retention_timeout_secs == 0 {
            return Err(NavError::InvalidConfig(
                "retentionTimeoutSecs must be greater than zero".into(),
            ));
        }
        let start = self.start_route();
        start.validate()?;
        if matches!(start, Route::PostDetail { .. }) {
            return Err(NavError::InvalidConfig(
                "a session cannot start on post detail".into(),
            ));
        }
        if start.is_admin_only() && !self.admin {
            return Err(NavError::AdminOnly(start.name()));
        }
        Ok(())
    }
}
