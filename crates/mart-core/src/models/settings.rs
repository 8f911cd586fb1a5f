//! Platform-wide settings managed by super admins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub allow_public_registration: bool,
    pub maintenance_mode: bool,
    pub platform_name: String,
    pub support_email: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            allow_public_registration: true,
            maintenance_mode: false,
            platform_name: "Antigravity Mart".into(),
            support_email: "support@mart.com".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateSettings {
    pub allow_public_registration: Option<bool>,
    pub maintenance_mode: Option<bool>,
    pub platform_name: Option<String>,
    pub support_email: Option<String>,
}

impl GlobalSettings {
    /// Apply a partial update on top of these settings.
    pub fn merged(mut self, update: UpdateSettings) -> Self {
        if let Some(v) = update.allow_public_registration {
            self.allow_public_registration = v;
        }
        if let Some(v) = update.maintenance_mode {
            self.maintenance_mode = v;
        }
        if let Some(v) = update.platform_name {
            self.platform_name = v;
        }
        if let Some(v) = update.support_email {
            self.support_email = v;
        }
        self
    }
}
