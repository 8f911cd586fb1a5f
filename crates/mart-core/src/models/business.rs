//! Business (tenant) domain model.
//!
//! A business owns exactly one product catalog and one theme. Its id is
//! derived from the name at creation time and never changes afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storefront presentation settings. Opaque to the access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub animations_enabled: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary_color: "#6366f1".into(),
            secondary_color: "#ec4899".into(),
            font_family: "Inter".into(),
            logo_url: None,
            animations_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub theme_settings: ThemeSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full record written when a business is created. Replaces any record
/// already stored under the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutBusiness {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub theme_settings: ThemeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateBusiness {
    pub name: Option<String>,
    pub owner_id: Option<String>,
    pub theme_settings: Option<ThemeSettings>,
}
