//! User directory profile and the closed role set.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MartError;

/// Every role a principal can hold. Stored as its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    BusinessAdmin,
    Staff,
    Customer,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::SuperAdmin,
        Role::BusinessAdmin,
        Role::Staff,
        Role::Customer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::BusinessAdmin => "business_admin",
            Role::Staff => "staff",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = MartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "business_admin" => Ok(Role::BusinessAdmin),
            "staff" => Ok(Role::Staff),
            "customer" => Ok(Role::Customer),
            other => Err(MartError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// A stored user profile, keyed by the identity provider's uid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: Uuid,
    pub email: Option<String>,
    pub role: Role,
    /// Tenants this user may act on behalf of.
    pub business_ids: Vec<String>,
    /// Last tenant the user worked in, if any.
    pub active_business_id: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Merge-write of a profile: creates the record if missing, otherwise
/// overwrites only these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertProfile {
    pub email: Option<String>,
    pub role: Role,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProfile {
    pub role: Option<Role>,
    pub business_ids: Option<Vec<String>>,
    /// `Some(Some(id))` = set, `Some(None)` = clear, `None` = no change.
    pub active_business_id: Option<Option<String>>,
    pub display_name: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "owner".parse::<Role>().unwrap_err();
        assert!(matches!(err, MartError::Validation { .. }));
        assert!("Super_Admin".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::BusinessAdmin).unwrap();
        assert_eq!(json, "\"business_admin\"");
    }
}
