//! Resolved identity of the current session holder.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, UserProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: Uuid,
    pub email: Option<String>,
    pub role: Role,
    pub business_ids: Vec<String>,
    /// Always a member of `business_ids` when set.
    pub active_business_id: Option<String>,
    pub display_name: Option<String>,
}

impl Principal {
    /// First-login default when the directory has no profile yet.
    pub fn first_login(uid: Uuid, email: Option<String>) -> Self {
        Self {
            uid,
            email,
            role: Role::Customer,
            business_ids: Vec::new(),
            active_business_id: None,
            display_name: None,
        }
    }

    /// Hydrate from a stored profile. The session email wins over the
    /// stored one since it comes from the identity provider.
    pub fn from_profile(profile: UserProfile, session_email: Option<String>) -> Self {
        let active_business_id =
            derive_active_business(&profile.business_ids, profile.active_business_id.as_deref());
        Self {
            uid: profile.uid,
            email: session_email.or(profile.email),
            role: profile.role,
            business_ids: profile.business_ids,
            active_business_id,
            display_name: profile.display_name,
        }
    }

    pub fn is_member_of(&self, business_id: &str) -> bool {
        self.business_ids.iter().any(|id| id == business_id)
    }

    /// Super admins are implicitly scoped to every tenant.
    pub fn may_act_for(&self, business_id: &str) -> bool {
        self.role == Role::SuperAdmin || self.is_member_of(business_id)
    }
}

/// Stored preference if it is still a membership, else the first
/// membership, else nothing.
pub fn derive_active_business(business_ids: &[String], stored: Option<&str>) -> Option<String> {
    match stored {
        Some(id) if business_ids.iter().any(|b| b == id) => Some(id.to_string()),
        _ => business_ids.first().cloned(),
    }
}

/// Lifecycle of the session as seen by the access gate.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Identity resolution has not finished yet.
    #[default]
    Pending,
    Unauthenticated,
    Authenticated {
        principal: Principal,
        active_tenant_id: Option<String>,
    },
}

impl SessionState {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::Authenticated { principal, .. } => Some(principal),
            _ => None,
        }
    }

    pub fn active_tenant_id(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated {
                active_tenant_id, ..
            } => active_tenant_id.as_deref(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::Pending)
    }
}
