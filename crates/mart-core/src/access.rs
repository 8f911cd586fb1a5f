//! Role gate for admin views and actions.
//!
//! The gate only answers "may this role enter?". Which tenant the caller
//! may touch is decided separately by the session's active tenant; the
//! two checks are never merged into one decision.

use crate::error::{MartError, MartResult};
use crate::models::principal::SessionState;
use crate::models::user::Role;

/// Where both denial kinds send the user.
pub const LOGIN_PATH: &str = "/admin/login";

/// Business dashboard (`/admin`).
pub const CONSOLE_ROLES: &[Role] = &[Role::BusinessAdmin, Role::SuperAdmin];

/// Platform administration (`/super-admin/*`).
pub const PLATFORM_ROLES: &[Role] = &[Role::SuperAdmin];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    RoleNotPermitted(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
    /// Identity not known yet: show a loading state, do not redirect.
    Pending,
}

impl AccessDecision {
    /// Redirect target for a denial. Both reasons share the login page.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            AccessDecision::Deny(_) => Some(LOGIN_PATH),
            AccessDecision::Allow | AccessDecision::Pending => None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn into_result(self) -> MartResult<()> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Pending => Err(MartError::SessionPending),
            AccessDecision::Deny(DenyReason::Unauthenticated) => Err(MartError::Unauthenticated),
            AccessDecision::Deny(DenyReason::RoleNotPermitted(role)) => {
                Err(MartError::Unauthorized { role })
            }
        }
    }
}

/// Decide whether the session may enter an area requiring `required`.
pub fn authorize(state: &SessionState, required: &[Role]) -> AccessDecision {
    match state {
        SessionState::Pending => AccessDecision::Pending,
        SessionState::Unauthenticated => AccessDecision::Deny(DenyReason::Unauthenticated),
        SessionState::Authenticated { principal, .. } => {
            if required.contains(&principal.role) {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::RoleNotPermitted(principal.role))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::principal::Principal;
    use uuid::Uuid;

    fn signed_in(role: Role) -> SessionState {
        let mut principal = Principal::first_login(Uuid::new_v4(), None);
        principal.role = role;
        SessionState::Authenticated {
            principal,
            active_tenant_id: None,
        }
    }

    /// Every subset of the four roles.
    fn all_role_sets() -> Vec<Vec<Role>> {
        (0u8..16)
            .map(|mask| {
                Role::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, r)| *r)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn allow_iff_role_in_required_set() {
        for required in all_role_sets() {
            for role in Role::ALL {
                let decision = authorize(&signed_in(role), &required);
                if required.contains(&role) {
                    assert_eq!(decision, AccessDecision::Allow, "{role} in {required:?}");
                } else {
                    assert_eq!(
                        decision,
                        AccessDecision::Deny(DenyReason::RoleNotPermitted(role)),
                        "{role} not in {required:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn absent_principal_is_always_denied() {
        for required in all_role_sets() {
            assert_eq!(
                authorize(&SessionState::Unauthenticated, &required),
                AccessDecision::Deny(DenyReason::Unauthenticated)
            );
        }
    }

    #[test]
    fn pending_never_redirects() {
        let decision = authorize(&SessionState::Pending, CONSOLE_ROLES);
        assert_eq!(decision, AccessDecision::Pending);
        assert_eq!(decision.redirect(), None);
        assert!(matches!(
            decision.into_result(),
            Err(MartError::SessionPending)
        ));
    }

    #[test]
    fn both_denials_share_the_login_redirect() {
        let anon = authorize(&SessionState::Unauthenticated, PLATFORM_ROLES);
        let wrong_role = authorize(&signed_in(Role::BusinessAdmin), PLATFORM_ROLES);
        assert_eq!(anon.redirect(), Some(LOGIN_PATH));
        assert_eq!(wrong_role.redirect(), Some(LOGIN_PATH));
        assert!(anon.into_result().unwrap_err().requires_login());
        assert!(wrong_role.into_result().unwrap_err().requires_login());
    }

    #[test]
    fn console_admits_business_and_super_admins_only() {
        assert!(authorize(&signed_in(Role::BusinessAdmin), CONSOLE_ROLES).is_allowed());
        assert!(authorize(&signed_in(Role::SuperAdmin), CONSOLE_ROLES).is_allowed());
        assert!(!authorize(&signed_in(Role::Staff), CONSOLE_ROLES).is_allowed());
        assert!(!authorize(&signed_in(Role::Customer), CONSOLE_ROLES).is_allowed());
    }
}
