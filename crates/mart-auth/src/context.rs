//! Per-session principal and active-tenant state.
//!
//! A [`SessionContext`] is created per application session and passed
//! to whatever needs the current principal. Every transition is
//! published on a `watch` channel, so observers see the current state
//! on subscribe and are notified of each later change.

use std::sync::Arc;

use mart_core::error::{MartError, MartResult};
use mart_core::models::principal::{Principal, SessionState};
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SessionContext {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// Starts in [`SessionState::Pending`].
    pub fn new() -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(SessionState::Pending)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn principal(&self) -> Option<Principal> {
        self.tx.borrow().principal().cloned()
    }

    /// Read at call time; there is no snapshot.
    pub fn active_tenant_id(&self) -> Option<String> {
        self.tx.borrow().active_tenant_id().map(str::to_string)
    }

    /// The active tenant, or `TenantContext` when none is selected.
    pub fn require_tenant(&self) -> MartResult<String> {
        match &*self.tx.borrow() {
            SessionState::Pending => Err(MartError::SessionPending),
            SessionState::Unauthenticated => Err(MartError::Unauthenticated),
            SessionState::Authenticated {
                active_tenant_id, ..
            } => active_tenant_id.clone().ok_or(MartError::TenantContext),
        }
    }

    pub fn begin_resolution(&self) {
        self.tx.send_replace(SessionState::Pending);
    }

    /// Install a resolved principal. The active tenant comes from the
    /// principal's own derivation.
    pub fn establish(&self, principal: Principal) {
        info!(
            uid = %principal.uid,
            role = %principal.role,
            active_tenant = principal.active_business_id.as_deref().unwrap_or(""),
            "Session established"
        );
        let active_tenant_id = principal.active_business_id.clone();
        self.tx.send_replace(SessionState::Authenticated {
            principal,
            active_tenant_id,
        });
    }

    pub fn clear(&self) {
        self.tx.send_replace(SessionState::Unauthenticated);
    }

    /// Change the active tenant, on the state and on the principal's
    /// `active_business_id`. Non-super-admins may only pick one of their
    /// memberships.
    pub fn switch_tenant(&self, tenant_id: &str) -> MartResult<()> {
        let mut outcome = Ok(());
        self.tx.send_if_modified(|state| match state {
            SessionState::Pending => {
                outcome = Err(MartError::SessionPending);
                false
            }
            SessionState::Unauthenticated => {
                outcome = Err(MartError::Unauthenticated);
                false
            }
            SessionState::Authenticated {
                principal,
                active_tenant_id,
            } => {
                if !principal.may_act_for(tenant_id) {
                    warn!(
                        uid = %principal.uid,
                        tenant_id,
                        "Tenant switch rejected: not a member"
                    );
                    outcome = Err(MartError::TenantContext);
                    return false;
                }
                info!(uid = %principal.uid, tenant_id, "Active tenant switched");
                principal.active_business_id = Some(tenant_id.to_string());
                *active_tenant_id = principal.active_business_id.clone();
                true
            }
        });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mart_core::models::user::Role;
    use uuid::Uuid;

    fn admin(ids: &[&str]) -> Principal {
        Principal {
            uid: Uuid::new_v4(),
            email: Some("admin@example.com".into()),
            role: Role::BusinessAdmin,
            business_ids: ids.iter().map(|s| s.to_string()).collect(),
            active_business_id: ids.first().map(|s| s.to_string()),
            display_name: None,
        }
    }

    #[test]
    fn starts_pending() {
        let ctx = SessionContext::new();
        assert!(ctx.state().is_pending());
        assert!(ctx.principal().is_none());
        assert!(matches!(ctx.require_tenant(), Err(MartError::SessionPending)));
    }

    #[test]
    fn establish_then_clear() {
        let ctx = SessionContext::new();
        ctx.establish(admin(&["acme-corp"]));
        assert_eq!(ctx.active_tenant_id().as_deref(), Some("acme-corp"));
        assert_eq!(ctx.require_tenant().unwrap(), "acme-corp");

        ctx.clear();
        assert_eq!(ctx.state(), SessionState::Unauthenticated);
        assert!(ctx.principal().is_none());
        assert!(ctx.active_tenant_id().is_none());
    }

    #[test]
    fn member_can_switch_tenant() {
        let ctx = SessionContext::new();
        ctx.establish(admin(&["acme", "globex"]));

        ctx.switch_tenant("globex").unwrap();
        assert_eq!(ctx.active_tenant_id().as_deref(), Some("globex"));
        let principal = ctx.principal().unwrap();
        assert_eq!(principal.active_business_id.as_deref(), Some("globex"));
    }

    #[test]
    fn non_member_switch_is_rejected_and_keeps_tenant() {
        let ctx = SessionContext::new();
        ctx.establish(admin(&["acme"]));

        let err = ctx.switch_tenant("globex").unwrap_err();
        assert!(matches!(err, MartError::TenantContext));
        assert_eq!(ctx.active_tenant_id().as_deref(), Some("acme"));
        let principal = ctx.principal().unwrap();
        assert_eq!(principal.active_business_id.as_deref(), Some("acme"));
    }

    #[test]
    fn super_admin_may_switch_anywhere() {
        let ctx = SessionContext::new();
        let mut p = admin(&[]);
        p.role = Role::SuperAdmin;
        ctx.establish(p);
        assert!(matches!(ctx.require_tenant(), Err(MartError::TenantContext)));

        ctx.switch_tenant("initech").unwrap();
        assert_eq!(ctx.active_tenant_id().as_deref(), Some("initech"));
    }

    #[test]
    fn switch_without_session_fails() {
        let ctx = SessionContext::new();
        assert!(matches!(
            ctx.switch_tenant("acme"),
            Err(MartError::SessionPending)
        ));
        ctx.clear();
        assert!(matches!(
            ctx.switch_tenant("acme"),
            Err(MartError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn observers_see_every_transition() {
        let ctx = SessionContext::new();
        let mut rx = ctx.subscribe();
        assert!(rx.borrow_and_update().is_pending());

        ctx.clear();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionState::Unauthenticated);

        ctx.establish(admin(&["acme"]));
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().principal().is_some());

        // Re-publishing the same state still notifies.
        ctx.clear();
        ctx.clear();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionState::Unauthenticated);
    }
}
