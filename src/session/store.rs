//! Explicit session state with typed actions and auth-event listeners
//!
//! Replaces an ambient reactive store: actions return results, and
//! auth-state changes reach interested parties through an explicit
//! listener registration with an unsubscribe guard.

use super::auth::AuthProvider;
use super::{Plan, SubscriptionRecord, User};
use crate::error::Result;
use crate::tools::ToolKind;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Auth-state change delivered to registered listeners
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(User),
    SignedOut,
}

type Listener = Box<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Debug, Clone, Default)]
struct SessionState {
    user: Option<User>,
    access_token: Option<String>,
    subscription: Option<SubscriptionRecord>,
    current_plan: Option<Plan>,
}

/// Read-only copy of the session handed to callers
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub current_plan: Plan,
    pub subscription: Option<SubscriptionRecord>,
}

/// Session store: current user, plan, and subscription, with typed
/// actions against the auth backend
pub struct SessionStore {
    auth: Arc<dyn AuthProvider>,
    state: RwLock<SessionState>,
    listeners: DashMap<u64, Listener>,
    next_listener_id: AtomicU64,
}

/// Unsubscribes its listener when dropped
pub struct ListenerGuard {
    id: u64,
    store: Weak<SessionStore>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.listeners.remove(&self.id);
        }
    }
}

impl SessionStore {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            auth,
            state: RwLock::new(SessionState::default()),
            listeners: DashMap::new(),
            next_listener_id: AtomicU64::new(0),
        }
    }

    /// Register an auth-event listener; dropping the guard unsubscribes
    pub fn subscribe(
        self: &Arc<Self>,
        listener: impl Fn(&AuthEvent) + Send + Sync + 'static,
    ) -> ListenerGuard {
        let id = self.next_listener_id.fetch_add(1, Ordering::SeqCst);
        self.listeners.insert(id, Box::new(listener));
        ListenerGuard {
            id,
            store: Arc::downgrade(self),
        }
    }

    fn emit(&self, event: AuthEvent) {
        for entry in self.listeners.iter() {
            entry.value()(&event);
        }
    }

    /// Sign in and load the subscription
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionSnapshot> {
        let session = self.auth.sign_in(email, password).await?;
        info!(user_id = %session.user.id, "Logged in");

        {
            let mut state = self.state.write().await;
            state.user = Some(session.user.clone());
            state.access_token = Some(session.access_token);
        }

        self.load_subscription().await?;
        self.emit(AuthEvent::SignedIn(session.user));
        Ok(self.snapshot().await)
    }

    /// Create an account; new accounts start on the free trial
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SessionSnapshot> {
        let session = self.auth.sign_up(email, password, full_name).await?;
        info!(user_id = %session.user.id, "Account created");

        {
            let mut state = self.state.write().await;
            state.user = Some(session.user.clone());
            state.access_token = Some(session.access_token);
            state.current_plan = Some(Plan::FreeTrial);
            state.subscription = None;
        }

        self.emit(AuthEvent::SignedIn(session.user));
        Ok(self.snapshot().await)
    }

    /// Sign out and clear all local state
    pub async fn logout(&self) -> Result<()> {
        let token = self.state.read().await.access_token.clone();
        if let Some(token) = token {
            self.auth.sign_out(&token).await?;
        }

        *self.state.write().await = SessionState::default();
        info!("Logged out");

        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    /// Ask the backend to send a password-reset email
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        self.auth.reset_password(email).await
    }

    /// Load the active subscription for the signed-in user.
    ///
    /// The most recent active row wins. A backend failure degrades to the
    /// free trial rather than failing the session.
    pub async fn load_subscription(&self) -> Result<()> {
        let (user_id, token) = {
            let state = self.state.read().await;
            match (&state.user, &state.access_token) {
                (Some(user), Some(token)) => (user.id.clone(), token.clone()),
                _ => return Ok(()),
            }
        };

        let subscription = match self.auth.subscriptions(&user_id, &token).await {
            Ok(mut rows) => {
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                rows.into_iter().next()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load subscription, defaulting to free trial");
                None
            }
        };

        let mut state = self.state.write().await;
        match subscription {
            Some(row) => {
                state.current_plan = Some(Plan::from_plan_id(&row.plan_id));
                state.subscription = Some(row);
            }
            None => {
                state.current_plan = Some(Plan::FreeTrial);
                state.subscription = None;
            }
        }

        Ok(())
    }

    /// Whether the current session may use a tool.
    ///
    /// Without an active subscription row only the rewrite tool is open.
    pub async fn check_feature_access(&self, kind: ToolKind) -> bool {
        let state = self.state.read().await;

        if state.subscription.is_none() {
            return kind == ToolKind::Rewrite;
        }

        let plan = state.current_plan.unwrap_or(Plan::FreeTrial);
        match plan {
            Plan::FreeTrial => matches!(kind, ToolKind::Rewrite),
            Plan::Basic => matches!(
                kind,
                ToolKind::Rewrite | ToolKind::Paraphrase | ToolKind::Grammar | ToolKind::Document
            ),
            Plan::Premium => true,
        }
    }

    /// Current session as a read-only snapshot
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            user: state.user.clone(),
            is_authenticated: state.user.is_some(),
            current_plan: state.current_plan.unwrap_or(Plan::FreeTrial),
            subscription: state.subscription.clone(),
        }
    }
}
