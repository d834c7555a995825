//! Session state, auth backend client, and billing backend client
//!
//! Identity and subscription storage live in external backends; this
//! module only maps their results into local typed state and gates tool
//! access by plan.

pub mod auth;
pub mod billing;
pub mod store;

pub use auth::{AuthClient, AuthProvider, AuthSession};
pub use billing::BillingClient;
pub use store::{AuthEvent, ListenerGuard, SessionSnapshot, SessionStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user as exposed to the rest of the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
}

/// Subscription plans, ordered by capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    #[serde(rename = "Free Trial")]
    FreeTrial,
    #[serde(rename = "Basic Plan")]
    Basic,
    #[serde(rename = "Premium Plan")]
    Premium,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::FreeTrial => "Free Trial",
            Plan::Basic => "Basic Plan",
            Plan::Premium => "Premium Plan",
        }
    }

    /// Map a stored plan_id onto a plan; unknown ids fall back to the
    /// free trial
    pub fn from_plan_id(plan_id: &str) -> Self {
        match plan_id {
            "basic" => Plan::Basic,
            "premium" => Plan::Premium,
            _ => Plan::FreeTrial,
        }
    }
}

/// Subscription row as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: String,
    pub user_id: String,
    pub plan_id: String,
    pub status: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
