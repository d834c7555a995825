//! Client for the billing backend functions
//!
//! Checkout and the billing portal are two named functions invoked over
//! HTTP; both take and return opaque identifiers.

use super::Plan;
use crate::config::BillingConfig;
use crate::error::{ProviderError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CheckoutResponse {
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct PortalResponse {
    url: String,
}

/// Client for the two billing backend functions
pub struct BillingClient {
    config: BillingConfig,
    http_client: Client,
}

impl BillingClient {
    pub fn new(config: BillingConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ProviderError::Network)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Price id for a paid plan; the free trial has none
    pub fn price_id(&self, plan: Plan) -> Option<&str> {
        match plan {
            Plan::Basic => Some(&self.config.basic_price_id),
            Plan::Premium => Some(&self.config.premium_price_id),
            Plan::FreeTrial => None,
        }
    }

    /// Invoke `create-checkout-session`; returns the checkout session id
    pub async fn create_checkout_session(&self, price_id: &str, user_id: &str) -> Result<String> {
        debug!(price_id, user_id, "Creating checkout session");

        let response = self
            .http_client
            .post(format!("{}/create-checkout-session", self.config.functions_url))
            .json(&json!({ "priceId": price_id, "userId": user_id }))
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let body: CheckoutResponse = Self::check_failure(response, "create-checkout-session")
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(body.session_id)
    }

    /// Invoke `create-portal-session`; returns the portal redirect URL
    pub async fn create_portal_session(&self, customer_id: &str) -> Result<String> {
        debug!(customer_id, "Creating billing portal session");

        let response = self
            .http_client
            .post(format!("{}/create-portal-session", self.config.functions_url))
            .json(&json!({ "customerId": customer_id }))
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let body: PortalResponse = Self::check_failure(response, "create-portal-session")
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        Ok(body.url)
    }

    async fn check_failure(response: reqwest::Response, op: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("{} failed with status {}", op, status));

        Err(ProviderError::Billing(message).into())
    }
}
