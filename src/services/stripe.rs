use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::StripeConfig;

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("Stripe secret key is not configured")]
    NotConfigured,

    #[error("Stripe request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stripe API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Checkout session not found: {0}")]
    SessionNotFound(String),

    #[error("Malformed checkout session id: {0}")]
    InvalidSessionId(String),
}

/// Stripe checkout session ids look like `cs_test_a1B2c3`
pub fn is_session_id(id: &str) -> bool {
    match id.strip_prefix("cs_") {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
        None => false,
    }
}

/// The subset of a Stripe Checkout Session this service reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub unit_amount: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub currency: String,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: Option<String>,
    pub metadata: Vec<(String, String)>,
}

impl SessionRequest {
    /// Form fields in Stripe's bracketed encoding
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), self.success_url.clone()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
        ];

        for (i, item) in self.line_items.iter().enumerate() {
            let prefix = format!("line_items[{}]", i);
            form.push((format!("{}[price_data][currency]", prefix), self.currency.clone()));
            form.push((format!("{}[price_data][product_data][name]", prefix), item.name.clone()));
            form.push((format!("{}[price_data][unit_amount]", prefix), item.unit_amount.to_string()));
            form.push((format!("{}[quantity]", prefix), item.quantity.to_string()));
        }

        if let Some(email) = &self.customer_email {
            form.push(("customer_email".to_string(), email.clone()));
        }

        for (key, value) in &self.metadata {
            form.push((format!("metadata[{}]", key), value.clone()));
        }

        form
    }
}

/// Hosted payment provider used by the checkout flow
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_session(&self, request: &SessionRequest) -> Result<CheckoutSession, StripeError>;

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, StripeError>;
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Stripe REST client for Checkout Sessions
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }

    fn sessions_url(&self) -> String {
        format!("{}/v1/checkout/sessions", self.api_base)
    }

    fn secret_key(&self) -> Result<&str, StripeError> {
        if self.secret_key.is_empty() {
            Err(StripeError::NotConfigured)
        } else {
            Ok(&self.secret_key)
        }
    }

    async fn parse_response(response: reqwest::Response) -> Result<CheckoutSession, StripeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<CheckoutSession>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<StripeErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.message)
            .unwrap_or(body);

        Err(StripeError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_session(&self, request: &SessionRequest) -> Result<CheckoutSession, StripeError> {
        let key = self.secret_key()?;
        let response = self
            .http
            .post(self.sessions_url())
            .bearer_auth(key)
            .form(&request.to_form())
            .send()
            .await?;

        let session = Self::parse_response(response).await?;
        tracing::info!("Created checkout session {}", session.id);
        Ok(session)
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, StripeError> {
        if !is_session_id(session_id) {
            return Err(StripeError::InvalidSessionId(session_id.to_string()));
        }
        let key = self.secret_key()?;
        let response = self
            .http
            .get(format!("{}/{}", self.sessions_url(), session_id))
            .bearer_auth(key)
            .send()
            .await?;

        match Self::parse_response(response).await {
            Err(StripeError::Api { status: 404, .. }) => Err(StripeError::SessionNotFound(session_id.to_string())),
            other => other,
        }
    }
}
