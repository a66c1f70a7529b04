use std::sync::Arc;

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ShopConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{InventoryItem, Order};
use crate::database::validate::ValidationErrors;
use crate::services::catalog::{self, Product};
use crate::services::stripe::{CheckoutSession, LineItem, PaymentGateway, SessionRequest, StripeError};
use crate::types::{CartItem, OrderData};

const ORDER_METADATA_KEY: &str = "order";
const EMAIL_METADATA_KEY: &str = "email";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Invalid cart: {0}")]
    InvalidCart(ValidationErrors),

    #[error("Only {available} left of {product}")]
    OutOfStock { product: String, available: i32 },

    #[error("Checkout session {0} has not been paid")]
    NotPaid(String),

    #[error("Checkout session {0} carries no readable order")]
    MalformedMetadata(String),

    #[error("Invalid SITE_URL: {0}")]
    SiteUrl(#[from] url::ParseError),

    #[error(transparent)]
    Stripe(#[from] StripeError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// A cart line checked against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLine {
    pub product: &'static Product,
    pub size: Option<&'static str>,
    pub quantity: i32,
}

impl ValidatedLine {
    pub fn display_name(&self) -> String {
        match self.size {
            Some(size) => format!("{} ({})", self.product.name, size),
            None => self.product.name.to_string(),
        }
    }

    pub fn to_cart_item(&self) -> CartItem {
        CartItem {
            product: self.product.key.to_string(),
            size: self.size.map(str::to_string),
            quantity: self.quantity,
        }
    }
}

/// Check every cart line against the static catalog. Duplicate product/size
/// lines are merged.
pub fn validate_cart(items: &[CartItem]) -> Result<Vec<ValidatedLine>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut lines: Vec<ValidatedLine> = Vec::new();

    if items.is_empty() {
        errors.add("items", "cart is empty");
    }

    for (i, item) in items.iter().enumerate() {
        let field = |name: &str| format!("items[{}].{}", i, name);

        if item.quantity <= 0 {
            errors.add(field("quantity"), "must be greater than zero");
            continue;
        }

        let Some(product) = catalog::find(&item.product) else {
            errors.add(field("product"), "unknown product");
            continue;
        };

        let size = match (product.is_sized(), item.size.as_deref()) {
            (true, Some(size)) => match product.canonical_size(size) {
                Some(canonical) => Some(canonical),
                None => {
                    errors.add(field("size"), format!("must be one of {}", product.sizes.join(", ")));
                    continue;
                }
            },
            (true, None) => {
                errors.add(field("size"), "is required for this product");
                continue;
            }
            (false, Some(_)) => {
                errors.add(field("size"), "is not allowed for this product");
                continue;
            }
            (false, None) => None,
        };

        match lines.iter().position(|l| l.product.key == product.key && l.size == size) {
            Some(idx) => lines[idx].quantity = lines[idx].quantity.saturating_add(item.quantity),
            None => lines.push(ValidatedLine {
                product,
                size,
                quantity: item.quantity,
            }),
        }
    }

    errors.into_result().map(|_| lines)
}

/// Build the Stripe session request for a validated cart
pub fn build_session_request(
    shop: &ShopConfig,
    lines: &[ValidatedLine],
    email: Option<&str>,
) -> Result<SessionRequest, CheckoutError> {
    let site = url::Url::parse(&shop.site_url)?;
    let success_url = site.join("/checkout/success?session_id={CHECKOUT_SESSION_ID}")?;
    let cancel_url = site.join("/shop")?;

    let items: Vec<CartItem> = lines.iter().map(ValidatedLine::to_cart_item).collect();
    let order_json = serde_json::to_string(&items)
        .map_err(|e| CheckoutError::MalformedMetadata(e.to_string()))?;

    let email = email.map(str::trim).filter(|e| !e.is_empty());
    let mut metadata = vec![(ORDER_METADATA_KEY.to_string(), order_json)];
    if let Some(email) = email {
        metadata.push((EMAIL_METADATA_KEY.to_string(), email.to_string()));
    }

    Ok(SessionRequest {
        currency: shop.currency.clone(),
        line_items: lines
            .iter()
            .map(|line| LineItem {
                name: line.display_name(),
                unit_amount: line.product.unit_amount,
                quantity: line.quantity,
            })
            .collect(),
        success_url: success_url.to_string(),
        cancel_url: cancel_url.to_string(),
        customer_email: email.map(str::to_string),
        metadata,
    })
}

/// Read the purchased items back out of a session's metadata
pub fn order_from_session(session: &CheckoutSession) -> Result<Vec<CartItem>, CheckoutError> {
    session
        .metadata
        .get(ORDER_METADATA_KEY)
        .and_then(|raw| serde_json::from_str::<Vec<CartItem>>(raw).ok())
        .ok_or_else(|| CheckoutError::MalformedMetadata(session.id.clone()))
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedCheckout {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fulfillment {
    pub order: Order,
    /// False when the session had already been fulfilled earlier
    pub newly_fulfilled: bool,
}

pub struct CheckoutService {
    pool: PgPool,
    gateway: Arc<dyn PaymentGateway>,
    shop: ShopConfig,
}

impl CheckoutService {
    pub fn new(pool: PgPool, gateway: Arc<dyn PaymentGateway>, shop: ShopConfig) -> Self {
        Self { pool, gateway, shop }
    }

    /// Validate the cart, check stock and open a hosted checkout session
    pub async fn create_checkout(&self, order: &OrderData) -> Result<CreatedCheckout, CheckoutError> {
        let lines = validate_cart(&order.items).map_err(CheckoutError::InvalidCart)?;

        for line in &lines {
            let available = InventoryItem::stock(&self.pool, line.product.key, line.size)
                .await?
                .unwrap_or(0);
            if available < line.quantity {
                return Err(CheckoutError::OutOfStock {
                    product: line.display_name(),
                    available,
                });
            }
        }

        let request = build_session_request(&self.shop, &lines, order.email.as_deref())?;
        let session = self.gateway.create_session(&request).await?;

        Ok(CreatedCheckout {
            id: session.id,
            url: session.url,
        })
    }

    /// Confirm payment with the provider and decrement inventory once per session
    pub async fn complete_checkout(&self, session_id: &str) -> Result<Fulfillment, CheckoutError> {
        let session = self.gateway.retrieve_session(session_id).await?;
        if !session.is_paid() {
            return Err(CheckoutError::NotPaid(session.id));
        }

        let items = order_from_session(&session)?;
        let email = session.metadata.get(EMAIL_METADATA_KEY).map(String::as_str);

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let Some(order) = Order::insert_if_new(&mut *tx, &session.id, &items, email).await? else {
            tx.rollback().await.map_err(DatabaseError::from)?;
            let existing = Order::find(&self.pool, &session.id)
                .await?
                .ok_or_else(|| DatabaseError::NotFound(format!("Order {} not found", session.id)))?;
            info!("Checkout session {} was already fulfilled", session.id);
            return Ok(Fulfillment {
                order: existing,
                newly_fulfilled: false,
            });
        };

        for item in &items {
            match InventoryItem::decrement(&mut *tx, &item.product, item.size.as_deref(), item.quantity).await? {
                Some(remaining) => info!(
                    "Sold {} x {} {:?}, {} left",
                    item.quantity, item.product, item.size, remaining
                ),
                None => warn!("No inventory row for {} {:?}; skipping decrement", item.product, item.size),
            }
        }

        tx.commit().await.map_err(DatabaseError::from)?;

        Ok(Fulfillment {
            order,
            newly_fulfilled: true,
        })
    }
}
