//! Shared request types used by the checkout flow

use serde::{Deserialize, Serialize};

/// One line in the shopper's cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog key, e.g. "tshirt"
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub quantity: i32,
}

/// Body of POST /api/checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderData {
    pub items: Vec<CartItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body of POST /api/checkout/complete
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteCheckout {
    pub session_id: String,
}
