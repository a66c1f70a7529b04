use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{Resource, ResourceInput};
use crate::database::validate::ValidationErrors;
use crate::services::catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InventoryItem {
    pub id: i32,
    pub product: String,
    pub size: Option<String>,
    pub quantity: i32,
}

impl Resource for InventoryItem {
    const TABLE: &'static str = "inventory";
    const LABEL: &'static str = "Inventory item";
    const ORDER_BY: &'static str = "product, size NULLS FIRST, id";
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInventoryItem {
    pub product: String,
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: i32,
}

impl NewInventoryItem {
    /// Size as stored: canonical catalog spelling, or None for unsized products
    fn stored_size(&self) -> Option<String> {
        let product = catalog::find(&self.product)?;
        self.size
            .as_deref()
            .and_then(|s| product.canonical_size(s))
            .map(str::to_string)
    }
}

#[async_trait]
impl ResourceInput for NewInventoryItem {
    type Output = InventoryItem;

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(self.quantity >= 0, "quantity", "must be zero or greater");

        match catalog::find(&self.product) {
            None => errors.add("product", "unknown product"),
            Some(product) => match (product.is_sized(), self.size.as_deref()) {
                (true, None) => errors.add("size", "is required for this product"),
                (true, Some(size)) if product.canonical_size(size).is_none() => {
                    errors.add("size", format!("must be one of {}", product.sizes.join(", ")))
                }
                (false, Some(_)) => errors.add("size", "is not allowed for this product"),
                _ => {}
            },
        }

        errors.into_result()
    }

    async fn insert(&self, pool: &PgPool) -> Result<InventoryItem, DatabaseError> {
        let row = sqlx::query_as::<_, InventoryItem>(
            "INSERT INTO inventory (product, size, quantity) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&self.product)
        .bind(self.stored_size())
        .bind(self.quantity)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, pool: &PgPool) -> Result<Option<InventoryItem>, DatabaseError> {
        let row = sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory SET product = $2, size = $3, quantity = $4 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&self.product)
        .bind(self.stored_size())
        .bind(self.quantity)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

impl InventoryItem {
    /// Current stock for a product/size pair, None when there is no row
    pub async fn stock(pool: &PgPool, product: &str, size: Option<&str>) -> Result<Option<i32>, DatabaseError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "SELECT quantity FROM inventory WHERE product = $1 AND size IS NOT DISTINCT FROM $2",
        )
        .bind(product)
        .bind(size)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(q,)| q))
    }

    /// Clamp-to-zero decrement. Returns the new quantity, or None when no row matched.
    pub async fn decrement(
        conn: &mut PgConnection,
        product: &str,
        size: Option<&str>,
        purchased: i32,
    ) -> Result<Option<i32>, DatabaseError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE inventory SET quantity = GREATEST(quantity - $3, 0) \
             WHERE product = $1 AND size IS NOT DISTINCT FROM $2 RETURNING quantity",
        )
        .bind(product)
        .bind(size)
        .bind(purchased.max(0))
        .fetch_optional(conn)
        .await?;
        Ok(row.map(|(q,)| q))
    }

    /// Set absolute stock for a product/size pair, creating the row if needed
    pub async fn set_stock(
        pool: &PgPool,
        product: &str,
        size: Option<&str>,
        quantity: i32,
    ) -> Result<InventoryItem, DatabaseError> {
        let updated = sqlx::query_as::<_, InventoryItem>(
            "UPDATE inventory SET quantity = $3 WHERE product = $1 AND size IS NOT DISTINCT FROM $2 RETURNING *",
        )
        .bind(product)
        .bind(size)
        .bind(quantity)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(row) => Ok(row),
            None => Ok(sqlx::query_as::<_, InventoryItem>(
                "INSERT INTO inventory (product, size, quantity) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(product)
            .bind(size)
            .bind(quantity)
            .fetch_one(pool)
            .await?),
        }
    }
}
