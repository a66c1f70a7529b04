use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager};
use crate::services::{CheckoutService, PaymentGateway, StripeClient};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub checkout: Arc<CheckoutService>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig, gateway: Arc<dyn PaymentGateway>) -> Self {
        let checkout = CheckoutService::new(pool.clone(), gateway, config.shop.clone());
        Self {
            pool,
            config: Arc::new(config),
            checkout: Arc::new(checkout),
        }
    }

    /// State wired to Stripe with a lazily connected pool
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let pool = DatabaseManager::connect_lazy(&config.database)?;
        let stripe = StripeClient::new(&config.stripe)?;
        Ok(Self::new(pool, config, Arc::new(stripe)))
    }

    /// Apply migrations and, when enabled, seed empty tables
    pub async fn prepare_database(&self) -> Result<(), DatabaseError> {
        DatabaseManager::migrate(&self.pool).await?;
        if self.config.database.seed_on_startup {
            let report = crate::database::seed::seed_defaults(&self.pool).await?;
            tracing::info!("Seed complete: seeded {:?}, skipped {:?}", report.seeded, report.skipped);
        }
        Ok(())
    }
}
