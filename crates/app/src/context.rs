//! App Context

use std::sync::Arc;

use storefront::config::PricingConfig;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        affiliates::{AffiliatesService, PgAffiliatesService},
        coupons::{CouponsService, PgCouponsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub affiliates: Arc<dyn AffiliatesService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        pricing: PricingConfig<'static>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            affiliates: Arc::new(PgAffiliatesService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db, pricing)),
        })
    }
}
