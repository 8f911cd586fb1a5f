//! Public storefront loading. No session is involved: any visitor may
//! read a tenant's page.

use mart_core::catalog;
use mart_core::error::MartResult;
use mart_core::models::business::Business;
use mart_core::models::product::Product;
use mart_core::repository::{BusinessRepository, ProductRepository};
use tracing::debug;

/// Everything needed to render one tenant's public page.
#[derive(Debug, Clone)]
pub struct StorefrontPage {
    pub business: Business,
    pub products: Vec<Product>,
    /// Sorted, distinct, non-empty.
    pub categories: Vec<String>,
}

impl StorefrontPage {
    pub fn in_category(&self, category: &str) -> Vec<&Product> {
        catalog::in_category(&self.products, category)
    }

    pub fn search(&self, query: &str) -> Vec<&Product> {
        catalog::search(&self.products, query)
    }
}

pub struct Storefront<B: BusinessRepository, P: ProductRepository> {
    businesses: B,
    products: P,
}

impl<B: BusinessRepository, P: ProductRepository> Storefront<B, P> {
    pub fn new(businesses: B, products: P) -> Self {
        Self {
            businesses,
            products,
        }
    }

    /// `NotFound` when the tenant does not exist.
    pub async fn load(&self, tenant_id: &str) -> MartResult<StorefrontPage> {
        let business = self.businesses.get_by_id(tenant_id).await?;
        let products = self.products.list(tenant_id).await?;
        let categories = catalog::categories(&products);
        debug!(tenant_id, products = products.len(), "Storefront loaded");

        Ok(StorefrontPage {
            business,
            products,
            categories,
        })
    }
}
