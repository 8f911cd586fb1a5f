//! Catalog store: products scoped by a caller-supplied tenant id.

use mart_core::error::{MartError, MartResult};
use mart_core::models::product::{CreateProduct, Product, UpdateProduct};
use mart_core::repository::ProductRepository;
use tracing::{debug, info};
use uuid::Uuid;

fn check_name(name: &str) -> MartResult<()> {
    if name.trim().is_empty() {
        return Err(MartError::validation("product name must not be empty"));
    }
    Ok(())
}

fn check_price(price: f64) -> MartResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(MartError::validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

pub struct CatalogStore<P: ProductRepository> {
    repo: P,
}

impl<P: ProductRepository> CatalogStore<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Store a new product under `tenant_id` and return its id.
    pub async fn add(&self, tenant_id: &str, fields: CreateProduct) -> MartResult<Uuid> {
        check_name(&fields.name)?;
        check_price(fields.price)?;

        let product = self.repo.create(tenant_id, fields).await?;
        info!(tenant_id, product_id = %product.id, "Product added");
        Ok(product.id)
    }

    pub async fn get(&self, tenant_id: &str, product_id: Uuid) -> MartResult<Product> {
        self.repo.get_by_id(tenant_id, product_id).await
    }

    pub async fn list(&self, tenant_id: &str) -> MartResult<Vec<Product>> {
        let products = self.repo.list(tenant_id).await?;
        debug!(tenant_id, count = products.len(), "Listed products");
        Ok(products)
    }

    pub async fn update(
        &self,
        tenant_id: &str,
        product_id: Uuid,
        fields: UpdateProduct,
    ) -> MartResult<Product> {
        if let Some(name) = &fields.name {
            check_name(name)?;
        }
        if let Some(price) = fields.price {
            check_price(price)?;
        }

        let product = self.repo.update(tenant_id, product_id, fields).await?;
        info!(tenant_id, product_id = %product_id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, tenant_id: &str, product_id: Uuid) -> MartResult<()> {
        self.repo.delete(tenant_id, product_id).await?;
        info!(tenant_id, product_id = %product_id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rules() {
        assert!(check_price(0.0).is_ok());
        assert!(check_price(19.99).is_ok());
        assert!(check_price(-0.01).is_err());
        assert!(check_price(f64::NAN).is_err());
        assert!(check_price(f64::INFINITY).is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(check_name("  ").is_err());
        assert!(check_name("Mug").is_ok());
    }
}
