//! SurrealDB implementation of [`ProductRepository`].
//!
//! Every statement filters on `business_id`, so a product id that
//! belongs to another business behaves exactly like a missing one.

use chrono::{DateTime, Utc};
use mart_core::error::MartResult;
use mart_core::models::product::{CreateProduct, Product, UpdateProduct};
use mart_core::repository::ProductRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

#[derive(Debug, SurrealValue)]
struct ProductRow {
    business_id: String,
    name: String,
    description: String,
    price: f64,
    stock: u32,
    category: String,
    images: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            business_id: self.business_id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            images: self.images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, SurrealValue)]
struct ProductRowWithId {
    record_id: String,
    business_id: String,
    name: String,
    description: String,
    price: f64,
    stock: u32,
    category: String,
    images: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRowWithId {
    fn try_into_product(self) -> Result<Product, DbError> {
        Ok(Product {
            id: parse_uuid("product", &self.record_id)?,
            business_id: self.business_id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            images: self.images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn first_row(rows: Vec<ProductRow>, id: Uuid) -> Result<Product, DbError> {
    let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
        entity: "product".into(),
        id: id.to_string(),
    })?;
    Ok(row.into_product(id))
}

/// SurrealDB implementation of the per-business catalog.
#[derive(Clone)]
pub struct SurrealProductRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProductRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProductRepository for SurrealProductRepository<C> {
    async fn create(&self, business_id: &str, input: CreateProduct) -> MartResult<Product> {
        let id = Uuid::new_v4();

        let mut result = self
            .db
            .query(
                "CREATE type::record('product', $id) SET \
                 business_id = $business_id, \
                 name = $name, \
                 description = $description, \
                 price = $price, \
                 stock = $stock, \
                 category = $category, \
                 images = $images",
            )
            .bind(("id", id.to_string()))
            .bind(("business_id", business_id.to_string()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("price", input.price))
            .bind(("stock", input.stock))
            .bind(("category", input.category))
            .bind(("images", input.images))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_row(rows, id)?)
    }

    async fn get_by_id(&self, business_id: &str, id: Uuid) -> MartResult<Product> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('product', $id) \
                 WHERE business_id = $business_id",
            )
            .bind(("id", id.to_string()))
            .bind(("business_id", business_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_row(rows, id)?)
    }

    async fn update(
        &self,
        business_id: &str,
        id: Uuid,
        input: UpdateProduct,
    ) -> MartResult<Product> {
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.price.is_some() {
            sets.push("price = $price");
        }
        if input.stock.is_some() {
            sets.push("stock = $stock");
        }
        if input.category.is_some() {
            sets.push("category = $category");
        }
        if input.images.is_some() {
            sets.push("images = $images");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('product', $id) SET {} \
             WHERE business_id = $business_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id.to_string()))
            .bind(("business_id", business_id.to_string()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(price) = input.price {
            builder = builder.bind(("price", price));
        }
        if let Some(stock) = input.stock {
            builder = builder.bind(("stock", stock));
        }
        if let Some(category) = input.category {
            builder = builder.bind(("category", category));
        }
        if let Some(images) = input.images {
            builder = builder.bind(("images", images));
        }

        let mut result = builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_row(rows, id)?)
    }

    async fn delete(&self, business_id: &str, id: Uuid) -> MartResult<()> {
        self.db
            .query(
                "DELETE type::record('product', $id) \
                 WHERE business_id = $business_id",
            )
            .bind(("id", id.to_string()))
            .bind(("business_id", business_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Rejected(e.to_string()))?;

        Ok(())
    }

    async fn list(&self, business_id: &str) -> MartResult<Vec<Product>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM product \
                 WHERE business_id = $business_id",
            )
            .bind(("business_id", business_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_product())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
