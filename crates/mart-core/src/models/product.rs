//! Product domain model. Products live in their owning business's
//! collection and are never reassigned to another business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub business_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted product fields. The owning business is supplied separately
/// by the caller's scope.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
}
