//! Client-side catalog filtering.
//!
//! Stores return a tenant's full product set; search and category
//! filters run over that set in memory. Fine for small catalogs only.

use std::collections::BTreeSet;

use crate::models::product::Product;

/// Case-insensitive substring match on name or category. An empty or
/// blank query matches everything.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Products whose category equals `category` exactly.
pub fn in_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.category == category).collect()
}

/// Sorted, distinct, non-empty categories.
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .filter(|p| !p.category.is_empty())
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
