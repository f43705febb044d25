//! Cache types for Store API responses.

use crate::medusa::types::{CollectionPage, Product, Region};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Collections(CollectionPage),
    Regions(Vec<Region>),
}
