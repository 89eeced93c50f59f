//! Product catalog reads.

use anyhow::Result;

use super::types::Product;
use super::{ApiClient, BestEffort, Fetched};
use crate::http::not_found_as;

impl ApiClient {
    /// Full catalog listing.
    #[tracing::instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Fetched<Vec<Product>>> {
        self.fetch_cached("products/all/", &[], None).await
    }

    /// Catalog listing narrowed to one category.
    #[tracing::instrument(skip(self))]
    pub async fn get_products_in_category(&self, category: &str) -> Result<Fetched<Vec<Product>>> {
        Self::require_identifier("category", category)?;
        self.fetch_cached("products/all/", &[("category", category)], None)
            .await
    }

    /// Single product by slug. A 404 from the backend becomes a not-found
    /// error carrying the slug.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, slug: &str) -> Result<Fetched<Product>> {
        Self::require_identifier("product", slug)?;
        let path = format!("products/all/{}/", slug);
        self.fetch_cached(&path, &[], None)
            .await
            .map_err(|e| not_found_as(e, "product", slug))
    }

    /// Featured products for the landing page. Degrades to an empty list
    /// when the backend is unreachable.
    #[tracing::instrument(skip(self))]
    pub async fn get_featured_products(&self) -> BestEffort<Vec<Product>> {
        self.fetch_cached_or_default("products/featured/", &[])
            .await
    }
}
