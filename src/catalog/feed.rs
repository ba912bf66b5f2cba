//! Home feed derived from the catalog.

use serde::Serialize;
use tracing::{info, warn};

use super::client::Catalog;
use super::model::{CAROUSEL_LEN, Product, RECOMMENDED_LEN};

/// Products loaded for the Home screen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeFeed {
    pub products: Vec<Product>,
}

impl HomeFeed {
    /// Fetch the catalog. A failed fetch is logged and yields an empty feed.
    pub async fn load(catalog: &dyn Catalog) -> Self {
        match catalog.fetch_products().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                Self { products }
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch products, showing empty feed");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products rated 4.0 or higher, at most [`RECOMMENDED_LEN`] of them.
    pub fn recommended(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_recommended())
            .take(RECOMMENDED_LEN)
            .collect()
    }

    pub fn carousel(&self) -> &[Product] {
        &self.products[..self.products.len().min(CAROUSEL_LEN)]
    }

    /// Distinct categories, in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::catalog::model::Rating;
    use crate::error::CatalogError;

    struct StaticCatalog(Vec<Product>);

    #[async_trait]
    impl Catalog for StaticCatalog {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenCatalog;

    #[async_trait]
    impl Catalog for BrokenCatalog {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::RequestFailed("connection refused".into()))
        }
    }

    fn product(id: u64, category: &str, rate: f64) -> Product {
        Product {
            id,
            title: format!("item {id}"),
            category: category.to_string(),
            image: format!("https://example.test/{id}.jpg"),
            price: 10.0,
            rating: Some(Rating { rate, count: 1 }),
        }
    }

    #[tokio::test]
    async fn failed_fetch_degrades_to_empty() {
        let feed = HomeFeed::load(&BrokenCatalog).await;
        assert!(feed.is_empty());
        assert!(feed.recommended().is_empty());
        assert!(feed.carousel().is_empty());
    }

    #[tokio::test]
    async fn recommended_uses_rating_threshold() {
        let catalog = StaticCatalog(vec![
            product(1, "jewelery", 3.9),
            product(2, "jewelery", 4.0),
            product(3, "electronics", 4.7),
        ]);
        let feed = HomeFeed::load(&catalog).await;
        let ids: Vec<u64> = feed.recommended().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn recommended_caps_at_twelve() {
        let feed = HomeFeed {
            products: (1..=20)
                .map(|i| product(i, "electronics", if i % 2 == 0 { 3.0 } else { 4.5 }))
                .chain((21..=40).map(|i| product(i, "jewelery", 4.2)))
                .collect(),
        };
        let ids: Vec<u64> = feed.recommended().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 12);
        assert_eq!(&ids[..3], &[1, 3, 5]);
        assert_eq!(ids[10], 21);
    }

    #[test]
    fn carousel_caps_at_five() {
        let feed = HomeFeed {
            products: (1..=8).map(|i| product(i, "electronics", 4.0)).collect(),
        };
        assert_eq!(feed.carousel().len(), 5);
        assert_eq!(feed.carousel()[0].id, 1);

        let short = HomeFeed {
            products: vec![product(1, "a", 1.0)],
        };
        assert_eq!(short.carousel().len(), 1);
    }

    #[test]
    fn categories_are_distinct_in_order() {
        let feed = HomeFeed {
            products: vec![
                product(1, "men's clothing", 1.0),
                product(2, "jewelery", 1.0),
                product(3, "men's clothing", 1.0),
                product(4, "electronics", 1.0),
            ],
        };
        assert_eq!(feed.categories(), vec!["men's clothing", "jewelery", "electronics"]);
    }
}
