//! Product records served by the remote catalog.

use serde::{Deserialize, Serialize};

/// Products at or above this rating are recommended on Home.
pub const RECOMMENDED_MIN_RATE: f64 = 4.0;

/// Number of products shown in the Home carousel.
pub const CAROUSEL_LEN: usize = 5;

/// Most recommended products listed on Home.
pub const RECOMMENDED_LEN: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Product {
    pub fn rate(&self) -> Option<f64> {
        self.rating.as_ref().map(|r| r.rate)
    }

    pub fn is_recommended(&self) -> bool {
        self.rate().is_some_and(|rate| rate >= RECOMMENDED_MIN_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_record() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "category": "men's clothing",
            "image": "https://example.test/1.jpg",
            "rating": {"rate": 3.9, "count": 120}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.rate(), Some(3.9));
        assert!(!product.is_recommended());
    }

    #[test]
    fn missing_rating_is_not_recommended() {
        let json = r#"{"id": 2, "category": "jewelery", "image": "x"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.rating, None);
        assert!(!product.is_recommended());
    }
}
