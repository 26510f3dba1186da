//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};
use crate::validation::FieldErrors;

/// Highest product rating.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Free-form label such as "Chairs" or "Tables".
    #[serde(default)]
    pub category: String,
    /// Mean review rating, one decimal place, 0 when unreviewed.
    #[serde(default)]
    pub rating: f64,
}

impl Product {
    /// Relative path of the product picture.
    #[must_use]
    pub fn image_path(&self) -> String {
        format!("img/shop/{}.png", self.id)
    }
}

/// Body for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub rating: f64,
}

impl NewProduct {
    /// Check the fields an admin fills in.
    ///
    /// # Errors
    ///
    /// Returns every field problem found.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        if self.category.trim().is_empty() {
            errors.add("category", "Category is required");
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            errors.add("rating", "Rating must be between 0 and 5");
        }
        errors.into_result()
    }
}

/// Partial product update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl ProductPatch {
    /// A patch that only sets the rating.
    #[must_use]
    pub fn rating(rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.rating.is_none()
    }

    /// Check the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns every field problem found.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.add("name", "Name is required");
        }
        if self.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
            errors.add("category", "Category is required");
        }
        if self.rating.is_some_and(|r| !(0.0..=MAX_RATING).contains(&r)) {
            errors.add("rating", "Rating must be between 0 and 5");
        }
        errors.into_result()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_record() {
        let json = r#"{"id":3,"name":"Oak chair","description":"Solid oak","price":149.99,"category":"Chairs","rating":4.5}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price.to_string(), "$149.99");
        assert_eq!(product.image_path(), "img/shop/3.png");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let product: Product = serde_json::from_str(r#"{"id":1,"name":"Stool","price":10}"#).unwrap();
        assert!(product.description.is_empty());
        assert!(product.rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let json = serde_json::to_value(ProductPatch::rating(4.2)).unwrap();
        assert_eq!(json, serde_json::json!({"rating": 4.2}));
    }

    #[test]
    fn test_new_product_validation() {
        let product = NewProduct {
            name: " ".into(),
            description: String::new(),
            price: Price::ZERO,
            category: "Tables".into(),
            rating: 6.0,
        };
        let errors = product.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert!(errors.get("rating").is_some());
        assert!(errors.get("category").is_none());
    }
}
