use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Catalog sections; anything else is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Mobiles,
    Laptops,
    Accessories,
    Fashion,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductBody {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default)]
    pub images: Vec<String>,
    /// Free-form spec sheet, preserved opaquely.
    #[serde(default)]
    pub specs: Map<String, Value>,
    #[serde(default = "default_stock")]
    pub stock: i64,
}

fn default_rating() -> f64 {
    4.0
}

fn default_stock() -> i64 {
    10
}

/// Partial update: omitted fields stay untouched in storage, which is why
/// every field is optional and absent ones are skipped on serialization.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProductUpdateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

fn check_price(price: f64, field_errors: &mut HashMap<String, String>) {
    if !(price >= 0.0) {
        field_errors.insert("price".to_string(), "Price must be non-negative".to_string());
    }
}

fn check_rating(rating: f64, field_errors: &mut HashMap<String, String>) {
    if !(0.0..=5.0).contains(&rating) {
        field_errors.insert("rating".to_string(), "Rating must be between 0 and 5".to_string());
    }
}

impl ProductBody {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if self.name.trim().is_empty() {
            field_errors.insert("name".to_string(), "Name cannot be empty".to_string());
        }
        check_price(self.price, &mut field_errors);
        check_rating(self.rating, &mut field_errors);

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid product", field_errors))
        }
    }
}

impl ProductUpdateBody {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Some(price) = self.price {
            check_price(price, &mut field_errors);
        }
        if let Some(rating) = self.rating {
            check_rating(rating, &mut field_errors);
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid product update", field_errors))
        }
    }
}
