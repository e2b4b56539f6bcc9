use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    Cod,
    Card,
    #[serde(rename = "UPI")]
    Upi,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cod
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Processing,
    Shipped,
    Delivered,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderBody {
    /// The account the order belongs to; ownership is checked against the
    /// caller's identity before anything is written.
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: OrderStatus,
}

impl OrderBody {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if self.items.is_empty() {
            field_errors.insert("items".to_string(), "Order must contain at least one item".to_string());
        }
        if !(self.total >= 0.0) {
            field_errors.insert("total".to_string(), "Total must be non-negative".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid order", field_errors))
        }
    }
}
