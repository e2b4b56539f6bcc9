//! Demo-data seeding: a handful of catalog products plus a bootstrap admin
//! account. Idempotent: a non-empty catalog means nothing is written.

use axum::extract::State;
use serde_json::{json, Value};

use crate::api::{wire, ApiResponse, ApiResult};
use crate::auth::password;
use crate::state::AppState;
use crate::store::{Filter, PRODUCTS, USERS};

/// POST /seed
pub async fn seed(State(state): State<AppState>) -> ApiResult<Value> {
    if state.store.count(PRODUCTS, Filter::new()).await? > 0 {
        return Ok(ApiResponse::success(json!({
            "seeded": false,
            "message": "Products already exist",
        })));
    }

    for product in demo_products() {
        let doc = wire::to_document(&product)?;
        state.store.insert(PRODUCTS, doc).await?;
    }

    // Bootstrap an admin account if the deployment has none
    if state.store.count(USERS, Filter::new().eq("is_admin", true)).await? == 0 {
        let admin = wire::to_document(&json!({
            "name": "Admin",
            "email": "admin@shop.com",
            "password_hash": password::hash("admin123"),
            "is_admin": true,
        }))?;
        state.store.insert(USERS, admin).await?;
    }

    let products = state.store.count(PRODUCTS, Filter::new()).await?;
    Ok(ApiResponse::success(json!({ "seeded": true, "products": products })))
}

fn demo_products() -> Vec<Value> {
    vec![
        json!({
            "name": "Pixel 7A",
            "brand": "Google",
            "description": "Powerful camera and smooth Android experience.",
            "price": 34999,
            "category": "Mobiles",
            "rating": 4.4,
            "images": ["https://images.unsplash.com/photo-1511707171634-5f897ff02aa9"],
            "specs": {"storage": "128GB", "ram": "8GB"},
            "stock": 25,
        }),
        json!({
            "name": "iPhone 14",
            "brand": "Apple",
            "description": "A15 Bionic with stunning display.",
            "price": 69999,
            "category": "Mobiles",
            "rating": 4.6,
            "images": ["https://images.unsplash.com/photo-1603899123335-4a9d94dfbd89"],
            "specs": {"storage": "128GB", "ram": "6GB"},
            "stock": 15,
        }),
        json!({
            "name": "ThinkPad X1",
            "brand": "Lenovo",
            "description": "Business-class laptop with legendary keyboard.",
            "price": 119999,
            "category": "Laptops",
            "rating": 4.5,
            "images": ["https://images.unsplash.com/photo-1517336714731-489689fd1ca8"],
            "specs": {"cpu": "i7", "ram": "16GB", "storage": "512GB SSD"},
            "stock": 10,
        }),
        json!({
            "name": "MacBook Air M2",
            "brand": "Apple",
            "description": "Ultra portable with M2 performance.",
            "price": 124999,
            "category": "Laptops",
            "rating": 4.8,
            "images": ["https://images.unsplash.com/photo-1517336714731-489689fd1ca8"],
            "specs": {"ram": "8GB", "storage": "256GB SSD"},
            "stock": 12,
        }),
        json!({
            "name": "Noise Cancelling Headphones",
            "brand": "Sony",
            "description": "Immerse in music with ANC.",
            "price": 19999,
            "category": "Accessories",
            "rating": 4.7,
            "images": ["https://images.unsplash.com/photo-1518443248587-30bdc8f94f04"],
            "specs": {"battery": "30h"},
            "stock": 40,
        }),
        json!({
            "name": "Mechanical Keyboard",
            "brand": "Keychron",
            "description": "Hot-swappable RGB keyboard.",
            "price": 7999,
            "category": "Accessories",
            "rating": 4.3,
            "images": ["https://images.unsplash.com/photo-1516382799247-87df95d790b5"],
            "specs": {"switches": "Gateron"},
            "stock": 30,
        }),
        json!({
            "name": "Casual Sneakers",
            "brand": "Nike",
            "description": "Comfortable everyday wear.",
            "price": 4999,
            "category": "Fashion",
            "rating": 4.2,
            "images": ["https://images.unsplash.com/photo-1525966222134-fcfa99b8ae77"],
            "specs": {"size": "7-11"},
            "stock": 50,
        }),
        json!({
            "name": "Smartwatch",
            "brand": "Amazfit",
            "description": "Track fitness and notifications.",
            "price": 6999,
            "category": "Accessories",
            "rating": 4.1,
            "images": ["https://images.unsplash.com/photo-1512086734732-172b66a17c72"],
            "specs": {"battery": "10 days"},
            "stock": 35,
        }),
    ]
}
