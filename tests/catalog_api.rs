mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::DateTime;
use serde_json::json;

fn sample_product() -> serde_json::Value {
    json!({
        "name": "Pixel 7A",
        "brand": "Google",
        "description": "Powerful camera and smooth Android experience.",
        "price": 34999.0,
        "category": "Mobiles",
        "rating": 4.4,
        "images": ["https://images.unsplash.com/photo-1511707171634-5f897ff02aa9"],
        "specs": {"storage": "128GB", "ram": "8GB"},
        "stock": 25,
    })
}

#[tokio::test]
async fn admin_creates_a_product_and_it_round_trips() -> Result<()> {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;

    let (status, body) =
        common::send(&app, "POST", "/products", Some(&admin), Some(sample_product())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().expect("id").to_string();

    let (status, body) = common::send(&app, "GET", &format!("/products/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let product = &body["data"];

    // Storage identifier comes back renamed, timestamps as ISO-8601 strings
    assert_eq!(product["id"], id.as_str());
    assert_eq!(product.get("_id"), None);
    assert_eq!(product["name"], "Pixel 7A");
    assert_eq!(product["specs"], json!({"storage": "128GB", "ram": "8GB"}));
    let created_at = product["created_at"].as_str().expect("created_at string");
    assert!(DateTime::parse_from_rfc3339(created_at).is_ok());
    Ok(())
}

#[tokio::test]
async fn non_admin_product_writes_are_forbidden() -> Result<()> {
    let app = common::test_app();
    let (token, _) = common::signup_user(&app, "Ada", "a@b.com", "correct-horse").await;

    let (status, body) =
        common::send(&app, "POST", "/products", Some(&token), Some(sample_product())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin only");

    let admin = common::admin_token(&app).await;
    let (_, body) = common::send(&app, "GET", "/products", None, None).await;
    let id = body["data"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = common::send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(&token),
        Some(json!({"price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) =
        common::send(&app, "DELETE", &format!("/products/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The admin can do all three
    let (status, _) = common::send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(&admin),
        Some(json!({"price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn partial_update_touches_only_supplied_fields() -> Result<()> {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;

    let (_, body) =
        common::send(&app, "POST", "/products", Some(&admin), Some(sample_product())).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(&admin),
        Some(json!({"price": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ok"], true);

    let (_, body) = common::send(&app, "GET", &format!("/products/{id}"), None, None).await;
    let product = &body["data"];
    assert_eq!(product["price"], 100.0);
    // Everything the caller omitted is untouched
    assert_eq!(product["name"], "Pixel 7A");
    assert_eq!(product["brand"], "Google");
    assert_eq!(product["stock"], 25);
    Ok(())
}

#[tokio::test]
async fn empty_update_is_applied_as_a_timestamp_touch() -> Result<()> {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;

    let (_, body) =
        common::send(&app, "POST", "/products", Some(&admin), Some(sample_product())).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(&admin),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ok"], true);

    let (_, body) = common::send(&app, "GET", &format!("/products/{id}"), None, None).await;
    let product = &body["data"];
    assert_eq!(product["name"], "Pixel 7A");
    let updated_at = product["updated_at"].as_str().expect("updated_at string");
    assert!(DateTime::parse_from_rfc3339(updated_at).is_ok());
    Ok(())
}

#[tokio::test]
async fn missing_products_are_404s() -> Result<()> {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let ghost = "eec44572-2ff5-47ab-a375-1a4359e1e1f9";

    let (status, _) = common::send(&app, "GET", &format!("/products/{ghost}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::send(
        &app,
        "PUT",
        &format!("/products/{ghost}"),
        Some(&admin),
        Some(json!({"price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) =
        common::send(&app, "DELETE", &format!("/products/{ghost}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn listing_filters_by_category_and_search() -> Result<()> {
    let app = common::test_app();
    common::admin_token(&app).await; // seeds the demo catalog

    let (status, body) = common::send(&app, "GET", "/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 8);

    let (_, body) = common::send(&app, "GET", "/products?category=Laptops", None, None).await;
    let laptops = body["data"].as_array().unwrap();
    assert_eq!(laptops.len(), 2);
    assert!(laptops.iter().all(|p| p["category"] == "Laptops"));

    let (_, body) = common::send(&app, "GET", "/products?q=pixel", None, None).await;
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Pixel 7A");

    let (_, body) =
        common::send(&app, "GET", "/products?q=keyboard&category=Accessories", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_product() -> Result<()> {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;

    let (_, body) =
        common::send(&app, "POST", "/products", Some(&admin), Some(sample_product())).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) =
        common::send(&app, "DELETE", &format!("/products/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::send(&app, "GET", &format!("/products/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn product_validation_rejects_bad_fields() -> Result<()> {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;

    let mut bad = sample_product();
    bad["price"] = json!(-5.0);
    let (status, body) = common::send(&app, "POST", "/products", Some(&admin), Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["price"].is_string());

    let (_, body) = common::send(&app, "GET", "/products", None, None).await;
    let id = body["data"][0]["id"].as_str().unwrap().to_string();
    let (status, _) = common::send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(&admin),
        Some(json!({"rating": 9.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn orders_enforce_ownership() -> Result<()> {
    let app = common::test_app();
    let (ada_token, ada_id) = common::signup_user(&app, "Ada", "a@b.com", "correct-horse").await;
    let (_, eve_id) = common::signup_user(&app, "Eve", "e@b.com", "other-secret").await;

    let order_for = |user_id: &str| {
        json!({
            "user_id": user_id,
            "items": [{"product_id": "p1", "name": "Pixel 7A", "price": 34999.0, "quantity": 1}],
            "total": 34999.0,
            "name": "Ada",
            "address": "1 Main St",
            "phone": "555-0100",
        })
    };

    // Own order: allowed
    let (status, body) =
        common::send(&app, "POST", "/orders", Some(&ada_token), Some(order_for(&ada_id))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["id"].is_string());

    // Someone else's account: forbidden
    let (status, body) =
        common::send(&app, "POST", "/orders", Some(&ada_token), Some(order_for(&eve_id))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not allowed");

    // Admin may place orders on any account
    let admin = common::admin_token(&app).await;
    let (status, _) =
        common::send(&app, "POST", "/orders", Some(&admin), Some(order_for(&eve_id))).await;
    assert_eq!(status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn admin_stats_counts_collections() -> Result<()> {
    let app = common::test_app();
    let admin = common::admin_token(&app).await; // seeds 8 products + 1 admin
    common::signup_user(&app, "Ada", "a@b.com", "correct-horse").await;

    let (status, body) = common::send(&app, "GET", "/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"], 2);
    assert_eq!(body["data"]["products"], 8);
    assert_eq!(body["data"]["orders"], 0);
    Ok(())
}

#[tokio::test]
async fn seed_is_idempotent() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app, "POST", "/seed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["seeded"], true);
    assert_eq!(body["data"]["products"], 8);

    let (status, body) = common::send(&app, "POST", "/seed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["seeded"], false);
    Ok(())
}
