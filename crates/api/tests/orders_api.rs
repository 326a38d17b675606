//! Integration tests for the quote endpoint and the order submission
//! pipeline: pricing parity, validation short-circuiting, sequential
//! upload semantics, and orphan behaviour on mid-batch failure.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, expect_json, send_admin, send_json, Part};
use serde_json::json;
use sqlx::PgPool;
use tessella_db::repositories::CustomRequestRepo;
use tessella_storage::{MemoryObjectStore, ObjectStore, StorageError};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

async fn seed_template(app: axum::Router) {
    let response = send_json(
        app,
        "POST",
        "/api/v1/templates",
        json!({
            "name": "Storefront Classic",
            "category": "business",
            "price_ksh": 1000.0,
            "price_usd": 10.0,
            "price_eur": 9.0,
            "price_gbp": 8.0,
            "rate_per_month": 50.0,
            "rate_per_page": 10.0,
            "preview_url": null,
            "image_url": null,
        }),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Text parts for a fully valid business order: KE, 6 months, 8 pages.
fn order_fields() -> Vec<Part<'static>> {
    vec![
        Part::Text("name", "Jane Wanjiru"),
        Part::Text("email", "jane@example.com"),
        Part::Text("phone", "+254700000000"),
        Part::Text("category", "business"),
        Part::Text("template", "Storefront Classic"),
        Part::Text("country", "KE"),
        Part::Text("duration_months", "6"),
        Part::Text("page_count", "8"),
        Part::Text("extra_pages", "Careers and FAQ pages"),
        Part::Text("domain_choice", "custom"),
        Part::Text("domain_name", "acme.co.ke"),
        Part::Text("theme_choice", "custom"),
        Part::Text("custom_color", "#112233"),
        Part::Text("social_handles", "@acme"),
        Part::Text("social_handles", "facebook.com/acme"),
        Part::Text("message", "Launch before December"),
        Part::Text("business_name", "Acme Ltd"),
        Part::Text("business_type", "Consultancy"),
        // A field belonging to a different category; must be dropped.
        Part::Text("profession", "Photographer"),
    ]
}

fn file_parts() -> Vec<Part<'static>> {
    vec![
        Part::File {
            name: "logo",
            file_name: "logo.png",
            content_type: "image/png",
            bytes: b"png-bytes",
        },
        Part::File {
            name: "media",
            file_name: "team photo.jpg",
            content_type: "image/jpeg",
            bytes: b"jpg-bytes-1",
        },
        Part::File {
            name: "media",
            file_name: "office.jpg",
            content_type: "image/jpeg",
            bytes: b"jpg-bytes-2",
        },
    ]
}

// ---------------------------------------------------------------------------
// Quote endpoint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn quote_matches_documented_scenario(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_template(app.clone()).await;

    // 1000 + 50*6 + 10*8 = 1380.00, KSH
    let quote = expect_json(
        send_json(
            app,
            "POST",
            "/api/v1/orders/quote",
            json!({
                "template": "Storefront Classic",
                "country": "KE",
                "duration_months": 6,
                "page_count": 8,
                "seq": 7,
            }),
            false,
        )
        .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(quote["data"]["price"], 1380.0);
    assert_eq!(quote["data"]["currency"], "KSH");
    // The sequence token is echoed so the client can discard stale
    // responses.
    assert_eq!(quote["data"]["seq"], 7);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quote_applies_documented_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_template(app.clone()).await;

    // Missing sliders default to 12 months and 5 pages.
    let quote = expect_json(
        send_json(
            app,
            "POST",
            "/api/v1/orders/quote",
            json!({ "template": "Storefront Classic", "country": "KE" }),
            false,
        )
        .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(quote["data"]["price"], 1000.0 + 50.0 * 12.0 + 10.0 * 5.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quote_for_missing_template_degrades_to_zero(pool: PgPool) {
    let app = common::build_test_app(pool);

    let quote = expect_json(
        send_json(
            app,
            "POST",
            "/api/v1/orders/quote",
            json!({ "template": "Deleted Template", "country": "KE" }),
            false,
        )
        .await,
        StatusCode::OK,
    )
    .await;

    // Silent degradation: zero price, cleared currency label.
    assert_eq!(quote["data"]["price"], 0.0);
    assert_eq!(quote["data"]["currency"], "");
}

// ---------------------------------------------------------------------------
// Submission pipeline
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_order_happy_path(pool: PgPool) {
    let store = Arc::new(MemoryObjectStore::new());
    let app = common::build_test_app_with_store(pool.clone(), store.clone());
    seed_template(app.clone()).await;

    let mut parts = order_fields();
    parts.extend(file_parts());

    let created = expect_json(
        common::post_multipart(app.clone(), "/api/v1/orders", &parts).await,
        StatusCode::CREATED,
    )
    .await;
    let order = &created["data"];

    // Price is recomputed server-side from (template, country), never
    // taken from the client, and matches the quote exactly.
    assert_eq!(order["price"], 1380.0);
    assert_eq!(order["currency"], "KSH");
    assert_eq!(order["category"], "business");
    assert_eq!(order["duration_months"], 6);
    assert_eq!(order["page_count"], 8);
    assert_eq!(order["domain_name"], "acme.co.ke");
    assert_eq!(order["custom_color"], "#112233");
    assert_eq!(order["social_handles"][0], "@acme");

    // One logo + two media = exactly 3 URLs, logo first, media in
    // selection order.
    let urls = order["file_urls"].as_array().unwrap();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].as_str().unwrap().ends_with("-logo.png"));
    assert!(urls[1].as_str().unwrap().ends_with("-team-photo.jpg"));
    assert!(urls[2].as_str().unwrap().ends_with("-office.jpg"));
    assert_eq!(store.len(), 3);

    // Extension fields are filtered to the selected category.
    assert_eq!(order["extension"]["business_name"], "Acme Ltd");
    assert_eq!(order["extension"]["business_type"], "Consultancy");
    assert!(order["extension"].get("profession").is_none());

    let quote = body_json(
        send_json(
            app,
            "POST",
            "/api/v1/orders/quote",
            json!({
                "template": "Storefront Classic",
                "country": "KE",
                "duration_months": 6,
                "page_count": 8,
            }),
            false,
        )
        .await,
    )
    .await;
    assert_eq!(quote["data"]["price"], order["price"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_contact_field_short_circuits_before_any_write(pool: PgPool) {
    let store = Arc::new(MemoryObjectStore::new());
    let app = common::build_test_app_with_store(pool.clone(), store.clone());
    seed_template(app.clone()).await;

    let mut parts: Vec<Part<'_>> = order_fields()
        .into_iter()
        .filter(|part| !matches!(part, Part::Text("phone", _)))
        .collect();
    parts.extend(file_parts());

    let json = expect_json(
        common::post_multipart(app, "/api/v1/orders", &parts).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(json["error"].as_str().unwrap().contains("phone"));

    // Validation failed before the upload phase: nothing in storage, no
    // record written.
    assert!(store.is_empty());
    assert_eq!(CustomRequestRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn extra_pages_required_above_threshold(pool: PgPool) {
    let store = Arc::new(MemoryObjectStore::new());
    let app = common::build_test_app_with_store(pool.clone(), store.clone());
    seed_template(app.clone()).await;

    let parts: Vec<Part<'_>> = order_fields()
        .into_iter()
        .filter(|part| !matches!(part, Part::Text("extra_pages", _)))
        .collect();

    let json = expect_json(
        common::post_multipart(app.clone(), "/api/v1/orders", &parts).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(json["error"].as_str().unwrap().contains("extra_pages"));
    assert!(store.is_empty());

    // At five pages or fewer the field is not required.
    let parts: Vec<Part<'_>> = order_fields()
        .into_iter()
        .filter(|part| !matches!(part, Part::Text("extra_pages" | "page_count", _)))
        .chain([Part::Text("page_count", "5")])
        .collect();
    let response = common::post_multipart(app, "/api/v1/orders", &parts).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_category_is_rejected_with_valid_set(pool: PgPool) {
    let app = common::build_test_app(pool);

    let parts: Vec<Part<'_>> = order_fields()
        .into_iter()
        .filter(|part| !matches!(part, Part::Text("category", _)))
        .chain([Part::Text("category", "restaurant")])
        .collect();

    let json = expect_json(
        common::post_multipart(app, "/api/v1/orders", &parts).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("restaurant"));
    assert!(message.contains("business"));
    assert!(message.contains("portfolio"));
}

// ---------------------------------------------------------------------------
// Upload failure semantics
// ---------------------------------------------------------------------------

/// Store that fails every `put` once `fail_after` objects are stored.
struct FailingStore {
    inner: MemoryObjectStore,
    fail_after: usize,
}

#[async_trait::async_trait]
impl ObjectStore for FailingStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        if self.inner.len() >= self.fail_after {
            return Err(StorageError::Upload {
                key: key.to_string(),
                message: "simulated outage".to_string(),
            });
        }
        self.inner.put(key, bytes, content_type).await
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        self.inner.remove(keys).await
    }

    fn public_url(&self, key: &str) -> String {
        self.inner.public_url(key)
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mid_batch_upload_failure_leaves_orphan_and_no_record(pool: PgPool) {
    // The second file (first media) fails: the logo has already landed.
    let store = Arc::new(FailingStore {
        inner: MemoryObjectStore::new(),
        fail_after: 1,
    });
    let app = common::build_test_app_with_store(pool.clone(), store.clone());
    seed_template(app.clone()).await;

    let mut parts = order_fields();
    parts.extend(file_parts());

    let json = expect_json(
        common::post_multipart(app, "/api/v1/orders", &parts).await,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    assert_eq!(json["code"], "STORAGE_ERROR");
    assert!(json["error"].as_str().unwrap().contains("simulated outage"));

    // No order record was written; the logo object is orphaned in
    // storage and the later files were never attempted.
    assert_eq!(CustomRequestRepo::count(&pool).await.unwrap(), 0);
    assert_eq!(store.inner.len(), 1);
}

// ---------------------------------------------------------------------------
// Admin review
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_list_get_delete_flow(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_template(app.clone()).await;

    let mut parts = order_fields();
    parts.extend(file_parts());
    let created = body_json(common::post_multipart(app.clone(), "/api/v1/orders", &parts).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    // Listing requires the admin token.
    let response = common::get(app.clone(), "/api/v1/orders").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let listed = expect_json(
        send_admin(app.clone(), "GET", "/api/v1/orders").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let fetched = expect_json(
        send_admin(app.clone(), "GET", &format!("/api/v1/orders/{id}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(fetched["data"]["email"], "jane@example.com");

    let response = send_admin(app.clone(), "DELETE", &format!("/api/v1/orders/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send_admin(app, "GET", &format!("/api/v1/orders/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
