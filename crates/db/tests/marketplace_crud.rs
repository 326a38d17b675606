//! Integration tests for the repository layer.
//!
//! Exercises the five tables against a real database:
//! - Template CRUD and name lookup
//! - Order insert/list/delete and the no-update policy surface
//! - Chat visitor get-or-create and thread ordering
//! - Knowledge CRUD
//! - Unique constraint violations (uq_-prefixed names)

use sqlx::PgPool;
use tessella_db::models::custom_request::CreateCustomRequest;
use tessella_db::models::knowledge::{CreateKnowledgeEntry, UpdateKnowledgeEntry};
use tessella_db::models::message::CreateMessage;
use tessella_db::models::template::{CreateTemplate, UpdateTemplate};
use tessella_db::models::user::CreateUser;
use tessella_db::repositories::{
    CustomRequestRepo, KnowledgeRepo, MessageRepo, TemplateRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_template(name: &str) -> CreateTemplate {
    CreateTemplate {
        name: name.to_string(),
        category: "business".to_string(),
        price_ksh: 1000.0,
        price_usd: 10.0,
        price_eur: 9.0,
        price_gbp: 8.0,
        rate_per_month: 50.0,
        rate_per_page: 10.0,
        preview_url: Some("https://demo.example.com/storefront".to_string()),
        image_url: None,
    }
}

fn new_order(template_name: &str) -> CreateCustomRequest {
    CreateCustomRequest {
        name: "Jane Wanjiru".to_string(),
        email: "jane@example.com".to_string(),
        phone: "+254700000000".to_string(),
        category: "business".to_string(),
        template_name: template_name.to_string(),
        country: "KE".to_string(),
        currency: "KSH".to_string(),
        price: 1380.0,
        duration_months: 6,
        page_count: 8,
        extra_pages: Some("Careers and FAQ pages".to_string()),
        domain_choice: "registered_for_me".to_string(),
        domain_name: None,
        theme_choice: "default".to_string(),
        custom_color: None,
        social_handles: vec!["@acme".to_string(), "facebook.com/acme".to_string()],
        message: Some("Launch before December".to_string()),
        extension: serde_json::json!({
            "business_name": "Acme Ltd",
            "business_type": "Consultancy",
        }),
        file_urls: vec![
            "https://cdn.example.com/1-logo.png".to_string(),
            "https://cdn.example.com/1-team.jpg".to_string(),
        ],
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn template_crud_roundtrip(pool: PgPool) {
    let created = TemplateRepo::create(&pool, &new_template("Storefront Classic"))
        .await
        .unwrap();
    assert_eq!(created.name, "Storefront Classic");
    assert_eq!(created.price_ksh, 1000.0);

    let by_name = TemplateRepo::find_by_name(&pool, "Storefront Classic")
        .await
        .unwrap()
        .expect("template should be found by name");
    assert_eq!(by_name.id, created.id);

    let update = UpdateTemplate {
        name: None,
        category: None,
        price_ksh: Some(1200.0),
        price_usd: None,
        price_eur: None,
        price_gbp: None,
        rate_per_month: None,
        rate_per_page: None,
        preview_url: None,
        image_url: None,
    };
    let updated = TemplateRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .expect("update should return the row");
    assert_eq!(updated.price_ksh, 1200.0);
    // Untouched fields keep their values.
    assert_eq!(updated.rate_per_month, 50.0);

    assert!(TemplateRepo::delete(&pool, created.id).await.unwrap());
    assert!(TemplateRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn template_names_are_unique(pool: PgPool) {
    TemplateRepo::create(&pool, &new_template("Storefront Classic"))
        .await
        .unwrap();
    let err = TemplateRepo::create(&pool, &new_template("Storefront Classic"))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_templates_name"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn template_list_filters_by_category(pool: PgPool) {
    TemplateRepo::create(&pool, &new_template("Storefront Classic"))
        .await
        .unwrap();
    let mut portfolio = new_template("Lens Portfolio");
    portfolio.category = "portfolio".to_string();
    TemplateRepo::create(&pool, &portfolio).await.unwrap();

    let all = TemplateRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let business = TemplateRepo::list(&pool, Some("business")).await.unwrap();
    assert_eq!(business.len(), 1);
    assert_eq!(business[0].name, "Storefront Classic");
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn order_insert_preserves_list_ordering(pool: PgPool) {
    let created = CustomRequestRepo::create(&pool, &new_order("Storefront Classic"))
        .await
        .unwrap();

    // Arrays round-trip in order.
    assert_eq!(created.file_urls.len(), 2);
    assert_eq!(created.file_urls[0], "https://cdn.example.com/1-logo.png");
    assert_eq!(created.social_handles[0], "@acme");
    assert_eq!(created.extension["business_name"], "Acme Ltd");

    let listed = CustomRequestRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    assert_eq!(CustomRequestRepo::count(&pool).await.unwrap(), 1);

    assert!(CustomRequestRepo::delete(&pool, created.id).await.unwrap());
    assert_eq!(CustomRequestRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn order_check_constraints_reject_bad_counts(pool: PgPool) {
    let mut order = new_order("Storefront Classic");
    order.duration_months = 0;
    assert!(CustomRequestRepo::create(&pool, &order).await.is_err());

    let mut order = new_order("Storefront Classic");
    order.page_count = 0;
    assert!(CustomRequestRepo::create(&pool, &order).await.is_err());
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn chat_visitor_get_or_create_is_idempotent(pool: PgPool) {
    let first = UserRepo::get_or_create(
        &pool,
        &CreateUser {
            name: None,
            email: "visitor@example.com".to_string(),
        },
    )
    .await
    .unwrap();

    // Second call with a name fills the missing name but reuses the row.
    let second = UserRepo::get_or_create(
        &pool,
        &CreateUser {
            name: Some("Ann".to_string()),
            email: "visitor@example.com".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.name.as_deref(), Some("Ann"));

    // A third call never overwrites an existing name.
    let third = UserRepo::get_or_create(
        &pool,
        &CreateUser {
            name: Some("Someone Else".to_string()),
            email: "visitor@example.com".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(third.name.as_deref(), Some("Ann"));
}

#[sqlx::test(migrations = "./migrations")]
async fn chat_thread_lists_oldest_first(pool: PgPool) {
    let user = UserRepo::get_or_create(
        &pool,
        &CreateUser {
            name: Some("Ann".to_string()),
            email: "visitor@example.com".to_string(),
        },
    )
    .await
    .unwrap();

    for (sender, body) in [
        ("visitor", "Do you support M-Pesa checkout?"),
        ("admin", "Yes, on the ecommerce templates."),
        ("visitor", "Great, thanks!"),
    ] {
        MessageRepo::create(
            &pool,
            &CreateMessage {
                user_id: user.id,
                sender: sender.to_string(),
                body: body.to_string(),
            },
        )
        .await
        .unwrap();
    }

    let thread = MessageRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(thread.len(), 3);
    assert_eq!(thread[0].sender, "visitor");
    assert_eq!(thread[1].sender, "admin");
    assert_eq!(thread[2].body, "Great, thanks!");
}

// ---------------------------------------------------------------------------
// Knowledge
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn knowledge_crud_roundtrip(pool: PgPool) {
    let created = KnowledgeRepo::create(
        &pool,
        &CreateKnowledgeEntry {
            topic: "pricing".to_string(),
            content: "Quotes combine a base price with monthly and per-page rates.".to_string(),
        },
    )
    .await
    .unwrap();

    let listed = KnowledgeRepo::list(&pool, Some("pricing")).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(KnowledgeRepo::list(&pool, Some("delivery"))
        .await
        .unwrap()
        .is_empty());

    let updated = KnowledgeRepo::update(
        &pool,
        created.id,
        &UpdateKnowledgeEntry {
            topic: None,
            content: Some("Quotes are recomputed on every input change.".to_string()),
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");
    assert_eq!(updated.topic, "pricing");
    assert!(updated.content.contains("recomputed"));

    assert!(KnowledgeRepo::delete(&pool, created.id).await.unwrap());
    assert!(KnowledgeRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}
