use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use mongodb::bson::{oid::ObjectId, Document};
use serde_json::{json, Value};
use tower::ServiceExt;

use pacific_api::{
    api,
    config::{DatabaseConfig, ServerConfig, Settings},
    domain::{Announcement, Event},
    error::{AppError, Result},
    repository::{AnnouncementRepository, EventRepository},
    service::ServiceContext,
    store::{DocumentStore, MemoryStore},
};

/// Store whose every call fails, standing in for an unreachable database.
struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _collection: &str, _document: Document) -> Result<ObjectId> {
        Err(unreachable_error())
    }

    async fn find(&self, _collection: &str, _limit: i64) -> Result<Vec<Document>> {
        Err(unreachable_error())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Err(unreachable_error())
    }
}

fn unreachable_error() -> AppError {
    AppError::Database(format!(
        "Server selection timeout: No available servers. Topology: {}",
        "{ Type: Unknown, Servers: [ { Address: db.internal:27017, Error: connection refused } ] }"
    ))
}

fn settings(configured: bool) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        },
        database: DatabaseConfig {
            url: configured.then(|| "mongodb://localhost:27017".to_string()),
            name: configured.then(|| "school".to_string()),
            max_pool_size: 10,
            app_name: "pacific-api-test".to_string(),
        },
    }
}

/// What `/test` should say for `name`, given this process's environment.
fn env_flag(name: &str) -> &'static str {
    match std::env::var_os(name) {
        Some(v) if !v.is_empty() => "✅ Set",
        _ => "❌ Not Set",
    }
}

fn app_with(store: Option<Arc<dyn DocumentStore>>) -> Router {
    let configured = store.is_some();
    api::create_app(
        Arc::new(ServiceContext::new(store)),
        Arc::new(settings(configured)),
    )
}

fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app_with(Some(store.clone())), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body)?).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}

#[tokio::test]
async fn root_reports_running() -> anyhow::Result<()> {
    let (app, _) = memory_app();
    let (status, body) = send(&app, Method::GET, "/", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Pacific Christian School API is running" }));
    Ok(())
}

#[tokio::test]
async fn health_check_is_healthy() -> anyhow::Result<()> {
    let app = app_with(None);
    let (status, body) = send(&app, Method::GET, "/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn announcement_without_publish_time_gets_server_time() -> anyhow::Result<()> {
    let (app, _) = memory_app();
    let before = Utc::now();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/announcements",
        Some(json!({ "title": "Picture day", "body": "Wear your uniform", "author": "Mrs. Lee" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().expect("id should be a string");
    assert!(ObjectId::parse_str(id).is_ok());

    let (status, listed) = send(&app, Method::GET, "/api/announcements", None).await?;
    assert_eq!(status, StatusCode::OK);
    let items = listed.as_array().expect("list should be an array");
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item["title"], "Picture day");
    assert_eq!(item["body"], "Wear your uniform");
    assert_eq!(item["author"], "Mrs. Lee");
    assert!(item.get("_id").is_none());
    assert!(item.get("id").is_none());

    let published: DateTime<Utc> = item["published_at"]
        .as_str()
        .expect("published_at should be set")
        .parse()?;
    // BSON datetimes keep millisecond precision
    assert!(published >= before - Duration::milliseconds(1));
    assert!(published <= Utc::now() + Duration::seconds(1));
    Ok(())
}

#[tokio::test]
async fn announcement_keeps_client_publish_time() -> anyhow::Result<()> {
    let (app, _) = memory_app();
    send(
        &app,
        Method::POST,
        "/api/announcements",
        Some(json!({ "title": "t", "body": "b", "published_at": "2025-08-20T09:00:00" })),
    )
    .await?;

    let (_, listed) = send(&app, Method::GET, "/api/announcements", None).await?;
    let published: DateTime<Utc> = listed[0]["published_at"].as_str().unwrap_or_default().parse()?;
    assert_eq!(published, "2025-08-20T09:00:00Z".parse::<DateTime<Utc>>()?);
    Ok(())
}

#[tokio::test]
async fn fall_fair_event_round_trip() -> anyhow::Result<()> {
    let (app, _) = memory_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({ "title": "Fall Fair", "event_date": "2025-10-03" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(created["id"].is_string());

    let (status, listed) = send(&app, Method::GET, "/api/events", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        listed,
        json!([{
            "title": "Fall Fair",
            "description": null,
            "event_date": "2025-10-03",
            "location": null
        }])
    );
    Ok(())
}

#[tokio::test]
async fn invalid_contact_email_is_rejected_before_storage() -> anyhow::Result<()> {
    let (app, store) = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contact",
        Some(json!({ "name": "A", "email": "not-an-email", "subject": "s", "message": "m" })),
    )
    .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "email");
    assert_eq!(store.count("contactmessage").await, 0);
    Ok(())
}

#[tokio::test]
async fn dotted_and_dotless_addresses_are_rejected_before_storage() -> anyhow::Result<()> {
    let (app, store) = memory_app();

    for email in ["a..b@example.com", ".a@example.com", "a@localhost"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/contact",
            Some(json!({ "name": "A", "email": email, "subject": "s", "message": "m" })),
        )
        .await?;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{} accepted", email);
        assert_eq!(body["details"][0]["field"], "email");
    }
    assert_eq!(store.count("contactmessage").await, 0);
    Ok(())
}

#[tokio::test]
async fn valid_contact_message_is_acknowledged() -> anyhow::Result<()> {
    let (app, store) = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contact",
        Some(json!({
            "name": "Jordan Park",
            "email": "jordan@example.com",
            "subject": "Enrollment",
            "message": "Is there space in grade 3?",
            "phone": "555-0100"
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
    assert_eq!(store.count("contactmessage").await, 1);

    let stored = store.find("contactmessage", 10).await?;
    assert!(!stored[0].contains_key("phone"));
    Ok(())
}

#[tokio::test]
async fn missing_required_field_names_the_field() -> anyhow::Result<()> {
    let (app, store) = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/announcements",
        Some(json!({ "body": "no title here" })),
    )
    .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "title");
    assert_eq!(store.count("announcement").await, 0);
    Ok(())
}

#[tokio::test]
async fn malformed_publish_time_is_a_validation_error() -> anyhow::Result<()> {
    let (app, store) = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/announcements",
        Some(json!({ "title": "Picture day", "body": "b", "published_at": "next tuesday" })),
    )
    .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "published_at");
    assert_eq!(store.count("announcement").await, 0);
    Ok(())
}

#[tokio::test]
async fn malformed_event_date_is_a_validation_error() -> anyhow::Result<()> {
    let (app, store) = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({ "title": "Fall Fair", "event_date": "October 3rd" })),
    )
    .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "event_date");
    assert_eq!(store.count("event").await, 0);
    Ok(())
}

#[tokio::test]
async fn broken_json_is_a_bad_request() -> anyhow::Result<()> {
    let (app, _) = memory_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\":"))?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn lists_are_capped() -> anyhow::Result<()> {
    let (app, store) = memory_app();
    let announcements = AnnouncementRepository::new(store.clone());
    let events = EventRepository::new(store.clone());
    let now = Utc::now();

    for i in 0..60 {
        announcements
            .create(
                Announcement {
                    title: format!("Announcement {}", i),
                    body: "body".to_string(),
                    published_at: None,
                    author: None,
                },
                now,
            )
            .await?;
    }
    for i in 0..120 {
        events
            .create(Event {
                title: format!("Event {}", i),
                description: None,
                event_date: now.date_naive(),
                location: None,
            })
            .await?;
    }

    let (_, listed) = send(&app, Method::GET, "/api/announcements", None).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(50));

    let (_, listed) = send(&app, Method::GET, "/api/events", None).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(100));
    Ok(())
}

#[tokio::test]
async fn empty_collections_list_as_empty_arrays() -> anyhow::Result<()> {
    let (app, _) = memory_app();

    let (status, listed) = send(&app, Method::GET, "/api/events", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
    Ok(())
}

#[tokio::test]
async fn diagnostic_with_working_store() -> anyhow::Result<()> {
    let (app, _) = memory_app();
    send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({ "title": "Fall Fair", "event_date": "2025-10-03" })),
    )
    .await?;

    let (status, body) = send(&app, Method::GET, "/test", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["database_url"], env_flag("DATABASE_URL"));
    assert_eq!(body["database_name"], env_flag("DATABASE_NAME"));
    assert_eq!(body["connection_status"], "Connected");
    assert_eq!(body["collections"], json!(["event"]));
    Ok(())
}

#[tokio::test]
async fn diagnostic_without_store_degrades() -> anyhow::Result<()> {
    let app = app_with(None);

    let (status, body) = send(&app, Method::GET, "/test", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "❌ Not Available");
    assert_eq!(body["database_url"], env_flag("DATABASE_URL"));
    assert_eq!(body["connection_status"], "Not Connected");
    assert_eq!(body["collections"], json!([]));
    Ok(())
}

#[tokio::test]
async fn diagnostic_with_failing_store_reports_truncated_error() -> anyhow::Result<()> {
    let app = app_with(Some(Arc::new(FailingStore)));

    let (status, body) = send(&app, Method::GET, "/test", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connection_status"], "Not Connected");

    let database = body["database"].as_str().unwrap_or_default();
    let detail = database
        .strip_prefix("⚠️ Connected but Error: ")
        .expect("error prefix");
    assert!(detail.starts_with("Server selection timeout: No available servers"));
    assert_eq!(detail.chars().count(), 80);
    Ok(())
}

#[tokio::test]
async fn store_failure_on_list_is_opaque_server_error() -> anyhow::Result<()> {
    let app = app_with(Some(Arc::new(FailingStore)));

    let (status, body) = send(&app, Method::GET, "/api/announcements", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Database error occurred" }));
    Ok(())
}

#[tokio::test]
async fn writes_without_store_are_unavailable() -> anyhow::Result<()> {
    let app = app_with(None);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({ "title": "Fall Fair", "event_date": "2025-10-03" })),
    )
    .await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn cors_allows_any_origin_with_credentials() -> anyhow::Result<()> {
    let (app, _) = memory_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header(header::ORIGIN, "https://pacificchristian.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())?;

    let response = app.oneshot(request).await?;
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
        Some("https://pacificchristian.example")
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).and_then(|v| v.to_str().ok()),
        Some("true")
    );
    Ok(())
}
