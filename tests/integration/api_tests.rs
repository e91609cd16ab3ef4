//! API integration tests
//!
//! Require a running server and database.

use chrono::{Duration, Local, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};

use maintenance_server::models::UserClaims;

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Mint a token with the secret the server was started with
fn auth_token(login: &str, is_admin: bool) -> String {
    let secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    let now = Utc::now().timestamp();
    UserClaims {
        sub: login.to_string(),
        is_admin,
        exp: now + 3600,
        iat: now,
    }
    .create_token(&secret)
    .expect("Failed to create token")
}

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Short suffix that fits maintenance type codes
fn unique_suffix() -> String {
    let nanos = Utc::now().timestamp_subsec_nanos() % 10_000_000;
    format!("{}{}", nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

async fn post_json(client: &Client, token: &str, path: &str, body: Value) -> (u16, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(client: &Client, token: &str, path: &str) -> (u16, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

/// Equipment type with an inspection standard every `frequency` months.
/// Returns (equipment_type_id, maintenance_type_id, standard_id).
async fn setup_catalog(client: &Client, admin: &str, code: &str, frequency: i32) -> (i64, i64, i64) {
    let suffix = unique_suffix();

    let (status, equipment_type) = post_json(
        client,
        admin,
        "/equipment-types",
        json!({ "name": format!("Pumps {}", suffix) }),
    )
    .await;
    assert_eq!(status, 201);

    let (status, maintenance_type) = post_json(
        client,
        admin,
        "/maintenance-types",
        json!({ "name": format!("Check {}", suffix), "code": format!("{}-{}", code, suffix) }),
    )
    .await;
    assert_eq!(status, 201);

    let equipment_type_id = equipment_type["id"].as_i64().expect("type id");
    let maintenance_type_id = maintenance_type["id"].as_i64().expect("maintenance type id");

    let (status, standard) = post_json(
        client,
        admin,
        "/standards",
        json!({
            "equipment_type_id": equipment_type_id,
            "maintenance_type_id": maintenance_type_id,
            "frequency_months": frequency
        }),
    )
    .await;
    assert_eq!(status, 201);
    let standard_id = standard["id"].as_i64().expect("standard id");

    (equipment_type_id, maintenance_type_id, standard_id)
}

/// Equipment of the given type installed on 2024-01-01; returns its id
async fn create_equipment(client: &Client, admin: &str, name: &str, equipment_type_id: i64) -> i64 {
    let (status, created) = post_json(
        client,
        admin,
        "/equipment",
        json!({
            "name": name,
            "inventory_number": format!("INV-{}", unique_suffix()),
            "equipment_type_id": equipment_type_id,
            "installation_date": "2024-01-01"
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert!(created["plans_generated"].as_u64().unwrap_or(0) > 0);
    created["equipment"]["id"].as_i64().expect("equipment id")
}

async fn delete(client: &Client, token: &str, path: &str) -> u16 {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request")
        .status()
        .as_u16()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_requires_token() {
    let client = Client::new();

    let response = client
        .get(format!("{}/plans", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_reference_data_requires_admin() {
    let client = Client::new();
    let token = auth_token("operator", false);

    let (status, body) = post_json(&client, &token, "/equipment-types", json!({ "name": "Valves" })).await;

    assert_eq!(status, 403);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_generates_plans() {
    let client = Client::new();
    let admin = auth_token("admin", true);
    let (equipment_type_id, _, _) = setup_catalog(&client, &admin, "EQ", 6).await;

    let installed = Local::now().date_naive() - Duration::days(400);
    let (status, body) = post_json(
        &client,
        &admin,
        "/equipment",
        json!({
            "name": "Feed pump",
            "inventory_number": format!("INV-{}", unique_suffix()),
            "equipment_type_id": equipment_type_id,
            "installation_date": installed.to_string()
        }),
    )
    .await;

    assert_eq!(status, 201);
    // 36 months / 6 = 6 periods
    assert_eq!(body["plans_generated"], 6);

    let equipment_id = body["equipment"]["id"].as_i64().expect("equipment id");
    let (status, plans) = get_json(&client, &admin, &format!("/plans?equipment_id={}", equipment_id)).await;
    assert_eq!(status, 200);
    let plans = plans.as_array().expect("plan list");
    assert_eq!(plans.len(), 6);
    assert_eq!(plans[0]["planned_date"], (installed + Duration::days(180)).to_string());
    assert_eq!(plans[0]["status"], "planned");
    assert_eq!(plans[0]["created_by"], "admin");

    // Same horizon again creates nothing
    let (status, body) = post_json(
        &client,
        &admin,
        &format!("/equipment/{}/generate-plans", equipment_id),
        json!({}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["created"], 0);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_inventory_number_rejected() {
    let client = Client::new();
    let admin = auth_token("admin", true);
    let (equipment_type_id, _, _) = setup_catalog(&client, &admin, "DUP", 12).await;
    let inventory_number = format!("INV-{}", unique_suffix());

    let body = json!({
        "name": "Compressor",
        "inventory_number": inventory_number,
        "equipment_type_id": equipment_type_id,
        "installation_date": "2023-01-01"
    });
    let (status, _) = post_json(&client, &admin, "/equipment", body.clone()).await;
    assert_eq!(status, 201);

    let (status, body) = post_json(&client, &admin, "/equipment", body).await;
    assert_eq!(status, 400);
    assert!(body["fields"]["inventory_number"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_edit_to_completed_sets_actual_date() {
    let client = Client::new();
    let admin = auth_token("admin", true);
    let operator = auth_token("operator", false);
    let (equipment_type_id, _, _) = setup_catalog(&client, &admin, "ED", 12).await;

    let (_, created) = post_json(
        &client,
        &admin,
        "/equipment",
        json!({
            "name": "Boiler",
            "inventory_number": format!("INV-{}", unique_suffix()),
            "equipment_type_id": equipment_type_id,
            "installation_date": "2024-01-01"
        }),
    )
    .await;
    let equipment_id = created["equipment"]["id"].as_i64().expect("equipment id");

    let (_, plans) = get_json(&client, &operator, &format!("/plans?equipment_id={}", equipment_id)).await;
    let plan_id = plans[0]["id"].as_i64().expect("plan id");

    let response = client
        .put(format!("{}/plans/{}", BASE_URL, plan_id))
        .bearer_auth(&operator)
        .json(&json!({ "status": "completed", "notes": "Replaced seal" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let plan: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(plan["status"], "completed");
    assert_eq!(plan["actual_date"], Local::now().date_naive().to_string());
    assert_eq!(plan["notes"], "Replaced seal");
    assert_eq!(plan["updated_by"], "operator");

    let (status, profile) = get_json(&client, &operator, "/profile").await;
    assert_eq!(status, 200);
    assert!(profile["plans_updated"].as_i64().unwrap_or(0) >= 1);
}

#[tokio::test]
#[ignore]
async fn test_calendar_events() {
    let client = Client::new();
    let admin = auth_token("admin", true);
    let (equipment_type_id, _, _) = setup_catalog(&client, &admin, "CAL", 12).await;

    let (_, created) = post_json(
        &client,
        &admin,
        "/equipment",
        json!({
            "name": "Crane",
            "inventory_number": format!("INV-{}", unique_suffix()),
            "equipment_type_id": equipment_type_id,
            "installation_date": "2024-03-01"
        }),
    )
    .await;
    let equipment_name = created["equipment"]["name"].clone();

    let (status, events) = get_json(&client, &admin, "/calendar").await;
    assert_eq!(status, 200);

    let event = events
        .as_array()
        .expect("event list")
        .iter()
        .find(|e| e["extendedProps"]["inventory_number"] == created["equipment"]["inventory_number"])
        .expect("event for created equipment")
        .clone();

    assert_eq!(event["extendedProps"]["equipment"], equipment_name);
    assert_eq!(event["textColor"], "white");
    // Unknown maintenance type code
    assert_eq!(event["color"], "#6f42c1");
    assert_eq!(event["extendedProps"]["created_by"], "admin");
    assert_eq!(event["extendedProps"]["updated_by"], "Not modified");
}

#[tokio::test]
#[ignore]
async fn test_delete_equipment_type_cascades() {
    let client = Client::new();
    let admin = auth_token("admin", true);
    let (equipment_type_id, _, _) = setup_catalog(&client, &admin, "DEL", 12).await;

    let (_, created) = post_json(
        &client,
        &admin,
        "/equipment",
        json!({
            "name": "Conveyor",
            "inventory_number": format!("INV-{}", unique_suffix()),
            "equipment_type_id": equipment_type_id,
            "installation_date": "2024-01-01"
        }),
    )
    .await;
    let equipment_id = created["equipment"]["id"].as_i64().expect("equipment id");

    let response = client
        .delete(format!("{}/equipment-types/{}", BASE_URL, equipment_type_id))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let (status, _) = get_json(&client, &admin, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(status, 404);

    let (_, plans) = get_json(&client, &admin, &format!("/plans?equipment_id={}", equipment_id)).await;
    assert_eq!(plans.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_delete_equipment_removes_its_plans() {
    let client = Client::new();
    let admin = auth_token("admin", true);
    let (equipment_type_id, _, _) = setup_catalog(&client, &admin, "DEQ", 6).await;
    let equipment_id = create_equipment(&client, &admin, "Press", equipment_type_id).await;

    assert_eq!(delete(&client, &admin, &format!("/equipment/{}", equipment_id)).await, 204);

    let (status, _) = get_json(&client, &admin, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(status, 404);

    let (status, plans) = get_json(&client, &admin, &format!("/plans?equipment_id={}", equipment_id)).await;
    assert_eq!(status, 200);
    assert_eq!(plans.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_delete_maintenance_type_cascades() {
    let client = Client::new();
    let admin = auth_token("admin", true);
    let (equipment_type_id, maintenance_type_id, standard_id) =
        setup_catalog(&client, &admin, "DMT", 6).await;
    let equipment_id = create_equipment(&client, &admin, "Mixer", equipment_type_id).await;

    let path = format!("/maintenance-types/{}", maintenance_type_id);
    assert_eq!(delete(&client, &admin, &path).await, 204);

    let (status, _) = get_json(&client, &admin, &path).await;
    assert_eq!(status, 404);

    let (status, _) = get_json(&client, &admin, &format!("/standards/{}", standard_id)).await;
    assert_eq!(status, 404);

    let (status, plans) = get_json(
        &client,
        &admin,
        &format!("/plans?maintenance_type_id={}", maintenance_type_id),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(plans.as_array().map(Vec::len), Some(0));

    // The equipment itself stays
    let (status, _) = get_json(&client, &admin, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(status, 200);
}
