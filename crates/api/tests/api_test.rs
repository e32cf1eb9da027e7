//! End-to-end tests of the HTTP surface against an in-memory database.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use spendwatch_api::{AppState, create_router};
use spendwatch_db::migration::{Migrator, MigratorTrait};
use spendwatch_db::{CategoryRepository, repositories::CreateCategoryInput};
use spendwatch_shared::auth::ADMIN_ROLE;
use spendwatch_shared::types::{CategoryId, UserId};
use spendwatch_shared::{JwtConfig, JwtService};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    db: DatabaseConnection,
    jwt: JwtService,
    food: CategoryId,
}

impl TestApp {
    async fn new() -> Self {
        let db = setup_db().await;
        let food = CategoryRepository::new(db.clone())
            .create(CreateCategoryInput {
                name: "Food".to_string(),
                ..Default::default()
            })
            .await
            .expect("Failed to create category");

        let jwt = JwtService::new(JwtConfig {
            secret: "api-test-secret".to_string(),
            access_token_expires_minutes: 15,
        });
        let state = AppState {
            db: Arc::new(db.clone()),
            jwt_service: Arc::new(jwt.clone()),
            alert_timeout: Duration::from_secs(5),
        };

        Self {
            router: create_router(state),
            db,
            jwt,
            food: CategoryId::new(food.id),
        }
    }

    fn token(&self, user: i64) -> String {
        self.jwt
            .generate_access_token(UserId::new(user), "User")
            .expect("Failed to sign token")
    }

    fn admin_token(&self, user: i64) -> String {
        self.jwt
            .generate_access_token(UserId::new(user), ADMIN_ROLE)
            .expect("Failed to sign token")
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };
        (status, value)
    }

    async fn create_food_budget(&self, token: &str, amount: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/v1/budgets",
            Some(token),
            Some(json!({
                "categoryId": self.food,
                "amount": amount,
                "monthYear": "2024-06"
            })),
        )
        .await
    }

    async fn record_food_expense(&self, token: &str, amount: &str, date: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/v1/expenses",
            Some(token),
            Some(json!({
                "categoryId": self.food,
                "amount": amount,
                "expenseDate": date,
                "paymentMethod": "UPI"
            })),
        )
        .await
    }
}

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimal serialized as string")
        .parse()
        .expect("valid decimal")
}

async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = TestApp::new().await;
    app.db.clone().close().await.expect("close pool");

    let (status, body) = app.send(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_categories_are_system_plus_own() {
    let app = TestApp::new().await;
    let categories = CategoryRepository::new(app.db.clone());
    for (name, owner) in [("Books", 1), ("Yoga", 2)] {
        categories
            .create(CreateCategoryInput {
                name: name.to_string(),
                user_id: Some(UserId::new(owner)),
                ..Default::default()
            })
            .await
            .expect("Failed to create category");
    }

    let (status, body) = app
        .send(Method::GET, "/api/v1/categories", Some(&app.token(1)), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Books", "Food"]);
    assert_eq!(body[0]["isSystem"], false);
    assert_eq!(body[1]["isSystem"], true);
    assert_eq!(body[1]["id"], json!(app.food));

    let (status, _) = app.send(Method::GET, "/api/v1/categories", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/v1/budgets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");

    let (status, body) = app
        .send(Method::GET, "/api/v1/notifications", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_expense_crossing_threshold_creates_alert() {
    let app = TestApp::new().await;
    let token = app.token(1);

    let (status, body) = app.create_food_budget(&token, "1000.00").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["budget"]["monthYear"], "2024-06");
    assert_eq!(body["alerts"][0]["outcome"], "belowThreshold");

    let (status, body) = app.record_food_expense(&token, "850.00", "2024-06-10").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["expense"]["paymentMethod"], "UPI");
    assert_eq!(body["alerts"][0]["outcome"], "notified");
    assert_eq!(body["alerts"][0]["level"], "Info");
    // No overall budget for the month.
    assert_eq!(body["alerts"][1]["outcome"], "noBudget");

    let (status, body) = app
        .send(Method::GET, "/api/v1/notifications", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let notifications = body.as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    let titles: Vec<&str> = notifications
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"🔵 Budget Alert: Food"));
    assert!(titles.contains(&"🟢 Expense Added Successfully"));

    let (_, body) = app
        .send(Method::GET, "/api/v1/notifications/unread-count", Some(&token), None)
        .await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_budget_status_and_listing() {
    let app = TestApp::new().await;
    let token = app.token(1);

    app.create_food_budget(&token, "1000.00").await;
    app.record_food_expense(&token, "950.00", "2024-06-15").await;

    let uri = format!(
        "/api/v1/budgets/status?monthYear=2024-06&categoryId={}",
        app.food
    );
    let (status, body) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categoryName"], "Food");
    assert_eq!(body["status"], "Critical");
    assert_eq!(body["alertLevel"], "Warning");
    assert_eq!(body["shouldAlert"], true);

    let (status, body) = app
        .send(Method::GET, "/api/v1/budgets/status?monthYear=2024-06", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, body) = app
        .send(Method::GET, "/api/v1/budgets?monthYear=2024-06", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let uri = format!(
        "/api/v1/budgets/vs-actual?monthYear=2024-06&categoryId={}",
        app.food
    );
    let (status, body) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expenseCount"], 1);
    assert_eq!(body["isOverBudget"], false);

    // No overall budget was set for the month.
    let (status, body) = app
        .send(Method::GET, "/api/v1/budgets/vs-actual?monthYear=2024-06", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (_, body) = app
        .send(Method::GET, "/api/v1/budgets/all", Some(&token), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_budget_is_conflict() {
    let app = TestApp::new().await;
    let token = app.token(1);

    let (status, _) = app.create_food_budget(&token, "1000.00").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.create_food_budget(&token, "500.00").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    // Another user may hold the same key.
    let (status, _) = app.create_food_budget(&app.token(2), "500.00").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token(1);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/budgets",
            Some(&token),
            Some(json!({ "amount": "100.00", "monthYear": "2024-13" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, body) = app.create_food_budget(&token, "0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, body) = app.create_food_budget(&token, "0.004").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = app.record_food_expense(&token, "9.999", "2024-06-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::GET, "/api/v1/expenses/summary?monthYear=june", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_budget_access_rules() {
    let app = TestApp::new().await;
    let owner = app.token(1);

    let (_, body) = app.create_food_budget(&owner, "1000.00").await;
    let budget_id = body["budget"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/budgets/{budget_id}");

    let (status, body) = app.send(Method::GET, &uri, Some(&app.token(2)), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, body) = app.send(Method::GET, &uri, Some(&app.admin_token(99)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["budgetId"], budget_id);

    let (status, _) = app
        .send(Method::GET, "/api/v1/budgets/424242", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(&app.admin_token(99)),
            Some(json!({ "amount": "2000.00" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alerts"][0]["outcome"], "belowThreshold");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&app.token(2)), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lowering_budget_triggers_alert() {
    let app = TestApp::new().await;
    let token = app.token(1);

    let (_, body) = app.create_food_budget(&token, "2000.00").await;
    let budget_id = body["budget"]["id"].as_i64().unwrap();
    app.record_food_expense(&token, "1000.00", "2024-06-03").await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/v1/budgets/{budget_id}"),
            Some(&token),
            Some(json!({ "amount": "900.00" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alerts"][0]["outcome"], "notified");
    assert_eq!(body["alerts"][0]["level"], "Alert");
}

#[tokio::test]
async fn test_expense_crud_and_summary() {
    let app = TestApp::new().await;
    let token = app.token(1);

    let (_, body) = app.record_food_expense(&token, "120.50", "2024-06-03").await;
    let expense_id = body["expense"]["id"].as_i64().unwrap();
    app.record_food_expense(&token, "79.50", "2024-06-20").await;
    app.record_food_expense(&token, "500.00", "2024-07-01").await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/expenses?monthYear=2024-06", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = app
        .send(Method::GET, "/api/v1/expenses/summary?monthYear=2024-06", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthYear"], "2024-06");
    assert_eq!(decimal(&body["total"]), dec!(200));
    assert_eq!(body["expenseCount"], 2);
    assert_eq!(body["byCategory"][0]["categoryName"], "Food");

    let uri = format!("/api/v1/expenses/{expense_id}");
    let (status, _) = app.send(Method::GET, &uri, Some(&app.token(2)), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({
                "categoryId": app.food,
                "amount": "20.50",
                "expenseDate": "2024-06-03"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["expense"]["amount"]), dec!(20.5));

    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notifications_are_owner_only() {
    let app = TestApp::new().await;
    let owner = app.token(1);

    app.record_food_expense(&owner, "10.00", "2024-06-01").await;
    let (_, body) = app
        .send(Method::GET, "/api/v1/notifications", Some(&owner), None)
        .await;
    let id = body[0]["id"].as_i64().unwrap();
    let read_uri = format!("/api/v1/notifications/{id}/read");

    let (status, _) = app
        .send(Method::PUT, &read_uri, Some(&app.admin_token(99)), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::PUT, &read_uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isRead"], true);

    let (_, body) = app
        .send(Method::GET, "/api/v1/notifications/unread-count", Some(&owner), None)
        .await;
    assert_eq!(body["count"], 0);

    let delete_uri = format!("/api/v1/notifications/{id}");
    let (status, _) = app.send(Method::DELETE, &delete_uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send(Method::DELETE, &delete_uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manual_alert_and_monthly_summary() {
    let app = TestApp::new().await;
    let token = app.token(1);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/notifications/budget-alert",
            Some(&token),
            Some(json!({ "monthYear": "2024-06" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "noBudget");

    app.send(
        Method::POST,
        "/api/v1/budgets",
        Some(&token),
        Some(json!({ "amount": "100.00", "monthYear": "2024-06" })),
    )
    .await;
    app.record_food_expense(&token, "150.00", "2024-06-12").await;

    // Re-checking at the same level stores another alert.
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/notifications/budget-alert",
            Some(&token),
            Some(json!({ "monthYear": "2024-06" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "notified");
    assert_eq!(body["level"], "Alert");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/notifications/monthly-summary",
            Some(&token),
            Some(json!({ "monthYear": "2024-06" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "Info");
    assert_eq!(body["title"], "📊 Monthly Summary - 2024-06");
}
