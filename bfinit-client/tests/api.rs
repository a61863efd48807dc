//! BfinitClient against a local mock API server

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use bfinit_client::api::CategoryImage;
use bfinit_client::models::{CategoryDraft, ManualStatus, Product, ProductDraft, ProductUpdate};
use bfinit_client::{
    BfinitClient, ClientConfig, ClientError, ErrorCategory, OrderApi, Session, SessionStorage,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tempfile::TempDir;

const TOKEN: &str = "tok-123";

#[derive(Default)]
struct Mock {
    status_bodies: Mutex<Vec<(String, Value)>>,
    product_creates: AtomicUsize,
    legacy_auth: Mutex<Option<String>>,
    approved_payments: Mutex<Vec<String>>,
    product_updates: Mutex<Vec<(String, Value)>>,
    category_forms: Mutex<Vec<HashMap<String, String>>>,
}

type Shared = Arc<Mock>;

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn authorized(headers: &HeaderMap) -> bool {
    bearer(headers).as_deref() == Some("Bearer tok-123")
}

async fn online_orders(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid token" })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": [
                { "id": 7, "_id": "665f", "status": "active", "currency": "EUR", "currency_rate": 2,
                  "invoices": [{ "paid": true, "payment_type": "stripe", "totalAmount": 15.5 }] },
                { "id": 8, "status": "pending", "products": [{ "price": 3 }, { "price": 4 }] }
            ]
        })),
    )
}

async fn manual_orders() -> Json<Value> {
    Json(json!({ "success": false, "message": "Failed to fetch orders" }))
}

async fn manual_status(
    State(mock): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let id = query.get("id").cloned().unwrap_or_default();
    mock.status_bodies.lock().unwrap().push((id, body));
    Json(json!({ "success": true, "message": "Order status updated" }))
}

async fn approve(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "order": { "id": id, "status": "completed" } }))
}

async fn confirm_payment(State(mock): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    if id == "missing" {
        return Json(json!({ "success": false, "message": "Payment not found" }));
    }
    mock.approved_payments.lock().unwrap().push(id);
    Json(json!({ "success": true }))
}

async fn bitss_payments() -> impl IntoResponse {
    (StatusCode::FORBIDDEN, Json(json!({ "error": "Admins only" })))
}

async fn legacy_payments(State(mock): State<Shared>, headers: HeaderMap) -> Json<Value> {
    *mock.legacy_auth.lock().unwrap() = bearer(&headers);
    Json(json!({ "success": true, "data": [{ "_id": "lp1", "price": "10.00", "status": true }] }))
}

async fn create_product(State(mock): State<Shared>) -> Json<Value> {
    mock.product_creates.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "success": true }))
}

async fn update_product(
    State(mock): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.product_updates.lock().unwrap().push((id, body));
    Json(json!({ "success": true, "message": "Product updated" }))
}

async fn categories(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid token" })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": [{ "_id": "c1", "name": "Security", "status": "active" }]
        })),
    )
}

async fn category_products() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [{
            "_id": "c1",
            "name": "Security",
            "products": [{ "_id": "p1", "name": "Bitss WAP", "price": 25 }]
        }]
    }))
}

/// Answers in whichever shape the category name asks for
async fn create_category(State(mock): State<Shared>, mut multipart: Multipart) -> Json<Value> {
    let mut form = HashMap::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let mime = field.content_type().map(str::to_string);
        let value = match file_name {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap();
                format!("{}|{}|{}", file_name, mime.unwrap_or_default(), bytes.len())
            }
            None => field.text().await.unwrap(),
        };
        form.insert(name, value);
    }
    let name = form.get("name").cloned().unwrap_or_default();
    mock.category_forms.lock().unwrap().push(form);

    match name.as_str() {
        "Existing" => Json(json!({ "success": false, "message": "Category already exists" })),
        "Legacy" => Json(json!({ "status": "success" })),
        _ => Json(json!({ "success": true })),
    }
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    if body["password"] == "secret" {
        Json(json!({ "status": "success", "data": { "token": TOKEN } }))
    } else {
        Json(json!({ "status": "error", "message": "Invalid credentials" }))
    }
}

async fn spawn_mock() -> (String, Shared) {
    let mock: Shared = Arc::default();
    let app = Router::new()
        .route("/orders/order/index", get(online_orders))
        .route("/orders/order/retail/package/index", get(manual_orders))
        .route("/orders/order/retail/package/status/", post(manual_status))
        .route("/orders/order/confirm/paid/{id}", get(approve))
        .route("/payments/bitss/payment/approved/{id}", get(confirm_payment))
        .route("/payments/bitss/all", get(bitss_payments))
        .route("/payments/all", get(legacy_payments))
        .route("/products/product/update/{id}", put(update_product))
        .route("/products/product/category/index", get(categories))
        .route("/products/product/category-wise/products", get(category_products))
        .route("/products/product/category/create", post(create_category))
        .route("/products/product/create", post(create_product))
        .route("/login", post(login))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), mock)
}

fn config(url: &str) -> ClientConfig {
    ClientConfig::new(url).with_auth_url(url).with_timeout(5)
}

fn signed_in(url: &str) -> BfinitClient {
    BfinitClient::with_session(&config(url), Session::in_memory().with_token(TOKEN)).unwrap()
}

#[tokio::test]
async fn test_online_orders_send_bearer_token() {
    let (url, _mock) = spawn_mock().await;
    let client = signed_in(&url);

    let orders = client.online_orders().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, "7");
    assert_eq!(orders[0].object_id.as_deref(), Some("665f"));
    assert_eq!(orders[0].total(), Decimal::new(31, 0));
    assert_eq!(orders[1].total(), Decimal::new(7, 0));
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (url, _mock) = spawn_mock().await;
    let client = BfinitClient::new(&config(&url)).unwrap();

    let err = client.online_orders().await.unwrap_err();
    assert!(matches!(&err, ClientError::Unauthorized(m) if m == "Invalid token"));
    assert_eq!(err.category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn test_status_codes_keep_their_variant() {
    let (url, _mock) = spawn_mock().await;
    let client = signed_in(&url);

    let err = client.bitss_payments().await.unwrap_err();
    assert!(matches!(&err, ClientError::Forbidden(m) if m == "Admins only"));

    // No details route on the mock: plain 404 with an empty body
    let err = client.order_details("7").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_success_false_is_rejected() {
    let (url, _mock) = spawn_mock().await;
    let client = signed_in(&url);

    let err = client.manual_orders().await.unwrap_err();
    assert!(matches!(&err, ClientError::Rejected(m) if m == "Failed to fetch orders"));
    assert_eq!(err.category(), ErrorCategory::Application);

    let err = client.confirm_payment("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected(m) if m == "Payment not found"));
    client.confirm_payment("p1").await.unwrap();
}

#[tokio::test]
async fn test_manual_status_body_keeps_cancle() {
    let (url, mock) = spawn_mock().await;
    let client = signed_in(&url);

    client
        .update_manual_status("m42", ManualStatus::Cancle)
        .await
        .unwrap();
    let bodies = mock.status_bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].0, "m42");
    assert_eq!(bodies[0].1, json!({ "order_status": "cancle" }));
}

#[tokio::test]
async fn test_approve_accepts_any_object() {
    let (url, _mock) = spawn_mock().await;
    signed_in(&url).approve_order("7").await.unwrap();
}

#[tokio::test]
async fn test_legacy_payments_are_public() {
    let (url, mock) = spawn_mock().await;
    let client = signed_in(&url);

    let payments = client.legacy_payments().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].price, Decimal::new(1000, 2));
    assert!(mock.legacy_auth.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_login_persists_token_and_logout_clears_it() {
    let (url, _mock) = spawn_mock().await;
    let dir = TempDir::new().unwrap();
    let client = BfinitClient::new(&config(&url).with_session_dir(dir.path())).unwrap();

    let err = client.login("admin@bfinit.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(m) if m == "Invalid credentials"));
    assert!(!client.session().is_authenticated());

    client.login("admin@bfinit.com", "secret").await.unwrap();
    assert_eq!(client.session().token().as_deref(), Some(TOKEN));
    assert_eq!(SessionStorage::new(dir.path()).load().as_deref(), Some(TOKEN));

    // A second client over the same directory picks the session up
    let restored = BfinitClient::new(&config(&url).with_session_dir(dir.path())).unwrap();
    assert!(restored.session().is_authenticated());
    restored.online_orders().await.unwrap();

    client.logout();
    assert!(!client.session().is_authenticated());
    assert!(!SessionStorage::new(dir.path()).exists());
}

#[tokio::test]
async fn test_validation_short_circuits() {
    let (url, mock) = spawn_mock().await;
    let client = signed_in(&url);

    let err = client.login(" ", "secret").await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);

    let draft = ProductDraft::new("Office Suite", Decimal::ZERO, "");
    let err = client.create_product(draft).await.unwrap_err();
    assert!(matches!(
        &err,
        ClientError::Validation(m) if m.contains("price") && m.contains("category")
    ));
    assert_eq!(mock.product_creates.load(Ordering::SeqCst), 0);
}

#[test]
fn test_logout_sends_nothing() {
    // Nothing listens on the discard port; logout must not need the network
    let client = BfinitClient::with_session(
        &config("http://127.0.0.1:9"),
        Session::in_memory().with_token(TOKEN),
    )
    .unwrap();
    client.logout();
    assert!(!client.session().is_authenticated());
    assert!(client.session().token().is_none());
}

#[tokio::test]
async fn test_ids_are_sent_verbatim() {
    let (url, mock) = spawn_mock().await;
    let client = signed_in(&url);

    client.confirm_payment("pay/7#x").await.unwrap();
    client
        .update_manual_status("m&42 x", ManualStatus::Processing)
        .await
        .unwrap();

    assert_eq!(*mock.approved_payments.lock().unwrap(), vec!["pay/7#x".to_string()]);
    assert_eq!(mock.status_bodies.lock().unwrap()[0].0, "m&42 x");
}

#[tokio::test]
async fn test_categories_and_catalog() {
    let (url, _mock) = spawn_mock().await;

    // Category index needs the token
    let anonymous = BfinitClient::with_session(&config(&url), Session::in_memory()).unwrap();
    let err = anonymous.categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));

    let client = signed_in(&url);
    let categories = client.categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, "c1");
    assert_eq!(categories[0].status.as_deref(), Some("active"));

    let catalog = anonymous.category_products().await.unwrap();
    assert_eq!(catalog[0].category.name, "Security");
    assert_eq!(catalog[0].products.len(), 1);
    assert_eq!(catalog[0].products[0].price, Decimal::new(25, 0));
}

#[tokio::test]
async fn test_update_product_sends_prefilled_body() {
    let (url, mock) = spawn_mock().await;
    let client = signed_in(&url);

    let product: Product = serde_json::from_value(json!({
        "_id": "p/1",
        "name": "Bitss WAP",
        "price": 25,
        "category": { "_id": "c1", "name": "Security" },
        "product_details": ["Scan", " "],
        "subscription_periods": [{ "duration": 12, "amount": 10 }]
    }))
    .unwrap();
    let mut update = ProductUpdate::from_product(&product);
    update.price = Decimal::new(30, 0);
    client.update_product(&product.id, update).await.unwrap();

    let updates = mock.product_updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    let (id, body) = &updates[0];
    assert_eq!(id, "p/1");
    assert_eq!(body["price"], json!(30.0));
    assert_eq!(body["category"], "c1");
    assert_eq!(body["product_details"], json!(["Scan"]));
    assert_eq!(body["subscription_periods"][0]["duration"], "12");
}

#[tokio::test]
async fn test_create_category_sends_multipart_form() {
    let (url, mock) = spawn_mock().await;
    let client = signed_in(&url);

    let image = CategoryImage {
        file_name: "shield.png".into(),
        mime: "image/png".into(),
        bytes: vec![1, 2, 3],
    };
    client
        .create_category(CategoryDraft::new("Security", "Antivirus and more"), Some(image))
        .await
        .unwrap();

    let forms = mock.category_forms.lock().unwrap();
    let form = &forms[0];
    assert_eq!(form["name"], "Security");
    assert_eq!(form["sort_description"], "Antivirus and more");
    assert_eq!(form["status"], "active");
    assert_eq!(form["image"], "shield.png|image/png|3");
}

#[tokio::test]
async fn test_create_category_response_shapes() {
    let (url, mock) = spawn_mock().await;
    let client = signed_in(&url);

    client
        .create_category(CategoryDraft::new("Legacy", ""), None)
        .await
        .unwrap();

    let err = client
        .create_category(CategoryDraft::new("Existing", ""), None)
        .await
        .unwrap_err();
    assert!(matches!(&err, ClientError::Rejected(m) if m == "Category already exists"));

    let err = client
        .create_category(CategoryDraft::new("  ", ""), None)
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);

    let forms = mock.category_forms.lock().unwrap();
    assert_eq!(forms.len(), 2);
    assert!(!forms[0].contains_key("image"));
}
