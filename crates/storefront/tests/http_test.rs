#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::http::header;
use common::{ProductSeed, TestApp, body_json, extract_cookies};
use serde_json::{Value, json};

fn new_product() -> Value {
    json!({
        "name": "Noise Cancelling Headphones",
        "description": "Over-ear, 30h battery",
        "price": 249.5,
        "image": "/images/headphones.jpg",
        "category": "audio",
        "tags": ["featured"],
        "brand": "Acme",
        "stock": "in stock",
        "countInStock": 7,
        "color": "black",
        "warranty": "2 years"
    })
}

fn order_body(product_id: &str) -> Value {
    json!({
        "orderItems": [
            { "_id": product_id, "name": "Lamp", "qty": 2, "image": "/l.jpg", "price": 20.0 }
        ],
        "shippingAddress": {
            "address": "1 Main St",
            "city": "Springfield",
            "postalCode": "12345",
            "country": "US"
        },
        "paymentMethod": "PayPal",
        "itemsPrice": 40.0,
        "taxPrice": 6.0,
        "shippingPrice": 0.0,
        "totalPrice": 46.0
    })
}

#[tokio::test]
async fn unknown_route_reports_path() {
    let app = TestApp::new(vec![]);

    let response = app.get("/api/nowhere?x=1").await;

    assert_eq!(response.status(), 404);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "/api/nowhere?x=1 - Doesn't Exist");
}

#[tokio::test]
async fn metrics_are_exposed() {
    let app = TestApp::new(vec![ProductSeed::new("Lamp").build()]);
    app.get("/api/products").await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), 200);

    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("product_query_service_request_counter"));
    assert!(text.contains("process_start_time_seconds"));
}

#[tokio::test]
async fn create_update_and_delete_a_product() {
    let app = TestApp::new(vec![]);

    let response = app.send_json("POST", "/api/products", &new_product(), None).await;
    assert_eq!(response.status(), 201);
    let created = body_json(response).await;
    assert_eq!(created["viewCount"], 0);
    assert_eq!(created["countInStock"], 7);
    let id = created["_id"].as_str().unwrap().to_string();
    let uri = format!("/api/products/{id}");

    let response = app
        .send_json("PUT", &uri, &json!({ "price": 199.0, "isRecommended": true }), None)
        .await;
    assert_eq!(response.status(), 200);
    let updated = body_json(response).await;
    assert_eq!(updated["price"], 199.0);
    assert_eq!(updated["isRecommended"], true);
    assert_eq!(updated["name"], "Noise Cancelling Headphones");

    let response = app.delete(&uri).await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await["message"], "Product deleted");

    for _ in 0..2 {
        let response = app.delete(&uri).await;
        assert_eq!(response.status(), 404);
        assert_eq!(body_json(response).await["message"], "Product not found");
    }
}

#[tokio::test]
async fn deleting_an_unknown_product_never_succeeds() {
    let app = TestApp::new(vec![]);
    let uri = "/api/products/0b9d4a52-6c1d-4a43-9e0f-3f3b1c7d2e11";

    for _ in 0..2 {
        assert_eq!(app.delete(uri).await.status(), 404);
    }
    assert_eq!(app.delete("/api/products/42").await.status(), 400);
}

#[tokio::test]
async fn create_product_requires_core_fields() {
    let app = TestApp::new(vec![]);

    for field in ["name", "description", "image", "category", "price"] {
        let mut body = new_product();
        body.as_object_mut().unwrap().remove(field);

        let response = app.send_json("POST", "/api/products", &body, None).await;

        assert_eq!(response.status(), 400, "without {field}");
        assert_eq!(
            body_json(response).await["message"],
            "All fields are required"
        );
    }
    assert_eq!(app.products.calls(), 0);
}

#[tokio::test]
async fn create_product_reports_missing_model_field() {
    let app = TestApp::new(vec![]);
    let mut body = new_product();
    body.as_object_mut().unwrap().remove("brand");

    let response = app.send_json("POST", "/api/products", &body, None).await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(response).await["message"], "Please add a brand");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new(vec![]);

    let response = app
        .request(
            axum::http::Request::post("/api/products")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(response).await["status"], "error");
}

#[tokio::test]
async fn empty_update_returns_stored_product() {
    let product = ProductSeed::new("Desk").price(120.0).build();
    let app = TestApp::new(vec![product.clone()]);

    let response = app
        .send_json("PUT", &format!("/api/products/{}", product.id), &json!({}), None)
        .await;

    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["price"], 120.0);
    assert_eq!(body["viewCount"], 0);
}

#[tokio::test]
async fn blank_update_does_not_touch_the_product() {
    let product = ProductSeed::new("Desk").build();
    let app = TestApp::new(vec![product.clone()]);

    let response = app
        .send_json(
            "PUT",
            &format!("/api/products/{}", product.id),
            &json!({ "name": "   " }),
            None,
        )
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(response).await["message"], "Please add a name");
    assert_eq!(app.products.get(product.id).await.unwrap().name, "Desk");
}

#[tokio::test]
async fn register_sets_cookie_and_hides_password() {
    let app = TestApp::new(vec![]);

    let response = app
        .send_json(
            "POST",
            "/api/users",
            &json!({ "name": "Jane", "email": "Jane@Example.com", "password": "secret1" }),
            None,
        )
        .await;

    assert_eq!(response.status(), 201);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("jwt="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    let body = body_json(response).await;
    assert_eq!(body["message"], "User created");
    assert_eq!(body["user"]["email"], "jane@example.com");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn register_rejects_bad_input_and_duplicates() {
    let app = TestApp::new(vec![]);

    let cases = [
        (json!({ "email": "a@b.co", "password": "secret1" }), "Fill the required fields"),
        (json!({ "name": "A", "email": "a@b.co", "password": "" }), "Fill the required fields"),
        (
            json!({ "name": "A", "email": "a@b.co", "password": "abc" }),
            "Password must be at least 6 characters",
        ),
        (
            json!({ "name": "A", "email": "not-an-email", "password": "secret1" }),
            "Please provide a valid email",
        ),
    ];
    for (body, message) in cases {
        let response = app.send_json("POST", "/api/users", &body, None).await;
        assert_eq!(response.status(), 400, "{body}");
        assert_eq!(body_json(response).await["message"], message);
    }

    app.register("A", "a@b.co", "secret1").await;
    let response = app
        .send_json(
            "POST",
            "/api/users",
            &json!({ "name": "B", "email": "A@B.co", "password": "secret2" }),
            None,
        )
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(body_json(response).await["message"], "User already exists");
}

#[tokio::test]
async fn login_checks_credentials() {
    let app = TestApp::new(vec![]);
    app.register("Sam", "sam@example.com", "hunter22").await;

    let response = app
        .send_json(
            "POST",
            "/api/users/auth",
            &json!({ "email": "sam@example.com", "password": "wrong-one" }),
            None,
        )
        .await;
    assert_eq!(response.status(), 401);
    assert_eq!(body_json(response).await["message"], "Invalid credentials");

    let response = app
        .send_json(
            "POST",
            "/api/users/auth",
            &json!({ "email": "nobody@example.com", "password": "hunter22" }),
            None,
        )
        .await;
    assert_eq!(response.status(), 401);

    let response = app
        .send_json("POST", "/api/users/auth", &json!({ "email": "sam@example.com" }), None)
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        body_json(response).await["message"],
        "Email and Password are required"
    );

    let response = app
        .send_json(
            "POST",
            "/api/users/auth",
            &json!({ "email": "sam@example.com", "password": "hunter22" }),
            None,
        )
        .await;
    assert_eq!(response.status(), 200);
    assert!(!extract_cookies(&response).is_empty());
    assert_eq!(body_json(response).await["message"], "Login successful");
}

#[tokio::test]
async fn profile_requires_a_valid_token() {
    let app = TestApp::new(vec![]);

    let response = app.get("/api/users/profile").await;
    assert_eq!(response.status(), 401);
    assert_eq!(
        body_json(response).await["message"],
        "Not authorized, no token"
    );

    let response = app.get_with_cookies("/api/users/profile", "jwt=garbage").await;
    assert_eq!(response.status(), 401);
    assert_eq!(
        body_json(response).await["message"],
        "Not authorized, token failed"
    );
}

#[tokio::test]
async fn profile_round_trip_and_bearer_header() {
    let app = TestApp::new(vec![]);
    let cookies = app.register("Kim", "kim@example.com", "password1").await;

    let response = app.get_with_cookies("/api/users/profile", &cookies).await;
    assert_eq!(response.status(), 200);
    let profile = body_json(response).await;
    assert_eq!(profile["name"], "Kim");
    assert_eq!(profile["phone"], "");

    let response = app
        .send_json(
            "PUT",
            "/api/users/profile",
            &json!({ "phone": "555-0100", "address": "2 Side St" }),
            Some(&cookies),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User updated");
    assert_eq!(body["user"]["phone"], "555-0100");
    assert_eq!(body["user"]["name"], "Kim");

    let token = cookies.trim_start_matches("jwt=");
    let response = app
        .request(
            axum::http::Request::get("/api/users/profile")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await["address"], "2 Side St");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = TestApp::new(vec![]);
    let cookies = app.register("Ada", "ada@example.com", "secret55").await;

    let response = app
        .send_json("POST", "/api/users/logout", &json!({}), Some(&cookies))
        .await;

    assert_eq!(response.status(), 200);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("jwt="));
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await["message"], "User logged out");
}

#[tokio::test]
async fn orders_belong_to_their_owner() {
    let app = TestApp::new(vec![]);
    let alice = app.register("Alice", "alice@example.com", "secret11").await;
    let bob = app.register("Bob", "bob@example.com", "secret22").await;
    let product_id = "5c2f7f0e-7d8e-4b5e-9c36-2b1d9f7a1c01";

    let response = app
        .send_json("POST", "/api/orders", &order_body(product_id), Some(&alice))
        .await;
    assert_eq!(response.status(), 201);
    let order = body_json(response).await;
    assert_eq!(order["orderItems"][0]["product"], product_id);
    assert_eq!(order["shippingAddress"]["postalCode"], "12345");
    assert_eq!(order["isPaid"], false);
    let order_uri = format!("/api/orders/{}", order["_id"].as_str().unwrap());

    let response = app.get_with_cookies(&order_uri, &alice).await;
    assert_eq!(response.status(), 200);
    let fetched = body_json(response).await;
    assert_eq!(fetched["user"]["name"], "Alice");
    assert_eq!(fetched["user"]["email"], "alice@example.com");

    let response = app.get_with_cookies(&order_uri, &bob).await;
    assert_eq!(response.status(), 404);
    assert_eq!(body_json(response).await["message"], "Order not found");

    let response = app.get_with_cookies("/api/orders/xyz", &alice).await;
    assert_eq!(response.status(), 400);
    assert_eq!(body_json(response).await["message"], "Invalid order ID");

    assert_eq!(app.get(&order_uri).await.status(), 401);
}

#[tokio::test]
async fn my_orders_are_newest_first() {
    let app = TestApp::new(vec![]);
    let cookies = app.register("Lee", "lee@example.com", "secret33").await;
    let product_id = "5c2f7f0e-7d8e-4b5e-9c36-2b1d9f7a1c02";

    let mut created = Vec::new();
    for _ in 0..3 {
        let response = app
            .send_json("POST", "/api/orders", &order_body(product_id), Some(&cookies))
            .await;
        created.push(body_json(response).await["_id"].clone());
    }

    let response = app.get_with_cookies("/api/orders", &cookies).await;
    assert_eq!(response.status(), 200);
    let listed: Vec<Value> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["_id"].clone())
        .collect();

    created.reverse();
    assert_eq!(listed, created);
}

#[tokio::test]
async fn order_without_items_is_rejected() {
    let app = TestApp::new(vec![]);
    let cookies = app.register("Max", "max@example.com", "secret44").await;

    for body in [json!({ "orderItems": [] }), json!({ "paymentMethod": "Card" })] {
        let response = app
            .send_json("POST", "/api/orders", &body, Some(&cookies))
            .await;
        assert_eq!(response.status(), 400);
        assert_eq!(body_json(response).await["message"], "No order items");
    }
}
