#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]
//! In-memory stores and a router harness for the integration tests.
//!
//! The stores evaluate `ProductFilter` and `SortStrategy` in memory, so the
//! catalog behaves exactly as it does against Postgres, minus the database.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::{config::{Hashing, JwtConfig}, errors::RepositoryError};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use storefront::{
    abstract_trait::{
        order::repository::OrderRepositoryTrait,
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
        user::repository::UserRepositoryTrait,
    },
    catalog::{PriceBounds, ProductFilter, SortStrategy},
    di::DependenciesInjectDeps,
    domain::requests::{
        order::NewOrder,
        product::{CreateProductRequest, UpdateProductRequest},
        user::{NewUser, UpdateProfileRequest},
    },
    handler::AppRouter,
    middleware::jwt::CookiePolicy,
    model::{
        order::Order,
        product::Product,
        user::User,
    },
    state::AppState,
};
use tokio::sync::RwLock;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct MemoryProducts {
    rows: RwLock<Vec<Product>>,
    calls: AtomicUsize,
}

impl MemoryProducts {
    pub fn with(products: Vec<Product>) -> Self {
        Self {
            rows: RwLock::new(products),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of store calls made so far, reads and writes alike.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn get(&self, id: Uuid) -> Option<Product> {
        self.rows.read().await.iter().find(|p| p.id == id).cloned()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryProducts {
    async fn count(&self, filter: &ProductFilter) -> Result<i64, RepositoryError> {
        self.touch();
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|p| filter.matches(p)).count() as i64)
    }

    async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortStrategy,
        skip: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Product>, RepositoryError> {
        self.touch();
        let rows = self.rows.read().await;
        let mut matching: Vec<Product> = rows.iter().filter(|p| filter.matches(p)).cloned().collect();
        matching.sort_by(|a, b| sort.compare(a, b));

        let skipped = matching.into_iter().skip(skip.max(0) as usize);
        Ok(match limit {
            Some(limit) => skipped.take(limit.max(0) as usize).collect(),
            None => skipped.collect(),
        })
    }

    async fn price_bounds(
        &self,
        filter: &ProductFilter,
    ) -> Result<Option<PriceBounds>, RepositoryError> {
        self.touch();
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|p| filter.matches(p))
            .map(|p| p.price)
            .fold(None, |acc: Option<PriceBounds>, price| {
                Some(match acc {
                    Some(b) => PriceBounds {
                        min: b.min.min(price),
                        max: b.max.max(price),
                    },
                    None => PriceBounds {
                        min: price,
                        max: price,
                    },
                })
            }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        self.touch();
        Ok(self.get(id).await)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryProducts {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        self.touch();
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            description: req.description.trim().to_string(),
            price: req.price,
            image: req.image.trim().to_string(),
            category: req.category.trim().to_string(),
            tags: req.tags.clone(),
            brand: req.brand.trim().to_string(),
            stock: req.stock.trim().to_string(),
            count_in_stock: req.count_in_stock.unwrap_or_default(),
            color: req.color.trim().to_string(),
            warranty: req.warranty.trim().to_string(),
            view_count: 0,
            rating: req.rating.unwrap_or_default(),
            is_recommended: req.is_recommended.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, RepositoryError> {
        self.touch();
        let mut rows = self.rows.write().await;
        let Some(p) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(v) = &req.name {
            p.name = v.clone();
        }
        if let Some(v) = &req.description {
            p.description = v.clone();
        }
        if let Some(v) = req.price {
            p.price = v;
        }
        if let Some(v) = &req.image {
            p.image = v.clone();
        }
        if let Some(v) = &req.category {
            p.category = v.clone();
        }
        if let Some(v) = &req.tags {
            p.tags = v.clone();
        }
        if let Some(v) = &req.brand {
            p.brand = v.clone();
        }
        if let Some(v) = &req.stock {
            p.stock = v.clone();
        }
        if let Some(v) = req.count_in_stock {
            p.count_in_stock = v;
        }
        if let Some(v) = &req.color {
            p.color = v.clone();
        }
        if let Some(v) = &req.warranty {
            p.warranty = v.clone();
        }
        if let Some(v) = req.view_count {
            p.view_count = v;
        }
        if let Some(v) = req.rating {
            p.rating = v;
        }
        if let Some(v) = req.is_recommended {
            p.is_recommended = v;
        }
        p.updated_at = Utc::now();

        Ok(Some(p.clone()))
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        self.touch();
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|p| p.id == id).map(|p| {
            p.view_count += 1;
            p.clone()
        }))
    }

    async fn delete_product(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        self.touch();
        let mut rows = self.rows.write().await;
        let position = rows.iter().position(|p| p.id == id);
        Ok(position.map(|index| rows.remove(index)))
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    rows: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepositoryTrait for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.rows.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.rows.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, RepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|u| u.email == input.email) {
            return Err(RepositoryError::AlreadyExists("User already exists".into()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            email: input.email.clone(),
            password: input.password_hash.clone(),
            phone: String::new(),
            address: String::new(),
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        input: &UpdateProfileRequest,
    ) -> Result<Option<User>, RepositoryError> {
        let mut rows = self.rows.write().await;

        if let Some(email) = &input.email
            && rows.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(RepositoryError::AlreadyExists("User already exists".into()));
        }

        let Some(user) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &input.name {
            user.name = v.clone();
        }
        if let Some(v) = &input.email {
            user.email = v.clone();
        }
        if let Some(v) = &input.phone {
            user.phone = v.clone();
        }
        if let Some(v) = &input.address {
            user.address = v.clone();
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}

#[derive(Default)]
pub struct MemoryOrders {
    rows: RwLock<Vec<Order>>,
}

#[async_trait]
impl OrderRepositoryTrait for MemoryOrders {
    async fn create_order(&self, input: &NewOrder) -> Result<Order, RepositoryError> {
        let mut rows = self.rows.write().await;
        // strictly increasing so "newest first" is deterministic
        let created_at = rows
            .iter()
            .map(|o| o.created_at + Duration::milliseconds(1))
            .max()
            .unwrap_or_else(Utc::now);

        let order = Order {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            order_items: sqlx::types::Json(input.order_items.clone()),
            shipping_address: sqlx::types::Json(input.shipping_address.clone()),
            payment_method: input.payment_method.clone(),
            items_price: input.items_price,
            tax_price: input.tax_price,
            shipping_price: input.shipping_price,
            total_price: input.total_price,
            is_paid: false,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            created_at,
            updated_at: created_at,
        };
        rows.push(order.clone());
        Ok(order)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(orders)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        Ok(self.rows.read().await.iter().find(|o| o.id == id).cloned())
    }
}

/// Builder for catalog fixtures; `created_at` is pinned so "newest" is deterministic.
pub struct ProductSeed(Product);

impl ProductSeed {
    pub fn new(name: &str) -> Self {
        let epoch: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        Self(Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{name} description"),
            price: 10.0,
            image: "/images/sample.jpg".into(),
            category: "misc".into(),
            tags: vec![],
            brand: "Acme".into(),
            stock: "in stock".into(),
            count_in_stock: 10,
            color: "black".into(),
            warranty: "1 year".into(),
            view_count: 0,
            rating: 0.0,
            is_recommended: false,
            created_at: epoch,
            updated_at: epoch,
        })
    }

    pub fn price(mut self, price: f64) -> Self {
        self.0.price = price;
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.0.category = category.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.0.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn views(mut self, views: i64) -> Self {
        self.0.view_count = views;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.0.rating = rating;
        self
    }

    pub fn recommended(mut self) -> Self {
        self.0.is_recommended = true;
        self
    }

    /// Minutes after the fixture epoch.
    pub fn age(mut self, minutes: i64) -> Self {
        self.0.created_at += Duration::minutes(minutes);
        self.0.updated_at = self.0.created_at;
        self
    }

    pub fn build(self) -> Product {
        self.0
    }
}

pub struct TestApp {
    router: Router,
    pub products: Arc<MemoryProducts>,
    pub users: Arc<MemoryUsers>,
    pub orders: Arc<MemoryOrders>,
}

impl TestApp {
    pub fn new(products: Vec<Product>) -> Self {
        let products = Arc::new(MemoryProducts::with(products));
        let users = Arc::new(MemoryUsers::default());
        let orders = Arc::new(MemoryOrders::default());

        let deps = DependenciesInjectDeps {
            product_query: products.clone(),
            product_command: products.clone(),
            users: users.clone(),
            orders: orders.clone(),
            hashing: Arc::new(Hashing::with_cost(4)),
        };

        let state = AppState::with_deps(
            deps,
            Arc::new(JwtConfig::new(TEST_JWT_SECRET)),
            CookiePolicy::default(),
        );

        Self {
            router: AppRouter::build(Arc::new(state)),
            products,
            users,
            orders,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_with_cookies(&self, uri: &str, cookies: &str) -> Response {
        self.request(
            Request::get(uri)
                .header(header::COOKIE, cookies)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: &Value,
        cookies: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookies) = cookies {
            builder = builder.header(header::COOKIE, cookies);
        }

        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Registers a user and returns the `Cookie` header value for later requests.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .send_json(
                "POST",
                "/api/users",
                &serde_json::json!({ "name": name, "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status(), 201, "registration of {email} failed");
        extract_cookies(&response)
    }
}

/// Collapses every `Set-Cookie` header into a single `Cookie` header value.
pub fn extract_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
