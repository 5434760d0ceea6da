mod order;
mod product;
mod user;

use crate::{
    domain::{
        requests::{
            order::{CreateOrderRequest, OrderItemRequest},
            product::{CreateProductRequest, UpdateProductRequest},
            user::{LoginRequest, RegisterRequest, UpdateProfileRequest},
        },
        response::{
            api::MessageResponse,
            order::{OrderOwnerResponse, OrderResponse, OrderUser},
            product::{CatalogResponse, ProductResponse},
            user::{UserMessageResponse, UserProfileResponse, UserResponse},
        },
    },
    catalog::PriceBounds,
    model::order::{OrderItem, ShippingAddress},
    state::AppState,
};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{DefaultBodyLimit, OriginalUri, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{
    errors::{ErrorResponse, HttpError},
    utils::shutdown_signal,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::order::order_routes;
pub use self::product::product_routes;
pub use self::user::user_routes;

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        product::get_products,
        product::get_trending,
        product::get_best_sellers,
        product::get_featured,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,

        user::register_user_handler,
        user::login_user_handler,
        user::logout_user_handler,
        user::get_profile_handler,
        user::update_profile_handler,

        order::create_order,
        order::get_my_orders,
        order::get_order,
    ),
    components(schemas(
        CatalogResponse,
        ProductResponse,
        PriceBounds,
        CreateProductRequest,
        UpdateProductRequest,
        RegisterRequest,
        LoginRequest,
        UpdateProfileRequest,
        UserResponse,
        UserProfileResponse,
        UserMessageResponse,
        CreateOrderRequest,
        OrderItemRequest,
        OrderItem,
        ShippingAddress,
        OrderResponse,
        OrderUser,
        OrderOwnerResponse,
        MessageResponse,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Product", description = "Catalog and product administration"),
        (name = "User", description = "Registration, login and profile"),
        (name = "Order", description = "Orders of the signed-in user"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> HttpError {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    HttpError::NotFound(format!("{target} - Doesn't Exist"))
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(shared_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(product_routes(shared_state.clone()))
            .merge(user_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .fallback(not_found)
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}
