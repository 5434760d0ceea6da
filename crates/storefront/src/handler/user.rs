use crate::{
    abstract_trait::user::service::DynUserService,
    domain::{
        caller::CallerContext,
        requests::user::{LoginRequest, RegisterRequest, UpdateProfileRequest},
        response::{
            api::MessageResponse,
            user::{UserMessageResponse, UserProfileResponse},
        },
    },
    middleware::{
        jwt::{CookiePolicy, auth_middleware},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "User",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created, auth cookie set", body = UserMessageResponse),
        (status = 400, description = "Missing fields or user exists", body = ErrorResponse)
    )
)]
pub async fn register_user_handler(
    Extension(service): Extension<DynUserService>,
    Extension(jwt): Extension<DynJwtService>,
    Extension(cookies): Extension<CookiePolicy>,
    jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let user = service.register(&body).await?;
    let token = jwt.generate_token(user.id)?;
    let jar = jar.add(cookies.session_cookie(token)?);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(UserMessageResponse::new("User created", user)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/users/auth",
    tag = "User",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, auth cookie set", body = UserMessageResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login_user_handler(
    Extension(service): Extension<DynUserService>,
    Extension(jwt): Extension<DynJwtService>,
    Extension(cookies): Extension<CookiePolicy>,
    jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let user = service.login(&body).await?;
    let token = jwt.generate_token(user.id)?;
    let jar = jar.add(cookies.session_cookie(token)?);

    Ok((
        StatusCode::OK,
        jar,
        Json(UserMessageResponse::new("Login successful", user)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = "User",
    responses(
        (status = 200, description = "Auth cookie cleared", body = MessageResponse)
    )
)]
pub async fn logout_user_handler(
    Extension(cookies): Extension<CookiePolicy>,
    jar: CookieJar,
) -> impl IntoResponse {
    let jar = jar.remove(cookies.removal_cookie());

    (
        StatusCode::OK,
        jar,
        Json(MessageResponse::new("User logged out")),
    )
}

#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "User",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_profile_handler(
    Extension(service): Extension<DynUserService>,
    Extension(caller): Extension<CallerContext>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_profile(&caller).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserMessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn update_profile_handler(
    Extension(service): Extension<DynUserService>,
    Extension(caller): Extension<CallerContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let user = service.update_profile(&caller, &body).await?;
    Ok((
        StatusCode::OK,
        Json(UserMessageResponse::new("User updated", user)),
    ))
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/users", post(register_user_handler))
        .route("/api/users/auth", post(login_user_handler))
        .route("/api/users/logout", post(logout_user_handler));

    let private_routes = OpenApiRouter::new()
        .route(
            "/api/users/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
        .route_layer(middleware::from_fn(auth_middleware));

    public_routes
        .merge(private_routes)
        .layer(Extension(app_state.di_container.user_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
        .layer(Extension(app_state.cookie_policy))
}
