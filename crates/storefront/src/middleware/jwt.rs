use crate::abstract_trait::user::service::DynUserService;
use axum::{
    Extension,
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::{abstract_trait::DynJwtService, config::TOKEN_TTL_DAYS, errors::HttpError};
use tracing::warn;

pub const AUTH_COOKIE: &str = "jwt";

/// Whether auth cookies carry the `Secure` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookiePolicy {
    pub secure: bool,
}

impl CookiePolicy {
    pub fn session_cookie(&self, token: String) -> Result<Cookie<'static>, HttpError> {
        let max_age = TOKEN_TTL_DAYS * 24 * 60 * 60;
        let mut cookie = Cookie::parse(format!(
            "{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age}"
        ))
        .map_err(|e| HttpError::Internal(format!("Failed to build auth cookie: {e}")))?;
        cookie.set_secure(self.secure);

        Ok(cookie)
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((AUTH_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .build()
    }
}

/// Resolves the `jwt` cookie (or a Bearer header) into a `CallerContext`
/// request extension.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    Extension(users): Extension<DynUserService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = cookie_jar
        .get(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
        .ok_or_else(|| HttpError::Unauthorized("Not authorized, no token".to_string()))?;

    let user_id = jwt.verify_token(&token).map_err(|e| {
        warn!("🔒 Rejected token: {e}");
        HttpError::Unauthorized("Not authorized, token failed".to_string())
    })?;

    let caller = users.resolve_caller(user_id).await?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}
