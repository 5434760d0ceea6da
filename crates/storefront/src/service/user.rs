use crate::{
    abstract_trait::user::{repository::DynUserRepository, service::UserServiceTrait},
    domain::{
        caller::CallerContext,
        requests::user::{LoginRequest, NewUser, RegisterRequest, UpdateProfileRequest},
        response::user::{UserProfileResponse, UserResponse},
    },
    service::validation_message,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

const TRACER: &str = "user-service";
const USER_EXISTS: &str = "User already exists";
const USER_NOT_FOUND: &str = "User not found";

#[derive(Clone)]
pub struct UserService {
    users: DynUserRepository,
    hashing: DynHashing,
    metrics: Metrics,
}

impl UserService {
    pub fn new(users: DynUserRepository, hashing: DynHashing, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "user_service", "UserService");

        Self {
            users,
            hashing,
            metrics,
        }
    }

    fn validate<T: Validate>(
        &self,
        req: &T,
        tracing_ctx: &TracingContext,
        method: Method,
    ) -> Result<(), ServiceError> {
        req.validate().map_err(|errors| {
            let message = validation_message(&errors);
            tracing_ctx.fail(&self.metrics, method, &message);
            ServiceError::Validation(message)
        })
    }

    async fn register_inner(&self, req: &RegisterRequest) -> Result<UserResponse, ServiceError> {
        let email = normalize_email(&req.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Validation(USER_EXISTS.into()));
        }

        let password_hash = self.hashing.hash_password(&req.password).await?;

        let new_user = NewUser {
            name: req.name.trim().to_string(),
            email,
            password_hash,
        };

        let user = self.users.create_user(&new_user).await.map_err(|e| match e {
            RepositoryError::AlreadyExists(msg) => ServiceError::Validation(msg),
            other => ServiceError::Repo(other),
        })?;

        Ok(UserResponse::from(user))
    }

    async fn login_inner(&self, req: &LoginRequest) -> Result<UserResponse, ServiceError> {
        let email = normalize_email(&req.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!("🔒 Login attempt for unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        self.hashing
            .compare_password(&user.password, &req.password)
            .await?;

        Ok(UserResponse::from(user))
    }
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, req: &RegisterRequest) -> Result<UserResponse, ServiceError> {
        info!("📝 Registering user: {}", req.email);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "RegisterUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "register"),
            ],
        );

        self.validate(req, &tracing_ctx, Method::Post)?;

        match self.register_inner(req).await {
            Ok(user) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Post,
                    &format!("User registered: {}", user.id),
                );
                Ok(user)
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Post, &e.to_string());
                Err(e)
            }
        }
    }

    async fn login(&self, req: &LoginRequest) -> Result<UserResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "LoginUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("operation", "login"),
            ],
        );

        self.validate(req, &tracing_ctx, Method::Post)?;

        match self.login_inner(req).await {
            Ok(user) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Post,
                    &format!("User logged in: {}", user.id),
                );
                Ok(user)
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Post, &e.to_string());
                Err(e)
            }
        }
    }

    async fn get_profile(
        &self,
        caller: &CallerContext,
    ) -> Result<UserProfileResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "GetProfile",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", caller.user_id.to_string()),
            ],
        );

        match self.users.find_by_id(caller.user_id).await {
            Ok(Some(user)) => {
                tracing_ctx.succeed(&self.metrics, Method::Get, "Profile fetched");
                Ok(UserProfileResponse::from(user))
            }
            Ok(None) => {
                tracing_ctx.fail(&self.metrics, Method::Get, USER_NOT_FOUND);
                Err(ServiceError::NotFound(USER_NOT_FOUND.into()))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Get, &e.to_string());
                Err(e.into())
            }
        }
    }

    async fn update_profile(
        &self,
        caller: &CallerContext,
        req: &UpdateProfileRequest,
    ) -> Result<UserResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "UpdateProfile",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", caller.user_id.to_string()),
            ],
        );

        let normalized = UpdateProfileRequest {
            name: req.name.as_deref().map(|n| n.trim().to_string()),
            email: req.email.as_deref().map(normalize_email),
            phone: req.phone.clone(),
            address: req.address.clone(),
        };

        self.validate(&normalized, &tracing_ctx, Method::Put)?;

        match self.users.update_profile(caller.user_id, &normalized).await {
            Ok(Some(user)) => {
                tracing_ctx.succeed(&self.metrics, Method::Put, "Profile updated");
                Ok(UserResponse::from(user))
            }
            Ok(None) => {
                tracing_ctx.fail(&self.metrics, Method::Put, USER_NOT_FOUND);
                Err(ServiceError::Validation(USER_NOT_FOUND.into()))
            }
            Err(RepositoryError::AlreadyExists(msg)) => {
                tracing_ctx.fail(&self.metrics, Method::Put, &msg);
                Err(ServiceError::Validation(msg))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Put, &e.to_string());
                Err(e.into())
            }
        }
    }

    async fn resolve_caller(&self, user_id: Uuid) -> Result<CallerContext, ServiceError> {
        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(CallerContext {
                user_id: user.id,
                name: user.name,
                email: user.email,
            }),
            None => {
                warn!("🔒 Token subject {user_id} no longer exists");
                Err(ServiceError::Unauthorized(USER_NOT_FOUND.into()))
            }
        }
    }
}
