use crate::domain::{
    caller::CallerContext,
    requests::user::{LoginRequest, RegisterRequest, UpdateProfileRequest},
    response::user::{UserProfileResponse, UserResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynUserService = Arc<dyn UserServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserServiceTrait {
    async fn register(&self, req: &RegisterRequest) -> Result<UserResponse, ServiceError>;
    async fn login(&self, req: &LoginRequest) -> Result<UserResponse, ServiceError>;
    async fn get_profile(&self, caller: &CallerContext)
    -> Result<UserProfileResponse, ServiceError>;
    async fn update_profile(
        &self,
        caller: &CallerContext,
        req: &UpdateProfileRequest,
    ) -> Result<UserResponse, ServiceError>;
    /// Turns a verified token subject into the caller the request acts for.
    async fn resolve_caller(&self, user_id: Uuid) -> Result<CallerContext, ServiceError>;
}
