use crate::{
    domain::requests::user::{NewUser, UpdateProfileRequest},
    model::user::User as UserModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserModel>, RepositoryError>;
    /// `AlreadyExists` when the email is taken.
    async fn create_user(&self, input: &NewUser) -> Result<UserModel, RepositoryError>;
    async fn update_profile(
        &self,
        id: Uuid,
        input: &UpdateProfileRequest,
    ) -> Result<Option<UserModel>, RepositoryError>;
}
