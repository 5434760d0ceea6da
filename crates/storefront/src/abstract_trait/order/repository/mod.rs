use crate::{domain::requests::order::NewOrder, model::order::Order as OrderModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderRepository = Arc<dyn OrderRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderRepositoryTrait {
    async fn create_order(&self, input: &NewOrder) -> Result<OrderModel, RepositoryError>;
    /// Newest first.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderModel>, RepositoryError>;
}
