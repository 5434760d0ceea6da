use crate::domain::{
    requests::product::FindAllProducts,
    response::product::{CatalogResponse, ProductResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self, req: &FindAllProducts) -> Result<CatalogResponse, ServiceError>;
    async fn find_trending(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_best_sellers(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_featured(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    /// Counts as a view: the returned product already carries the new count.
    async fn find_by_id(&self, id: &str) -> Result<ProductResponse, ServiceError>;
}
