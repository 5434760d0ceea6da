use crate::{
    catalog::{PriceBounds, ProductFilter, SortStrategy},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn count(&self, filter: &ProductFilter) -> Result<i64, RepositoryError>;
    async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortStrategy,
        skip: i64,
        limit: Option<i64>,
    ) -> Result<Vec<ProductModel>, RepositoryError>;
    /// `None` when the filter matches no product.
    async fn price_bounds(
        &self,
        filter: &ProductFilter,
    ) -> Result<Option<PriceBounds>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError>;
}
