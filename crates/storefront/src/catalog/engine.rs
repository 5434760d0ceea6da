use crate::{
    abstract_trait::product::repository::DynProductQueryRepository, catalog::CatalogQuery,
    model::product::Product,
};
use serde::{Deserialize, Serialize};
use shared::errors::RepositoryError;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub page: i64,
    pub pages: i64,
    pub count: i64,
    pub price_range: PriceBounds,
}

#[derive(Clone)]
pub struct CatalogEngine {
    query: DynProductQueryRepository,
}

impl CatalogEngine {
    pub fn new(query: DynProductQueryRepository) -> Self {
        Self { query }
    }

    /// Count, price bounds and page are read concurrently without a shared
    /// snapshot; under concurrent writes they may disagree with each other.
    pub async fn run(&self, request: &CatalogQuery) -> Result<CatalogPage, RepositoryError> {
        let full = request.full_filter();
        let scope = request.scope_filter();

        debug!(
            "🧮 Catalog query | page={} limit={} skip={} sort={} filter=[{}] scope=[{}]",
            request.page,
            request.limit,
            request.skip,
            request.sort.as_str(),
            full,
            scope
        );

        let (count, bounds, products) = tokio::try_join!(
            self.query.count(&full),
            self.query.price_bounds(&scope),
            self.query
                .find(&full, request.sort, request.skip, Some(request.limit)),
        )?;

        Ok(CatalogPage {
            products,
            page: request.page,
            pages: request.pages(count),
            count,
            price_range: bounds.unwrap_or_default(),
        })
    }
}
