use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductQueryServiceTrait,
    },
    catalog::{CatalogEngine, CatalogQuery, FilterFragment, ProductFilter, SortStrategy},
    domain::{
        requests::product::FindAllProducts,
        response::product::{CatalogResponse, ProductResponse},
    },
    service::{
        parse_id,
        product::{INVALID_PRODUCT_ID, PRODUCT_NOT_FOUND},
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;

const TRACER: &str = "product-query-service";
const TRENDING_LIMIT: i64 = 15;
const BEST_SELLER_TAG: &str = "bestSeller";
const FEATURED_TAG: &str = "featured";
const EMPTY_VIEW: &str = "Products not found";

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    engine: CatalogEngine,
    metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service", "ProductQueryService");

        Self {
            engine: CatalogEngine::new(query.clone()),
            query,
            command,
            metrics,
        }
    }

    /// Shared body of the trending / best-seller / featured views: an empty
    /// result is reported as not found.
    async fn fixed_view(
        &self,
        operation: &str,
        filter: ProductFilter,
        sort: SortStrategy,
        limit: Option<i64>,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            operation,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", operation.to_string()),
                KeyValue::new("product.filter", filter.to_string()),
            ],
        );

        let products = match self.query.find(&filter, sort, 0, limit).await {
            Ok(products) => products,
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Get, &e.to_string());
                return Err(e.into());
            }
        };

        if products.is_empty() {
            tracing_ctx.fail(&self.metrics, Method::Get, EMPTY_VIEW);
            return Err(ServiceError::NotFound(EMPTY_VIEW.into()));
        }

        tracing_ctx.succeed(
            &self.metrics,
            Method::Get,
            &format!("{operation} returned {} products", products.len()),
        );

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self, req: &FindAllProducts) -> Result<CatalogResponse, ServiceError> {
        let request = CatalogQuery::normalize(req);

        info!(
            "🔍 Listing products | page={} limit={} keyword={:?} categories={:?} sort={}",
            request.page,
            request.limit,
            request.keyword,
            request.categories,
            request.sort.as_str()
        );

        let tracing_ctx = TracingContext::start(
            TRACER,
            "FindAllProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("catalog.page", request.page),
                KeyValue::new("catalog.limit", request.limit),
                KeyValue::new("catalog.sort", request.sort.as_str()),
            ],
        );

        match self.engine.run(&request).await {
            Ok(page) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Get,
                    &format!(
                        "Listed {} of {} products (page {}/{})",
                        page.products.len(),
                        page.count,
                        page.page,
                        page.pages
                    ),
                );
                Ok(CatalogResponse::from(page))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Get, &e.to_string());
                Err(e.into())
            }
        }
    }

    async fn find_trending(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        self.fixed_view(
            "FindTrendingProducts",
            ProductFilter::all(),
            SortStrategy::MostViewed,
            Some(TRENDING_LIMIT),
        )
        .await
    }

    async fn find_best_sellers(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        self.fixed_view(
            "FindBestSellers",
            ProductFilter::all().with(FilterFragment::HasTag(BEST_SELLER_TAG.into())),
            SortStrategy::Newest,
            None,
        )
        .await
    }

    async fn find_featured(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        self.fixed_view(
            "FindFeaturedProducts",
            ProductFilter::all().with(FilterFragment::HasTag(FEATURED_TAG.into())),
            SortStrategy::Newest,
            None,
        )
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<ProductResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "FindProductById",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product_id = match parse_id(id, INVALID_PRODUCT_ID) {
            Ok(product_id) => product_id,
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Get, INVALID_PRODUCT_ID);
                return Err(e);
            }
        };

        match self.command.increment_view_count(product_id).await {
            Ok(Some(product)) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Get,
                    &format!("Product {product_id} viewed ({} views)", product.view_count),
                );
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                tracing_ctx.fail(&self.metrics, Method::Get, PRODUCT_NOT_FOUND);
                Err(ServiceError::NotFound(PRODUCT_NOT_FOUND.into()))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Get, &e.to_string());
                Err(e.into())
            }
        }
    }
}
