use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    catalog::{FilterFragment, PriceBounds, ProductFilter, SortStrategy},
    model::product::Product as ProductModel,
    repository::product::PRODUCT_COLUMNS,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// Escapes LIKE metacharacters so the keyword matches literally.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    for (i, fragment) in filter.fragments().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });

        match fragment {
            FilterFragment::NameContains(keyword) => {
                builder
                    .push("name ILIKE ")
                    .push_bind(format!("%{}%", escape_like(keyword)));
            }
            FilterFragment::CategoryIn(categories) => {
                builder
                    .push("category = ANY(")
                    .push_bind(categories.clone())
                    .push(")");
            }
            FilterFragment::PriceRange { min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    builder
                        .push("price >= ")
                        .push_bind(*min)
                        .push(" AND price <= ")
                        .push_bind(*max);
                }
                (Some(min), None) => {
                    builder.push("price >= ").push_bind(*min);
                }
                (None, Some(max)) => {
                    builder.push("price <= ").push_bind(*max);
                }
                (None, None) => {
                    builder.push("TRUE");
                }
            },
            FilterFragment::HasTag(tag) => {
                builder.push_bind(tag.clone()).push(" = ANY(tags)");
            }
        }
    }
}

fn page_query(
    filter: &ProductFilter,
    sort: SortStrategy,
    skip: i64,
    limit: Option<i64>,
) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::<Postgres>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
    push_filter(&mut builder, filter);

    builder.push(" ORDER BY ").push(sort.order_by_sql());
    if let Some(limit) = limit {
        builder.push(" LIMIT ").push_bind(limit);
    }
    builder.push(" OFFSET ").push_bind(skip);

    builder
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn count(&self, filter: &ProductFilter) -> Result<i64, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filter(&mut builder, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products [{filter}]: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortStrategy,
        skip: i64,
        limit: Option<i64>,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        let mut builder = page_query(filter, sort, skip, limit);

        let products = builder
            .build_query_as::<ProductModel>()
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products [{filter}]: {e:?}");
                RepositoryError::from(e)
            })?;

        info!(
            "📦 Fetched {} products | sort={} skip={skip} limit={limit:?}",
            products.len(),
            sort.as_str()
        );

        Ok(products)
    }

    async fn price_bounds(
        &self,
        filter: &ProductFilter,
    ) -> Result<Option<PriceBounds>, RepositoryError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT MIN(price), MAX(price) FROM products");
        push_filter(&mut builder, filter);

        let (min, max) = builder
            .build_query_as::<(Option<f64>, Option<f64>)>()
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to aggregate price bounds [{filter}]: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(min.zip(max).map(|(min, max)| PriceBounds { min, max }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError> {
        sqlx::query_as::<_, ProductModel>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("phone"), "phone");
    }

    #[test]
    fn filter_renders_bound_placeholders_in_order() {
        let filter = ProductFilter::all()
            .with(FilterFragment::NameContains("phone".into()))
            .with(FilterFragment::CategoryIn(vec!["a".into()]))
            .with(FilterFragment::PriceRange {
                min: Some(1.0),
                max: Some(2.0),
            });

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filter(&mut builder, &filter);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM products WHERE name ILIKE $1 AND category = ANY($2) \
             AND price >= $3 AND price <= $4"
        );
    }

    #[test]
    fn tag_filter_uses_array_membership() {
        let filter = ProductFilter::all().with(FilterFragment::HasTag("featured".into()));

        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM products");
        push_filter(&mut builder, &filter);

        assert_eq!(builder.sql(), "SELECT 1 FROM products WHERE $1 = ANY(tags)");
    }

    #[test]
    fn one_sided_price_range_binds_a_single_bound() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM products");
        push_filter(
            &mut builder,
            &ProductFilter::all().with(FilterFragment::PriceRange {
                min: Some(5.0),
                max: None,
            }),
        );
        assert_eq!(builder.sql(), "SELECT 1 FROM products WHERE price >= $1");

        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM products");
        push_filter(
            &mut builder,
            &ProductFilter::all().with(FilterFragment::PriceRange {
                min: None,
                max: Some(9.0),
            }),
        );
        assert_eq!(builder.sql(), "SELECT 1 FROM products WHERE price <= $1");
    }

    #[test]
    fn page_query_orders_then_limits_then_offsets() {
        let filter = ProductFilter::all().with(FilterFragment::NameContains("phone".into()));

        let builder = page_query(&filter, SortStrategy::TopSellers, 24, Some(12));

        assert_eq!(
            builder.sql(),
            format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE name ILIKE $1 \
                 ORDER BY view_count DESC, rating DESC, id ASC LIMIT $2 OFFSET $3"
            )
        );
    }

    #[test]
    fn unbounded_page_query_has_no_limit() {
        let builder = page_query(&ProductFilter::all(), SortStrategy::Newest, 0, None);

        assert_eq!(
            builder.sql(),
            format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id ASC OFFSET $1")
        );
    }
}
