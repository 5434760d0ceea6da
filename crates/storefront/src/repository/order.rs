use crate::{
    abstract_trait::order::repository::OrderRepositoryTrait,
    domain::requests::order::NewOrder, model::order::Order as OrderModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};
use uuid::Uuid;

const ORDER_COLUMNS: &str = "id, user_id, order_items, shipping_address, payment_method, \
     items_price, tax_price, shipping_price, total_price, is_paid, paid_at, is_delivered, \
     delivered_at, created_at, updated_at";

#[derive(Clone)]
pub struct OrderRepository {
    db: ConnectionPool,
}

impl OrderRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepositoryTrait for OrderRepository {
    async fn create_order(&self, input: &NewOrder) -> Result<OrderModel, RepositoryError> {
        info!(
            "🧾 Creating order for user {} with {} items",
            input.user_id,
            input.order_items.len()
        );

        let sql = format!(
            r#"
            INSERT INTO orders (
                id, user_id, order_items, shipping_address, payment_method,
                items_price, tax_price, shipping_price, total_price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, OrderModel>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.user_id)
            .bind(Json(&input.order_items))
            .bind(Json(&input.shipping_address))
            .bind(&input.payment_method)
            .bind(input.items_price)
            .bind(input.tax_price)
            .bind(input.shipping_price)
            .bind(input.total_price)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to create order for {}: {e:?}", input.user_id);
                RepositoryError::from(e)
            })
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<OrderModel>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id ASC"
        );

        sqlx::query_as::<_, OrderModel>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to list orders for {user_id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderModel>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");

        sqlx::query_as::<_, OrderModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order {id}: {e:?}");
                RepositoryError::from(e)
            })
    }
}
