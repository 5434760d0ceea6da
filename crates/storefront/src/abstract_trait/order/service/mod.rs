use crate::domain::{
    caller::CallerContext, requests::order::CreateOrderRequest, response::order::OrderResponse,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderServiceTrait {
    async fn create_order(
        &self,
        caller: &CallerContext,
        req: &CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError>;
    async fn find_my_orders(&self, caller: &CallerContext)
    -> Result<Vec<OrderResponse>, ServiceError>;
    /// Orders owned by someone else read as not found.
    async fn find_by_id(
        &self,
        caller: &CallerContext,
        id: &str,
    ) -> Result<OrderResponse, ServiceError>;
}
