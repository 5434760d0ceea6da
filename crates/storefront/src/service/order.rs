use crate::{
    abstract_trait::order::{repository::DynOrderRepository, service::OrderServiceTrait},
    domain::{
        caller::CallerContext,
        requests::order::{CreateOrderRequest, NewOrder},
        response::order::{OrderOwnerResponse, OrderResponse},
    },
    model::order::OrderItem,
    service::{parse_id, validation_message},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::info;
use validator::Validate;

const TRACER: &str = "order-service";
const INVALID_ORDER_ID: &str = "Invalid order ID";
const ORDER_NOT_FOUND: &str = "Order not found";

#[derive(Clone)]
pub struct OrderService {
    orders: DynOrderRepository,
    metrics: Metrics,
}

impl OrderService {
    pub fn new(orders: DynOrderRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_service", "OrderService");

        Self { orders, metrics }
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn create_order(
        &self,
        caller: &CallerContext,
        req: &CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        info!(
            "🛒 Placing order for {} with {} items",
            caller.user_id,
            req.order_items.len()
        );

        let tracing_ctx = TracingContext::start(
            TRACER,
            "CreateOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("user.id", caller.user_id.to_string()),
            ],
        );

        if let Err(errors) = req.validate() {
            let message = validation_message(&errors);
            tracing_ctx.fail(&self.metrics, Method::Post, &message);
            return Err(ServiceError::Validation(message));
        }

        let new_order = NewOrder {
            user_id: caller.user_id,
            order_items: req.order_items.iter().map(OrderItem::from).collect(),
            shipping_address: req.shipping_address.clone(),
            payment_method: req.payment_method.clone(),
            items_price: req.items_price,
            tax_price: req.tax_price,
            shipping_price: req.shipping_price,
            total_price: req.total_price,
        };

        match self.orders.create_order(&new_order).await {
            Ok(order) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Post,
                    &format!("Order created: {}", order.id),
                );
                Ok(OrderResponse::from(order))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Post, &e.to_string());
                Err(e.into())
            }
        }
    }

    async fn find_my_orders(
        &self,
        caller: &CallerContext,
    ) -> Result<Vec<OrderResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "FindMyOrders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", caller.user_id.to_string()),
            ],
        );

        match self.orders.find_by_user(caller.user_id).await {
            Ok(orders) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Get,
                    &format!("Found {} orders", orders.len()),
                );
                Ok(orders.into_iter().map(OrderResponse::from).collect())
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Get, &e.to_string());
                Err(e.into())
            }
        }
    }

    async fn find_by_id(
        &self,
        caller: &CallerContext,
        id: &str,
    ) -> Result<OrderResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "FindOrderById",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
                KeyValue::new("user.id", caller.user_id.to_string()),
            ],
        );

        let order_id = match parse_id(id, INVALID_ORDER_ID) {
            Ok(order_id) => order_id,
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Get, INVALID_ORDER_ID);
                return Err(e);
            }
        };

        match self.orders.find_by_id(order_id).await {
            Ok(Some(order)) if order.user_id == caller.user_id => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Get,
                    &format!("Order fetched: {order_id}"),
                );
                Ok(OrderResponse::from(order).with_owner(OrderOwnerResponse::from(caller)))
            }
            Ok(_) => {
                tracing_ctx.fail(&self.metrics, Method::Get, ORDER_NOT_FOUND);
                Err(ServiceError::NotFound(ORDER_NOT_FOUND.into()))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Get, &e.to_string());
                Err(e.into())
            }
        }
    }
}
