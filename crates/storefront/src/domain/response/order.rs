use crate::{
    domain::caller::CallerContext,
    model::order::{Order as OrderModel, OrderItem, ShippingAddress},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderOwnerResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&CallerContext> for OrderOwnerResponse {
    fn from(value: &CallerContext) -> Self {
        OrderOwnerResponse {
            id: value.user_id,
            name: value.name.clone(),
            email: value.email.clone(),
        }
    }
}

/// Bare owner id in listings, the embedded owner on single-order reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum OrderUser {
    Owner(OrderOwnerResponse),
    Id(Uuid),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: OrderUser,
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderModel> for OrderResponse {
    fn from(value: OrderModel) -> Self {
        OrderResponse {
            id: value.id,
            user: OrderUser::Id(value.user_id),
            order_items: value.order_items.0,
            shipping_address: value.shipping_address.0,
            payment_method: value.payment_method,
            items_price: value.items_price,
            tax_price: value.tax_price,
            shipping_price: value.shipping_price,
            total_price: value.total_price,
            is_paid: value.is_paid,
            paid_at: value.paid_at,
            is_delivered: value.is_delivered,
            delivered_at: value.delivered_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl OrderResponse {
    pub fn with_owner(mut self, owner: OrderOwnerResponse) -> Self {
        self.user = OrderUser::Owner(owner);
        self
    }
}
