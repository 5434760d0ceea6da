use crate::model::order::{OrderItem, ShippingAddress};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub qty: i32,
    pub image: String,
    pub price: f64,
}

impl From<&OrderItemRequest> for OrderItem {
    fn from(value: &OrderItemRequest) -> Self {
        OrderItem {
            name: value.name.clone(),
            qty: value.qty,
            image: value.image.clone(),
            price: value.price,
            product: value.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "No order items"))]
    pub order_items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub items_price: f64,
    #[serde(default)]
    pub tax_price: f64,
    #[serde(default)]
    pub shipping_price: f64,
    #[serde(default)]
    pub total_price: f64,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
}
