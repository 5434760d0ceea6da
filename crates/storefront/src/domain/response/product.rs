use crate::{
    catalog::{CatalogPage, PriceBounds},
    model::product::Product as ProductModel,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub tags: Vec<String>,
    pub brand: String,
    pub stock: String,
    pub count_in_stock: i32,
    pub color: String,
    pub warranty: String,
    pub view_count: i64,
    pub rating: f64,
    pub is_recommended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            image: value.image,
            category: value.category,
            tags: value.tags,
            brand: value.brand,
            stock: value.stock,
            count_in_stock: value.count_in_stock,
            color: value.color,
            warranty: value.warranty,
            view_count: value.view_count,
            rating: value.rating,
            is_recommended: value.is_recommended,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Listing envelope: one page plus the numbers the storefront UI needs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub products: Vec<ProductResponse>,
    pub page: i64,
    pub pages: i64,
    pub count: i64,
    pub price_range: PriceBounds,
}

impl From<CatalogPage> for CatalogResponse {
    fn from(value: CatalogPage) -> Self {
        CatalogResponse {
            products: value.products.into_iter().map(ProductResponse::from).collect(),
            page: value.page,
            pages: value.pages,
            count: value.count,
            price_range: value.price_range,
        }
    }
}
