use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
    repository::product::PRODUCT_COLUMNS,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        info!("🆕 Creating product: {}", req.name);

        let sql = format!(
            r#"
            INSERT INTO products (
                id, name, description, price, image, category, tags, brand, stock,
                count_in_stock, color, warranty, rating, is_recommended
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let product = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(Uuid::new_v4())
            .bind(req.name.trim())
            .bind(req.description.trim())
            .bind(req.price)
            .bind(req.image.trim())
            .bind(req.category.trim())
            .bind(&req.tags)
            .bind(req.brand.trim())
            .bind(req.stock.trim())
            .bind(req.count_in_stock.unwrap_or_default())
            .bind(req.color.trim())
            .bind(req.warranty.trim())
            .bind(req.rating.unwrap_or_default())
            .bind(req.is_recommended.unwrap_or_default())
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to create product {}: {e:?}", req.name);
                RepositoryError::from(e)
            })?;

        info!("✅ Product created: {}", product.id);
        Ok(product)
    }

    async fn update_product(
        &self,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        info!("✏️ Updating product: {id}");

        let sql = format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                image = COALESCE($5, image),
                category = COALESCE($6, category),
                tags = COALESCE($7, tags),
                brand = COALESCE($8, brand),
                stock = COALESCE($9, stock),
                count_in_stock = COALESCE($10, count_in_stock),
                color = COALESCE($11, color),
                warranty = COALESCE($12, warranty),
                view_count = COALESCE($13, view_count),
                rating = COALESCE($14, rating),
                is_recommended = COALESCE($15, is_recommended),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .bind(req.name.as_deref().map(str::trim))
            .bind(req.description.as_deref().map(str::trim))
            .bind(req.price)
            .bind(req.image.as_deref().map(str::trim))
            .bind(req.category.as_deref().map(str::trim))
            .bind(req.tags.as_ref())
            .bind(req.brand.as_deref().map(str::trim))
            .bind(req.stock.as_deref().map(str::trim))
            .bind(req.count_in_stock)
            .bind(req.color.as_deref().map(str::trim))
            .bind(req.warranty.as_deref().map(str::trim))
            .bind(req.view_count)
            .bind(req.rating)
            .bind(req.is_recommended)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to update product {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn increment_view_count(
        &self,
        id: Uuid,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let sql = format!(
            "UPDATE products SET view_count = view_count + 1 WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to bump view count for {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn delete_product(&self, id: Uuid) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🗑️ Deleting product: {id}");

        let sql = format!("DELETE FROM products WHERE id = $1 RETURNING {PRODUCT_COLUMNS}");

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {id}: {e:?}");
                RepositoryError::from(e)
            })
    }
}
