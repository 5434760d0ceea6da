use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::{api::MessageResponse, product::ProductResponse},
    },
    service::{
        parse_id,
        product::{INVALID_PRODUCT_ID, PRODUCT_NOT_FOUND},
        validation_message,
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
use validator::Validate;

const TRACER: &str = "product-command-service";

#[derive(Clone)]
pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service", "ProductCommandService");

        Self {
            query,
            command,
            metrics,
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
                KeyValue::new("product.category", req.category.clone()),
            ],
        );

        if let Err(errors) = req.validate() {
            let message = validation_message(&errors);
            tracing_ctx.fail(&self.metrics, Method::Post, &message);
            return Err(ServiceError::Validation(message));
        }

        match self.command.create_product(req).await {
            Ok(product) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Post,
                    &format!("Product created: {}", product.id),
                );
                Ok(ProductResponse::from(product))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Post, &e.to_string());
                Err(e.into())
            }
        }
    }

    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product_id = match parse_id(id, INVALID_PRODUCT_ID) {
            Ok(product_id) => product_id,
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Put, INVALID_PRODUCT_ID);
                return Err(e);
            }
        };

        if let Err(errors) = req.validate() {
            let message = validation_message(&errors);
            tracing_ctx.fail(&self.metrics, Method::Put, &message);
            return Err(ServiceError::Validation(message));
        }

        // nothing to write: answer with the stored product and leave updated_at alone
        let result = if req.is_empty() {
            self.query.find_by_id(product_id).await
        } else {
            self.command.update_product(product_id, req).await
        };

        match result {
            Ok(Some(product)) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Put,
                    &format!("Product updated: {product_id}"),
                );
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                tracing_ctx.fail(&self.metrics, Method::Put, PRODUCT_NOT_FOUND);
                Err(ServiceError::NotFound(PRODUCT_NOT_FOUND.into()))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Put, &e.to_string());
                Err(e.into())
            }
        }
    }

    async fn delete_product(&self, id: &str) -> Result<MessageResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product_id = match parse_id(id, INVALID_PRODUCT_ID) {
            Ok(product_id) => product_id,
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Delete, INVALID_PRODUCT_ID);
                return Err(e);
            }
        };

        match self.command.delete_product(product_id).await {
            Ok(Some(_)) => {
                tracing_ctx.succeed(
                    &self.metrics,
                    Method::Delete,
                    &format!("Product deleted: {product_id}"),
                );
                Ok(MessageResponse::new("Product deleted"))
            }
            Ok(None) => {
                tracing_ctx.fail(&self.metrics, Method::Delete, PRODUCT_NOT_FOUND);
                Err(ServiceError::NotFound(PRODUCT_NOT_FOUND.into()))
            }
            Err(e) => {
                tracing_ctx.fail(&self.metrics, Method::Delete, &e.to_string());
                Err(e.into())
            }
        }
    }
}
