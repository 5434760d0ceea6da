use crate::{
    abstract_trait::{
        order::{repository::DynOrderRepository, service::DynOrderService},
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::{DynProductCommandService, DynProductQueryService},
        },
        user::{repository::DynUserRepository, service::DynUserService},
    },
    repository::{
        order::OrderRepository,
        product::{command::ProductCommandRepository, query::ProductQueryRepository},
        user::UserRepository,
    },
    service::{
        order::OrderService,
        product::{command::ProductCommandService, query::ProductQueryService},
        user::UserService,
    },
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    config::{ConnectionPool, Hashing},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub user_service: DynUserService,
    pub order_service: DynOrderService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("user_service", &"UserService")
            .field("order_service", &"OrderService")
            .finish()
    }
}

/// Stores and collaborators the services are wired onto.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub users: DynUserRepository,
    pub orders: DynOrderRepository,
    pub hashing: DynHashing,
}

impl DependenciesInjectDeps {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool)),
            hashing: Arc::new(Hashing::new()),
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            product_query,
            product_command,
            users,
            orders,
            hashing,
        } = deps;

        let product_query_service = Arc::new(ProductQueryService::new(
            product_query.clone(),
            product_command.clone(),
            registry,
        )) as DynProductQueryService;

        let product_command_service = Arc::new(ProductCommandService::new(
            product_query,
            product_command,
            registry,
        )) as DynProductCommandService;

        let user_service =
            Arc::new(UserService::new(users, hashing, registry)) as DynUserService;

        let order_service = Arc::new(OrderService::new(orders, registry)) as DynOrderService;

        Self {
            product_query: product_query_service,
            product_command: product_command_service,
            user_service,
            order_service,
        }
    }
}
