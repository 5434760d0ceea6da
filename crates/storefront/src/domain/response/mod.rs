pub mod api;
pub mod order;
pub mod product;
pub mod user;
