pub mod command;
pub mod query;

pub(crate) const INVALID_PRODUCT_ID: &str = "Invalid product ID";
pub(crate) const PRODUCT_NOT_FOUND: &str = "Product not found";
