pub mod command;
pub mod query;

pub const PRODUCT_COLUMNS: &str = "id, name, description, price, image, category, tags, brand, \
     stock, count_in_stock, color, warranty, view_count, rating, is_recommended, created_at, \
     updated_at";
