//! Catalog query engine: turns raw listing parameters into a normalised
//! request, builds the full and scope predicates, and assembles the page,
//! count and price bounds from the product store.

mod engine;
mod filter;
mod params;
mod sort;

pub use self::engine::{CatalogEngine, CatalogPage, PriceBounds};
pub use self::filter::{FilterFragment, ProductFilter};
pub use self::params::{CatalogQuery, DEFAULT_LIMIT, MAX_LIMIT};
pub use self::sort::{SortField, SortStrategy};
