use crate::{
    catalog::{FilterFragment, ProductFilter, SortStrategy},
    domain::requests::product::FindAllProducts,
};

pub const DEFAULT_LIMIT: i64 = 12;
pub const MAX_LIMIT: i64 = 100;

/// Fully normalised listing request. Every field is already clamped or
/// defaulted, nothing downstream looks at the raw query string again.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub page: i64,
    pub limit: i64,
    pub skip: i64,
    pub keyword: Option<String>,
    pub categories: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortStrategy,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::normalize(&FindAllProducts::default())
    }
}

impl CatalogQuery {
    pub fn normalize(raw: &FindAllProducts) -> Self {
        let page = parse_whole(raw.page.as_deref()).map_or(1, |p| p.max(1));

        let limit = match parse_whole(raw.limit.as_deref()) {
            Some(l) if l > 0 => l.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };

        let skip = (page - 1).saturating_mul(limit);

        let keyword = raw
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned);

        let categories = raw
            .category
            .as_deref()
            .map(|c| {
                c.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            page,
            limit,
            skip,
            keyword,
            categories,
            min_price: parse_number(raw.min_price.as_deref()),
            max_price: parse_number(raw.max_price.as_deref()),
            sort: SortStrategy::parse_lenient(raw.sort.as_deref()),
        }
    }

    /// Keyword and category only. Price bounds are computed over this.
    pub fn scope_filter(&self) -> ProductFilter {
        let mut filter = ProductFilter::all();

        if let Some(keyword) = &self.keyword {
            filter = filter.with(FilterFragment::NameContains(keyword.clone()));
        }
        if !self.categories.is_empty() {
            filter = filter.with(FilterFragment::CategoryIn(self.categories.clone()));
        }

        filter
    }

    /// Scope filter plus the price range, used for count and paging.
    pub fn full_filter(&self) -> ProductFilter {
        let filter = self.scope_filter();

        if self.min_price.is_none() && self.max_price.is_none() {
            return filter;
        }

        filter.with(FilterFragment::PriceRange {
            min: self.min_price,
            max: self.max_price,
        })
    }

    pub fn pages(&self, count: i64) -> i64 {
        if count <= 0 {
            return 0;
        }
        (count + self.limit - 1) / self.limit
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

// `as` saturates, so absurdly large inputs land on i64::MAX instead of wrapping.
fn parse_whole(raw: Option<&str>) -> Option<i64> {
    parse_number(raw).map(|n| n.floor() as i64)
}
