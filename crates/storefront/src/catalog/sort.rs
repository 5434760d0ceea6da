use crate::model::product::Product;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStrategy {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    TopSellers,
    Recommended,
    /// Trending view; not reachable from the `sort` query parameter.
    MostViewed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Price,
    ViewCount,
    Rating,
    IsRecommended,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Price => "price",
            SortField::ViewCount => "view_count",
            SortField::Rating => "rating",
            SortField::IsRecommended => "is_recommended",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::ViewCount => a.view_count.cmp(&b.view_count),
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::IsRecommended => a.is_recommended.cmp(&b.is_recommended),
        }
    }
}

impl SortStrategy {
    /// Unknown or missing values fall back to `Newest`.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("price_asc") => SortStrategy::PriceAsc,
            Some("price_desc") => SortStrategy::PriceDesc,
            Some("top_sellers") => SortStrategy::TopSellers,
            Some("recommended") => SortStrategy::Recommended,
            _ => SortStrategy::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::Newest => "newest",
            SortStrategy::PriceAsc => "price_asc",
            SortStrategy::PriceDesc => "price_desc",
            SortStrategy::TopSellers => "top_sellers",
            SortStrategy::Recommended => "recommended",
            SortStrategy::MostViewed => "most_viewed",
        }
    }

    /// `(field, descending)` pairs, most significant first.
    pub fn keys(&self) -> &'static [(SortField, bool)] {
        match self {
            SortStrategy::Newest => &[(SortField::CreatedAt, true)],
            SortStrategy::PriceAsc => &[(SortField::Price, false)],
            SortStrategy::PriceDesc => &[(SortField::Price, true)],
            SortStrategy::TopSellers => &[(SortField::ViewCount, true), (SortField::Rating, true)],
            SortStrategy::Recommended => &[
                (SortField::IsRecommended, true),
                (SortField::Rating, true),
            ],
            SortStrategy::MostViewed => &[(SortField::ViewCount, true)],
        }
    }

    /// Ties on every key are broken by id ascending so paging is stable.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        self.keys()
            .iter()
            .map(|(field, descending)| {
                let ord = field.compare(a, b);
                if *descending { ord.reverse() } else { ord }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }

    pub fn order_by_sql(&self) -> String {
        let mut clauses: Vec<String> = self
            .keys()
            .iter()
            .map(|(field, descending)| {
                format!(
                    "{} {}",
                    field.column(),
                    if *descending { "DESC" } else { "ASC" }
                )
            })
            .collect();
        clauses.push("id ASC".to_string());
        clauses.join(", ")
    }
}
