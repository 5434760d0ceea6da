use crate::model::product::Product;
use std::fmt;

/// One independently toggleable constraint on the product set.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterFragment {
    /// Case-insensitive literal substring of the name.
    NameContains(String),
    CategoryIn(Vec<String>),
    /// Inclusive on both ends; a missing side is unbounded.
    PriceRange { min: Option<f64>, max: Option<f64> },
    HasTag(String),
}

impl FilterFragment {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            FilterFragment::NameContains(keyword) => product
                .name
                .to_lowercase()
                .contains(&keyword.to_lowercase()),
            FilterFragment::CategoryIn(categories) => {
                categories.iter().any(|c| *c == product.category)
            }
            FilterFragment::PriceRange { min, max } => {
                min.is_none_or(|min| product.price >= min)
                    && max.is_none_or(|max| product.price <= max)
            }
            FilterFragment::HasTag(tag) => product.has_tag(tag),
        }
    }
}

impl fmt::Display for FilterFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterFragment::NameContains(keyword) => write!(f, "name ~* {keyword:?}"),
            FilterFragment::CategoryIn(categories) => write!(f, "category in {categories:?}"),
            FilterFragment::PriceRange { min, max } => match (min, max) {
                (Some(min), Some(max)) => write!(f, "{min} <= price <= {max}"),
                (Some(min), None) => write!(f, "price >= {min}"),
                (None, Some(max)) => write!(f, "price <= {max}"),
                (None, None) => write!(f, "price any"),
            },
            FilterFragment::HasTag(tag) => write!(f, "tags has {tag:?}"),
        }
    }
}

/// AND of its fragments; no fragments matches every product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    fragments: Vec<FilterFragment>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, fragment: FilterFragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    pub fn fragments(&self) -> &[FilterFragment] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.fragments.iter().all(|f| f.matches(product))
    }
}

impl fmt::Display for ProductFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fragments.is_empty() {
            return write!(f, "<all>");
        }

        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{fragment}")?;
        }
        Ok(())
    }
}
