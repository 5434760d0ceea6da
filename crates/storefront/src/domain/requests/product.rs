use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Raw listing parameters as they arrive on the query string. Kept as text
/// so malformed numbers are normalised instead of rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindAllProducts {
    /// 1-based page, defaults to 1
    pub page: Option<String>,
    /// Page size, defaults to 12, capped at 100
    pub limit: Option<String>,
    /// Case-insensitive substring of the product name
    pub keyword: Option<String>,
    /// Comma-separated list of categories
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// newest | price_asc | price_desc | top_sellers | recommended
    pub sort: Option<String>,
}

/// Built from raw query pairs: the first value of a repeated key wins and
/// unknown keys are ignored.
impl FromIterator<(String, String)> for FindAllProducts {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = FindAllProducts::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "keyword" => &mut params.keyword,
                "category" => &mut params.category,
                "minPrice" => &mut params.min_price,
                "maxPrice" => &mut params.max_price,
                "sort" => &mut params.sort,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_required_fields", skip_on_field_errors = false))]
pub struct CreateProductRequest {
    #[serde(default)]
    #[schema(example = "Wireless Headphones")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[schema(example = 199.99)]
    pub price: f64,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    #[schema(example = "electronics")]
    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Please add a brand"))]
    pub brand: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Please add a stock"))]
    pub stock: String,

    #[validate(required(message = "Please add a countInStock"))]
    pub count_in_stock: Option<i32>,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Please add a color"))]
    pub color: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Please add a warranty"))]
    pub warranty: String,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    pub is_recommended: Option<bool>,
}

/// name, description, price, image and category are checked together and
/// share one message.
fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_required_fields(req: &CreateProductRequest) -> Result<(), ValidationError> {
    let missing_text = [&req.name, &req.description, &req.image, &req.category]
        .iter()
        .any(|s| s.trim().is_empty());

    if missing_text || req.price <= 0.0 || req.price.is_nan() {
        return Err(ValidationError::new("required")
            .with_message(Cow::from("All fields are required")));
    }
    Ok(())
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(custom(function = "non_blank", message = "Please add a name"))]
    pub name: Option<String>,

    #[validate(custom(function = "non_blank", message = "Please add a description"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,

    #[validate(custom(function = "non_blank", message = "Please add an image"))]
    pub image: Option<String>,

    #[validate(custom(function = "non_blank", message = "Please add a category"))]
    pub category: Option<String>,

    pub tags: Option<Vec<String>>,

    #[validate(custom(function = "non_blank", message = "Please add a brand"))]
    pub brand: Option<String>,

    #[validate(custom(function = "non_blank", message = "Please add a stock"))]
    pub stock: Option<String>,

    pub count_in_stock: Option<i32>,

    #[validate(custom(function = "non_blank", message = "Please add a color"))]
    pub color: Option<String>,

    #[validate(custom(function = "non_blank", message = "Please add a warranty"))]
    pub warranty: Option<String>,

    /// Administrative correction of the view counter.
    #[validate(range(min = 0, message = "View count cannot be negative"))]
    pub view_count: Option<i64>,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    pub is_recommended: Option<bool>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.brand.is_none()
            && self.stock.is_none()
            && self.count_in_stock.is_none()
            && self.color.is_none()
            && self.warranty.is_none()
            && self.view_count.is_none()
            && self.rating.is_none()
            && self.is_recommended.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::validation_message;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_value_of_a_repeated_key_wins() {
        let params: FindAllProducts = pairs(&[
            ("category", "audio"),
            ("limit", "5"),
            ("category", "books"),
            ("limit", "6"),
            ("minPrice", "10"),
            ("utm_source", "mail"),
        ])
        .into_iter()
        .collect();

        assert_eq!(params.category.as_deref(), Some("audio"));
        assert_eq!(params.limit.as_deref(), Some("5"));
        assert_eq!(params.min_price.as_deref(), Some("10"));
        assert_eq!(params.page, None);
    }

    #[test]
    fn blank_update_fields_are_rejected() {
        let req = UpdateProductRequest {
            name: Some("   ".into()),
            ..Default::default()
        };

        let errors = req.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "Please add a name");

        let req = UpdateProductRequest {
            name: Some(" Desk ".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_model_fields_are_rejected_on_create() {
        let req = CreateProductRequest {
            name: "Lamp".into(),
            description: "Warm light".into(),
            price: 30.0,
            image: "/lamp.jpg".into(),
            category: "home".into(),
            brand: "Acme".into(),
            stock: "in stock".into(),
            count_in_stock: Some(3),
            color: "\t".into(),
            warranty: "1 year".into(),
            ..Default::default()
        };

        let errors = req.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "Please add a color");
    }
}
