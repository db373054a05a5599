//! Request DTOs for API endpoints
//!
//! The storefront forms post loosely typed JSON (ratings as strings, checkboxes
//! as `"on"`), so the review request keeps raw values and normalizes them in
//! [`CreateReviewRequest::into_draft`].

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use fl_core::entities::{ProductDraft, ReviewDraft};
use fl_core::value_objects::Rating;
use fl_core::DomainError;

// ============================================================================
// Review Requests
// ============================================================================

/// Public review submission
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateReviewRequest {
    pub customer_name: Value,
    pub product_id: Value,
    pub product_name: Value,
    pub category: Value,
    pub rating: Value,
    pub comment: Value,
    pub recommend: Value,
}

impl CreateReviewRequest {
    /// Validate and normalize into a draft.
    ///
    /// Every missing field is reported at once. The rating is only checked
    /// once all fields are present.
    pub fn into_draft(self) -> Result<ReviewDraft, DomainError> {
        let customer_name = text(&self.customer_name);
        let product_id = text(&self.product_id);
        let product_name = text(&self.product_name);
        let category = text(&self.category);
        let comment = text(&self.comment);
        let rating_present = !is_blank(&self.rating);

        let mut missing = Vec::new();
        for (field, present) in [
            ("customerName", customer_name.is_some()),
            ("productId", product_id.is_some()),
            ("productName", product_name.is_some()),
            ("category", category.is_some()),
            ("rating", rating_present),
            ("comment", comment.is_some()),
        ] {
            if !present {
                missing.push(field);
            }
        }

        match (customer_name, product_id, product_name, category, comment) {
            (Some(customer_name), Some(product_id), Some(product_name), Some(category), Some(comment))
                if missing.is_empty() =>
            {
                Ok(ReviewDraft {
                    customer_name,
                    product_id,
                    product_name,
                    category,
                    rating: rating(&self.rating)?,
                    comment,
                    recommend: flag(&self.recommend),
                })
            }
            _ => Err(DomainError::MissingFields(missing)),
        }
    }
}

/// Query string of the public listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicReviewsQuery {
    pub visitor_id: Option<String>,
}

/// Like toggle body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LikeRequest {
    pub visitor_id: Option<String>,
    pub liked: Value,
}

impl LikeRequest {
    /// Whether the visitor wants the like present
    pub fn wants_like(&self) -> bool {
        flag(&self.liked)
    }
}

/// Moderation status change
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

// ============================================================================
// Product Requests
// ============================================================================

/// Create or replace a product
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 200, message = "El nombre es obligatorio"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0.0, message = "El precio no puede ser negativo"))]
    pub price: f64,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub is_new: bool,
}

impl ProductRequest {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            image: self.image.trim().to_string(),
            category: self.category.trim().to_string(),
            is_new: self.is_new,
        }
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Admin login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "El usuario es obligatorio"))]
    pub username: String,

    #[validate(length(min = 1, message = "La contraseña es obligatoria"))]
    pub password: String,
}

// ============================================================================
// Visit Requests
// ============================================================================

/// Visit beacon
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitRequest {
    pub visitor_id: Option<String>,
}

// ============================================================================
// Coercion helpers
// ============================================================================

/// Trimmed non-empty text. Numbers are accepted as their decimal text.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn rating(value: &Value) -> Result<Rating, DomainError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or(DomainError::InvalidRating)
            .and_then(Rating::from_number),
        Value::String(s) => Rating::parse(s),
        _ => Err(DomainError::InvalidRating),
    }
}

/// Checkbox-style truthiness
fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "on" | "yes"
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CreateReviewRequest {
        serde_json::from_value(body).unwrap()
    }

    fn complete() -> Value {
        json!({
            "customerName": "  Ana  ",
            "productId": "p-1",
            "productName": "Lámpara",
            "category": "Hogar",
            "rating": 5,
            "comment": " Excelente ",
            "recommend": true
        })
    }

    #[test]
    fn test_complete_request_is_trimmed() {
        let draft = request(complete()).into_draft().unwrap();
        assert_eq!(draft.customer_name, "Ana");
        assert_eq!(draft.comment, "Excelente");
        assert_eq!(draft.rating.stars(), 5);
        assert!(draft.recommend);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let err = request(json!({ "customerName": "   ", "rating": "" }))
            .into_draft()
            .unwrap_err();
        match err {
            DomainError::MissingFields(fields) => assert_eq!(
                fields,
                vec!["customerName", "productId", "productName", "category", "rating", "comment"]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rating_validation() {
        for bad in [json!(0), json!(6), json!(4.5), json!("cinco"), json!(true)] {
            let mut body = complete();
            body["rating"] = bad.clone();
            assert!(
                matches!(request(body).into_draft(), Err(DomainError::InvalidRating)),
                "rating {bad} should be rejected"
            );
        }

        let mut body = complete();
        body["rating"] = json!(" 3 ");
        assert_eq!(request(body).into_draft().unwrap().rating.stars(), 3);
    }

    #[test]
    fn test_recommend_coercion() {
        for (value, expected) in [
            (json!("on"), true),
            (json!("YES"), true),
            (json!("1"), true),
            (json!(1), true),
            (json!(0), false),
            (json!("no"), false),
            (Value::Null, false),
        ] {
            let mut body = complete();
            body["recommend"] = value.clone();
            assert_eq!(
                request(body).into_draft().unwrap().recommend,
                expected,
                "recommend {value}"
            );
        }
    }

    #[test]
    fn test_numeric_product_id_accepted() {
        let mut body = complete();
        body["productId"] = json!(42);
        assert_eq!(request(body).into_draft().unwrap().product_id, "42");
    }

    #[test]
    fn test_like_request_defaults_to_unlike() {
        let req: LikeRequest = serde_json::from_value(json!({ "visitorId": "v1" })).unwrap();
        assert!(!req.wants_like());

        let req: LikeRequest =
            serde_json::from_value(json!({ "visitorId": "v1", "liked": true })).unwrap();
        assert!(req.wants_like());
    }

    #[test]
    fn test_product_request_validation() {
        let req: ProductRequest =
            serde_json::from_value(json!({ "name": "Mesa", "price": -1.0 })).unwrap();
        assert!(req.validate().is_err());

        let req: ProductRequest =
            serde_json::from_value(json!({ "name": " Mesa ", "price": 10.5, "isNew": true }))
                .unwrap();
        assert!(req.validate().is_ok());
        let draft = req.into_draft();
        assert_eq!(draft.name, "Mesa");
        assert!(draft.is_new);
    }
}
