//! Product entity - an item in the store catalog

use chrono::{DateTime, Utc};

use crate::value_objects::ProductId;

/// Editable product fields, shared by create and full update
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub is_new: bool,
}

/// Product entity
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub is_new: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new Product
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: draft.image,
            category: draft.category,
            is_new: draft.is_new,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all editable fields, keeping identity and creation time
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.image = draft.image;
        self.category = draft.category;
        self.is_new = draft.is_new;
        self.updated_at = Utc::now();
    }
}
