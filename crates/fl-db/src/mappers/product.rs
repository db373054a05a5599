//! Product model -> entity mapper

use fl_core::entities::Product;
use fl_core::value_objects::ProductId;

use crate::models::ProductModel;

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Product {
            id: ProductId::from_uuid(model.id),
            name: model.name,
            description: model.description,
            price: model.price,
            image: model.image,
            category: model.category,
            is_new: model.is_new,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
