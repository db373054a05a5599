//! In-memory ProductRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use fl_core::entities::Product;
use fl_core::traits::{ProductRepository, RepoResult};
use fl_core::value_objects::ProductId;

#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let mut products: Vec<Product> = self.products.read().values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        Ok(self.products.read().get(&id).cloned())
    }

    async fn create(&self, product: &Product) -> RepoResult<()> {
        self.products.write().insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> RepoResult<bool> {
        let mut products = self.products.write();
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ProductId) -> RepoResult<bool> {
        Ok(self.products.write().remove(&id).is_some())
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(self.products.read().len() as u64)
    }
}
