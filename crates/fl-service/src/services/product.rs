//! Product service
//!
//! Catalog CRUD for the storefront and the admin panel.

use tracing::{info, instrument};

use fl_core::entities::Product;
use fl_core::value_objects::ProductId;
use fl_core::DomainError;

use crate::dto::{MessageResponse, ProductRequest, ProductResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Product service
pub struct ProductService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProductService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All products, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<ProductResponse>> {
        let products = self.ctx.product_repo().find_all().await?;
        Ok(products.iter().map(ProductResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, product_id: &str) -> ServiceResult<ProductResponse> {
        let product = self.find(product_id).await?;
        Ok(ProductResponse::from(&product))
    }

    /// Create a product from an already validated request
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: ProductRequest) -> ServiceResult<ProductResponse> {
        let product = Product::new(ProductId::generate(), request.into_draft());
        self.ctx.product_repo().create(&product).await?;

        info!(product_id = %product.id, "Product created");
        Ok(ProductResponse::from(&product))
    }

    /// Replace every editable field of a product
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        product_id: &str,
        request: ProductRequest,
    ) -> ServiceResult<ProductResponse> {
        let mut product = self.find(product_id).await?;
        product.apply(request.into_draft());

        if !self.ctx.product_repo().update(&product).await? {
            return Err(DomainError::ProductNotFound(product_id.to_string()).into());
        }

        info!(product_id = %product.id, "Product updated");
        Ok(ProductResponse::from(&product))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, product_id: &str) -> ServiceResult<MessageResponse> {
        let id = parse_product_id(product_id)?;
        if !self.ctx.product_repo().delete(id).await? {
            return Err(DomainError::ProductNotFound(product_id.to_string()).into());
        }

        info!(product_id = %id, "Product deleted");
        Ok(MessageResponse::new("Producto eliminado"))
    }

    async fn find(&self, product_id: &str) -> ServiceResult<Product> {
        let id = parse_product_id(product_id)?;
        Ok(self
            .ctx
            .product_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ProductNotFound(product_id.to_string()))?)
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::ProductNotFound(raw.to_string()))
}
