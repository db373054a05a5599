//! Startup seeding of the catalog and the admin account

use tracing::{info, instrument, warn};

use fl_common::{hash_password, BootstrapConfig};
use fl_core::entities::{AdminUser, Product, ProductDraft};
use fl_core::value_objects::ProductId;

use super::context::ServiceContext;
use super::error::ServiceResult;

fn sample_products() -> [ProductDraft; 4] {
    let product = |name: &str, description: &str, price: f64, image: u8, category: &str, is_new| {
        ProductDraft {
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: format!("https://picsum.photos/400/400?random={image}"),
            category: category.to_string(),
            is_new,
        }
    };

    [
        product(
            "Producto Premium 1",
            "Producto innovador con tecnología de última generación",
            299.99,
            1,
            "Tecnología",
            true,
        ),
        product(
            "Producto Premium 2",
            "Diseño futurista y funcionalidad avanzada",
            499.99,
            2,
            "Premium",
            true,
        ),
        product(
            "Producto Especial 3",
            "Calidad superior para clientes exigentes",
            199.99,
            3,
            "Especial",
            false,
        ),
        product(
            "Producto Elite 4",
            "La mejor opción del mercado actual",
            799.99,
            4,
            "Elite",
            true,
        ),
    ]
}

/// Seed sample products into an empty catalog and create the admin account
/// when a password is configured and the account does not exist yet.
#[instrument(skip_all)]
pub async fn seed(ctx: &ServiceContext, config: &BootstrapConfig) -> ServiceResult<()> {
    if config.seed_sample_products && ctx.product_repo().count().await? == 0 {
        for draft in sample_products() {
            ctx.product_repo()
                .create(&Product::new(ProductId::generate(), draft))
                .await?;
        }
        info!("Seeded sample products");
    }

    match &config.admin_password {
        Some(password) => {
            let users = ctx.user_repo();
            if users.find_by_username(&config.admin_username).await?.is_none() {
                let hash = hash_password(password)?;
                users
                    .create(&AdminUser::new(config.admin_username.clone(), hash))
                    .await?;
                info!(username = %config.admin_username, "Seeded admin account");
            }
        }
        None if ctx.user_repo().count().await? == 0 => {
            warn!("No admin account and ADMIN_PASSWORD unset; login is disabled");
        }
        None => {}
    }

    Ok(())
}
