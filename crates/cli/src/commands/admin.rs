//! Admin product commands.
//!
//! # Usage
//!
//! ```bash
//! hs admin create -n "Oak chair" -p 149.99 -c Chairs -d "Solid oak"
//! hs admin update 12 --price 129.99
//! hs admin delete 12
//! ```
//!
//! The stored session must belong to an administrator.

use homestore_core::{NewProduct, ProductId, ProductPatch};
use homestore_storefront::Storefront;

use super::{CliError, report};

pub async fn create(store: &Storefront, product: NewProduct) -> Result<(), CliError> {
    let session = store.session().await;
    tracing::info!("Creating product: {}", product.name);
    report(&store.admin().create(session.as_ref(), &product).await)
}

pub async fn update(store: &Storefront, id: ProductId, patch: ProductPatch) -> Result<(), CliError> {
    let session = store.session().await;
    report(&store.admin().update(session.as_ref(), id, &patch).await)
}

pub async fn delete(store: &Storefront, id: ProductId) -> Result<(), CliError> {
    let session = store.session().await;
    report(&store.admin().delete(session.as_ref(), id).await)
}
