//! Cart commands.

use homestore_core::{CartItemId, ProductId};
use homestore_storefront::Storefront;

use super::{CliError, report};
use crate::render;

pub async fn list(store: &Storefront) -> Result<(), CliError> {
    let session = store.session().await;
    let view = store.cart().render(session.as_ref()).await?;
    render::cart(&mut std::io::stdout().lock(), &view)?;
    Ok(())
}

pub async fn add(store: &Storefront, product: ProductId) -> Result<(), CliError> {
    let session = store.session().await;
    report(&store.shop().add_to_cart(session.as_ref(), product).await)
}

pub async fn set_quantity(
    store: &Storefront,
    line: CartItemId,
    quantity: u32,
) -> Result<(), CliError> {
    let session = store.session().await;
    report(
        &store
            .cart()
            .update_quantity(session.as_ref(), line, quantity)
            .await,
    )
}

pub async fn remove(store: &Storefront, line: CartItemId) -> Result<(), CliError> {
    let session = store.session().await;
    report(&store.cart().remove(session.as_ref(), line).await)
}

pub async fn checkout(store: &Storefront) -> Result<(), CliError> {
    let session = store.session().await;
    report(&store.cart().checkout(session.as_ref()).await)
}
