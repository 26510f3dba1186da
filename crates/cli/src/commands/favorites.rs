//! Favorites commands.

use homestore_core::{FavoriteId, ProductId};
use homestore_storefront::Storefront;

use super::{CliError, report};
use crate::render;

pub async fn list(store: &Storefront) -> Result<(), CliError> {
    let session = store.session().await;
    let cards = store.favorites().render(session.as_ref()).await?;
    render::favorites(&mut std::io::stdout().lock(), &cards)?;
    Ok(())
}

pub async fn toggle(store: &Storefront, product: ProductId) -> Result<(), CliError> {
    let session = store.session().await;
    report(&store.shop().toggle_favorite(session.as_ref(), product).await)
}

pub async fn remove(store: &Storefront, favorite: FavoriteId) -> Result<(), CliError> {
    let session = store.session().await;
    report(&store.favorites().remove(session.as_ref(), favorite).await)
}

pub async fn to_cart(store: &Storefront, product: ProductId) -> Result<(), CliError> {
    let session = store.session().await;
    report(&store.favorites().add_to_cart(session.as_ref(), product).await)
}
