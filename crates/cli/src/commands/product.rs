//! Product page and review commands.

use homestore_core::{ProductId, ReviewId};
use homestore_storefront::Storefront;

use super::{CliError, report};
use crate::render;

pub async fn show(store: &Storefront, id: ProductId) -> Result<(), CliError> {
    let session = store.session().await;
    let view = store.product_page().render(session.as_ref(), id).await?;
    render::product(&mut std::io::stdout().lock(), &view)?;
    Ok(())
}

pub async fn add_review(
    store: &Storefront,
    product: ProductId,
    rating: u8,
    text: &str,
) -> Result<(), CliError> {
    let session = store.session().await;
    report(
        &store
            .product_page()
            .submit_review(session.as_ref(), product, text, rating)
            .await,
    )
}

pub async fn edit_review(
    store: &Storefront,
    review: ReviewId,
    rating: u8,
    text: &str,
) -> Result<(), CliError> {
    let session = store.session().await;
    report(
        &store
            .product_page()
            .edit_review(session.as_ref(), review, text, rating)
            .await,
    )
}

pub async fn delete_review(store: &Storefront, review: ReviewId) -> Result<(), CliError> {
    let session = store.session().await;
    report(
        &store
            .product_page()
            .delete_review(session.as_ref(), review)
            .await,
    )
}
