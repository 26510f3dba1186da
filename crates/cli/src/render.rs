//! Plain-text rendering of page view-models.

use std::io::{self, Write};

use homestore_core::User;
use homestore_storefront::filters::{rating_label, rating_stars};
use homestore_storefront::pages::shop::{FilterState, PaginationControls};
use homestore_storefront::pages::{
    Alert, AlertLevel, CartView, CatalogPage, FavoriteCard, ProductView,
};

pub fn alert(out: &mut impl Write, alert: &Alert) -> io::Result<()> {
    let marker = match alert.level {
        AlertLevel::Success => "✓",
        AlertLevel::Info => "i",
        AlertLevel::Error => "✗",
    };
    for line in alert.message.lines() {
        writeln!(out, "{marker} {line}")?;
    }
    Ok(())
}

pub fn catalog(out: &mut impl Write, page: &CatalogPage, filters: &FilterState) -> io::Result<()> {
    if filters.is_active() {
        writeln!(out, "Filters: {}", describe_filters(filters))?;
    }
    if page.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
    }

    writeln!(out, "{} product(s)", page.total_items)?;
    for card in &page.cards {
        let heart = if card.favorite { "♥" } else { " " };
        writeln!(
            out,
            "{heart} #{:<4} {:<32} {:>10}  {} {}  [{}]",
            card.id,
            card.name,
            card.price.to_string(),
            rating_stars(card.rating),
            rating_label(card.rating),
            card.category
        )?;
        if !card.description.is_empty() {
            writeln!(out, "         {}", card.description)?;
        }
    }
    pagination(out, &page.pagination)?;
    if page.admin {
        writeln!(out, "(admin: `hs admin update <id>` / `hs admin delete <id>`)")?;
    }
    Ok(())
}

pub fn pagination(out: &mut impl Write, controls: &PaginationControls) -> io::Result<()> {
    if controls.is_empty() {
        return Ok(());
    }
    let pages = controls
        .pages
        .iter()
        .map(|&p| {
            if p == controls.current_page {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let arrow = |enabled: bool, label: &'static str| if enabled { label } else { "  " };
    writeln!(
        out,
        "{} {} {pages} {} {}   {}",
        arrow(controls.first_enabled, "«"),
        arrow(controls.prev_enabled, "‹"),
        arrow(controls.next_enabled, "›"),
        arrow(controls.last_enabled, "»"),
        controls.label()
    )
}

fn describe_filters(filters: &FilterState) -> String {
    let mut parts = Vec::new();
    if !filters.search.is_empty() {
        parts.push(format!("search \"{}\"", filters.search));
    }
    if let Some(sort) = filters.sort {
        parts.push(format!("sort {sort}"));
    }
    if let Some(min) = filters.min_price {
        parts.push(format!("from {min}"));
    }
    if let Some(max) = filters.max_price {
        parts.push(format!("up to {max}"));
    }
    if !filters.categories.is_all() {
        parts.push(format!("in {}", filters.categories.labels().join(", ")));
    }
    parts.join("; ")
}

pub fn categories(out: &mut impl Write, labels: &[String]) -> io::Result<()> {
    writeln!(out, "All")?;
    for label in labels {
        writeln!(out, "{label}")?;
    }
    Ok(())
}

pub fn product(out: &mut impl Write, view: &ProductView) -> io::Result<()> {
    let product = &view.product;
    let heart = if view.favorite { " ♥" } else { "" };
    writeln!(out, "#{} {}{heart}", product.id, product.name)?;
    writeln!(out, "{}  |  {}", product.price, product.category)?;
    writeln!(
        out,
        "{} {}",
        rating_stars(product.rating),
        rating_label(product.rating)
    )?;
    writeln!(out, "Image: {}", view.image)?;
    if !product.description.is_empty() {
        writeln!(out, "\n{}", product.description)?;
    }

    writeln!(out, "\nReviews ({})", view.reviews.len())?;
    if view.reviews.is_empty() {
        writeln!(out, "  No reviews yet.")?;
    }
    for review in &view.reviews {
        let own = if review.own { " (yours)" } else { "" };
        writeln!(
            out,
            "  [{}] {} {} {}{own}",
            review.id, review.stars, review.author, review.date
        )?;
        writeln!(out, "      {}", review.text)?;
    }

    if let Some(notice) = view.review_notice() {
        writeln!(out, "\n{notice}")?;
    } else if view.can_review() {
        writeln!(
            out,
            "\nWrite a review: hs review add {} --rating <1-5> --text <text>",
            product.id
        )?;
    }
    Ok(())
}

pub fn cart(out: &mut impl Write, view: &CartView) -> io::Result<()> {
    if view.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }
    for line in &view.lines {
        writeln!(
            out,
            "[{}] {:<32} {:>3} x {:>10} = {:>10}",
            line.item.id,
            line.name(),
            line.quantity(),
            line.unit_price().to_string(),
            line.line_total().to_string()
        )?;
    }
    writeln!(
        out,
        "Total: {} item(s), {}",
        view.totals.items, view.totals.price
    )
}

pub fn favorites(out: &mut impl Write, cards: &[FavoriteCard]) -> io::Result<()> {
    if cards.is_empty() {
        writeln!(out, "No favorites yet.")?;
        return Ok(());
    }
    for card in cards {
        let price = card
            .price
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        writeln!(
            out,
            "[{}] #{:<4} {:<32} {:>10}",
            card.favorite_id, card.product_id, card.name, price
        )?;
    }
    Ok(())
}

pub fn profile(out: &mut impl Write, user: &User) -> io::Result<()> {
    writeln!(out, "Nickname:    {}", user.nickname)?;
    writeln!(
        out,
        "Name:        {} {} {}",
        user.last_name, user.first_name, user.middle_name
    )?;
    writeln!(out, "Phone:       {}", user.phone)?;
    writeln!(out, "E-mail:      {}", user.email)?;
    writeln!(out, "Birthdate:   {}", user.birthdate)?;
    writeln!(out, "Role:        {}", user.role)
}
