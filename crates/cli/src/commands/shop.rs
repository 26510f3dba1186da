//! Catalog commands: one-shot listing and interactive browsing.

use std::io::Write;

use clap::Args;
use homestore_core::{Price, ProductId};
use homestore_storefront::Storefront;
use homestore_storefront::pages::shop::SortKey;
use homestore_storefront::pages::{ShopEvent, ShopView};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{CliError, report};
use crate::render;

#[derive(Args)]
pub struct ShopArgs {
    /// Full-text search
    #[arg(short, long)]
    search: Option<String>,
    /// Sort key: `price`, `rating` or `name`, optionally `,asc`/`,desc`
    #[arg(long)]
    sort: Option<SortKey>,
    /// Lowest price
    #[arg(long)]
    min: Option<Price>,
    /// Highest price
    #[arg(long)]
    max: Option<Price>,
    /// Category to include; repeat for several
    #[arg(short, long = "category")]
    categories: Vec<String>,
    /// Page number
    #[arg(short, long, default_value_t = 1)]
    page: u32,
}

impl ShopArgs {
    fn into_view(self) -> ShopView {
        let mut view = ShopView::new();
        if let Some(search) = self.search {
            view.apply(ShopEvent::Search(search));
        }
        view.apply(ShopEvent::Sort(self.sort));
        view.apply(ShopEvent::PriceRange {
            min: self.min,
            max: self.max,
        });
        for category in self.categories {
            view.apply(ShopEvent::ToggleCategory(category));
        }
        view.page.request_page(self.page);
        view
    }
}

pub async fn show(store: &Storefront, args: ShopArgs) -> Result<(), CliError> {
    let session = store.session().await;
    let mut view = args.into_view();
    let page = store.shop().render(&mut view, session.as_ref()).await;
    render::catalog(&mut std::io::stdout().lock(), &page, &view.filters)?;
    Ok(())
}

pub async fn categories(store: &Storefront) -> Result<(), CliError> {
    let labels = store.shop().categories().await;
    render::categories(&mut std::io::stdout().lock(), &labels)?;
    Ok(())
}

// =============================================================================
// Interactive browsing
// =============================================================================

const BROWSE_HELP: &str = "\
search <text>       full-text search (empty clears)
sort <key>|none     price, rating or name, e.g. `sort price,desc`
price <min> <max>   price range, `-` for no bound
cat <label>         toggle a category
all                 all categories
reset               clear every filter
first|prev|next|last|page <n>
fav <id>            toggle favorite
cart <id>           add to cart
delete <id>         delete product (admin)
categories          list categories
quit";

/// One line typed in `hs browse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Event(ShopEvent),
    Favorite(ProductId),
    AddToCart(ProductId),
    Delete(ProductId),
    Categories,
    Refresh,
    Help,
    Quit,
}

pub(crate) fn parse_browse_line(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word {
        "" => BrowseCommand::Refresh,
        "search" => BrowseCommand::Event(ShopEvent::Search(rest.to_string())),
        "sort" if rest == "none" || rest.is_empty() => BrowseCommand::Event(ShopEvent::Sort(None)),
        "sort" => BrowseCommand::Event(ShopEvent::Sort(Some(rest.parse()?))),
        "price" => {
            let (min, max) = rest.split_once(' ').unwrap_or((rest, "-"));
            BrowseCommand::Event(ShopEvent::PriceRange {
                min: price_bound(min)?,
                max: price_bound(max)?,
            })
        }
        "cat" => BrowseCommand::Event(ShopEvent::ToggleCategory(rest.to_string())),
        "all" => BrowseCommand::Event(ShopEvent::AllCategories),
        "reset" => BrowseCommand::Event(ShopEvent::ResetFilters),
        "first" => BrowseCommand::Event(ShopEvent::FirstPage),
        "prev" => BrowseCommand::Event(ShopEvent::PrevPage),
        "next" => BrowseCommand::Event(ShopEvent::NextPage),
        "last" => BrowseCommand::Event(ShopEvent::LastPage),
        "page" => BrowseCommand::Event(ShopEvent::GoToPage(
            rest.parse().map_err(|_| format!("not a page number: '{rest}'"))?,
        )),
        "fav" => BrowseCommand::Favorite(product_id(rest)?),
        "cart" => BrowseCommand::AddToCart(product_id(rest)?),
        "delete" => BrowseCommand::Delete(product_id(rest)?),
        "categories" => BrowseCommand::Categories,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("unknown command '{other}', try `help`")),
    };
    Ok(command)
}

fn price_bound(value: &str) -> Result<Option<Price>, String> {
    match value.trim() {
        "" | "-" => Ok(None),
        v => v.parse().map(Some).map_err(|e| format!("{e}")),
    }
}

fn product_id(value: &str) -> Result<ProductId, String> {
    value.parse().map_err(|e| format!("{e}"))
}

/// Read commands from stdin until `quit` or end of input, re-rendering the
/// catalog after every change.
pub async fn browse(store: &Storefront) -> Result<(), CliError> {
    let shop = store.shop();
    let mut view = ShopView::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let session = store.session().await;
    let page = shop.render(&mut view, session.as_ref()).await;
    render::catalog(&mut std::io::stdout().lock(), &page, &view.filters)?;

    loop {
        write!(std::io::stdout().lock(), "> ")?;
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_browse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(std::io::stdout().lock(), "{message}")?;
                continue;
            }
        };

        let session = store.session().await;
        let refresh = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                writeln!(std::io::stdout().lock(), "{BROWSE_HELP}")?;
                false
            }
            BrowseCommand::Categories => {
                categories(store).await?;
                false
            }
            BrowseCommand::Refresh => true,
            BrowseCommand::Event(event) => view.apply(event),
            BrowseCommand::Favorite(id) => {
                show_alert(&shop.toggle_favorite(session.as_ref(), id).await)?;
                true
            }
            BrowseCommand::AddToCart(id) => {
                show_alert(&shop.add_to_cart(session.as_ref(), id).await)?;
                false
            }
            BrowseCommand::Delete(id) => {
                show_alert(&shop.delete_product(session.as_ref(), id).await)?;
                true
            }
        };

        if refresh {
            let page = shop.render(&mut view, session.as_ref()).await;
            render::catalog(&mut std::io::stdout().lock(), &page, &view.filters)?;
        }
    }
    Ok(())
}

/// In browse mode an error alert is shown, not fatal.
fn show_alert(alert: &homestore_storefront::pages::Alert) -> Result<(), CliError> {
    match report(alert) {
        Err(CliError::Refused(message)) => {
            writeln!(std::io::stdout().lock(), "✗ {message}")?;
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            parse_browse_line("search  oak table ").unwrap(),
            BrowseCommand::Event(ShopEvent::Search("oak table".to_string()))
        );
        assert_eq!(
            parse_browse_line("sort none").unwrap(),
            BrowseCommand::Event(ShopEvent::Sort(None))
        );
        assert_eq!(
            parse_browse_line("cat Chairs").unwrap(),
            BrowseCommand::Event(ShopEvent::ToggleCategory("Chairs".to_string()))
        );
        assert_eq!(
            parse_browse_line("price - 250").unwrap(),
            BrowseCommand::Event(ShopEvent::PriceRange {
                min: None,
                max: Some("250".parse().unwrap()),
            })
        );
    }

    #[test]
    fn test_parse_navigation_and_actions() {
        assert_eq!(
            parse_browse_line("page 3").unwrap(),
            BrowseCommand::Event(ShopEvent::GoToPage(3))
        );
        assert_eq!(
            parse_browse_line("cart 12").unwrap(),
            BrowseCommand::AddToCart(ProductId::new(12))
        );
        assert_eq!(parse_browse_line("").unwrap(), BrowseCommand::Refresh);
        assert_eq!(parse_browse_line("q").unwrap(), BrowseCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_browse_line("page three").is_err());
        assert!(parse_browse_line("fav x").is_err());
        assert!(parse_browse_line("sort colour").is_err());
        assert!(parse_browse_line("dance").is_err());
    }

    #[test]
    fn test_args_build_view() {
        let args = ShopArgs {
            search: Some("oak".to_string()),
            sort: Some("price,desc".parse().unwrap()),
            min: None,
            max: Some("300".parse().unwrap()),
            categories: vec!["Chairs".to_string(), "Tables".to_string()],
            page: 2,
        };
        let view = args.into_view();
        assert_eq!(view.page.current_page(), 2);
        assert_eq!(
            view.filters.to_query(2, 12).to_string(),
            "_page=2&_limit=12&q=oak&_sort=price&_order=desc&price_lte=300\
             &category_like=Chairs&category_like=Tables"
        );
    }
}
