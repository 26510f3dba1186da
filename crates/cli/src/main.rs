//! Homestore CLI - Terminal front end for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! hs shop --search oak --sort price,desc --category Chairs --category Tables --page 2
//!
//! # Interactive browsing (filters and paging one line at a time)
//! hs browse
//!
//! # Log in and shop
//! hs login +375291234567 --password 'Sofa@2025oak'
//! hs cart add 12
//! hs cart checkout
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Catalog service base URL (default `http://localhost:3000`)
//! - `HOMESTORE_SESSION_FILE` - Session file (default `.homestore/session.json`)
//! - `RUST_LOG` - Log filter (logs go to stderr)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use homestore_core::{CartItemId, FavoriteId, Price, ProductId, ReviewId};
use homestore_storefront::Storefront;
use homestore_storefront::config::StorefrontConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "hs")]
#[command(author, version, about = "Homestore storefront in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the catalog
    Shop(commands::shop::ShopArgs),
    /// Browse the catalog interactively
    Browse,
    /// List product categories
    Categories,
    /// Show a product with its reviews
    Product {
        id: ProductId,
    },
    /// Manage your cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage your favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Write, edit or delete reviews
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Log in with a phone number or e-mail address
    Login {
        login: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Create an account
    Register(commands::account::RegisterArgs),
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Generate a password or nickname
    Generate {
        #[command(subcommand)]
        what: GenerateTarget,
    },
    /// Manage products (administrators)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    List,
    /// Add a product
    Add { product: ProductId },
    /// Change a line's quantity
    Set { line: CartItemId, quantity: u32 },
    /// Remove a line
    Remove { line: CartItemId },
    /// Buy everything in the cart
    Checkout,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Show favorites
    List,
    /// Add or remove a product
    Toggle { product: ProductId },
    /// Remove a favorite by its id
    Remove { favorite: FavoriteId },
    /// Add a favorite product to the cart
    ToCart { product: ProductId },
}

#[derive(Subcommand)]
enum ReviewAction {
    /// Review a purchased product
    Add {
        product: ProductId,
        /// Stars, 1 to 5
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long)]
        text: String,
    },
    /// Edit your review
    Edit {
        review: ReviewId,
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long)]
        text: String,
    },
    /// Delete your review
    Delete { review: ReviewId },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show your profile
    Show,
    /// Change profile fields; omitted fields keep their value
    Update(commands::account::ProfileArgs),
}

#[derive(Subcommand)]
enum GenerateTarget {
    /// A password the registration form accepts
    Password,
    /// A free nickname from first and last name
    Nickname {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add a product
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long)]
        price: Price,
        #[arg(short, long)]
        category: String,
        #[arg(short, long, default_value_t = 0.0)]
        rating: f64,
    },
    /// Change product fields
    Update {
        id: ProductId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        price: Option<Price>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a product and its reviews
    Delete { id: ProductId },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "homestore_storefront=info,homestore_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = Storefront::new(config)?;

    match cli.command {
        Commands::Shop(args) => commands::shop::show(&store, args).await?,
        Commands::Browse => commands::shop::browse(&store).await?,
        Commands::Categories => commands::shop::categories(&store).await?,
        Commands::Product { id } => commands::product::show(&store, id).await?,
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&store).await?,
            CartAction::Add { product } => commands::cart::add(&store, product).await?,
            CartAction::Set { line, quantity } => {
                commands::cart::set_quantity(&store, line, quantity).await?;
            }
            CartAction::Remove { line } => commands::cart::remove(&store, line).await?,
            CartAction::Checkout => commands::cart::checkout(&store).await?,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(&store).await?,
            FavoritesAction::Toggle { product } => {
                commands::favorites::toggle(&store, product).await?;
            }
            FavoritesAction::Remove { favorite } => {
                commands::favorites::remove(&store, favorite).await?;
            }
            FavoritesAction::ToCart { product } => {
                commands::favorites::to_cart(&store, product).await?;
            }
        },
        Commands::Review { action } => match action {
            ReviewAction::Add {
                product,
                rating,
                text,
            } => commands::product::add_review(&store, product, rating, &text).await?,
            ReviewAction::Edit {
                review,
                rating,
                text,
            } => commands::product::edit_review(&store, review, rating, &text).await?,
            ReviewAction::Delete { review } => {
                commands::product::delete_review(&store, review).await?;
            }
        },
        Commands::Login { login, password } => {
            commands::account::login(&store, login, password).await?;
        }
        Commands::Logout => commands::account::logout(&store).await?,
        Commands::Register(args) => commands::account::register(&store, args).await?,
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::account::show_profile(&store).await?,
            ProfileAction::Update(args) => {
                commands::account::update_profile(&store, args).await?;
            }
        },
        Commands::Generate { what } => match what {
            GenerateTarget::Password => commands::account::generate_password()?,
            GenerateTarget::Nickname { first, last } => {
                commands::account::generate_nickname(&store, &first, &last).await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Create {
                name,
                description,
                price,
                category,
                rating,
            } => {
                commands::admin::create(
                    &store,
                    homestore_core::NewProduct {
                        name,
                        description,
                        price,
                        category,
                        rating,
                    },
                )
                .await?;
            }
            AdminAction::Update {
                id,
                name,
                description,
                price,
                category,
            } => {
                commands::admin::update(
                    &store,
                    id,
                    homestore_core::ProductPatch {
                        name,
                        description,
                        price,
                        category,
                        rating: None,
                    },
                )
                .await?;
            }
            AdminAction::Delete { id } => commands::admin::delete(&store, id).await?,
        },
    }
    Ok(())
}
