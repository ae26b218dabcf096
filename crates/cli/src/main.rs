//! Marketplace CLI - Browse the catalog and manage a cart, wishlist, and
//! orders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! mp-cli shop list
//! mp-cli shop search walnut
//! mp-cli shop show 3
//!
//! # Build a cart and check out
//! mp-cli cart add 3
//! mp-cli cart show
//! mp-cli cart checkout -s "1 Main St, Springfield"
//!
//! # Save products for later
//! mp-cli wishlist toggle 3
//!
//! # Review orders
//! mp-cli orders list
//! mp-cli orders track MP-2024-001
//! ```
//!
//! # Commands
//!
//! - `shop` - Browse products and categories
//! - `cart` - Manage the cart and check out
//! - `wishlist` - Save products for later
//! - `orders` - Review and track orders
//!
//! Cart and wishlist state persists under `MARKETPLACE_DATA_DIR` between
//! runs, so the cart built in one invocation is still there for the next.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use marketplace_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "mp-cli")]
#[command(author, version, about = "Marketplace CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products and categories
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Manage the cart and check out
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Save products for later
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Review and track orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum ShopAction {
    /// List every product
    List,
    /// List the featured products
    Featured,
    /// List the categories
    Categories,
    /// List the products in a category
    Category {
        /// Category name (case-insensitive)
        name: String,
    },
    /// Search products by name, description, or category
    Search {
        /// Search query
        query: String,
    },
    /// Show one product along with recommendations
    Show {
        /// Product id
        id: i32,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and totals
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: i32,
    },
    /// Set the quantity of a cart line
    SetQuantity {
        /// Product id
        id: i32,
        /// New quantity; zero or less removes the line
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Price the cart and place an order
    Checkout {
        /// Payment method
        #[arg(short, long, default_value = "card")]
        payment_method: String,

        /// Shipping address
        #[arg(short, long)]
        shipping_address: String,

        /// Billing address (defaults to the shipping address)
        #[arg(short, long)]
        billing_address: Option<String>,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the saved products
    Show,
    /// Save a product
    Add {
        /// Product id
        id: i32,
    },
    /// Remove a saved product
    Remove {
        /// Product id
        id: i32,
    },
    /// Save a product, or remove it if already saved
    Toggle {
        /// Product id
        id: i32,
    },
    /// Clear the wishlist
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List every order
    List,
    /// Show one order in full
    Show {
        /// Order id
        id: i32,
    },
    /// Look an order up by its order number
    Track {
        /// Order number, e.g. MP-2024-001
        number: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = AppState::from_env()?;

    match cli.command {
        Commands::Shop { action } => match action {
            ShopAction::List => commands::shop::list(&state).await?,
            ShopAction::Featured => commands::shop::featured(&state).await?,
            ShopAction::Categories => commands::shop::categories(&state).await?,
            ShopAction::Category { name } => commands::shop::category(&state, &name).await?,
            ShopAction::Search { query } => commands::shop::search(&state, &query).await?,
            ShopAction::Show { id } => commands::shop::show(&state, id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id } => commands::cart::add(&mut state, id).await?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, id),
            CartAction::SetQuantity { id, quantity } => {
                commands::cart::set_quantity(&mut state, id, quantity);
            }
            CartAction::Clear => commands::cart::clear(&mut state),
            CartAction::Checkout {
                payment_method,
                shipping_address,
                billing_address,
            } => {
                commands::cart::checkout(
                    &mut state,
                    payment_method,
                    shipping_address,
                    billing_address,
                )
                .await?;
            }
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&state),
            WishlistAction::Add { id } => commands::wishlist::add(&mut state, id).await?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut state, id),
            WishlistAction::Toggle { id } => commands::wishlist::toggle(&mut state, id).await?,
            WishlistAction::Clear => commands::wishlist::clear(&mut state),
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&state).await?,
            OrdersAction::Show { id } => commands::orders::show(&state, id).await?,
            OrdersAction::Track { number } => commands::orders::track(&state, &number).await?,
        },
    }
    Ok(())
}
