use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use serde_json::json;
use url::Url;

mod cart;
mod catalog;
mod checkout;
mod client;
mod formatting;
mod reconcile;
mod session;
mod storage;

use cart::{add_or_increment, change_quantity, clear_cart, load_cart, save_cart};
use checkout::{place_order, validate_registration, CustomerInfo};
use client::StorefrontClient;
use formatting::{format_cart, format_catalog, format_orders, format_users};
use session::{current_user, logout, save_user, SessionUser};
use storage::FileStore;

#[derive(Parser, Debug)]
#[command(version, about = "Command-line storefront client for the Zelaina plant shop")]
pub struct Arguments {
    /// The storefront server to talk to
    #[arg(short, long, default_value = "http://127.0.0.1:3000", env = "ZSF_SERVER")]
    server: Url,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the product catalog with canonical prices
    Catalog,
    /// Show the cart with reconciled prices and the current total
    Cart,
    /// Add one unit of a product to the cart
    Add {
        name: String,
        /// Unit price to record on a new line. Omitted means the catalog price is used at
        /// display and checkout time.
        #[arg(short, long)]
        price: Option<f64>,
    },
    /// Increase the quantity of a cart line by one
    Plus { name: String },
    /// Decrease the quantity of a cart line by one, removing it at zero
    Minus { name: String },
    /// Empty the cart
    Clear,
    /// Submit the cart as an order
    Checkout(CheckoutParams),
    /// Register a new account
    Register(RegisterParams),
    /// Log in to an existing account
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out, clearing the session and the cart
    Logout,
    /// Show the order history for the logged-in user
    Orders,
    /// Show every order in the store
    AllOrders,
    /// List registered users
    Users,
    /// Check that the server is up
    Health,
}

#[derive(Debug, Args)]
pub struct CheckoutParams {
    /// Customer name for the order
    #[arg(short, long)]
    name: String,
    /// Contact phone number
    #[arg(short, long)]
    phone: String,
    /// Free-form note to attach to the order
    #[arg(long, default_value = "")]
    note: String,
}

#[derive(Debug, Args)]
pub struct RegisterParams {
    #[arg(short, long)]
    name: String,
    #[arg(short, long)]
    email: String,
    #[arg(short, long)]
    password: String,
    /// Repeat the password to confirm it
    #[arg(short, long)]
    confirm: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Arguments::parse();
    let mut store = FileStore::in_home_dir()?;
    let client = StorefrontClient::new(args.server)?;

    match args.command {
        Command::Catalog => println!("{}", format_catalog()),
        Command::Cart => println!("{}", format_cart(&load_cart(&store))),
        Command::Add { name, price } => {
            let mut cart = load_cart(&store);
            let price = price.map(|p| json!(p)).unwrap_or_default();
            add_or_increment(&mut cart, &name, price);
            save_cart(&mut store, &cart)?;
            println!("{}", format_cart(&cart));
        },
        Command::Plus { name } => {
            let mut cart = load_cart(&store);
            change_quantity(&mut cart, &name, 1);
            save_cart(&mut store, &cart)?;
            println!("{}", format_cart(&cart));
        },
        Command::Minus { name } => {
            let mut cart = load_cart(&store);
            change_quantity(&mut cart, &name, -1);
            save_cart(&mut store, &cart)?;
            println!("{}", format_cart(&cart));
        },
        Command::Clear => {
            clear_cart(&mut store)?;
            println!("Your cart is empty.");
        },
        Command::Checkout(params) => {
            let info = CustomerInfo { name: params.name, phone: params.phone, note: params.note };
            let response = place_order(&mut store, &client, &info).await?;
            println!("{} Order #{}.", response.message, response.order.id);
        },
        Command::Register(params) => {
            validate_registration(&params.email, &params.password, &params.confirm)?;
            let auth = client.register(&params.name, &params.email, &params.password).await?;
            save_user(&mut store, &SessionUser { id: auth.user.id, name: auth.user.name.clone() })?;
            println!("{} Welcome, {}.", auth.message, auth.user.name);
        },
        Command::Login { email, password } => {
            let auth = client.login(&email, &password).await?;
            save_user(&mut store, &SessionUser { id: auth.user.id, name: auth.user.name.clone() })?;
            println!("{} Welcome back, {}.", auth.message, auth.user.name);
        },
        Command::Logout => {
            logout(&mut store)?;
            println!("Logged out.");
        },
        Command::Orders => {
            let user = current_user(&store).ok_or_else(|| anyhow!("Log in first to see your orders"))?;
            let orders = client.orders_for_user(user.id).await?;
            println!("{}", format_orders(&orders));
        },
        Command::AllOrders => {
            let orders = client.all_orders().await?;
            println!("{}", format_orders(&orders));
        },
        Command::Users => {
            let users = client.users().await?;
            println!("{}", format_users(&users));
        },
        Command::Health => {
            let response = client.health().await?;
            print!("{response}");
        },
    }
    Ok(())
}
