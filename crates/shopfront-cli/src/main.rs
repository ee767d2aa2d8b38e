use anyhow::Result;
use clap::{Parser, Subcommand};
use shopfront_core::Role;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod notifier;

use context::{AppContext, GlobalOptions};

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(about = "Shopfront CLI - customer and seller client for the shop backend", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config.toml and SHOPFRONT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to config.toml (overrides SHOPFRONT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// customer or seller
        #[arg(long, default_value_t = Role::Customer)]
        role: Role,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and store the session
    Signup {
        /// customer or seller
        #[arg(long, default_value_t = Role::Customer)]
        role: Role,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Seller dashboard operations
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
}

#[derive(Subcommand)]
enum SellerAction {
    /// List your products
    Products,
    /// List orders for your products
    Orders,
    /// Add a product
    Add {
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// 1 to 5
        #[arg(long, default_value = "5")]
        rating: String,
        #[arg(long, default_value = "0")]
        price: String,
    },
    /// Delete a product by id
    Delete { id: i64 },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shopfront=info"));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let options = GlobalOptions {
        base_url: cli.base_url,
        config: cli.config,
        assume_yes: cli.yes,
    };
    let ctx = AppContext::build(&options).await?;

    match cli.command {
        Commands::Login {
            role,
            email,
            password,
        } => commands::auth::login(&ctx, role, email, password).await?,
        Commands::Signup {
            role,
            name,
            email,
            password,
        } => commands::auth::signup(&ctx, role, name, email, password).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Seller { action } => match action {
            SellerAction::Products => commands::seller::products(&ctx).await?,
            SellerAction::Orders => commands::seller::orders(&ctx).await?,
            SellerAction::Add {
                image_url,
                name,
                description,
                rating,
                price,
            } => {
                let fields = commands::seller::NewProduct {
                    image_url,
                    name,
                    description,
                    rating,
                    price,
                };
                commands::seller::add(&ctx, fields).await?
            }
            SellerAction::Delete { id } => commands::seller::delete(&ctx, id).await?,
        },
    }

    Ok(())
}
