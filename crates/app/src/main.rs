//! Kiosk client CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;
use kiosk::{claims::Actor, ids::TenantId};
use kiosk_app::{
    auth::Credentials, config::AppConfig, context::AppContext,
    domain::catalog::models::CatalogQuery,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kiosk-app", about = "Headless kiosk commerce client", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and persist the session.
    Login(LoginArgs),

    /// Sign out and clear the persisted session.
    Logout,

    /// Show the current session claims.
    Whoami,

    /// Browse a tenant's catalog.
    Products(ProductsArgs),

    /// Inspect or empty the persisted shopping cart.
    Cart(CartArgs),
}

#[derive(Debug, Args)]
struct CartArgs {
    /// Tenant whose cart to address
    #[arg(long)]
    tenant: TenantId,

    /// Empty the cart instead of printing it
    #[arg(long)]
    clear: bool,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Actor kind: platform, user, or client
    #[arg(long)]
    actor: Actor,

    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long)]
    password: String,

    /// Tenant to sign into, for staff and client accounts
    #[arg(long)]
    tenant: Option<TenantId>,
}

#[derive(Debug, Args)]
struct ProductsArgs {
    /// Tenant whose catalog to browse
    #[arg(long)]
    tenant: TenantId,

    /// Search text
    #[arg(long)]
    q: Option<String>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: i64,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .init();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let ctx = AppContext::from_config(&cli.config);

    match cli.command {
        Commands::Login(args) => login(&ctx, args).await,
        Commands::Logout => {
            ctx.auth.logout().await;
            println!("signed out");

            Ok(())
        }
        Commands::Whoami => whoami(&ctx),
        Commands::Products(args) => products(&ctx, args).await,
        Commands::Cart(args) => cart(&ctx, &args),
    }
}

fn cart(ctx: &AppContext, args: &CartArgs) -> Result<(), String> {
    ctx.cart.set_tenant(Some(args.tenant));

    if args.clear {
        ctx.cart.clear();
        println!("cart emptied for tenant {}", args.tenant);

        return Ok(());
    }

    for line in ctx.cart.lines() {
        let cap = line
            .max_quantity
            .map_or_else(|| "-".to_string(), |cap| cap.to_string());

        println!(
            "{}\t{}\t{} x {:.2}\t(max {cap})",
            line.product_id, line.description, line.quantity, line.unit_price
        );
    }

    println!(
        "{} items, subtotal {:.2}",
        ctx.cart.count(),
        ctx.cart.subtotal()
    );

    Ok(())
}

async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let credentials = Credentials {
        email: args.email,
        password: args.password,
        tenant_id: args.tenant,
    };

    let claims = ctx
        .auth
        .login(args.actor, &credentials)
        .await
        .map_err(|error| format!("login failed: {}", error.code()))?;

    println!("signed in as {}", claims.actor);

    if let Some(tenant_id) = claims.tenant_id {
        println!("tenant: {tenant_id}");
    }

    Ok(())
}

fn whoami(ctx: &AppContext) -> Result<(), String> {
    let Some(claims) = ctx.session.claims() else {
        return Err("not signed in".to_string());
    };

    let state = if claims.is_expired_at(Timestamp::now()) {
        "expired"
    } else {
        "active"
    };

    println!("actor: {} ({state})", claims.actor);

    if let Some(tenant_id) = claims.tenant_id {
        println!("tenant: {tenant_id}");
    }

    if !claims.roles.is_empty() {
        println!("roles: {}", claims.roles.join(", "));
    }

    Ok(())
}

async fn products(ctx: &AppContext, args: ProductsArgs) -> Result<(), String> {
    let query = CatalogQuery {
        q: args.q,
        page: Some(args.page),
        ..CatalogQuery::default()
    };

    let page = ctx
        .catalog
        .list_products(args.tenant, &query)
        .await
        .map_err(|error| format!("failed to list products: {}", error.code()))?;

    for product in &page.items {
        let stock = product
            .stock_on_hand
            .map_or_else(|| "-".to_string(), |stock| stock.to_string());

        println!(
            "{}\t{}\t{:.2}\t{stock}",
            product.product_id, product.description, product.unit_price
        );
    }

    println!(
        "page {} of {} ({} products)",
        page.page,
        page.max_page(),
        page.total
    );

    Ok(())
}
