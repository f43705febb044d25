//! Medusa CLI - drive a Medusa storefront from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Run checkout for an existing cart
//! medusa-cli checkout --cart cart_01J... --details details.yaml --provider pp_system_default
//!
//! # Show an order
//! medusa-cli order order_01J...
//!
//! # Show a product, resolving a variant from option values
//! medusa-cli product prod_01J... --option opt_size=M --option opt_color=Black
//!
//! # List collections and shipping countries
//! medusa-cli collections --limit 20
//! medusa-cli countries
//!
//! # Create a customer account
//! medusa-cli register -e ada@example.com --first-name Ada --last-name Lovelace
//! ```
//!
//! # Environment Variables
//!
//! - `MEDUSA_BACKEND_URL`, `MEDUSA_PUBLISHABLE_KEY` - required
//! - `MEDUSA_CUSTOMER_PASSWORD` - password for `register` and `checkout --login`
//! - `RUST_LOG` - log filter (default: `medusa_storefront=info,medusa_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use medusa_storefront::config::StorefrontConfig;
use medusa_storefront::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

use error::AppError;

#[derive(Parser)]
#[command(name = "medusa-cli")]
#[command(author, version, about = "Medusa storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run checkout for an existing cart
    Checkout {
        /// Cart to check out
        #[arg(short, long)]
        cart: String,

        /// YAML or JSON file with email and addresses
        #[arg(short, long)]
        details: std::path::PathBuf,

        /// Shipping option id (default: first available)
        #[arg(short, long)]
        shipping_option: Option<String>,

        /// Payment provider id
        #[arg(short, long, default_value = "pp_system_default")]
        provider: String,

        /// Log in as this customer first and link the cart
        #[arg(long)]
        login: Option<String>,

        /// Customer password
        #[arg(long, env = "MEDUSA_CUSTOMER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show an order
    Order {
        /// Order id
        id: String,
    },
    /// Show a product
    Product {
        /// Product id
        id: String,

        /// Chosen option as `option_id=value`; repeatable
        #[arg(short, long = "option")]
        options: Vec<String>,
    },
    /// List product collections
    Collections {
        #[arg(short, long, default_value_t = 20)]
        limit: u32,

        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },
    /// List countries served by the store's regions
    Countries,
    /// Create a customer account
    Register {
        /// Customer email address
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Customer password
        #[arg(long, env = "MEDUSA_CUSTOMER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "medusa_storefront=info,medusa_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), AppError> {
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Checkout {
            cart,
            details,
            shipping_option,
            provider,
            login,
            password,
        } => {
            let login = match (login, password) {
                (Some(email), Some(password)) => Some((email, password)),
                (Some(_), None) => return Err(AppError::MissingPassword),
                (None, _) => None,
            };
            commands::checkout::run(
                &state,
                &commands::checkout::CheckoutArgs {
                    cart_id: cart,
                    details,
                    shipping_option,
                    provider,
                    login,
                },
            )
            .await?;
        }
        Commands::Order { id } => commands::orders::show(&state, &id).await?,
        Commands::Product { id, options } => commands::catalog::product(&state, &id, &options).await?,
        Commands::Collections { limit, offset } => {
            commands::catalog::collections(&state, limit, offset).await?;
        }
        Commands::Countries => commands::catalog::countries(&state).await?,
        Commands::Register {
            email,
            first_name,
            last_name,
            password,
        } => {
            commands::account::register(&state, &email, &first_name, &last_name, password).await?;
        }
    }
    Ok(())
}
