//! Shop-Track CLI - terminal front end and store management.
//!
//! # Usage
//!
//! ```bash
//! # Create or upgrade the local database
//! shop-track migrate
//!
//! # Insert the preview user (preview@example.com / password)
//! shop-track seed
//!
//! # Register a credential
//! shop-track register -e a@b.com -p secret -c secret
//!
//! # Browse the catalog
//! shop-track products --category Food --search brea
//!
//! # Interactive session (login, search, add, toggle, list)
//! shop-track shell
//!
//! # Same, against a throwaway store with sample data
//! shop-track shell --preview
//! ```
//!
//! Configuration comes from `SHOPTRACK_*` environment variables, see
//! `shop_track::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_track::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "shop-track")]
#[command(author, version, about = "Shop-Track shopping list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert the preview user
    Seed,
    /// Register a new credential
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long)]
        confirm_password: String,
    },
    /// List registered emails
    Users,
    /// List catalog categories
    Categories,
    /// List catalog products
    Products {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Start an interactive session
    Shell {
        /// Use a throwaway in-memory store seeded with the preview user and
        /// sample list entries
        #[arg(long)]
        preview: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AppConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
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
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    // Must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shop_track=info,shop_track_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        e.report();
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::store::migrate(config).await?,
        Commands::Seed => commands::store::seed(config).await?,
        Commands::Register {
            email,
            password,
            confirm_password,
        } => commands::store::register(config, &email, &password, &confirm_password).await?,
        Commands::Users => commands::store::users(config).await?,
        Commands::Categories => commands::catalog::categories(&config)?,
        Commands::Products { category, search } => {
            commands::catalog::products(&config, category.as_deref(), &search)?;
        }
        Commands::Shell { preview } => commands::shell::run(config, preview).await?,
    }
    Ok(())
}
