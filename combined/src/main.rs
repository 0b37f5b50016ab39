//! Marketplace API binary - serves the HTTP API and runs schema migrations.

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{load_dotenv, Database, DatabaseConfig, MigrateAction};
use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "marketplace-api")]
#[command(about = "Marketplace credentials and product reviews API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides GATEWAY_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides GATEWAY_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations for every service
    Migrate {
        #[arg(value_enum)]
        action: MigrateCommand,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MigrateCommand {
    /// Run pending migrations
    Up,
    /// Rollback the last migration of each service
    Down,
    /// Show migration status
    Status,
    /// Roll back and re-apply every migration
    Refresh,
}

impl From<MigrateCommand> for MigrateAction {
    fn from(command: MigrateCommand) -> Self {
        match command {
            MigrateCommand::Up => MigrateAction::Up,
            MigrateCommand::Down => MigrateAction::Down,
            MigrateCommand::Status => MigrateAction::Status,
            MigrateCommand::Refresh => MigrateAction::Refresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = GatewayConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            info!("Starting marketplace API on http://{}", config.bind_address());
            gateway_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let database = Database::connect(&DatabaseConfig::from_env()).await?;
            let action = MigrateAction::from(action);

            // Users first; reviews reference user ids
            let users = user_service_lib::run_migrations(database.connection(), action).await?;
            report("user-service", &users);

            let reviews = review_service_lib::run_migrations(database.connection(), action).await?;
            report("review-service", &reviews);
        }
    }

    Ok(())
}

fn report(service: &str, migrations: &[(String, bool)]) {
    for (name, applied) in migrations {
        let state = if *applied { "applied" } else { "pending" };
        info!("{:<16} {:<48} {}", service, name, state);
    }
}
