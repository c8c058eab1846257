use clap::Parser;
use recipebox::{
    api::{handlers::AppState, routes},
    cli::{commands, Cli, Commands},
    config::{Rules, Settings},
    db, Result,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipebox=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Migrate => {
            commands::migrate(&settings).await?;
        }
        Commands::Import { file } => {
            commands::import(&settings, &file).await?;
        }
        Commands::Search { ingredients } => {
            commands::search(&settings, &ingredients).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting recipebox server");
    info!("Database: {}", settings.database.url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Rule tables are loaded once and shared read-only
    let rules = Arc::new(Rules::load(&settings.rules)?);

    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;

    let state = AppState {
        pool,
        rules,
        settings: settings.clone(),
    };

    let app = routes::create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
