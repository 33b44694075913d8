//! Blesspets - pet-store inventory admin CLI
//!
//! Main entry point for the Blesspets application.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blesspets::cli::{Cli, Commands, PetCommand};
use blesspets::commands;
use blesspets::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Login { email, password } => {
            tracing::info!("Starting login");
            commands::auth::login(&config, &email, &password).await?;
            Ok(())
        }
        Commands::Logout => {
            commands::auth::logout(&config)?;
            Ok(())
        }
        Commands::Whoami => {
            commands::auth::whoami(&config)?;
            Ok(())
        }
        Commands::Pets { command } => match command {
            PetCommand::List {
                status,
                search,
                json,
            } => {
                tracing::info!("Listing inventory");
                commands::pets::list(&config, status, search, json).await?;
                Ok(())
            }
            PetCommand::Get { id, json } => {
                tracing::info!(id, "Fetching pet");
                commands::pets::get(&config, id, json).await?;
                Ok(())
            }
            PetCommand::Add {
                name,
                status,
                photo_urls,
                category,
                tags,
            } => {
                tracing::info!("Adding pet");
                commands::pets::add(&config, name, status, photo_urls, category, tags).await?;
                Ok(())
            }
            PetCommand::Update {
                id,
                name,
                status,
                photo_urls,
                category,
                tags,
            } => {
                tracing::info!(id, "Updating pet");
                commands::pets::update(&config, id, name, status, photo_urls, category, tags)
                    .await?;
                Ok(())
            }
            PetCommand::Delete { id } => {
                tracing::info!(id, "Deleting pet");
                commands::pets::delete(&config, id).await?;
                Ok(())
            }
            PetCommand::UploadImage { id, file } => {
                tracing::info!(id, "Uploading image");
                commands::pets::upload_image(&config, id, &file).await?;
                Ok(())
            }
        },
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "blesspets=debug"
    } else {
        "blesspets=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
