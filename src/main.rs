use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hospital_directory::config::Config;

mod commands;

use commands::{AddParams, ServeParams};

#[derive(Parser)]
#[command(
    name = "hospital-directory",
    version,
    about = "Hospital directory REST service and command-line browser",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database path
        #[arg(long)]
        db: Option<PathBuf>,

        /// Keep data in memory only
        #[arg(long, default_value = "false")]
        in_memory: bool,
    },

    /// List hospitals with optional name search and city filter
    List {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// City to show ("all" for every city)
        #[arg(long)]
        city: Option<String>,

        /// API server URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show one hospital and its details
    Show {
        /// Hospital id
        id: String,

        /// API server URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Add a hospital
    Add {
        /// Hospital name
        #[arg(long)]
        name: String,

        /// City
        #[arg(long)]
        city: String,

        /// Image URL (defaults to a placeholder photo)
        #[arg(long)]
        image: Option<String>,

        /// Specialty, repeatable
        #[arg(long = "specialty")]
        specialties: Vec<String>,

        /// Rating between 0 and 5
        #[arg(long)]
        rating: Option<f64>,

        /// API server URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Delete a hospital
    Delete {
        /// Hospital id
        id: String,

        /// API server URL
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Print the suggested cities and specialties
    Cities,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    config.validate()?;

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            db,
            in_memory,
        } => {
            tracing::info!(
                host = ?host,
                port = ?port,
                db = ?db,
                in_memory = %in_memory,
                "Starting serve command"
            );
            commands::serve(
                config,
                ServeParams {
                    host,
                    port,
                    db,
                    in_memory,
                },
            )
            .await?;
        }

        Commands::List {
            search,
            city,
            api_url,
        } => {
            let client = commands::client(&config, api_url)?;
            commands::list(&client, search, city).await?;
        }

        Commands::Show { id, api_url } => {
            let client = commands::client(&config, api_url)?;
            commands::show(&client, &id).await?;
        }

        Commands::Add {
            name,
            city,
            image,
            specialties,
            rating,
            api_url,
        } => {
            let client = commands::client(&config, api_url)?;
            commands::add(
                &client,
                AddParams {
                    name,
                    city,
                    image,
                    specialties,
                    rating,
                },
            )
            .await?;
        }

        Commands::Delete { id, api_url } => {
            let client = commands::client(&config, api_url)?;
            commands::delete(&client, &id).await?;
        }

        Commands::Cities => commands::cities(),
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("hospital_directory=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new(format!(
            "hospital_directory={level},tower_http={level},warn"
        ))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
