use std::path::PathBuf;

use anyhow::{Context, Result};

use hospital_directory::api::{DirectoryServer, ServerConfig};
use hospital_directory::config::Config;
use hospital_directory::storage::{create_memory_store, create_sqlite_store};

/// Command-line overrides for `serve`
#[derive(Debug, Default)]
pub struct ServeParams {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db: Option<PathBuf>,
    pub in_memory: bool,
}

/// Run the REST API until Ctrl+C
pub async fn serve(config: Config, params: ServeParams) -> Result<()> {
    let ServeParams {
        host,
        port,
        db,
        in_memory,
    } = params;

    let mut bind_address = config.server.bind_address;
    if let Some(host) = host {
        bind_address = format!("{host}:{}", bind_address.port())
            .parse()
            .context("Invalid bind address")?;
    }
    if let Some(port) = port {
        bind_address.set_port(port);
    }

    let server_config = ServerConfig::builder()
        .bind_address(bind_address)
        .enable_cors(config.server.enable_cors)
        .enable_request_logging(config.server.enable_request_logging)
        .build()?;

    let in_memory = in_memory || config.database.in_memory;
    let db_path = db.unwrap_or(config.database.sqlite_path);

    let store = if in_memory {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        create_memory_store()
    } else {
        tracing::info!(path = %db_path.display(), "Opening SQLite store");
        create_sqlite_store(&db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?
    };

    let server =
        DirectoryServer::new(server_config, store).context("Failed to create API server")?;

    println!("{}", server.info().display());
    println!(
        "  Storage: {}",
        if in_memory {
            "in-memory".to_string()
        } else {
            db_path.display().to_string()
        }
    );
    println!();
    println!("API Endpoints:");
    println!("  GET    /api/health                         - Health check");
    println!("  GET    /api/docs                           - Endpoint reference");
    println!("  GET    /api/v1/hospitals                   - List hospitals (?city=)");
    println!("  GET    /api/v1/hospitals/{{id}}              - Get hospital");
    println!("  POST   /api/v1/hospitals/create            - Create hospital");
    println!("  PUT    /api/v1/hospitals/update?id=        - Update hospital");
    println!("  DELETE /api/v1/hospitals/delete?id=        - Delete hospital");
    println!("  GET    /api/v1/hospitals/details/{{id}}      - Get hospital details");
    println!("  POST   /api/v1/hospitals/details?id=       - Add hospital details");
    println!("  PUT    /api/v1/hospitals/details/update?id= - Update hospital details");
    println!();
    println!("Hospital directory listening on http://{bind_address}");
    println!("Press Ctrl+C to stop.\n");

    // Start with graceful shutdown
    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    println!("Hospital directory stopped.");
    Ok(())
}
