use tracing::info;

use amora::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = amora::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        amora::logging::init_console_only(&config.logging.level);
    }

    info!("Amora letter service");

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Open database and apply migrations
    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open database {}: {e}", config.database.path);
            std::process::exit(1);
        }
    };
    if let Err(e) = db.migrate().await {
        eprintln!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    info!(
        "Server configured on {}:{}",
        config.web.host, config.web.port
    );

    let server = WebServer::from_database(&config.web, db);
    if let Err(e) = server.run().await {
        eprintln!("Web server error: {e}");
        std::process::exit(1);
    }
}
