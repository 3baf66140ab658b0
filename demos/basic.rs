//! Basic usage example

use envtag::Environment;
use std::time::Duration;

#[derive(Debug, Default, Environment)]
struct Config {
    // Required field: loaded from DATABASE_URL
    #[env("DATABASE_URL")]
    pub database_url: String,

    // With default value
    #[env("SERVER_ADDR,default=127.0.0.1:8080")]
    pub server_addr: String,

    // Numeric type
    #[env("MAX_CONNECTIONS,default=10")]
    pub max_connections: u32,

    // Compound duration
    #[env("REQUEST_TIMEOUT,default=1m30s")]
    pub request_timeout: Duration,

    // Left as None when DEBUG_MODE is not set
    #[env("DEBUG_MODE,required=false")]
    pub debug_mode: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    // Load configuration
    let config: Config = envtag::load()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Request Timeout: {:?}", config.request_timeout);
    println!("  Debug Mode: {:?}", config.debug_mode);

    Ok(())
}
