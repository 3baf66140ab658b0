//! Example demonstrating programmatic overrides

use envtag::Environment;
use std::collections::HashMap;

#[derive(Debug, Default, Environment)]
struct Config {
    #[env("LOG_LEVEL,default=info")]
    pub log_level: String,

    #[env("WORKERS,default=4")]
    pub workers: usize,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("WORKERS", "8");

    // e.g. values from command line flags; None leaves the environment alone
    let mut overrides = HashMap::new();
    overrides.insert("LOG_LEVEL".to_string(), Some("debug".to_string()));
    overrides.insert("WORKERS".to_string(), None);

    let mut config = Config::default();
    let merged = envtag::apply_overrides(overrides, &mut config)?;

    println!("Configuration:");
    println!("  Log Level: {}", config.log_level); // debug (override)
    println!("  Workers: {}", config.workers); // 8 (environment)
    println!("  Merged LOG_LEVEL: {:?}", merged.get("LOG_LEVEL"));

    Ok(())
}
