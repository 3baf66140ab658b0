//! Example demonstrating fallback keys and nested structs

use envtag::Environment;

#[derive(Debug, Default, Environment)]
struct CacheConfig {
    // Try REDIS_URL first, then CACHE_URL
    #[env("REDIS_URL,CACHE_URL,default=redis://localhost:6379")]
    pub url: String,

    #[env("CACHE_TTL,default=5m")]
    pub ttl: std::time::Duration,
}

#[derive(Debug, Default, Environment)]
struct Config {
    #[env("APP_NAME,SERVICE_NAME")]
    pub app_name: String,

    // Walks CacheConfig's own annotations
    #[env(nested)]
    pub cache: CacheConfig,
}

fn main() -> anyhow::Result<()> {
    // Entries as they would come from a container spec or a test fixture
    let env = envtag::build_environment_set([
        "SERVICE_NAME=billing",
        "CACHE_URL=redis://cache.internal:6379",
    ])?;

    let mut config = Config::default();
    envtag::decode_from_set(&env, &mut config)?;

    println!("Configuration:");
    println!("  App Name: {}", config.app_name); // billing (from SERVICE_NAME)
    println!("  Cache URL: {}", config.cache.url); // from CACHE_URL
    println!("  Cache TTL: {:?}", config.cache.ttl); // 300s

    Ok(())
}
