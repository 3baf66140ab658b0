//! Example demonstrating custom value parsers

use envtag::{BoxError, Environment, EnvironmentValueParser, Json, Parsed};
use std::net::SocketAddr;

// Custom parser for comma-separated strings
#[derive(Debug, Default)]
struct CommaList(Vec<String>);

impl EnvironmentValueParser for CommaList {
    fn unmarshal_environment_value(&mut self, raw: &str) -> Result<(), BoxError> {
        self.0 = raw.split(',').map(|s| s.trim().to_string()).collect();
        Ok(())
    }
}

#[derive(Debug, Environment)]
struct Config {
    // Uses the EnvironmentValueParser impl
    #[env("COMMA_TAGS")]
    pub comma_tags: CommaList,

    // JSON format (serde_json)
    #[env("JSON_TAGS")]
    pub json_tags: Json<Vec<String>>,

    // Any FromStr type
    #[env("LISTEN_ADDR,default=127.0.0.1:8080")]
    pub listen_addr: Parsed<SocketAddr>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("COMMA_TAGS", "tag1, tag2, tag3");
    std::env::set_var("JSON_TAGS", r#"["prod","api","v2"]"#);

    let mut config = Config {
        comma_tags: CommaList::default(),
        json_tags: Json::default(),
        listen_addr: Parsed(SocketAddr::from(([0, 0, 0, 0], 0))),
    };
    envtag::decode(&mut config)?;

    println!("Configuration loaded:");
    println!("  Comma Tags: {:?}", config.comma_tags.0);
    println!("  JSON Tags: {:?}", *config.json_tags);
    println!("  Listen Address: {}", *config.listen_addr);

    Ok(())
}
