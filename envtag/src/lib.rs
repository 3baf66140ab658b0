//! Bind environment variables into structs using tag annotations
//!
//! `envtag` fills an existing struct from environment variables. Each field
//! carries a small annotation naming the variables to read and how to treat
//! their absence:
//!
//! ```text
//! #[env("PRIMARY_URL,SECONDARY_URL,default=http://localhost,required=false")]
//! ```
//!
//! # Features
//!
//! - **Fallback keys**: the first candidate variable that is set wins
//! - **Required fields**: fields are required unless they have a default or `required=false`
//! - **Default values**: applied verbatim when no candidate is set
//! - **Nested structs**: `#[env(nested)]` recurses into a field's own annotations
//! - **Custom parsers**: implement [`EnvironmentValueParser`] to own the conversion
//! - **Hermetic decoding**: bind from an explicit [`EnvironmentSet`] in tests
//!
//! # Value Parsing
//!
//! - Strings are assigned verbatim: `DATABASE_URL=postgres://localhost/db`
//! - Integers and floats use base-10 parsing: `MAX_CONNECTIONS=42`
//! - Booleans accept `true/false`, `1/0`, `yes/no`, `on/off`: `DEBUG=on`
//! - [`Duration`](std::time::Duration) uses compound units: `TIMEOUT=1h30m`
//! - `Option<T>` stays `None` unless a value is resolved
//! - [`Json<T>`] decodes JSON and [`Parsed<T>`] goes through `FromStr`
//!
//! # Example
//!
//! ```rust
//! use envtag::Environment;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Environment)]
//! struct Config {
//!     #[env("REDIS_URL,CACHE_URL")]
//!     pub cache_url: String,
//!
//!     #[env("PORT,default=8080")]
//!     pub port: u16,
//!
//!     #[env("REQUEST_TIMEOUT,default=30s")]
//!     pub timeout: Duration,
//!
//!     #[env("DEBUG,required=false")]
//!     pub debug: Option<bool>,
//! }
//!
//! # fn main() -> Result<(), envtag::EnvError> {
//! let env = envtag::build_environment_set(["CACHE_URL=redis://localhost", "PORT=9000"])?;
//!
//! let mut config = Config::default();
//! envtag::decode_from_set(&env, &mut config)?;
//!
//! assert_eq!(config.cache_url, "redis://localhost");
//! assert_eq!(config.port, 9000);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.debug, None);
//! # Ok(())
//! # }
//! ```
//!
//! # Annotation grammar
//!
//! ```text
//! annotation := key-list ("," modifier)*
//! key-list   := key ("," key)*
//! modifier   := "required" | "required=" bool-token | "default=" literal
//! bool-token := true | 1 | yes | false | 0 | no
//! ```
//!
//! A `default` always wins over `required` when no candidate is set.

// Lets the derive macro's `::envtag` paths resolve inside this crate's own tests.
extern crate self as envtag;

mod bind;
pub mod duration;
mod error;
mod overrides;
mod set;
mod tag;
mod value;

pub use bind::{Binder, Environment, Field, FieldKind};
pub use envtag_derive::Environment;
pub use error::{BoxError, EnvError};
pub use overrides::{apply_overrides, apply_overrides_to};
pub use set::EnvironmentSet;
pub use tag::FieldRule;
pub use value::{AssignError, EnvironmentValueParser, Json, Parsed, Value};

use anyhow::Context;

/// Bind the current process environment into `target`.
pub fn decode<T: Field + ?Sized>(target: &mut T) -> Result<(), EnvError> {
    decode_from_set(&EnvironmentSet::from_process(), target)
}

/// Bind `env` into `target`.
///
/// Fails with [`EnvError::InvalidInput`] if `target` is a leaf value rather
/// than a record. Stops at the first failing field; fields bound before it
/// keep their new values.
pub fn decode_from_set<T: Field + ?Sized>(
    env: &EnvironmentSet,
    target: &mut T,
) -> Result<(), EnvError> {
    bind::bind_root(env, target)
}

/// Build an [`EnvironmentSet`] from `KEY=VALUE` entries.
pub fn build_environment_set<I, S>(entries: I) -> Result<EnvironmentSet, EnvError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    EnvironmentSet::from_entries(entries)
}

/// Load a configuration struct from the process environment
///
/// # Errors
///
/// - Required environment variables are not set
/// - Environment variable values cannot be parsed into target types
/// - A field annotation is malformed
pub fn load<T: Environment + Field + Default>() -> anyhow::Result<T> {
    let mut config = T::default();
    decode(&mut config).with_context(|| {
        format!(
            "failed to load {} from environment",
            std::any::type_name::<T>()
        )
    })?;
    Ok(config)
}
