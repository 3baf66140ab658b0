//! Programmatic overrides merged into an environment set before binding

use crate::bind::{bind_root, Field};
use crate::error::EnvError;
use crate::set::EnvironmentSet;

/// Merge `overrides` into `base`, bind the result into `target` and return it.
///
/// `Some(value)` sets or replaces the key. `None` means "no override" and
/// leaves whatever `base` has for that key, it does not clear it.
pub fn apply_overrides_to<T, I, K, V>(
    mut base: EnvironmentSet,
    overrides: I,
    target: &mut T,
) -> Result<EnvironmentSet, EnvError>
where
    T: Field + ?Sized,
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    for (key, value) in overrides {
        if let Some(value) = value {
            let key = key.into();
            tracing::trace!(key = %key, "applying override");
            base.insert(key, value);
        }
    }
    bind_root(&base, target)?;
    Ok(base)
}

/// Like [`apply_overrides_to`], starting from the process environment.
pub fn apply_overrides<T, I, K, V>(overrides: I, target: &mut T) -> Result<EnvironmentSet, EnvError>
where
    T: Field + ?Sized,
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    apply_overrides_to(EnvironmentSet::from_process(), overrides, target)
}
