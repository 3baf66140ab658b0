//! String to value conversions for leaf fields
//!
//! Built-in conversions cover `bool`, every integer and float width,
//! [`Duration`], `String` and `Option<T>` of those. Any other type can take
//! part by implementing [`EnvironmentValueParser`], which always wins over
//! the built-ins for that type.

use crate::duration::parse_duration;
use crate::error::{BoxError, EnvError};
use serde::de::DeserializeOwned;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::time::Duration;

/// Hook for types that own their conversion from a raw environment value.
///
/// The raw string is handed over unchanged. An error is reported as
/// [`EnvError::Custom`] with the original error kept as its source.
///
/// ```rust
/// use envtag::{BoxError, EnvironmentValueParser};
///
/// #[derive(Default)]
/// struct Hosts(Vec<String>);
///
/// impl EnvironmentValueParser for Hosts {
///     fn unmarshal_environment_value(&mut self, raw: &str) -> Result<(), BoxError> {
///         self.0 = raw.split(',').map(|h| h.trim().to_string()).collect();
///         Ok(())
///     }
/// }
/// ```
pub trait EnvironmentValueParser {
    fn unmarshal_environment_value(&mut self, raw: &str) -> Result<(), BoxError>;
}

/// Failure to assign a raw value, before field context is attached.
#[derive(Debug)]
pub enum AssignError {
    /// A built-in conversion rejected the value.
    Invalid {
        type_name: &'static str,
        message: String,
    },
    /// A custom parser rejected the value.
    Custom(BoxError),
}

impl AssignError {
    pub fn invalid<T>(message: impl fmt::Display) -> Self {
        Self::Invalid {
            type_name: std::any::type_name::<T>(),
            message: message.to_string(),
        }
    }

    pub(crate) fn into_env_error(self, field: &str, key: &str) -> EnvError {
        match self {
            Self::Invalid { type_name, message } => EnvError::InvalidValue {
                field: field.to_string(),
                key: key.to_string(),
                type_name: type_name.to_string(),
                message,
            },
            Self::Custom(source) => EnvError::Custom {
                field: field.to_string(),
                key: key.to_string(),
                source,
            },
        }
    }
}

/// A leaf field that can be assigned from a raw string.
pub trait Value {
    fn assign(&mut self, raw: &str) -> Result<(), AssignError>;
}

impl<T: EnvironmentValueParser> Value for T {
    fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        self.unmarshal_environment_value(raw)
            .map_err(AssignError::Custom)
    }
}

impl Value for String {
    fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        raw.clone_into(self);
        Ok(())
    }
}

impl Value for bool {
    fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        *self = match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => {
                return Err(AssignError::invalid::<bool>(format!(
                    "expected true/false, 1/0, yes/no or on/off, got '{raw}'"
                )))
            }
        };
        Ok(())
    }
}

macro_rules! impl_value_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
                    *self = raw.parse::<$ty>().map_err(AssignError::invalid::<$ty>)?;
                    Ok(())
                }
            }
        )*
    };
}

impl_value_from_str!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Value for Duration {
    fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        *self = parse_duration(raw).map_err(AssignError::invalid::<Duration>)?;
        Ok(())
    }
}

/// Optional leaf: left `None` when unresolved, allocated on first assignment.
impl<T: Value + Default> Value for Option<T> {
    fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        self.get_or_insert_with(T::default).assign(raw)
    }
}

/// Field decoded as JSON, e.g. `TAGS=["a","b"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DeserializeOwned> Value for Json<T> {
    fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        self.0 = serde_json::from_str(raw).map_err(AssignError::invalid::<T>)?;
        Ok(())
    }
}

/// Field decoded through its [`FromStr`] implementation, e.g. `Parsed<SocketAddr>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed<T>(pub T);

impl<T> Parsed<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Parsed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Parsed<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> Value for Parsed<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn assign(&mut self, raw: &str) -> Result<(), AssignError> {
        self.0 = raw.parse::<T>().map_err(AssignError::invalid::<T>)?;
        Ok(())
    }
}
