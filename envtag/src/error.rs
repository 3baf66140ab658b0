//! Error types for binding environment variables into structs

/// Boxed error returned by custom value parsers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building an environment set or binding it into a target.
///
/// Every variant names the offending field, key or entry so the message is
/// actionable without further context. All of them abort the current bind.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// The top-level target is not a record with bindable fields.
    #[error("Target of type '{type_name}' is not a record with bindable fields")]
    InvalidInput {
        /// Fully qualified type name of the rejected target
        type_name: String,
    },

    /// A raw environment entry does not have the `KEY=VALUE` shape.
    #[error("Environment entry '{entry}' must have the form KEY=VALUE")]
    InvalidEnvironmentEntry {
        /// The entry as it was supplied
        entry: String,
    },

    /// None of the candidate keys of a required field is set and no default exists.
    #[error("Field '{field}' is required but none of [{keys}] is set")]
    MissingRequiredValue {
        /// Dotted path of the field (e.g. `database.url`)
        field: String,
        /// Candidate keys that were tried, comma separated
        keys: String,
    },

    /// A raw value could not be converted into the field's type.
    #[error("Failed to parse environment variable '{key}' for field '{field}' as {type_name}: {message}")]
    InvalidValue {
        /// Dotted path of the field
        field: String,
        /// Environment variable the value came from
        key: String,
        /// Type the conversion was attempted for
        type_name: String,
        /// Message from the parser
        message: String,
    },

    /// The field annotation cannot be turned into a binding rule.
    #[error("Field '{field}' has unsupported annotation '{annotation}': {reason}")]
    UnsupportedField {
        /// Dotted path of the field
        field: String,
        /// The raw annotation string
        annotation: String,
        /// What was wrong with it
        reason: String,
    },

    /// An annotated field is not public and cannot be assigned from outside its module.
    #[error("Field '{field}' is annotated but not public")]
    UnexportedField {
        /// Dotted path of the field
        field: String,
    },

    /// A custom `EnvironmentValueParser` rejected the raw value.
    #[error("Custom parser for field '{field}' rejected environment variable '{key}': {source}")]
    Custom {
        /// Dotted path of the field
        field: String,
        /// Environment variable the value came from
        key: String,
        /// Error returned by the parser, unchanged
        source: BoxError,
    },
}

impl EnvError {
    pub(crate) fn invalid_input<T: ?Sized>() -> Self {
        Self::InvalidInput {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    pub(crate) fn invalid_entry(entry: impl Into<String>) -> Self {
        Self::InvalidEnvironmentEntry {
            entry: entry.into(),
        }
    }

    pub(crate) fn missing(field: impl Into<String>, keys: &[String]) -> Self {
        Self::MissingRequiredValue {
            field: field.into(),
            keys: keys.join(", "),
        }
    }

    pub(crate) fn unsupported(
        field: impl Into<String>,
        annotation: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::UnsupportedField {
            field: field.into(),
            annotation: annotation.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unexported(field: impl Into<String>) -> Self {
        Self::UnexportedField {
            field: field.into(),
        }
    }
}
