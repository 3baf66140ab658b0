//! Walking a target's fields and assigning resolved values.
//!
//! A bindable record implements [`Environment`], normally through
//! `#[derive(Environment)]`, by registering each of its fields with the
//! [`Binder`] in declaration order. The binder resolves the field's rule
//! against the [`EnvironmentSet`], and either recurses into nested records or
//! assigns the raw string to the leaf.

use crate::error::EnvError;
use crate::set::EnvironmentSet;
use crate::tag::FieldRule;
use crate::value::Value;

/// A record whose fields can be bound from an [`EnvironmentSet`].
///
/// Implemented by `#[derive(Environment)]`. A manual implementation
/// registers the same fields by hand:
///
/// ```rust
/// use envtag::{Binder, EnvError, Environment, Field, FieldKind};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Environment for Server {
///     fn bind(&mut self, binder: &mut Binder<'_>) -> Result<(), EnvError> {
///         binder.field("host", "HOST,default=localhost", &mut self.host)?;
///         binder.field("port", "PORT,default=8080", &mut self.port)?;
///         Ok(())
///     }
/// }
///
/// impl Field for Server {
///     fn kind(&mut self) -> FieldKind<'_> {
///         FieldKind::Record(self)
///     }
/// }
///
/// let env = envtag::build_environment_set(["PORT=9090"]).unwrap();
/// let mut server = Server::default();
/// envtag::decode_from_set(&env, &mut server).unwrap();
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 9090);
/// ```
pub trait Environment {
    fn bind(&mut self, binder: &mut Binder<'_>) -> Result<(), EnvError>;
}

/// How the binder treats a field.
pub enum FieldKind<'a> {
    /// Nested record, walked field by field.
    Record(&'a mut dyn Environment),
    /// Leaf assigned from a single raw value.
    Value(&'a mut dyn Value),
}

/// Anything that can appear as a field of a bindable record.
///
/// Every [`Value`] is a leaf field. Records implement this returning
/// [`FieldKind::Record`].
pub trait Field {
    fn kind(&mut self) -> FieldKind<'_>;
}

impl<T: Value> Field for T {
    fn kind(&mut self) -> FieldKind<'_> {
        FieldKind::Value(self)
    }
}

/// Walks records and assigns their fields from an environment set.
pub struct Binder<'a> {
    env: &'a EnvironmentSet,
    path: Vec<&'static str>,
}

impl<'a> Binder<'a> {
    pub fn new(env: &'a EnvironmentSet) -> Self {
        Self {
            env,
            path: Vec::new(),
        }
    }

    /// Bind an annotated field.
    ///
    /// Records are recursed into and their annotation is ignored. Leaves
    /// resolve their rule: first present candidate key, then the default,
    /// then fail if required or stay untouched otherwise.
    pub fn field(
        &mut self,
        name: &'static str,
        annotation: &str,
        target: &mut dyn Field,
    ) -> Result<(), EnvError> {
        let value = match target.kind() {
            FieldKind::Record(record) => return self.nested(name, record),
            FieldKind::Value(value) => value,
        };

        let field = self.path_to(name);
        let Some(rule) = FieldRule::parse(&field, annotation)? else {
            tracing::trace!(field = %field, "empty annotation, skipping field");
            return Ok(());
        };

        let (key, raw) = match rule.lookup(self.env) {
            Some(found) => {
                tracing::trace!(field = %field, key = found.0, "resolved from environment");
                found
            }
            None => match rule.default_value() {
                Some(default) => {
                    tracing::debug!(field = %field, "no candidate key set, using default");
                    (rule.candidate_keys()[0].as_str(), default)
                }
                None if rule.required() => {
                    return Err(EnvError::missing(field, rule.candidate_keys()));
                }
                None => {
                    tracing::debug!(field = %field, "optional field not set");
                    return Ok(());
                }
            },
        };

        value
            .assign(raw)
            .map_err(|e| e.into_env_error(&field, key))
    }

    /// Recurse into a nested record.
    pub fn nested(
        &mut self,
        name: &'static str,
        record: &mut dyn Environment,
    ) -> Result<(), EnvError> {
        self.path.push(name);
        let result = record.bind(self);
        self.path.pop();
        result
    }

    /// Report an annotated field that is not public.
    ///
    /// Fields whose annotation is empty are not bound at all and pass.
    pub fn unexported(&mut self, name: &'static str, annotation: &str) -> Result<(), EnvError> {
        let field = self.path_to(name);
        match FieldRule::parse(&field, annotation)? {
            Some(_) => Err(EnvError::unexported(field)),
            None => Ok(()),
        }
    }

    /// The environment being bound.
    pub fn env(&self) -> &'a EnvironmentSet {
        self.env
    }

    fn path_to(&self, name: &str) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(name);
        path
    }
}

/// Bind `env` into `target`, which must be a record.
pub(crate) fn bind_root<T: Field + ?Sized>(
    env: &EnvironmentSet,
    target: &mut T,
) -> Result<(), EnvError> {
    match target.kind() {
        FieldKind::Record(record) => record.bind(&mut Binder::new(env)),
        FieldKind::Value(_) => Err(EnvError::invalid_input::<T>()),
    }
}
