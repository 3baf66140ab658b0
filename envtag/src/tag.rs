//! Parsing of `#[env("...")]` annotations into field rules.
//!
//! An annotation is a comma separated list. Leading segments are candidate
//! environment variable names, tried in order. They are followed by
//! modifiers:
//!
//! - `required` / `required=<bool>`
//! - `default=<literal>` (the literal is kept verbatim and may contain `=`)

use crate::error::EnvError;
use crate::set::EnvironmentSet;

/// Binding policy for a single field, derived from its annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    candidate_keys: Vec<String>,
    required: bool,
    default_value: Option<String>,
}

impl FieldRule {
    /// Parse an annotation for the field at `field`.
    ///
    /// Returns `Ok(None)` for an empty annotation: such a field is not bound.
    pub fn parse(field: &str, annotation: &str) -> Result<Option<Self>, EnvError> {
        if annotation.trim().is_empty() {
            return Ok(None);
        }

        let unsupported = |reason: String| EnvError::unsupported(field, annotation, reason);

        let mut candidate_keys = Vec::new();
        let mut required = None;
        let mut default_value = None;
        let mut in_modifiers = false;

        for segment in annotation.split(',') {
            let trimmed = segment.trim();

            if trimmed.eq_ignore_ascii_case("required") {
                required = Some(true);
                in_modifiers = true;
                continue;
            }

            match trimmed.split_once('=') {
                Some((name, token)) if name.trim_end().eq_ignore_ascii_case("required") => {
                    let token = token.trim();
                    required = Some(
                        parse_bool_token(token)
                            .ok_or_else(|| unsupported(format!("invalid required token '{token}'")))?,
                    );
                    in_modifiers = true;
                }
                Some((name, _)) if name.trim_end().eq_ignore_ascii_case("default") => {
                    // Keep the literal byte for byte, surrounding whitespace included.
                    let literal = segment
                        .split_once('=')
                        .map(|(_, literal)| literal)
                        .unwrap_or_default();
                    default_value = Some(literal.to_string());
                    in_modifiers = true;
                }
                Some((name, _)) => {
                    return Err(unsupported(format!("unknown modifier '{}'", name.trim())));
                }
                None if trimmed.is_empty() => {
                    return Err(unsupported("empty segment".to_string()));
                }
                None if in_modifiers => {
                    return Err(unsupported(format!(
                        "key '{trimmed}' must come before any modifier"
                    )));
                }
                None => candidate_keys.push(trimmed.to_string()),
            }
        }

        if candidate_keys.is_empty() {
            return Err(unsupported("no environment variable name given".to_string()));
        }

        Ok(Some(Self {
            candidate_keys,
            required: required.unwrap_or(default_value.is_none()),
            default_value,
        }))
    }

    /// Candidate keys in priority order.
    pub fn candidate_keys(&self) -> &[String] {
        &self.candidate_keys
    }

    /// Whether an absent key without a default is an error.
    pub fn required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// First candidate key present in `env`, with its value.
    ///
    /// A key that is set to the empty string counts as present.
    pub fn lookup<'a>(&'a self, env: &'a EnvironmentSet) -> Option<(&'a str, &'a str)> {
        self.candidate_keys
            .iter()
            .find_map(|key| env.get(key).map(|value| (key.as_str(), value)))
    }
}

/// Interpret a `required=` token.
fn parse_bool_token(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(annotation: &str) -> FieldRule {
        FieldRule::parse("field", annotation).unwrap().unwrap()
    }

    #[test]
    fn test_single_key_is_required_by_default() {
        let rule = parse("DATABASE_URL");
        assert_eq!(rule.candidate_keys(), ["DATABASE_URL"]);
        assert!(rule.required());
        assert_eq!(rule.default_value(), None);
    }

    #[test]
    fn test_multiple_keys_keep_order() {
        let rule = parse("REDIS_URL, CACHE_URL");
        assert_eq!(rule.candidate_keys(), ["REDIS_URL", "CACHE_URL"]);
    }

    #[test]
    fn test_empty_annotation_is_not_bound() {
        assert_eq!(FieldRule::parse("field", "").unwrap(), None);
        assert_eq!(FieldRule::parse("field", "   ").unwrap(), None);
    }

    #[test]
    fn test_required_tokens() {
        assert!(parse("KEY,required").required());
        assert!(parse("KEY,REQUIRED").required());
        for token in ["true", "1", "yes", "YES", "True"] {
            assert!(parse(&format!("KEY,required={token}")).required());
        }
        for token in ["false", "0", "no", "NO", "False"] {
            assert!(!parse(&format!("KEY,required={token}")).required());
        }
    }

    #[test]
    fn test_invalid_required_token() {
        let result = FieldRule::parse("field", "KEY,required=maybe");
        assert!(matches!(result, Err(EnvError::UnsupportedField { .. })));
    }

    #[test]
    fn test_default_relaxes_required() {
        let rule = parse("PORT,default=8080");
        assert!(!rule.required());
        assert_eq!(rule.default_value(), Some("8080"));
    }

    #[test]
    fn test_default_keeps_equals_and_whitespace() {
        assert_eq!(
            parse("DSN,default=host=localhost").default_value(),
            Some("host=localhost")
        );
        assert_eq!(parse("KEY,default= padded ").default_value(), Some(" padded "));
        assert_eq!(parse("KEY,default=").default_value(), Some(""));
    }

    #[test]
    fn test_modifiers_in_any_order() {
        let rule = parse("PRIMARY_URL,SECONDARY_URL,required=false,default=http://localhost");
        assert_eq!(rule.candidate_keys(), ["PRIMARY_URL", "SECONDARY_URL"]);
        assert!(!rule.required());
        assert_eq!(rule.default_value(), Some("http://localhost"));
    }

    #[test]
    fn test_explicit_required_with_default() {
        let rule = parse("KEY,required,default=x");
        assert!(rule.required());
        assert_eq!(rule.default_value(), Some("x"));
    }

    #[test]
    fn test_unknown_modifier() {
        let result = FieldRule::parse("field", "KEY,prefix=APP_");
        assert!(matches!(result, Err(EnvError::UnsupportedField { .. })));
    }

    #[test]
    fn test_key_after_modifier() {
        let result = FieldRule::parse("field", "KEY,required,OTHER");
        assert!(matches!(result, Err(EnvError::UnsupportedField { .. })));
    }

    #[test]
    fn test_modifiers_without_key() {
        let result = FieldRule::parse("field", "required,default=1");
        assert!(matches!(result, Err(EnvError::UnsupportedField { .. })));
    }

    #[test]
    fn test_empty_segment() {
        let result = FieldRule::parse("field", "A,,B");
        assert!(matches!(result, Err(EnvError::UnsupportedField { .. })));
    }

    #[test]
    fn test_lookup_first_present_wins() {
        let rule = parse("FIRST,SECOND,THIRD");
        let env: EnvironmentSet = [("SECOND", "two"), ("THIRD", "three")].into_iter().collect();
        assert_eq!(rule.lookup(&env), Some(("SECOND", "two")));
    }

    #[test]
    fn test_lookup_empty_value_counts_as_present() {
        let rule = parse("FIRST,SECOND");
        let env: EnvironmentSet = [("FIRST", ""), ("SECOND", "two")].into_iter().collect();
        assert_eq!(rule.lookup(&env), Some(("FIRST", "")));
    }
}
