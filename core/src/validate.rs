//! Manifest validation.
//!
//! Checks the declared entries of a [`Manifest`] for internal consistency
//! before it is used to interpret parsed tokens: keys must be option names
//! or positional indices, types must be recognized, defaults must match the
//! type, and allow lists must be non-empty, homogeneous, absent on booleans,
//! and contain the default.
//!
//! # Examples
//!
//! ```
//! use argmap_core::*;
//!
//! let manifest = Manifest::new()
//!     .with_option("format", OptionSpec::string().with_allow(["json", "yaml"]));
//! assert!(validate_manifest(&manifest).is_ok());
//!
//! // Invalid: default outside the allow list
//! let bad = Manifest::new().with_option(
//!     "format",
//!     OptionSpec::string().with_allow(["json", "yaml"]).with_default("toml"),
//! );
//! assert!(matches!(
//!     validate_manifest(&bad),
//!     Err(DeveloperError::DefaultNotAllowed { .. })
//! ));
//! ```

use tracing::debug;

use crate::error::DeveloperError;
use crate::token::is_valid_long_name;
use crate::{Key, Manifest, OptionKind, OptionSpec};

/// Validates a manifest, returning the first problem found.
pub fn validate_manifest(manifest: &Manifest) -> Result<(), DeveloperError> {
    for (name, spec) in manifest.iter() {
        validate_entry(name, spec)?;
    }
    debug!(entries = manifest.len(), "manifest validated");
    Ok(())
}

/// Validates a manifest, returning every problem found (at most one per
/// entry, in declaration order).
///
/// # Examples
///
/// ```
/// use argmap_core::*;
///
/// let manifest = Manifest::new()
///     .with_option("quiet", OptionSpec::boolean().with_allow([true]))
///     .with_option("jobs", OptionSpec::int().with_default("four"))
///     .with_option("name", OptionSpec::string());
///
/// let errors = collect_manifest_errors(&manifest);
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors[0], DeveloperError::AllowOnBoolean("quiet".into()));
/// ```
pub fn collect_manifest_errors(manifest: &Manifest) -> Vec<DeveloperError> {
    manifest
        .iter()
        .filter_map(|(name, spec)| validate_entry(name, spec).err())
        .collect()
}

fn validate_entry(name: &str, spec: &OptionSpec) -> Result<(), DeveloperError> {
    validate_key(name)?;

    if let OptionKind::Unrecognized(kind) = &spec.kind {
        return Err(DeveloperError::UnknownType {
            name: name.to_string(),
            kind: kind.clone(),
        });
    }

    if let Some(default) = &spec.default {
        if !spec.kind.accepts(default) {
            return Err(DeveloperError::DefaultTypeMismatch {
                name: name.to_string(),
                expected: spec.kind.to_string(),
                found: default.kind_name(),
                value: default.clone(),
            });
        }
    }

    let Some(allow) = &spec.allow else {
        return Ok(());
    };
    if spec.kind == OptionKind::Boolean {
        return Err(DeveloperError::AllowOnBoolean(name.to_string()));
    }
    if allow.is_empty() {
        return Err(DeveloperError::EmptyAllow(name.to_string()));
    }
    if let Some(value) = allow.iter().find(|value| !spec.kind.accepts(value)) {
        return Err(DeveloperError::AllowTypeMismatch {
            name: name.to_string(),
            expected: spec.kind.to_string(),
            found: value.kind_name(),
            value: value.clone(),
        });
    }
    if let Some(default) = &spec.default {
        if !allow.contains(default) {
            return Err(DeveloperError::DefaultNotAllowed {
                name: name.to_string(),
                value: default.clone(),
            });
        }
    }

    Ok(())
}

fn validate_key(name: &str) -> Result<(), DeveloperError> {
    if name == "_" {
        return Err(DeveloperError::ReservedKey);
    }
    if Key::parse(name).is_positional() || is_valid_long_name(name) {
        Ok(())
    } else {
        Err(DeveloperError::InvalidKey(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::Value;

    use super::*;

    fn single(name: &str, spec: OptionSpec) -> Manifest {
        Manifest::new().with_option(name, spec)
    }

    #[test]
    fn test_rejects_unrecognized_type() {
        let manifest = single("count", OptionSpec::new(OptionKind::from("number".to_string())));
        assert_eq!(
            validate_manifest(&manifest),
            Err(DeveloperError::UnknownType {
                name: "count".into(),
                kind: "number".into()
            })
        );
    }

    #[test]
    fn test_rejects_default_of_wrong_type() {
        let manifest = single("jobs", OptionSpec::int().with_default("4"));
        assert!(matches!(
            validate_manifest(&manifest),
            Err(DeveloperError::DefaultTypeMismatch { found: "string", .. })
        ));
    }

    #[test]
    fn test_numeric_types_accept_any_number() {
        let manifest = Manifest::new()
            .with_option("ratio", OptionSpec::float().with_default(1).with_allow([1.0, 2.5]))
            .with_option("jobs", OptionSpec::int().with_allow([1, 2]).with_default(2.0));
        assert!(validate_manifest(&manifest).is_ok());
    }

    #[test]
    fn test_rejects_allow_on_boolean() {
        let manifest = single("quiet", OptionSpec::boolean().with_allow([true]));
        assert_eq!(
            validate_manifest(&manifest),
            Err(DeveloperError::AllowOnBoolean("quiet".into()))
        );
    }

    #[test]
    fn test_rejects_empty_allow() {
        let manifest = single("format", OptionSpec::string().with_allow(Vec::<Value>::new()));
        assert_eq!(
            validate_manifest(&manifest),
            Err(DeveloperError::EmptyAllow("format".into()))
        );
    }

    #[test]
    fn test_rejects_heterogeneous_allow() {
        let manifest = single(
            "level",
            OptionSpec::int().with_allow([Value::Int(1), Value::from("two")]),
        );
        assert!(matches!(
            validate_manifest(&manifest),
            Err(DeveloperError::AllowTypeMismatch { found: "string", .. })
        ));
    }

    #[test]
    fn test_rejects_default_outside_allow() {
        let manifest = single(
            "format",
            OptionSpec::string().with_allow(["json"]).with_default("xml"),
        );
        assert_eq!(
            validate_manifest(&manifest),
            Err(DeveloperError::DefaultNotAllowed {
                name: "format".into(),
                value: Value::from("xml")
            })
        );
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert_eq!(
            validate_manifest(&single("_", OptionSpec::string())),
            Err(DeveloperError::ReservedKey)
        );
        assert_eq!(
            validate_manifest(&single("--long", OptionSpec::string())),
            Err(DeveloperError::InvalidKey("--long".into()))
        );
        assert_eq!(
            validate_manifest(&single("007", OptionSpec::string())),
            Err(DeveloperError::InvalidKey("007".into()))
        );
    }

    #[test]
    fn test_accepts_positional_and_short_keys() {
        let manifest = Manifest::new()
            .with_option("0", OptionSpec::string().required())
            .with_option("1", OptionSpec::int())
            .with_option("v", OptionSpec::boolean());
        assert!(validate_manifest(&manifest).is_ok());
    }
}
