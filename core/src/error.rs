//! Error taxonomy for parsing and manifest validation.
//!
//! Two disjoint kinds, split by who can fix the problem:
//!
//! - [`DeveloperError`]: the manifest (or the call) is malformed. This is a
//!   programming mistake in the consuming application and carries no code.
//! - [`UserError`]: the end user's tokens are wrong. Each variant maps to a
//!   stable [`ErrorCode`] so a CLI can branch on it without matching text.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::Value;

/// Stable machine-readable codes carried by [`UserError`].
///
/// # Examples
///
/// ```
/// use argmap_core::ErrorCode;
///
/// assert_eq!(ErrorCode::UnknownOpt.as_str(), "E_UNKNOWN_OPT");
/// assert_eq!(ErrorCode::MissingOpt.to_string(), "E_MISSING_OPT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// Malformed long option name or short flag character.
    #[serde(rename = "E_INVALID_OPT_NAME")]
    InvalidOptName,
    /// Value failed type coercion or the allow list.
    #[serde(rename = "E_INVALID_OPT_VALUE")]
    InvalidOptValue,
    /// Required option not supplied and no default declared.
    #[serde(rename = "E_MISSING_OPT")]
    MissingOpt,
    /// Named option absent from the manifest.
    #[serde(rename = "E_UNKNOWN_OPT")]
    UnknownOpt,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidOptName => "E_INVALID_OPT_NAME",
            ErrorCode::InvalidOptValue => "E_INVALID_OPT_VALUE",
            ErrorCode::MissingOpt => "E_MISSING_OPT",
            ErrorCode::UnknownOpt => "E_UNKNOWN_OPT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema-authoring or caller mistakes.
///
/// Raised by [`validate_manifest`](crate::validate_manifest) and by manifest
/// loaders. These are meant to surface during development, not to be caught
/// selectively.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeveloperError {
    /// Manifest document is not a key/entry mapping.
    #[error("manifest must be a mapping of option names to entries, got {0}")]
    NotAMapping(String),
    /// Key is neither an option name nor a positional index.
    #[error("invalid manifest key `{0}`: expected an option name or a positional index")]
    InvalidKey(String),
    /// Key `_` names the positional list and cannot be declared.
    #[error("manifest key `_` is reserved for the positional argument list")]
    ReservedKey,
    /// Declared type is not one of the four recognized types.
    #[error("option `{name}` has unrecognized type `{kind}` (expected boolean, string, int or float)")]
    UnknownType { name: String, kind: String },
    /// Default value does not match the declared type.
    #[error("default `{value}` for option `{name}` is a {found}, expected {expected}")]
    DefaultTypeMismatch {
        name: String,
        expected: String,
        found: &'static str,
        value: Value,
    },
    /// Allow list declared on a boolean option.
    #[error("boolean option `{0}` cannot declare an allow list")]
    AllowOnBoolean(String),
    /// Allow list declared but empty.
    #[error("allow list for option `{0}` cannot be empty")]
    EmptyAllow(String),
    /// Allow list member does not match the declared type.
    #[error("allow list for option `{name}` contains {found} `{value}`, expected {expected}")]
    AllowTypeMismatch {
        name: String,
        expected: String,
        found: &'static str,
        value: Value,
    },
    /// Default value is not one of the allowed values.
    #[error("default `{value}` for option `{name}` is not in its allow list")]
    DefaultNotAllowed { name: String, value: Value },
}

/// Mistakes in the end user's tokens.
///
/// # Examples
///
/// ```
/// use argmap_core::{ErrorCode, UserError};
///
/// let err = UserError::UnknownOption("colour".into());
/// assert_eq!(err.code(), ErrorCode::UnknownOpt);
/// assert_eq!(err.to_string(), "unknown option `colour`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// Long option token whose name breaks the naming rules.
    #[error("invalid option name `{0}`")]
    InvalidOptionName(String),
    /// Short option group containing a non-letter.
    #[error("invalid flag `{flag}` in option group `{group}`")]
    InvalidFlag { flag: char, group: String },
    /// Value that failed coercion or the allow list. `option` is the
    /// rendered option (e.g. `jobs=<int>`).
    #[error("invalid value `{value}` for option `{option}`")]
    InvalidValue { option: String, value: String },
    /// Required option not supplied.
    #[error("missing required option `{0}`")]
    MissingOption(String),
    /// Named option not declared in the manifest.
    #[error("unknown option `{0}`")]
    UnknownOption(String),
}

impl UserError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::InvalidOptionName(_) | UserError::InvalidFlag { .. } => {
                ErrorCode::InvalidOptName
            }
            UserError::InvalidValue { .. } => ErrorCode::InvalidOptValue,
            UserError::MissingOption(_) => ErrorCode::MissingOpt,
            UserError::UnknownOption(_) => ErrorCode::UnknownOpt,
        }
    }
}

/// Any failure of [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Developer(#[from] DeveloperError),
    #[error(transparent)]
    User(#[from] UserError),
}

impl Error {
    /// Stable code for user errors; `None` for developer errors.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Developer(_) => None,
            Error::User(err) => Some(err.code()),
        }
    }

    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::User(_))
    }
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
