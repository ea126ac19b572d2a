//! Token classification and option-name rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::UserError;

static LONG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("static regex must compile"));

/// Shape of a single command-line token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `--name` or `--name=value`.
    Long,
    /// `-abc`: one or more single-letter flags.
    ShortGroup,
    /// Anything else, including a lone `-`.
    Positional,
}

/// Classifies a token by its leading dashes.
///
/// # Examples
///
/// ```
/// use argmap_core::{TokenKind, classify};
///
/// assert_eq!(classify("--verbose"), TokenKind::Long);
/// assert_eq!(classify("--out=a.txt"), TokenKind::Long);
/// assert_eq!(classify("-xvf"), TokenKind::ShortGroup);
/// assert_eq!(classify("file.txt"), TokenKind::Positional);
/// assert_eq!(classify("-"), TokenKind::Positional);
/// ```
pub fn classify(token: &str) -> TokenKind {
    if token.starts_with("--") {
        TokenKind::Long
    } else if token.len() > 1 && token.starts_with('-') {
        TokenKind::ShortGroup
    } else {
        TokenKind::Positional
    }
}

/// Whether a token would be read as an option rather than a value.
pub fn is_option_like(token: &str) -> bool {
    classify(token) != TokenKind::Positional
}

/// Whether `name` is a legal long-option name.
pub fn is_valid_long_name(name: &str) -> bool {
    LONG_NAME_RE.is_match(name)
}

/// Whether `flag` is a legal short-option character.
pub fn is_valid_short_flag(flag: char) -> bool {
    flag.is_ascii_alphabetic()
}

/// Validates a long-option token and returns its name.
///
/// The leading `--` and anything from the first `=` onward are stripped
/// before checking the name.
///
/// # Examples
///
/// ```
/// use argmap_core::validate_long_name;
///
/// assert_eq!(validate_long_name("--dry-run").unwrap(), "dry-run");
/// assert_eq!(validate_long_name("--out=a=b").unwrap(), "out");
/// assert!(validate_long_name("--1st").is_err());
/// assert!(validate_long_name("--").is_err());
/// ```
pub fn validate_long_name(token: &str) -> Result<&str, UserError> {
    let body = token.strip_prefix("--").unwrap_or(token);
    let name = body.split_once('=').map_or(body, |(name, _)| name);
    if is_valid_long_name(name) {
        Ok(name)
    } else {
        Err(UserError::InvalidOptionName(token.to_string()))
    }
}

/// Validates every character of a short-option group (`-abc`) and returns
/// the flags in order.
pub fn validate_short_group(token: &str) -> Result<Vec<char>, UserError> {
    let group = token.strip_prefix('-').unwrap_or(token);
    group
        .chars()
        .map(|flag| {
            if is_valid_short_flag(flag) {
                Ok(flag)
            } else {
                Err(UserError::InvalidFlag {
                    flag,
                    group: token.to_string(),
                })
            }
        })
        .collect()
}
