//! Parse entry points.

use std::collections::VecDeque;

use tracing::debug;

use crate::coerce::apply_manifest;
use crate::consume::consume;
use crate::error::{Result, UserError};
use crate::{Manifest, ParsedArgs, validate_manifest};

/// Parses `tokens`, optionally validating and coercing against `manifest`.
///
/// The tokens are taken by value; use [`parse_queue`] to drain a queue the
/// caller owns.
///
/// # Errors
///
/// Returns [`Error::User`](crate::Error::User) for bad tokens, values that
/// fail coercion or the allow list, missing required options and (with a
/// manifest) undeclared named options. Returns
/// [`Error::Developer`](crate::Error::Developer) when the manifest itself is
/// inconsistent.
///
/// # Examples
///
/// ```
/// use argmap_core::{ErrorCode, Manifest, OptionSpec, parse};
///
/// let manifest = Manifest::new()
///     .with_option("jobs", OptionSpec::int().with_default(1))
///     .with_option("quiet", OptionSpec::boolean());
///
/// let args = parse(Some(&manifest), ["--quiet", "build", "--jobs", "8"]).unwrap();
/// assert_eq!(args.get_int("jobs"), Some(8));
/// assert_eq!(args.get_bool("quiet"), Some(true));
/// assert_eq!(args.positionals(), ["build"]);
///
/// let err = parse(Some(&manifest), ["--color"]).unwrap_err();
/// assert_eq!(err.code(), Some(ErrorCode::UnknownOpt));
/// ```
pub fn parse<I, S>(manifest: Option<&Manifest>, tokens: I) -> Result<ParsedArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut queue: VecDeque<String> = tokens.into_iter().map(Into::into).collect();
    parse_queue(manifest, &mut queue)
}

/// Parses by draining the caller's queue front to back.
///
/// On success the queue is empty. On failure the tokens after the offending
/// one are left in place.
pub fn parse_queue(manifest: Option<&Manifest>, queue: &mut VecDeque<String>) -> Result<ParsedArgs> {
    debug!(tokens = queue.len(), with_manifest = manifest.is_some(), "parsing tokens");
    let consumed = consume(queue, |name| {
        manifest.is_some_and(|m| m.is_boolean_option(name))
    })?;

    let Some(manifest) = manifest else {
        return Ok(consumed.into_args());
    };

    if let Some(name) = consumed.first_undeclared(|name| manifest.contains(name)) {
        return Err(UserError::UnknownOption(name.to_string()).into());
    }
    let args = consumed.into_args();

    validate_manifest(manifest)?;
    Ok(apply_manifest(manifest, args)?)
}

/// Parses the process arguments, excluding the executable path.
///
/// Reads a private copy of the argument vector; the process arguments are
/// not affected. Non-UTF-8 arguments are converted lossily.
pub fn parse_env(manifest: Option<&Manifest>) -> Result<ParsedArgs> {
    parse(
        manifest,
        std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned()),
    )
}
