//! Command-line token parsing with an optional declarative manifest.
//!
//! This crate turns a flat sequence of tokens into a [`ParsedArgs`] map:
//!
//! - `--name value`, `--name=value` and `--flag` become named entries.
//! - `-abc` sets `a` and `b` to `true`; `c` takes the next token as its
//!   value unless that token looks like an option.
//! - Everything else is positional, stored under its index and in the
//!   ordered [`positionals`](ParsedArgs::positionals) list.
//!
//! With a [`Manifest`], unknown named options are rejected, the manifest is
//! checked by [`validate_manifest`], and each entry's value is coerced to its
//! declared [`OptionKind`], checked against its allow list, defaulted, or
//! reported missing. Options declared `boolean` never capture the next
//! token.
//!
//! Errors are split into [`DeveloperError`] (the manifest is wrong) and
//! [`UserError`] (the tokens are wrong, with a stable [`ErrorCode`]).
//!
//! # Example
//!
//! ```
//! use argmap_core::*;
//!
//! let manifest = Manifest::new()
//!     .with_option("format", OptionSpec::string().with_allow(["json", "yaml"]).with_default("json"))
//!     .with_option("retries", OptionSpec::int().required())
//!     .with_option("dry-run", OptionSpec::boolean());
//!
//! let args = parse(Some(&manifest), ["--dry-run", "deploy", "--retries=3"]).unwrap();
//! assert_eq!(args.get_str("format"), Some("json"));
//! assert_eq!(args.get_int("retries"), Some(3));
//! assert_eq!(args.get_bool("dry-run"), Some(true));
//! assert_eq!(args.get_index(0), Some(&Value::from("deploy")));
//!
//! let err = parse(Some(&manifest), ["--format", "xml", "--retries", "1"]).unwrap_err();
//! assert_eq!(err.code(), Some(ErrorCode::InvalidOptValue));
//!
//! assert_eq!(
//!     syntax(Some(&manifest)),
//!     "[-format=<json|yaml>] -retries=<int> [-dry-run]"
//! );
//! ```

mod args;
mod coerce;
mod consume;
mod error;
mod parser;
mod syntax;
mod token;
mod types;
mod validate;

pub use args::ParsedArgs;
pub use coerce::render_option;
pub use error::{DeveloperError, Error, ErrorCode, Result, UserError};
pub use parser::{parse, parse_env, parse_queue};
pub use syntax::syntax;
pub use token::{
    TokenKind, classify, is_option_like, is_valid_long_name, is_valid_short_flag,
    validate_long_name, validate_short_group,
};
pub use types::*;
pub use validate::{collect_manifest_errors, validate_manifest};
