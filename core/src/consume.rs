//! Single-pass consumption of the token queue.
//!
//! The engine pops tokens front to back and builds two things: a map of named
//! options (in first-seen order) and the ordered list of positional tokens.
//! It knows nothing about the manifest beyond one capability: whether a name
//! is declared boolean, which stops a flag from capturing the next token.

use std::collections::{BTreeMap, VecDeque};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::UserError;
use crate::token::{TokenKind, classify, is_option_like, validate_long_name, validate_short_group};
use crate::{Key, ParsedArgs, Value};

/// Output of a finished consumption pass, before positional indices are
/// merged into the map.
#[derive(Debug, Default)]
pub(crate) struct Consumed {
    pub(crate) named: IndexMap<String, Value>,
    pub(crate) positionals: Vec<String>,
}

impl Consumed {
    /// First named key (in first-seen order) that `is_declared` rejects.
    pub(crate) fn first_undeclared(&self, is_declared: impl Fn(&str) -> bool) -> Option<&str> {
        self.named
            .keys()
            .map(String::as_str)
            .find(|name| !is_declared(name))
    }

    /// Merges positional arguments into the map under their indices.
    pub(crate) fn into_args(self) -> ParsedArgs {
        let mut values: BTreeMap<Key, Value> = self
            .named
            .into_iter()
            .map(|(name, value)| (Key::Named(name), value))
            .collect();
        for (index, token) in self.positionals.iter().enumerate() {
            values.insert(Key::Positional(index), Value::Str(token.clone()));
        }
        ParsedArgs::from_parts(values, self.positionals)
    }
}

/// State of one consumption pass.
struct Consumer<'q, F> {
    queue: &'q mut VecDeque<String>,
    is_boolean: F,
    out: Consumed,
}

impl<F> Consumer<'_, F>
where
    F: Fn(&str) -> bool,
{
    fn run(mut self) -> Result<Consumed, UserError> {
        while let Some(token) = self.queue.pop_front() {
            self.step(token)?;
        }
        Ok(self.out)
    }

    fn step(&mut self, token: String) -> Result<(), UserError> {
        let kind = classify(&token);
        trace!(token = %token, ?kind, "classified token");
        match kind {
            TokenKind::Long => self.long_option(&token),
            TokenKind::ShortGroup => self.short_group(&token),
            TokenKind::Positional => {
                self.out.positionals.push(token);
                Ok(())
            }
        }
    }

    fn long_option(&mut self, token: &str) -> Result<(), UserError> {
        let name = validate_long_name(token)?;
        let value = match token.split_once('=') {
            Some((_, value)) => Value::Str(value.to_string()),
            None => self.flag_or_value(name),
        };
        self.record(name, value);
        Ok(())
    }

    fn short_group(&mut self, token: &str) -> Result<(), UserError> {
        let flags = validate_short_group(token)?;
        let Some((last, leading)) = flags.split_last() else {
            return Ok(());
        };
        for flag in leading {
            self.record(&flag.to_string(), Value::Bool(true));
        }
        let last = last.to_string();
        let value = self.flag_or_value(&last);
        self.record(&last, value);
        Ok(())
    }

    /// Captures the next token as the value of `name` unless the queue is
    /// empty, the next token is option-shaped, or `name` is declared boolean.
    fn flag_or_value(&mut self, name: &str) -> Value {
        if (self.is_boolean)(name) {
            return Value::Bool(true);
        }
        let takes_next = self.queue.front().is_some_and(|next| !is_option_like(next));
        if takes_next {
            if let Some(next) = self.queue.pop_front() {
                return Value::Str(next);
            }
        }
        Value::Bool(true)
    }

    fn record(&mut self, name: &str, value: Value) {
        debug!(option = name, value = %value, "captured option");
        self.out.named.insert(name.to_string(), value);
    }
}

/// Drains `queue` front to back. `is_boolean` reports names declared as
/// boolean options.
pub(crate) fn consume<F>(queue: &mut VecDeque<String>, is_boolean: F) -> Result<Consumed, UserError>
where
    F: Fn(&str) -> bool,
{
    Consumer {
        queue,
        is_boolean,
        out: Consumed::default(),
    }
    .run()
}
