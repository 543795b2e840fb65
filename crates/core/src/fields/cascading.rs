//! Grammar for textual cascading-select values
//!
//! A cascading selection arrives as a fixed-format string naming one or two
//! levels, each one a labelled choice followed by its option id:
//!
//! ```text
//! input   := segment segment?
//! segment := label ":" choice "(" id ")"
//! ```
//!
//! For example `Parent values: Red(10059)Level 1 values: Dark(10060)`. Option
//! ids belong to the remote representation and are discarded on encode; only
//! the choices survive. Anything beyond two levels is rejected, since the
//! field type itself is two-level.

use serde_json::json;

use super::error::FieldError;

/// A parsed cascading selection: the parent choice and, optionally, the
/// second-level choice under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadingChoice {
    pub parent: String,
    pub child: Option<String>,
}

fn parse_error(input: &str, reason: &str) -> FieldError {
    FieldError::CascadingParse {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a textual cascading value into its choices.
///
/// Splits on `)`, then `(`, then `:`, yielding a label and a choice per
/// segment. Exactly one or two segments are accepted.
pub fn parse(input: &str) -> Result<CascadingChoice, FieldError> {
    let segments: Vec<&str> = input
        .split(')')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        return Err(parse_error(input, "no selection"));
    }
    if segments.len() > 2 {
        return Err(parse_error(input, "more than two levels"));
    }

    let mut choices = Vec::with_capacity(2);
    for segment in &segments {
        let (head, _id) = segment
            .rsplit_once('(')
            .ok_or_else(|| parse_error(input, "missing '(' before option id"))?;
        let (_label, choice) = head
            .split_once(':')
            .ok_or_else(|| parse_error(input, "missing ':' after level label"))?;
        let choice = choice.trim();
        if choice.is_empty() {
            return Err(parse_error(input, "empty choice"));
        }
        choices.push(choice.to_string());
    }

    let mut choices = choices.into_iter();
    Ok(CascadingChoice {
        parent: choices.next().unwrap_or_default(),
        child: choices.next(),
    })
}

/// Encode a cascading selection into its wire shape: `{"value": parent}` for
/// a single level, with a nested `child` object when a second level is set.
pub fn encode(choice: &CascadingChoice) -> serde_json::Value {
    match &choice.child {
        Some(child) => json!({ "value": choice.parent, "child": { "value": child } }),
        None => json!({ "value": choice.parent }),
    }
}
