//! Text ⇄ [`QueryState`] conversion.
//!
//! Keys are a field name followed by zero or more `[segment]` groups and
//! an optional trailing `[]` list marker:
//!
//! ```text
//! page=2
//! columns[]=name&columns[]=email
//! filters[status][]=open&filters[status][]=closed
//! ```
//!
//! Repeated plain keys (`a=1&a=2`) accumulate into a list like `a[]`.
//!
//! # Failure Modes
//!
//! | Input | `try_parse` | `parse` |
//! |-------|-------------|---------|
//! | empty / only separators | empty state | empty state |
//! | `a[b=1` (unbalanced) | `Err(Query)` | pair skipped, warn |
//! | `a[]x=1` (text after marker) | `Err(Query)` | pair skipped, warn |
//! | `a=1&a[b]=2` (scalar vs nested) | `Err(Query)` | pair skipped, warn |
//! | nesting deeper than [`MAX_DEPTH`] | `Err(Query)` | pair skipped, warn |

use hookwire_core::ParseError;
use url::form_urlencoded;

use crate::state::{QueryState, QueryValue};

/// Maximum number of `[segment]` groups after the field name.
pub const MAX_DEPTH: usize = 5;

/// A decoded key: `segments[0]` is the field name.
#[derive(Debug, PartialEq, Eq)]
struct KeyPath {
    segments: Vec<String>,
    list: bool,
}

fn parse_key(raw: &str) -> Result<KeyPath, String> {
    let (name, mut rest) = match raw.find('[') {
        Some(idx) => raw.split_at(idx),
        None => (raw, ""),
    };
    if name.is_empty() {
        return Err("missing field name".into());
    }
    let mut segments = vec![name.to_owned()];
    let mut list = false;
    while !rest.is_empty() {
        if list {
            return Err("list marker must be last".into());
        }
        let Some(inner) = rest.strip_prefix('[') else {
            return Err("unexpected text after ']'".into());
        };
        let Some(close) = inner.find(']') else {
            return Err("unbalanced brackets".into());
        };
        let segment = &inner[..close];
        if segment.contains('[') {
            return Err("unbalanced brackets".into());
        }
        if segment.is_empty() {
            list = true;
        } else {
            segments.push(segment.to_owned());
        }
        rest = &inner[close + 1..];
    }
    if segments.len() - 1 > MAX_DEPTH {
        return Err(format!("nesting deeper than {MAX_DEPTH}"));
    }
    Ok(KeyPath { segments, list })
}

fn place(state: &mut QueryState, key: KeyPath, value: String) -> Result<(), String> {
    let KeyPath { mut segments, list } = key;
    let leaf = segments.pop().unwrap_or_default();
    let mut node = state;
    for segment in segments {
        let slot = node
            .fields
            .entry(segment.clone())
            .or_insert_with(|| QueryValue::Map(QueryState::new()));
        node = match slot {
            QueryValue::Map(map) => map,
            _ => return Err(format!("'{segment}' already holds a value")),
        };
    }
    match node.fields.get_mut(&leaf) {
        None if list => {
            node.fields.insert(leaf, QueryValue::List(vec![value]));
        }
        None => {
            node.fields.insert(leaf, QueryValue::Scalar(value));
        }
        Some(slot) => match slot {
            QueryValue::List(values) => values.push(value),
            QueryValue::Scalar(first) => {
                let first = std::mem::take(first);
                *slot = QueryValue::List(vec![first, value]);
            }
            QueryValue::Map(_) => return Err(format!("'{leaf}' already holds nested fields")),
        },
    }
    Ok(())
}

fn parse_inner(query: &str, strict: bool) -> Result<QueryState, ParseError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = QueryState::new();
    for (raw_key, value) in form_urlencoded::parse(query.as_bytes()) {
        if raw_key.is_empty() {
            continue;
        }
        let placed = parse_key(&raw_key).and_then(|key| place(&mut state, key, value.into_owned()));
        if let Err(message) = placed {
            if strict {
                return Err(ParseError::query(raw_key, message));
            }
            tracing::warn!(key = %raw_key, reason = %message, "skipping malformed query pair");
        }
    }
    Ok(state)
}

/// Parse a query string, rejecting the first malformed pair.
///
/// A leading `?` is ignored.
pub fn try_parse(query: &str) -> Result<QueryState, ParseError> {
    parse_inner(query, true)
}

/// Parse a query string, skipping malformed pairs.
///
/// Never fails: unrecognized or empty input yields an empty state.
#[must_use]
pub fn parse(query: &str) -> QueryState {
    parse_inner(query, false).unwrap_or_default()
}

fn encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

fn emit(prefix: &str, value: &QueryValue, out: &mut Vec<String>) {
    match value {
        QueryValue::Scalar(v) => out.push(format!("{prefix}={}", encode(v))),
        QueryValue::List(values) => {
            out.extend(values.iter().map(|v| format!("{prefix}[]={}", encode(v))));
        }
        QueryValue::Map(map) => {
            for (key, nested) in map {
                emit(&format!("{prefix}[{}]", encode(key)), nested, out);
            }
        }
    }
}

/// Serialize in field insertion order.
///
/// Brackets are written literally; names and values are percent-encoded.
#[must_use]
pub fn serialize(state: &QueryState) -> String {
    let mut pairs = Vec::new();
    for (name, value) in state {
        emit(&encode(name), value, &mut pairs);
    }
    pairs.join("&")
}
