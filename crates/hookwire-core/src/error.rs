//! Error types shared by the hookwire decoders.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Handling at call site |
//! |---------|-------|-----------------------|
//! | `ParseErrorKind::Json` | attribute is not valid JSON | keep prior state, warn |
//! | `ParseErrorKind::Schema` | valid JSON, wrong shape for the widget kind | keep prior state, warn |
//! | `ParseErrorKind::Query` | malformed query pair (strict parsing only) | skip pair, warn |
//!
//! Registry misses and empty DOM queries are not errors; they surface as
//! `None` or empty collections.

use core::fmt;

/// Which decoder rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The attribute value was not valid JSON.
    Json,
    /// The JSON was valid but did not match the expected payload schema.
    Schema,
    /// A query-string pair could not be placed into the query state.
    Query,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Schema => write!(f, "schema"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// A decoder failure with enough context to log and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    context: String,
    message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
            message: message.into(),
        }
    }

    /// Malformed JSON in the attribute named by `context`.
    #[must_use]
    pub fn json(context: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::new(ParseErrorKind::Json, context, err.to_string())
    }

    /// Well-formed JSON that does not fit the payload type.
    #[must_use]
    pub fn schema(context: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::new(ParseErrorKind::Schema, context, err.to_string())
    }

    /// A query pair that cannot be decoded.
    #[must_use]
    pub fn query(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Query, context, message)
    }

    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Attribute name or query key that failed.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} parse error in '{}': {}",
            self.kind, self.context, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Errors from loading a [`HookConfig`](crate::HookConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON document was malformed or had unexpected fields.
    Json(String),
    /// The TOML document was malformed or had unexpected fields.
    Toml(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "invalid json config: {msg}"),
            Self::Toml(msg) => write!(f, "invalid toml config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
