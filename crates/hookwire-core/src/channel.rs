//! Attribute-encoded data channel.
//!
//! Server-rendered markup carries structured payloads in string attributes
//! holding compact JSON. Decoding happens in two stages so failures can be
//! told apart: text → [`serde_json::Value`] (a [`ParseErrorKind::Json`]
//! failure) and value → typed payload (a [`ParseErrorKind::Schema`]
//! failure). Each widget kind declares its own payload type, so the shape
//! is validated on decode instead of trusted.
//!
//! # Invariants
//!
//! 1. `decode_value(Some(&encode(x))) == Ok(x)` for every JSON value `x`.
//! 2. A missing or empty attribute decodes to `T::default()`.
//! 3. [`decode_or_keep`] never propagates a failure: the prior payload is
//!    retained and a warning is logged.
//!
//! [`ParseErrorKind::Json`]: crate::ParseErrorKind::Json
//! [`ParseErrorKind::Schema`]: crate::ParseErrorKind::Schema

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dom::ElementNode;
use crate::error::ParseError;

/// Serialize a JSON value into an attribute string.
#[must_use]
pub fn encode(value: &Value) -> String {
    value.to_string()
}

/// Serialize any payload into an attribute string.
///
/// Fails only for values JSON cannot represent (e.g. maps with non-string
/// keys).
pub fn encode_payload<T: Serialize>(payload: &T) -> Result<String, ParseError> {
    serde_json::to_string(payload).map_err(|err| ParseError::json("payload", &err))
}

/// Parse an attribute string into a JSON value.
///
/// `None` and the empty string decode to [`Value::Null`].
pub fn decode_value(raw: Option<&str>) -> Result<Value, ParseError> {
    decode_value_in("attribute", raw)
}

fn decode_value_in(context: &str, raw: Option<&str>) -> Result<Value, ParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Value::Null),
        Some(text) => serde_json::from_str(text).map_err(|err| ParseError::json(context, &err)),
    }
}

/// Decode an attribute string into a typed payload.
///
/// A missing attribute (or `null`) yields `T::default()`.
pub fn decode<T>(context: &str, raw: Option<&str>) -> Result<T, ParseError>
where
    T: DeserializeOwned + Default,
{
    let value = decode_value_in(context, raw)?;
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|err| ParseError::schema(context, &err))
}

/// Decode the payload held in `attr` on `element`.
pub fn read<T>(element: &ElementNode, attr: &str) -> Result<T, ParseError>
where
    T: DeserializeOwned + Default,
{
    decode(attr, element.attr(attr))
}

/// Decode `attr` into `prior`, keeping `prior` untouched on failure.
///
/// Returns `true` when `prior` was replaced. A failure is logged at `warn`
/// and swallowed; callers treat it as "nothing new arrived".
pub fn decode_or_keep<T>(element: &ElementNode, attr: &str, prior: &mut T) -> bool
where
    T: DeserializeOwned + Default,
{
    match read::<T>(element, attr) {
        Ok(next) => {
            *prior = next;
            true
        }
        Err(err) => {
            tracing::warn!(
                element = %element,
                attribute = attr,
                kind = %err.kind(),
                error = %err.message(),
                "malformed payload; keeping prior state"
            );
            false
        }
    }
}
