//! Key order of JSON objects as seen by clients.
//!
//! Object keys are enumerated the way a JavaScript engine enumerates own
//! properties: keys that are canonical array indices come first in ascending
//! numeric order, then every other key in insertion order. Echoed request
//! bodies and unknown-key error lists both follow this order.

use serde_json::{Map, Number, Value};

use super::id::exact_integer;

/// Largest array index, `2^32 - 2`.
const MAX_ARRAY_INDEX: u64 = 4_294_967_294;

/// Returns the numeric value of `key` when it is a canonical array index.
///
/// Canonical means `0` or a digit string without a leading zero, no larger
/// than [`MAX_ARRAY_INDEX`].
pub fn array_index(key: &str) -> Option<u64> {
    let bytes = key.as_bytes();
    match bytes {
        [b'0'] => Some(0),
        [b'1'..=b'9', rest @ ..] if rest.len() < 10 && rest.iter().all(u8::is_ascii_digit) => key
            .parse::<u64>()
            .ok()
            .filter(|index| *index <= MAX_ARRAY_INDEX),
        _ => None,
    }
}

/// Keys of `map` in enumeration order.
///
/// # Examples
///
/// ```
/// use kennel_core::dog::ordered_keys;
/// use serde_json::json;
///
/// let body = json!({"weight": 10, "7": 1, "name": "Rex", "0": 2});
/// let keys = ordered_keys(body.as_object().unwrap());
/// assert_eq!(keys, vec!["0", "7", "weight", "name"]);
/// ```
pub fn ordered_keys(map: &Map<String, Value>) -> Vec<&str> {
    let mut indices: Vec<(u64, &str)> = Vec::new();
    let mut names: Vec<&str> = Vec::new();

    for key in map.keys().map(String::as_str) {
        match array_index(key) {
            Some(index) => indices.push((index, key)),
            None => names.push(key),
        }
    }

    indices.sort_unstable_by_key(|(index, _)| *index);
    indices
        .into_iter()
        .map(|(_, key)| key)
        .chain(names)
        .collect()
}

/// Rewrites a request value into the form it is echoed back in.
///
/// Objects, nested ones included, are reordered by [`ordered_keys`], and
/// integral floats such as `4.0` are written as integers.
pub fn echo_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(echo_object(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(echo_value).collect()),
        Value::Number(number) => Value::Number(echo_number(number)),
        other => other,
    }
}

fn echo_object(mut map: Map<String, Value>) -> Map<String, Value> {
    let keys: Vec<String> = ordered_keys(&map).into_iter().map(str::to_owned).collect();

    keys.into_iter()
        .filter_map(|key| {
            let value = map.remove(&key)?;
            Some((key, echo_value(value)))
        })
        .collect()
}

fn echo_number(number: Number) -> Number {
    if !number.is_f64() {
        return number;
    }

    match number.as_f64().and_then(exact_integer) {
        Some(integer) => Number::from(integer),
        None => number,
    }
}
