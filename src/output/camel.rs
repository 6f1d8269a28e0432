//! snake_case to camelCase key conversion.

use serde_json::{Map, Value};

/// Convert one key to camelCase.
///
/// The key is split into words at `_`, `-` and spaces, and at case boundaries:
/// a capital after a lower-case letter or digit (`alreadyCamel`), and the last
/// capital of an acronym followed by a lower-case letter (`HTTPResponse`). Words
/// are lower-cased, then every word after the first is capitalized, so
/// `HTTPResponse_code` becomes `httpResponseCode`.
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());

    for (index, word) in split_words(key).iter().enumerate() {
        let lower = word.to_lowercase();
        if index == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

fn split_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase()
            && let Some(prev) = current.chars().last()
        {
            let after_lower = prev.is_lowercase() || prev.is_ascii_digit();
            let acronym_end =
                prev.is_uppercase() && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if after_lower || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Recursively camelCase every object key in `value`.
pub fn camelize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let converted: Map<String, Value> =
                map.into_iter().map(|(key, value)| (to_camel_case(&key), camelize(value))).collect();
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(camelize).collect()),
        scalar => scalar,
    }
}
