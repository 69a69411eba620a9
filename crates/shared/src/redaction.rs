//! Secret-looking field detection and in-place masking of structured values.
//!
//! A field name is split into lowercase words (on `_`, `-`, `.`, spaces, and
//! camelCase boundaries); it is secret when any word, or any two adjacent
//! words joined, is a known credential word. Matching whole words keeps
//! `keys`, `monkey`, or `author` readable, and a bare `key` is not secret.

use serde_json::Value;

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

const SECRET_WORDS: &[&str] = &[
    "accesskey",
    "apikey",
    "auth",
    "authorization",
    "bearer",
    "cookie",
    "credential",
    "credentials",
    "passphrase",
    "passwd",
    "password",
    "privatekey",
    "pwd",
    "secret",
    "token",
];

/// Whether a field name looks like it holds a credential.
///
/// ```
/// use logbridge_shared::is_secret_key;
///
/// assert!(is_secret_key("API_KEY"));
/// assert!(is_secret_key("authToken"));
/// assert!(!is_secret_key("subsystem_name"));
/// assert!(!is_secret_key("keys"));
/// assert!(!is_secret_key("key"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let words = field_words(key);
    let is_secret = |word: &str| SECRET_WORDS.contains(&word);
    words.iter().any(|word| is_secret(word))
        || words
            .windows(2)
            .any(|pair| is_secret(&pair.concat()))
}

fn field_words(key: &str) -> Vec<String> {
    key.split(|ch: char| matches!(ch, '_' | '-' | '.' | ' '))
        .flat_map(split_camel_case)
        .filter(|word| !word.is_empty())
        .collect()
}

fn split_camel_case(segment: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;
    for ch in segment.chars() {
        if ch.is_ascii_uppercase() && previous_lower {
            words.push(std::mem::take(&mut current));
        }
        previous_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        current.push(ch.to_ascii_lowercase());
    }
    words.push(current);
    words
}

/// Masks a structured field value in place when its name looks secret.
///
/// Non-secret values are walked recursively so nested objects such as
/// `{"db": {"password": "..."}}` are masked too.
pub fn redact_field(key: &str, value: &mut Value) {
    if is_secret_key(key) {
        *value = Value::String(REDACTED.to_string());
    } else {
        redact_value(value);
    }
}

/// Masks every secret-looking key nested inside `value`.
pub fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                redact_field(key, nested);
            }
        },
        Value::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credential_words_are_secret_in_any_casing() {
        for key in [
            "API_KEY",
            "api-key",
            "apiKey",
            "ApiKey",
            "x.api.key",
            "apikey",
            "refresh_token",
            "authToken",
            "CLIENT_SECRET",
            "db_password",
            "aws_credentials",
            "Authorization",
            "session cookie",
            "AWS_ACCESS_KEY",
            "privateKey",
        ] {
            assert!(is_secret_key(key), "{key} should be secret");
        }
    }

    #[test]
    fn partial_word_matches_are_not_secret() {
        for key in [
            "key",
            "cache_key",
            "keys",
            "monkey",
            "author",
            "tokens_used",
            "subsystem_name",
            "args",
            "fields",
            "LOG_LEVEL",
        ] {
            assert!(!is_secret_key(key), "{key} should not be secret");
        }
    }

    #[test]
    fn redacts_nested_field_values() {
        let mut value = json!({
            "user": "ada",
            "db": { "password": "hunter2", "port": 5432 }, // pragma: allowlist secret
            "items": [{ "token": "abc" }]
        });
        redact_field("request", &mut value);

        assert_eq!(value["user"], json!("ada"));
        assert_eq!(value["db"]["password"], json!(REDACTED));
        assert_eq!(value["db"]["port"], json!(5432));
        assert_eq!(value["items"][0]["token"], json!(REDACTED));
    }

    #[test]
    fn redacts_top_level_secret_field() {
        let mut value = json!({ "nested": true });
        redact_field("apiKey", &mut value);
        assert_eq!(value, json!(REDACTED));
    }
}
