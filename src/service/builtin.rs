//! Built-in transforms. All of them work on characters, never on raw bytes,
//! so a result is always valid UTF-8.

/// Service 1
pub fn uppercase(value: &str) -> String {
    value.to_uppercase()
}

/// Service 2
pub fn reverse(value: &str) -> String {
    value.chars().rev().collect()
}

/// Service 3: decimal length in characters
pub fn char_length(value: &str) -> String {
    value.chars().count().to_string()
}
