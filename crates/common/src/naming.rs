//! Name normalization helpers
//!
//! Manifest ids are hyphenated slugs, while field names and action ids are
//! snake_case identifiers.

/// Convert free text to a lowercase hyphen-safe slug
///
/// # Examples
/// ```
/// use provider_manifest_common::slugify;
///
/// assert_eq!(slugify("My CRM (v2)"), "my-crm-v2");
/// ```
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for ch in s.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            result.push(ch);
        } else if !result.is_empty() && !result.ends_with('-') {
            result.push('-');
        }
    }

    result.trim_matches('-').to_string()
}

/// Normalize a field name: lowercase, whitespace runs replaced by `_`
///
/// # Examples
/// ```
/// use provider_manifest_common::normalize_field_name;
///
/// assert_eq!(normalize_field_name("API Key"), "api_key");
/// ```
pub fn normalize_field_name(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert PascalCase, camelCase, kebab-case or spaced text to snake_case
///
/// # Examples
/// ```
/// use provider_manifest_common::to_snake_case;
///
/// assert_eq!(to_snake_case("petId"), "pet_id");
/// assert_eq!(to_snake_case("X-Request-ID"), "x_request_id");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            // Split on a lower->upper boundary, or before the last capital of
            // an acronym (HTTPServer -> http_server)
            let should_add_underscore = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));

            if should_add_underscore && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else if ch == '-' || ch == '.' || ch.is_whitespace() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(ch);
        }
    }

    while result.contains("__") {
        result = result.replace("__", "_");
    }

    result.trim_matches('_').to_string()
}

/// Restrict an identifier to `[a-z0-9_]`, replacing anything else with `_`
pub fn sanitize_identifier(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|ch| {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Whether a name is usable as a field or action identifier
pub fn is_identifier_safe(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first == '_' => chars
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_'),
        _ => false,
    }
}

/// Turn `snake_case` into a display label (`user_id` -> `User Id`)
pub fn humanize_label(s: &str) -> String {
    s.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
