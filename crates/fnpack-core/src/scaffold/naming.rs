//! Function name checks and package-name casing.

use crate::error::ValidationError;

/// Reject names that cannot serve as both a folder name and a manifest key.
pub fn validate_function_name(name: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("name cannot be a relative path segment"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("name must be a single folder name"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("name cannot contain whitespace"));
    }
    if name.contains([':', '#']) || name.starts_with(['-', '&', '*', '!', '|', '>', '%', '@', '`', '\'', '"']) {
        return Err(invalid("name must be a plain YAML key"));
    }
    Ok(())
}

/// Dash-case a name: `myFunction_v2` becomes `my-function-v2`.
///
/// camelCase boundaries, whitespace and separators become dashes; the result
/// is lower-cased with repeated and outer dashes removed.
pub fn dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
        prev = Some(c);
    }

    out.trim_matches('-').to_string()
}
