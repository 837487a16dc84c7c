// src/utils/naming.rs
// Canonical naming helpers used across the project.

/// Derive a strict ASCII kebab-case code from a capability's display name.
/// Rules:
/// - Unicode is transliterated to ASCII up front using `deunicode` (e.g., ü -> u, é -> e)
/// - ASCII letters/digits are kept and lowercased
/// - Every other character becomes a single `-` separator
/// - Consecutive separators collapse, leading/trailing `-` are trimmed
/// - Returns "capability" if the result would be empty
pub fn capability_code(name: &str) -> String {
    let ascii = deunicode::deunicode(name);

    let mut out = String::with_capacity(ascii.len());
    let mut last_dash = false;
    for ch in ascii.chars() {
        let lc = ch.to_ascii_lowercase();
        if lc.is_ascii_alphanumeric() {
            out.push(lc);
            last_dash = false;
        } else if !last_dash && !out.is_empty() {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() {
        "capability".to_string()
    } else {
        out
    }
}
