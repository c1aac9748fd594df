//! Degenerate fragment detection

/// Returns true if `s` carries no letter and no digit
///
/// Empty and whitespace-only strings are degenerate, as is anything made
/// only of punctuation or symbols (`"..."`, `"?!"`, `"___"`, `"--"`).
pub fn is_degenerate(s: &str) -> bool {
    !s.trim().chars().any(char::is_alphanumeric)
}

/// Drop degenerate entries from `fragments`, keeping order
pub fn retain_meaningful<S: AsRef<str>>(fragments: &mut Vec<S>) {
    fragments.retain(|s| !is_degenerate(s.as_ref()));
}
