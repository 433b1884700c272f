/// Normalize a free-text field for comparison.
///
/// Absent input degrades to `""`; otherwise surrounding whitespace is trimmed
/// and the text is lowercased. Total over all inputs, never fails.
pub fn normalize(s: Option<&str>) -> String {
    s.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}

/// Normalize a messaging handle.
///
/// Applies [`normalize`], then strips one leading `@` ("@Foo" and "Foo" both
/// normalize to "foo"). Handles are stored without the `@`, but users type it.
pub fn normalize_handle(s: Option<&str>) -> String {
    let normalized = normalize(s);
    match normalized.strip_prefix('@') {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}
