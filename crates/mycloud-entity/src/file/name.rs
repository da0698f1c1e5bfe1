//! Display-name helpers.

fn has_extension(name: &str) -> bool {
    name.contains('.') && !name.ends_with('.')
}

/// Apply a rename, carrying the old extension over when the new name
/// lacks one.
///
/// The new name is trimmed. A name with no `.` or ending in `.` counts as
/// extension-less; the old extension (from its last `.`) is then appended.
pub fn keep_extension(new_name: &str, old_name: &str) -> String {
    let new = new_name.trim();
    if new.is_empty() || has_extension(new) {
        return new.to_string();
    }
    match old_name.rfind('.') {
        Some(idx) if has_extension(old_name) => format!("{new}{}", &old_name[idx..]),
        _ => new.to_string(),
    }
}
