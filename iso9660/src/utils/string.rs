//! String handling utilities
//!
//! ISO9660 identifiers are space padded and file identifiers carry a
//! `;version` suffix. Lookups compare names case-insensitively.

/// Trim trailing spaces from byte slice
pub fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        end -= 1;
    }
    &bytes[..end]
}

/// Strip version suffix from filename (e.g., "FILE.TXT;1" -> "FILE.TXT")
pub fn strip_version(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b';') {
        Some(end) => &name[..end],
        None => name,
    }
}

/// Turn a raw directory or path table identifier into a name
///
/// The single-byte identifier `0x00` names the directory itself and maps to
/// the empty string.
pub fn identifier_to_name(identifier: &[u8]) -> String {
    if identifier == [0x00] {
        return String::new();
    }
    String::from_utf8_lossy(strip_version(identifier)).into_owned()
}

/// Compare an on-disc name with a requested path component
pub fn names_match(on_disc: &str, requested: &str) -> bool {
    on_disc.eq_ignore_ascii_case(requested)
}

/// Split a path into upper-cased components, dropping empty segments
///
/// `"/boot//vmlinuz/"` becomes `["BOOT", "VMLINUZ"]`.
pub fn path_components(path: &str) -> Vec<String> {
    path.trim_matches('/')
        .split('/')
        .filter(|c| !c.is_empty())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
