//! Property naming conventions.
//!
//! Keys follow the bean-style `decapitalize` rule: only the first character
//! is lower-cased, and names that start with two upper-case characters are
//! treated as acronyms and kept unchanged (`URLPath` stays `URLPath`).

const READ_PREFIXES: &[&str] = &["get", "is"];

/// Normalizes a property name into its exposed key.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if let Some(second) = chars.next() {
        if first.is_uppercase() && second.is_uppercase() {
            return name.to_string();
        }
    }

    let mut normalized = String::with_capacity(name.len());
    normalized.extend(first.to_lowercase());
    normalized.push_str(&name[first.len_utf8()..]);
    normalized
}

/// Derives a property name from a `getX` / `isX` style accessor identifier.
///
/// Returns `None` when the identifier carries no read prefix or nothing
/// follows the prefix. The remainder must start with an upper-case letter,
/// so `getaway` is not an accessor.
pub fn property_name_for_accessor(accessor: &str) -> Option<String> {
    READ_PREFIXES.iter().find_map(|prefix| {
        let rest = accessor.strip_prefix(prefix)?;
        let first = rest.chars().next()?;
        if !first.is_uppercase() {
            return None;
        }
        Some(decapitalize(rest))
    })
}
