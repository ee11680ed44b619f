//! Case transforms for generated artifact names and routes.

/// Convert a declared name to PascalCase for component names.
///
/// Splits on underscores, hyphens, and whitespace; each segment keeps an
/// uppercased first letter and a lowercased remainder.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a declared name to camelCase for variable and service names.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a declared name to kebab-case for route paths.
///
/// A hyphen is inserted before every ASCII uppercase letter, the whole
/// string is lowercased, leading/trailing underscores are stripped, and
/// interior underscore runs collapse to single hyphens. PascalCase input
/// therefore gains a leading hyphen ("ProjectBugs" -> "-project-bugs");
/// that artifact is kept for route-path compatibility.
pub fn to_kebab_case(s: &str) -> String {
    let mut dashed = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            dashed.push('-');
            dashed.push(c.to_ascii_lowercase());
        } else {
            dashed.extend(c.to_lowercase());
        }
    }

    let trimmed = dashed.trim_matches('_');
    let mut out = String::with_capacity(trimmed.len());
    let mut in_underscore_run = false;
    for c in trimmed.chars() {
        if c == '_' {
            if !in_underscore_run {
                out.push('-');
            }
            in_underscore_run = true;
        } else {
            in_underscore_run = false;
            out.push(c);
        }
    }
    out
}
