//! SEO name → identifier conversion.
//!
//! URL segments are written in lower case with `_`/`-` separators
//! (`user_manager`, `get-user`); types and methods are looked up by their
//! Pascal/camel identifiers (`UserManager`, `getUser`). The conversion is
//! idempotent: feeding an identifier back in returns it unchanged.

/// Character that marks a method as internal (never dispatchable).
pub const INTERNAL_MARKER: char = '_';

/// Which identifier form to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// `UserManager`
    Pascal,
    /// `userManager`
    Camel,
}

/// Convert a SEO segment to its identifier form.
///
/// Rules:
/// - characters outside `[A-Za-z0-9_- ]` are dropped,
/// - `_`, `-` and spaces separate words, and a new word starts at every
///   uppercase letter that follows a letter or digit,
/// - each word is written first-letter-uppercase, rest lowercase,
/// - [`Case::Camel`] lowercases the very first letter.
///
/// Leading [`INTERNAL_MARKER`] characters are kept as-is so the invocation
/// guard still sees them after conversion.
#[must_use]
pub fn to_identifier(seo: &str, case: Case) -> String {
    let body = seo.trim_start_matches(INTERNAL_MARKER);
    let marker = &seo[..seo.len() - body.len()];

    let mut out = String::with_capacity(seo.len());
    out.push_str(marker);

    let mut converted = String::with_capacity(body.len());
    for word in words(body) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            converted.push(first.to_ascii_uppercase());
            converted.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }

    if case == Case::Camel {
        let mut chars = converted.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
        }
    } else {
        out.push_str(&converted);
    }
    out
}

/// Pascal form, used for controller type identifiers.
#[must_use]
pub fn pascal(seo: &str) -> String {
    to_identifier(seo, Case::Pascal)
}

/// Camel form, used for method identifiers.
#[must_use]
pub fn camel(seo: &str) -> String {
    to_identifier(seo, Case::Camel)
}

/// Upper-case the first character only (`user_manager` → `User_manager`).
#[must_use]
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for c in s.chars() {
        if matches!(c, '_' | '-' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        // Dropped characters neither survive nor split words (`a.b` reads as `ab`).
        if !c.is_ascii_alphanumeric() {
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
