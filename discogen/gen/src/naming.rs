//! Identifier and natural-language helpers.
//!
//! Discovery documents use camelCase property names and free-form schema ids.
//! These helpers turn them into Rust field names and type names, and compose
//! the small bits of English used in generated documentation.

use crate::errors::GeneratorError;

/// Words that cannot be used as plain identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Returns a type name for `s` by upper-casing its first character only.
///
/// ## Examples
///
/// ```
/// use discogen_gen::naming::canonical_type_name;
///
/// assert_eq!(canonical_type_name("videoSnippet"), "VideoSnippet");
/// assert_eq!(canonical_type_name("Video"), "Video");
/// ```
pub fn canonical_type_name(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the name of the type synthesized for an anonymous object
/// property `property` of schema `schema`.
///
/// ## Examples
///
/// ```
/// use discogen_gen::naming::nested_type_name;
///
/// assert_eq!(nested_type_name("Video", "contentDetails"), "VideoContentDetails");
/// ```
pub fn nested_type_name(schema: &str, property: &str) -> String {
    format!("{}{}", schema, canonical_type_name(property))
}

/// Converts a camelCase (or PascalCase) name to snake_case.
///
/// Runs of capitals are kept together, so acronyms stay readable.
///
/// ## Examples
///
/// ```
/// use discogen_gen::naming::camel_to_under;
///
/// assert_eq!(camel_to_under("contentDetails"), "content_details");
/// assert_eq!(camel_to_under("HTTPServer"), "http_server");
/// assert_eq!(camel_to_under("etag"), "etag");
/// ```
pub fn camel_to_under(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (next_is_lower && prev != '_') {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Turns a property name into a usable Rust field identifier.
///
/// The name is snake-cased, characters that cannot appear in an identifier
/// become `_`, and keywords get a trailing underscore.
///
/// ## Examples
///
/// ```
/// use discogen_gen::naming::mangle_ident;
///
/// assert_eq!(mangle_ident("videoId"), "video_id");
/// assert_eq!(mangle_ident("type"), "type_");
/// assert_eq!(mangle_ident("@context"), "_context");
/// ```
pub fn mangle_ident(name: &str) -> String {
    let mut ident: String = camel_to_under(name)
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Joins items as an English enumeration: `a, b and c`.
///
/// ## Examples
///
/// ```
/// use discogen_gen::naming::put_and;
///
/// assert_eq!(put_and(&["request", "response"]), "request and response");
/// assert_eq!(put_and(&["a", "b", "c"]), "a, b and c");
/// assert_eq!(put_and(&["only"]), "only");
/// ```
pub fn put_and<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Wraps every item in `marker`, e.g. `*` for markdown italics.
pub fn enclose_in<S: AsRef<str>>(marker: &str, items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| format!("{}{}{}", marker, s.as_ref(), marker))
        .collect()
}

/// Returns a naive singular form of a plural resource name.
///
/// ## Examples
///
/// ```
/// use discogen_gen::naming::singular;
///
/// assert_eq!(singular("videos"), "video");
/// assert_eq!(singular("activities"), "activity");
/// assert_eq!(singular("search"), "search");
/// ```
pub fn singular(s: &str) -> String {
    if let Some(stem) = s.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = s.strip_suffix('s') {
        stem.to_string()
    } else {
        s.to_string()
    }
}

/// Builds the library (module) name from an API name and `v<digits>` version.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` if the version does not start
/// with `v` followed by at least one character.
///
/// ## Examples
///
/// ```
/// use discogen_gen::naming::library_name;
///
/// assert_eq!(library_name("youtube", "v3").unwrap(), "youtube3");
/// assert!(library_name("youtube", "3").is_err());
/// ```
pub fn library_name(name: &str, version: &str) -> Result<String, GeneratorError> {
    match version.strip_prefix('v') {
        Some(digits) if !digits.is_empty() => Ok(format!("{}{}", name, digits)),
        _ => Err(GeneratorError::ConfigError(format!(
            "API version '{}' must look like 'v<number>'",
            version
        ))),
    }
}
