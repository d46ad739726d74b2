//! Identifier derivation for resolved routes

use super::{camel_case, DYNAMIC_SEGMENT, WORD, WORD_DELIMITERS};

/// Derive the handler identifier for a route template and method
///
/// Literal words are camel-cased and appended to `method`. When the template
/// has dynamic segments, words equal to a dynamic segment name are dropped
/// and the name of the last dynamic segment is appended after `By`:
///
/// ```
/// use harmock::route::derive_identifier;
///
/// assert_eq!(
///     derive_identifier("/scan/:container-name/vulnerabilities", "get"),
///     "getScanVulnerabilitiesByContainerName"
/// );
/// assert_eq!(derive_identifier("/user/list", "get"), "getUserList");
/// ```
#[must_use]
pub fn derive_identifier(api: &str, method: &str) -> String {
    let dynamic_words: Vec<String> = DYNAMIC_SEGMENT
        .captures_iter(api)
        .map(|captures| camel_case(&captures[1], WORD_DELIMITERS))
        .collect();

    let words = WORD
        .find_iter(api)
        .map(|word| camel_case(word.as_str(), WORD_DELIMITERS));

    match dynamic_words.last() {
        Some(last_dynamic) => {
            let literal: String = words.filter(|word| !dynamic_words.contains(word)).collect();
            format!("{method}{literal}By{last_dynamic}")
        }
        None => format!("{method}{}", words.collect::<String>()),
    }
}

/// Strip `prefix` from the front of `api`, leaving it unchanged otherwise
#[must_use]
pub fn strip_route_prefix<'a>(api: &'a str, prefix: &str) -> &'a str {
    api.strip_prefix(prefix).unwrap_or(api)
}
