//! Delimiter-driven camel casing

/// Camel-case `input`, treating every char in `delimiters` as a word break.
///
/// Each delimiter-separated piece has its first character upper-cased and the
/// remainder lower-cased, then the pieces are concatenated. Delimiters are
/// applied in the order given, recursing into each piece until none remain.
///
/// ```
/// use harmock::route::camel_case;
///
/// assert_eq!(camel_case("container-name", &['-', '_']), "ContainerName");
/// assert_eq!(camel_case("SCAN_result-v2", &['-', '_']), "ScanResultV2");
/// ```
#[must_use]
pub fn camel_case(input: &str, delimiters: &[char]) -> String {
    if let Some(&delimiter) = delimiters.iter().find(|d| input.contains(**d)) {
        return input
            .split(delimiter)
            .map(|piece| camel_case(piece, delimiters))
            .collect();
    }

    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DELIMITERS: &[char] = &['-', '_'];

    #[test]
    fn test_single_word() {
        assert_eq!(camel_case("scan", DELIMITERS), "Scan");
        assert_eq!(camel_case("SCAN", DELIMITERS), "Scan");
        assert_eq!(camel_case("v1", DELIMITERS), "V1");
    }

    #[test]
    fn test_mixed_delimiters() {
        assert_eq!(camel_case("container-name", DELIMITERS), "ContainerName");
        assert_eq!(camel_case("user_id", DELIMITERS), "UserId");
        assert_eq!(camel_case("a-b_c-d", DELIMITERS), "ABCD");
    }

    #[test]
    fn test_empty_and_degenerate() {
        assert_eq!(camel_case("", DELIMITERS), "");
        assert_eq!(camel_case("-", DELIMITERS), "");
        assert_eq!(camel_case("--x__", DELIMITERS), "X");
    }

    #[test]
    fn test_no_delimiters_configured() {
        assert_eq!(camel_case("container-name", &[]), "Container-name");
    }

    #[test]
    fn test_dots_are_kept() {
        assert_eq!(camel_case("v1.2-beta", DELIMITERS), "V1.2Beta");
    }

    proptest! {
        #[test]
        fn prop_output_has_no_delimiters(input in "[a-zA-Z0-9_.-]{0,32}") {
            let out = camel_case(&input, DELIMITERS);
            prop_assert!(!out.contains('-'));
            prop_assert!(!out.contains('_'));
        }

        #[test]
        fn prop_deterministic(input in "\\PC{0,32}") {
            prop_assert_eq!(camel_case(&input, DELIMITERS), camel_case(&input, DELIMITERS));
        }
    }
}
