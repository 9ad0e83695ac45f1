//! The built-in table of function / inverse pairs.
//!
//! The `!<name> <inverse>` command always accepts an explicit inverse; this table backs the
//! single-name form for well-known functions.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Well-known function names paired with their inverses, both directions spelled out.
const INVERSE_PAIRS: &[(&str, &str)] = &[
    ("sin", "asin"),
    ("asin", "sin"),
    ("cos", "acos"),
    ("acos", "cos"),
    ("tan", "atan"),
    ("atan", "tan"),
    ("sinh", "asinh"),
    ("asinh", "sinh"),
    ("cosh", "acosh"),
    ("acosh", "cosh"),
    ("tanh", "atanh"),
    ("atanh", "tanh"),
    ("ln", "exp"),
    ("exp", "ln"),
];

static INVERSES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    INVERSE_PAIRS.iter().copied().collect()
});

/// Looks up the declared inverse of a well-known function name.
pub fn inverse_of(name: &str) -> Option<&'static str> {
    INVERSES.get(name).copied()
}

/// Returns the known function names close to `name`, nearest first.
///
/// Used to build "did you mean" suggestions when a single-name `!` command misses the table.
pub fn suggestions_for(name: &str) -> Vec<String> {
    let mut close = INVERSES.keys()
        .filter(|known| levenshtein::levenshtein(known, name) <= 2)
        .map(|known| known.to_string())
        .collect::<Vec<_>>();

    close.sort_by_key(|known| (levenshtein::levenshtein(known, name), known.clone()));
    close
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_both_directions() {
        assert_eq!(inverse_of("sin"), Some("asin"));
        assert_eq!(inverse_of("asin"), Some("sin"));
        assert_eq!(inverse_of("exp"), Some("ln"));
        assert_eq!(inverse_of("floor"), None);
    }

    #[test]
    fn suggestions_rank_by_distance() {
        let suggestions = suggestions_for("sinn");
        assert_eq!(suggestions.first().map(String::as_str), Some("sin"));
        assert!(suggestions.contains(&"sinh".to_string()));
    }

    #[test]
    fn distant_names_suggest_nothing() {
        assert!(suggestions_for("logarithm").is_empty());
    }
}
