//! Utility functions shared across modules

/// Token that stands in for a hyphen in program, subcommand and option names.
pub const HYPHEN_ESCAPE: &str = "__";

/// Replace every `__` in `name` with a single `-`.
///
/// Occurrences are matched left to right without overlap, so `a___b`
/// becomes `a-_b`. Nothing else about the name is checked or changed.
#[must_use]
pub fn translate(name: &str) -> String {
    name.replace(HYPHEN_ESCAPE, "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_subcommand() {
        assert_eq!(translate("sub__command"), "sub-command");
    }

    #[test]
    fn test_translate_long_option() {
        assert_eq!(translate("long__option"), "long-option");
    }

    #[test]
    fn test_translate_multiple_occurrences() {
        assert_eq!(translate("a__b__c"), "a-b-c");
        assert_eq!(translate("__leading"), "-leading");
    }

    #[test]
    fn test_translate_odd_underscores() {
        assert_eq!(translate("a___b"), "a-_b");
        assert_eq!(translate("a____b"), "a--b");
    }

    #[test]
    fn test_translate_untouched() {
        assert_eq!(translate("plain"), "plain");
        assert_eq!(translate("snake_case"), "snake_case");
        assert_eq!(translate(""), "");
    }
}
