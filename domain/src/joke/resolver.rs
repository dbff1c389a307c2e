//! Category resolution from free-form hints
//!
//! Hints typically come from voice results or command-line words. They are
//! normalized into a fresh buffer; the caller's sequence is only borrowed.

use super::category::Category;

/// Maps free-form hint tokens to a known [`Category`].
pub struct CategoryResolver;

impl CategoryResolver {
    /// Resolve hints to the first matching category in priority order.
    ///
    /// Absent, empty or unrecognized hints resolve to [`Category::Default`].
    pub fn resolve<S: AsRef<str>>(hints: Option<&[S]>) -> Category {
        let Some(hints) = hints else {
            return Category::Default;
        };

        let tokens = Self::normalize(hints);
        if tokens.is_empty() {
            return Category::Default;
        }

        Category::ALL
            .into_iter()
            .find(|category| {
                category
                    .match_token()
                    .is_some_and(|token| tokens.iter().any(|t| t == token))
            })
            .unwrap_or_default()
    }

    /// Lowercase and split every hint on whitespace.
    pub fn normalize<S: AsRef<str>>(hints: &[S]) -> Vec<String> {
        hints
            .iter()
            .flat_map(|hint| {
                hint.as_ref()
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_resolve_to_default() {
        assert_eq!(CategoryResolver::resolve::<String>(None), Category::Default);
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            CategoryResolver::resolve(Some(empty.as_slice())),
            Category::Default
        );
    }

    #[test]
    fn test_resolve_is_case_insensitive_and_leaves_input_alone() {
        let upper = vec!["LAWYER".to_string()];
        let lower = vec!["lawyer".to_string()];
        assert_eq!(
            CategoryResolver::resolve(Some(upper.as_slice())),
            CategoryResolver::resolve(Some(lower.as_slice()))
        );
        assert_eq!(
            CategoryResolver::resolve(Some(upper.as_slice())),
            Category::Lawyer
        );
        assert_eq!(upper, vec!["LAWYER".to_string()]);
    }

    #[test]
    fn test_unknown_and_duplicate_tokens_are_ignored() {
        let hints = ["tell", "me", "a", "Chicken", "chicken", "joke"];
        assert_eq!(CategoryResolver::resolve(Some(&hints[..])), Category::Chicken);

        let unknown = ["knock", "knock"];
        assert_eq!(
            CategoryResolver::resolve(Some(&unknown[..])),
            Category::Default
        );
    }

    #[test]
    fn test_priority_order_wins_over_hint_order() {
        let hints = ["lawyer", "anti"];
        assert_eq!(CategoryResolver::resolve(Some(&hints[..])), Category::Anti);
    }

    #[test]
    fn test_phrases_are_split_into_tokens() {
        let hints = ["  Anti jokes please "];
        assert_eq!(CategoryResolver::resolve(Some(&hints[..])), Category::Anti);
        assert_eq!(
            CategoryResolver::normalize(&hints),
            vec!["anti", "jokes", "please"]
        );
    }

    #[test]
    fn test_default_token_is_not_a_match() {
        let hints = ["default"];
        assert_eq!(
            CategoryResolver::resolve(Some(&hints[..])),
            Category::Default
        );
    }
}
