//! Key matching rules for the preference-store purge.
//!
//! Matching is a plain case-sensitive prefix/substring test. The default
//! rules will also catch unrelated keys that happen to contain `token` or
//! `auth` (e.g. `author_name`); that over-deletion is accepted.

use serde::{Deserialize, Serialize};

/// A single key matching rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pattern", rename_all = "snake_case")]
pub enum KeyMatchRule {
    /// Key starts with the pattern
    Prefix(String),
    /// Key contains the pattern anywhere
    Contains(String),
}

impl KeyMatchRule {
    pub fn prefix(pattern: impl Into<String>) -> Self {
        KeyMatchRule::Prefix(pattern.into())
    }

    pub fn contains(pattern: impl Into<String>) -> Self {
        KeyMatchRule::Contains(pattern.into())
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyMatchRule::Prefix(p) => key.starts_with(p.as_str()),
            KeyMatchRule::Contains(p) => key.contains(p.as_str()),
        }
    }
}

/// A set of rules; a key matches when any rule does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFilter {
    rules: Vec<KeyMatchRule>,
}

impl KeyFilter {
    /// A filter with no rules, which matches nothing.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn new(rules: Vec<KeyMatchRule>) -> Self {
        Self { rules }
    }

    /// Add a rule.
    pub fn with_rule(mut self, rule: KeyMatchRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[KeyMatchRule] {
        &self.rules
    }

    pub fn matches(&self, key: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(key))
    }

    /// Keys from `keys` that match, in iteration order.
    pub fn select<'a, I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        keys.into_iter()
            .filter(|key| self.matches(key))
            .cloned()
            .collect()
    }
}

impl Default for KeyFilter {
    /// Flutter's `flutter.` prefix plus anything mentioning `token` or `auth`.
    fn default() -> Self {
        Self::new(vec![
            KeyMatchRule::prefix("flutter."),
            KeyMatchRule::contains("token"),
            KeyMatchRule::contains("auth"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_default_filter() {
        let filter = KeyFilter::default();
        assert!(filter.matches("flutter.session"));
        assert!(filter.matches("user_token_abc"));
        assert!(filter.matches("auth_cache"));
        assert!(filter.matches("oauth"));
        assert!(!filter.matches("theme"));
        assert!(!filter.matches("last_app_launch"));
    }

    #[test]
    fn test_prefix_only_matches_at_start() {
        let filter = KeyFilter::default();
        assert!(!filter.matches("my.flutter.session"));
        assert!(!filter.matches("flutter"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = KeyFilter::default();
        assert!(!filter.matches("Flutter.session"));
        assert!(!filter.matches("AUTH_CACHE"));
        assert!(!filter.matches("accessToken"));
    }

    #[test]
    fn test_over_deletion_is_kept() {
        assert!(KeyFilter::default().matches("author_name"));
    }

    #[test]
    fn test_empty_filter_matches_nothing() {
        let filter = KeyFilter::empty();
        assert!(!filter.matches("flutter.session"));
        assert!(filter.rules().is_empty());
    }

    #[test]
    fn test_select() {
        let keys: BTreeSet<String> = ["flutter.session", "user_token_abc", "theme", "auth_cache"]
            .into_iter()
            .map(String::from)
            .collect();

        let selected = KeyFilter::default().select(&keys);
        assert_eq!(
            selected,
            vec!["auth_cache", "flutter.session", "user_token_abc"]
        );
    }

    #[test]
    fn test_custom_rules() {
        let filter = KeyFilter::empty()
            .with_rule(KeyMatchRule::prefix("session."))
            .with_rule(KeyMatchRule::contains("secret"));
        assert!(filter.matches("session.id"));
        assert!(filter.matches("client_secret"));
        assert!(!filter.matches("flutter.x"));
    }

    #[test]
    fn test_rule_serde_shape() {
        let json = serde_json::to_string(&KeyMatchRule::prefix("flutter.")).unwrap();
        assert_eq!(json, r#"{"kind":"prefix","pattern":"flutter."}"#);

        let parsed: KeyMatchRule =
            serde_json::from_str(r#"{"kind":"contains","pattern":"token"}"#).unwrap();
        assert_eq!(parsed, KeyMatchRule::contains("token"));
    }
}
