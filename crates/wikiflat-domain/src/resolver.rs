//! Identifier resolver - the incrementally built identifier → label table

use std::collections::{HashMap, HashSet};

/// Identifier → label table threaded through every projection
///
/// The table only grows: the first registration of an identifier wins and
/// later ones are ignored. Projection of an entity can only see labels of
/// entities projected strictly before it, so resolution depends on input
/// order. Display titles of accepted entities are tracked alongside so that
/// a title is emitted at most once.
#[derive(Debug, Clone, Default)]
pub struct IdentifierResolver {
    labels: HashMap<String, String>,
    titles: HashSet<String>,
}

impl IdentifierResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the label of an identifier
    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Check whether an identifier has a label
    pub fn contains(&self, id: &str) -> bool {
        self.labels.contains_key(id)
    }

    /// Register a label; returns `false` if the identifier was already known
    pub fn register(&mut self, id: impl Into<String>, label: impl Into<String>) -> bool {
        let id = id.into();
        if self.labels.contains_key(&id) {
            return false;
        }
        self.labels.insert(id, label.into());
        true
    }

    /// Check whether a display title was already claimed
    pub fn has_title(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    /// Claim a display title; returns `false` if it was taken
    pub fn claim_title(&mut self, title: impl Into<String>) -> bool {
        self.titles.insert(title.into())
    }

    /// Number of registered identifiers
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of claimed titles
    pub fn title_count(&self) -> usize {
        self.titles.len()
    }
}

impl<K, V> FromIterator<(K, V)> for IdentifierResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for (id, label) in iter {
            resolver.register(id, label);
        }
        resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_unknown() {
        let resolver = IdentifierResolver::new();
        assert_eq!(resolver.lookup("Q1"), None);
        assert!(resolver.is_empty());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut resolver = IdentifierResolver::new();
        assert!(resolver.register("Q5", "human"));
        assert!(!resolver.register("Q5", "person"));
        assert_eq!(resolver.lookup("Q5"), Some("human"));
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_titles_are_separate_from_identifiers() {
        let mut resolver = IdentifierResolver::new();
        resolver.register("Q42", "Douglas Adams");
        assert!(!resolver.has_title("Q42"));
        assert!(resolver.claim_title("Douglas Adams"));
        assert!(!resolver.claim_title("Douglas Adams"));
        assert!(resolver.lookup("Douglas Adams").is_none());
        assert_eq!(resolver.title_count(), 1);
    }

    #[test]
    fn test_from_iter() {
        let resolver: IdentifierResolver =
            [("P31", "instance of"), ("Q5", "human"), ("P31", "ignored")].into_iter().collect();
        assert_eq!(resolver.lookup("P31"), Some("instance of"));
        assert_eq!(resolver.len(), 2);
    }
}
