//! Shared stylesheet registry
//!
//! Page-global style rules that several component instances depend on. Each
//! sheet is keyed by id and reference counted: the first `acquire` inserts
//! it, the last `release` removes it.

use indexmap::IndexMap;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
struct StyleEntry {
    css: String,
    ref_count: usize,
}

/// Stylesheets in insertion order
#[derive(Clone, Debug, Default)]
pub struct StyleRegistry {
    sheets: IndexMap<String, StyleEntry>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a reference on sheet `id`, inserting `css` if it is not present
    ///
    /// Returns the new reference count. An existing sheet keeps its text.
    pub fn acquire(&mut self, id: &str, css: &str) -> usize {
        let entry = self.sheets.entry(id.to_string()).or_insert_with(|| {
            debug!(id, "inserting shared stylesheet");
            StyleEntry {
                css: css.to_string(),
                ref_count: 0,
            }
        });
        entry.ref_count += 1;
        entry.ref_count
    }

    /// Drop a reference on sheet `id`. Returns true if the sheet was removed.
    pub fn release(&mut self, id: &str) -> bool {
        let Some(entry) = self.sheets.get_mut(id) else {
            return false;
        };
        entry.ref_count = entry.ref_count.saturating_sub(1);
        if entry.ref_count == 0 {
            self.sheets.shift_remove(id);
            debug!(id, "removed shared stylesheet");
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sheets.contains_key(id)
    }

    pub fn css(&self, id: &str) -> Option<&str> {
        self.sheets.get(id).map(|e| e.css.as_str())
    }

    pub fn ref_count(&self, id: &str) -> usize {
        self.sheets.get(id).map(|e| e.ref_count).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Sheets as `(id, css)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sheets.iter().map(|(id, e)| (id.as_str(), e.css.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_counting() {
        let mut styles = StyleRegistry::new();
        assert_eq!(styles.acquire("hide", "a {}"), 1);
        assert_eq!(styles.acquire("hide", "ignored {}"), 2);
        assert_eq!(styles.css("hide"), Some("a {}"));
        assert_eq!(styles.len(), 1);

        assert!(!styles.release("hide"));
        assert!(styles.contains("hide"));
        assert!(styles.release("hide"));
        assert!(!styles.contains("hide"));
        assert!(!styles.release("hide"));
    }

    #[test]
    fn test_iteration_order() {
        let mut styles = StyleRegistry::new();
        styles.acquire("b", "b {}");
        styles.acquire("a", "a {}");
        let ids: Vec<_> = styles.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
