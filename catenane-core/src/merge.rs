//! A read/write router over an ordered list of source objects.
//!
//! Each property access resolves to the first source that declares the
//! property (a plain precedence scan over the list), falling back to the
//! first source for writes to fresh keys. Sources are held by handle, so
//! mutations through the view land on the owning source.

use crate::object::ObjectRef;
use crate::value::Value;

/// A multi-source merge view.
pub struct MergeView {
    sources: Vec<ObjectRef>,
}

impl MergeView {
    pub fn new(sources: impl IntoIterator<Item = ObjectRef>) -> Self {
        MergeView {
            sources: sources.into_iter().collect(),
        }
    }

    /// The first source declaring `key` (prototype chains included), or the
    /// first source overall when none does.
    fn source_for(&self, key: &str) -> Option<&ObjectRef> {
        self.sources
            .iter()
            .find(|source| source.has(key))
            .or_else(|| self.sources.first())
    }

    /// Reads `key` from the first source declaring it.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.source_for(key).and_then(|source| source.get(key))
    }

    /// Writes `key` on the source owning it; fresh keys land on the first
    /// source.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        match self.source_for(key) {
            Some(source) => source.set(key, value),
            None => false,
        }
    }

    /// Returns true if any source declares `key`.
    pub fn has(&self, key: &str) -> bool {
        self.sources.iter().any(|source| source.has(key))
    }

    /// Removes `key` from the source owning it.
    pub fn remove(&self, key: &str) -> bool {
        match self.source_for(key) {
            Some(source) => source.remove(key),
            None => false,
        }
    }

    /// The order-preserving union of every source's own keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for source in &self.sources {
            for key in source.own_keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    pub fn sources(&self) -> &[ObjectRef] {
        &self.sources
    }

    /// Materializes the merged property set into a fresh object, resolving
    /// every key with the view's own precedence.
    pub fn snapshot(&self) -> ObjectRef {
        let snapshot = ObjectRef::new();
        for key in self.keys() {
            if let Some(value) = self.get(&key) {
                snapshot.set(key, value);
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_resolves_to_first_declaring_source() {
        let primary = ObjectRef::from_entries([("a", 1)]);
        let fallback = ObjectRef::from_entries([("a", 100), ("b", 2)]);
        let merged = MergeView::new([primary, fallback]);

        assert_eq!(merged.get("a"), Some(Value::Int(1)));
        assert_eq!(merged.get("b"), Some(Value::Int(2)));
        assert_eq!(merged.get("missing"), None);
    }

    #[test]
    fn set_routes_to_the_owning_source() {
        let primary = ObjectRef::from_entries([("a", 1)]);
        let fallback = ObjectRef::from_entries([("b", 2)]);
        let merged = MergeView::new([primary.clone(), fallback.clone()]);

        assert!(merged.set("b", 20));
        assert_eq!(fallback.get("b"), Some(Value::Int(20)));
        assert!(!primary.has_own("b"));
    }

    #[test]
    fn fresh_keys_land_on_the_first_source() {
        let primary = ObjectRef::from_entries([("a", 1)]);
        let fallback = ObjectRef::from_entries([("b", 2)]);
        let merged = MergeView::new([primary.clone(), fallback.clone()]);

        assert!(merged.set("c", 3));
        assert_eq!(primary.get("c"), Some(Value::Int(3)));
        assert!(!fallback.has_own("c"));
    }

    #[test]
    fn has_scans_every_source() {
        let merged = MergeView::new([
            ObjectRef::from_entries([("a", 1)]),
            ObjectRef::from_entries([("b", 2)]),
        ]);

        assert!(merged.has("a"));
        assert!(merged.has("b"));
        assert!(!merged.has("c"));
    }

    #[test]
    fn has_sees_prototype_properties() {
        let base = ObjectRef::from_entries([("inherited", 1)]);
        let child = ObjectRef::with_proto(&base);
        let merged = MergeView::new([child]);

        assert!(merged.has("inherited"));
        assert_eq!(merged.get("inherited"), Some(Value::Int(1)));
    }

    #[test]
    fn keys_union_preserves_first_occurrence_order() {
        let merged = MergeView::new([
            ObjectRef::from_entries([("a", 1), ("b", 2)]),
            ObjectRef::from_entries([("b", 20), ("c", 3)]),
        ]);

        assert_eq!(merged.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_targets_the_declaring_source() {
        let primary = ObjectRef::from_entries([("a", 1)]);
        let fallback = ObjectRef::from_entries([("a", 100)]);
        let merged = MergeView::new([primary.clone(), fallback.clone()]);

        assert!(merged.remove("a"));
        assert!(!primary.has_own("a"));
        // The fallback's slot is untouched and now wins.
        assert_eq!(merged.get("a"), Some(Value::Int(100)));
    }

    #[test]
    fn snapshot_materializes_merge_precedence() {
        let merged = MergeView::new([
            ObjectRef::from_entries([("a", 1)]),
            ObjectRef::from_entries([("a", 100), ("b", 2)]),
        ]);

        let snapshot = merged.snapshot();
        assert_eq!(snapshot.get("a"), Some(Value::Int(1)));
        assert_eq!(snapshot.get("b"), Some(Value::Int(2)));
        assert_eq!(snapshot.own_keys(), vec!["a", "b"]);
    }

    #[test]
    fn empty_view_is_inert() {
        let merged = MergeView::new(Vec::new());
        assert_eq!(merged.get("a"), None);
        assert!(!merged.set("a", 1));
        assert!(merged.keys().is_empty());
    }
}
