//! Restricted pass-through views over a single object.
//!
//! Each view holds a handle, not a copy: reads and writes that the view
//! allows land on the underlying node. The restriction is a static allow or
//! deny predicate on the property key — no graph algorithm, no state beyond
//! the key set.

use crate::object::ObjectRef;
use crate::value::Value;

fn to_keys(keys: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    keys.into_iter().map(Into::into).collect()
}

/// A view exposing only a listed subset of the target's properties.
pub struct PickView {
    target: ObjectRef,
    keys: Vec<String>,
}

impl PickView {
    pub fn new(target: &ObjectRef, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PickView {
            target: target.clone(),
            keys: to_keys(keys),
        }
    }

    fn allows(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.allows(key).then(|| self.target.get(key)).flatten()
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        self.allows(key) && self.target.set(key, value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.allows(key) && self.target.has(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.allows(key) && self.target.remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.target
            .own_keys()
            .into_iter()
            .filter(|k| self.allows(k))
            .collect()
    }

    pub fn target(&self) -> &ObjectRef {
        &self.target
    }
}

/// A view hiding a listed subset of the target's properties.
pub struct OmitView {
    target: ObjectRef,
    keys: Vec<String>,
}

impl OmitView {
    pub fn new(target: &ObjectRef, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        OmitView {
            target: target.clone(),
            keys: to_keys(keys),
        }
    }

    fn denies(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        if self.denies(key) {
            return None;
        }
        self.target.get(key)
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        !self.denies(key) && self.target.set(key, value)
    }

    pub fn has(&self, key: &str) -> bool {
        !self.denies(key) && self.target.has(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        !self.denies(key) && self.target.remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.target
            .own_keys()
            .into_iter()
            .filter(|k| !self.denies(k))
            .collect()
    }

    pub fn target(&self) -> &ObjectRef {
        &self.target
    }
}

/// A view blocking writes and removals for a key set, or for every key when
/// no set is given. Reads pass through untouched.
pub struct ReadOnlyView {
    target: ObjectRef,
    keys: Option<Vec<String>>,
}

impl ReadOnlyView {
    /// Protects every key.
    pub fn new(target: &ObjectRef) -> Self {
        ReadOnlyView {
            target: target.clone(),
            keys: None,
        }
    }

    /// Protects only the listed keys.
    pub fn for_keys(
        target: &ObjectRef,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        ReadOnlyView {
            target: target.clone(),
            keys: Some(to_keys(keys)),
        }
    }

    fn protects(&self, key: &str) -> bool {
        match &self.keys {
            None => true,
            Some(keys) => keys.iter().any(|k| k == key),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.target.get(key)
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        !self.protects(key) && self.target.set(key, value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.target.has(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        !self.protects(key) && self.target.remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.target.own_keys()
    }

    pub fn target(&self) -> &ObjectRef {
        &self.target
    }
}

/// A view masking reads for a key set, or for every key when no set is
/// given. Writes pass through untouched.
pub struct WriteOnlyView {
    target: ObjectRef,
    keys: Option<Vec<String>>,
}

impl WriteOnlyView {
    /// Masks every key.
    pub fn new(target: &ObjectRef) -> Self {
        WriteOnlyView {
            target: target.clone(),
            keys: None,
        }
    }

    /// Masks only the listed keys.
    pub fn for_keys(
        target: &ObjectRef,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        WriteOnlyView {
            target: target.clone(),
            keys: Some(to_keys(keys)),
        }
    }

    fn masks(&self, key: &str) -> bool {
        match &self.keys {
            None => true,
            Some(keys) => keys.iter().any(|k| k == key),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        if self.masks(key) {
            return None;
        }
        self.target.get(key)
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        self.target.set(key, value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.target.has(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.target.remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.target.own_keys()
    }

    pub fn target(&self) -> &ObjectRef {
        &self.target
    }
}
