use indexmap::IndexMap;

use crate::chain::prototype_chain;
use crate::object::{Descriptor, ObjectRef};

/// The synthetic key naming an object's constructor. It is chain-identity
/// metadata, not data, and is stripped whenever inheritance is present.
pub const CONSTRUCTOR_KEY: &str = "constructor";

/// Collapses the prototype chain of `obj` into one flat descriptor map.
///
/// A more-derived layer's descriptor for a key overwrites a less-derived
/// one, and keys are listed most-derived layer first — the same order
/// [`all_keys`] yields. The result fully determines the object's effective
/// property set; no caller can observe which level a property came from.
/// When the chain has more than one level the `constructor` key is removed;
/// a single-level object's own descriptors are returned unmodified.
pub fn flat_descriptors(obj: &ObjectRef) -> IndexMap<String, Descriptor> {
    let chain = prototype_chain(obj);
    let mut merged: IndexMap<String, Descriptor> = IndexMap::new();
    for layer in &chain {
        for (key, descriptor) in layer.own_descriptors() {
            merged.entry(key).or_insert(descriptor);
        }
    }
    if chain.len() > 1 {
        merged.shift_remove(CONSTRUCTOR_KEY);
    }
    merged
}

/// The key-only analog of [`flat_descriptors`]: every property key declared
/// anywhere on the chain, most-derived layer first, `constructor` stripped
/// when inheritance is present.
pub fn all_keys(obj: &ObjectRef) -> Vec<String> {
    let chain = prototype_chain(obj);
    if chain.len() == 1 {
        return obj.own_keys();
    }
    let mut keys: Vec<String> = Vec::new();
    for layer in &chain {
        for key in layer.own_keys() {
            if key != CONSTRUCTOR_KEY && !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}
