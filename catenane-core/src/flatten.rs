use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::descriptors::flat_descriptors;
use crate::object::{NodeId, ObjectRef, Slot};
use crate::series::{Encoded, Record, Series};
use crate::value::Value;

/// Error type for graph flattening.
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    #[error("root value is not an object")]
    NonObjectRoot,
}

/// Flattens the object graph reachable from `root` into a linear series.
///
/// Fails with [`FlattenError::NonObjectRoot`] when `root` is a primitive.
/// See [`flatten_object`] for the typed entry point and the format contract.
pub fn flatten(root: &Value) -> Result<Series, FlattenError> {
    match root {
        Value::Object(obj) => Ok(flatten_object(obj)),
        _ => Err(FlattenError::NonObjectRoot),
    }
}

/// Flattens the object graph reachable from `root` into a linear series.
///
/// Every distinct node (by identity) is encoded exactly once, so cycles and
/// shared references do not inflate the output and the walk always
/// terminates. Positions are assigned in level order: nodes are bucketed by
/// discovery depth (root = 0), buckets concatenated depth-first, and nodes
/// keep first-discovery order within a bucket. Record 0 is always the root.
///
/// Each record carries the node's flattened property set (the prototype
/// chain merged per [`flat_descriptors`]). Stored primitives are copied
/// verbatim; object-valued properties become pointers; computed properties
/// are skipped without being evaluated.
///
/// All bookkeeping is call-local, so concurrent calls on independent graphs
/// need no coordination, and the input graph is never mutated.
pub fn flatten_object(root: &ObjectRef) -> Series {
    let mut walk = Walk::default();
    walk.visit(root, 0);
    walk.into_series()
}

/// A record value whose pointer positions may not be final yet.
///
/// Pointer placeholders are shared position cells handed out before the
/// level buckets are concatenated; each is written exactly once in
/// [`Walk::into_series`] and treated as immutable afterwards.
enum Draft {
    Ready(Encoded),
    Pending(Rc<Cell<usize>>),
}

#[derive(Default)]
struct Walk {
    /// Nodes bucketed by discovery depth, first-discovery order within.
    levels: Vec<Vec<ObjectRef>>,
    /// Identity-keyed visited map: node -> its shared position placeholder.
    placeholders: HashMap<NodeId, Rc<Cell<usize>>>,
    /// Encoded records under construction, keyed by node identity.
    drafts: HashMap<NodeId, Vec<(String, Draft)>>,
}

impl Walk {
    fn visit(&mut self, node: &ObjectRef, level: usize) -> Rc<Cell<usize>> {
        // Already recorded: hand back the same placeholder. This is the
        // short-circuit that makes cycles terminate and keeps shared
        // references from being encoded twice.
        if let Some(placeholder) = self.placeholders.get(&node.id()) {
            return Rc::clone(placeholder);
        }

        let placeholder = Rc::new(Cell::new(usize::MAX));
        self.placeholders.insert(node.id(), Rc::clone(&placeholder));
        if self.levels.len() <= level {
            self.levels.resize_with(level + 1, Vec::new);
        }
        self.levels[level].push(node.clone());

        let mut draft = Vec::new();
        for (key, descriptor) in flat_descriptors(node) {
            let Slot::Data(value) = descriptor.slot else {
                // Computed properties capture no stored data.
                continue;
            };
            let entry = if let Value::Object(child) = &value {
                Draft::Pending(self.visit(child, level + 1))
            } else {
                let encoded = Encoded::from_value(&value)
                    .expect("non-object value encodes as a primitive");
                Draft::Ready(encoded)
            };
            draft.push((key, entry));
        }
        self.drafts.insert(node.id(), draft);

        placeholder
    }

    fn into_series(self) -> Series {
        let Walk {
            levels,
            placeholders,
            mut drafts,
        } = self;

        // Concatenate the depth buckets and patch every placeholder with its
        // final position.
        let mut ordered: Vec<ObjectRef> = Vec::new();
        for level in &levels {
            for node in level {
                placeholders[&node.id()].set(ordered.len());
                ordered.push(node.clone());
            }
        }

        let series: Series = ordered
            .iter()
            .map(|node| {
                let draft = drafts
                    .remove(&node.id())
                    .expect("every bucketed node has a draft record");
                draft
                    .into_iter()
                    .map(|(key, entry)| {
                        let encoded = match entry {
                            Draft::Ready(encoded) => encoded,
                            Draft::Pending(placeholder) => Encoded::pointer(placeholder.get()),
                        };
                        (key, encoded)
                    })
                    .collect::<Record>()
            })
            .collect();

        log::trace!(
            "flattened {} nodes across {} depth levels",
            series.len(),
            levels.len()
        );
        series
    }
}
