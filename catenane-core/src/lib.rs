//! Catenane is a library of structural object-manipulation primitives, built
//! around a circular-reference-safe graph flattening/reconstruction pair.
//!
//! Core concepts:
//! - **Value**: a JSON-representable primitive or a reference to an object node
//! - **ObjectRef**: a shared handle to an object node, identified by reference
//! - **Descriptor**: a property slot (stored data or computed) with access flags
//! - **Series**: the linear, index-addressed encoding of an object graph
//! - **Pointer**: a positional back-reference standing in for a nested object
//!
//! [`flatten`] walks an arbitrary, possibly cyclic, object graph and emits a
//! [`Series`]: one plain record per distinct node, nested references replaced
//! by pointers, positions assigned in depth-bucketed discovery order with the
//! root at position 0. [`restore`] is the inverse: it rebuilds the graph from
//! a series, shared references and cycles included. The series carries serde
//! implementations, so it is exactly the boundary an external serializer
//! plugs into.
//!
//! # Example
//!
//! ```
//! use catenane_core::{flatten_object, restore, ObjectRef};
//!
//! // A self-referencing node flattens to a single record.
//! let root = ObjectRef::new();
//! root.set("name", "loop");
//! root.set("me", &root);
//!
//! let series = flatten_object(&root);
//! assert_eq!(series.len(), 1);
//!
//! // Restoration reproduces the cycle with identity intact.
//! let restored = restore(&series).unwrap();
//! let me = restored.get("me").unwrap();
//! assert!(me.as_object().unwrap().ptr_eq(&restored));
//! ```

mod chain;
mod descriptors;
mod flatten;
mod merge;
mod object;
mod restore;
pub mod serde_helpers;
mod series;
mod value;
mod view;

pub use chain::prototype_chain;
pub use descriptors::{all_keys, flat_descriptors, CONSTRUCTOR_KEY};
pub use flatten::{flatten, flatten_object, FlattenError};
pub use merge::MergeView;
pub use object::{Descriptor, Getter, NodeId, ObjectRef, Slot};
pub use restore::{restore, RestoreError};
pub use series::{Encoded, Pointer, Record, Series};
pub use value::Value;
pub use view::{OmitView, PickView, ReadOnlyView, WriteOnlyView};
