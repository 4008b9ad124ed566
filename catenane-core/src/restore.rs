use crate::object::ObjectRef;
use crate::series::{Encoded, Series};
use crate::value::Value;

/// Error type for graph restoration.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("series is empty")]
    EmptySeries,
    #[error("pointer {index} is out of range for series of length {len}")]
    PointerOutOfRange { index: usize, len: usize },
}

/// Rebuilds the object graph encoded in `series`, returning the root node.
///
/// One fresh node is allocated per record; every pointer then resolves to
/// the node at the referenced position, so shared references and cycles come
/// back with their identity intact. Resolution order across records does not
/// matter — every lookup lands in the already-fully-allocated node list.
///
/// Pointers are validated while linking: an index outside the series raises
/// [`RestoreError::PointerOutOfRange`] (malformed input is a boundary-facing
/// condition, so it is detected rather than left undefined). The series
/// itself is never mutated and all work happens on newly allocated nodes, so
/// a failed call leaves no partial state visible to the caller.
pub fn restore(series: &Series) -> Result<ObjectRef, RestoreError> {
    if series.is_empty() {
        return Err(RestoreError::EmptySeries);
    }

    let len = series.len();
    let nodes: Vec<ObjectRef> = (0..len).map(|_| ObjectRef::new()).collect();

    for (record, node) in series.iter().zip(&nodes) {
        for (key, encoded) in record.iter() {
            let value = match encoded {
                Encoded::Ref(pointer) => {
                    let target = nodes
                        .get(pointer.o)
                        .ok_or(RestoreError::PointerOutOfRange {
                            index: pointer.o,
                            len,
                        })?;
                    Value::Object(target.clone())
                }
                primitive => primitive
                    .to_value()
                    .expect("non-pointer encodes as a primitive"),
            };
            node.set(key.clone(), value);
        }
    }

    log::trace!("restored {} nodes", len);
    Ok(nodes.into_iter().next().expect("series is non-empty"))
}
