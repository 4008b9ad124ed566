use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A positional back-reference: the single-key record `{ "o": <position> }`
/// standing in for an object-valued property in the encoded series.
///
/// A pointer never denotes ownership; it is a pure index into the series it
/// appears in. Positions serialize as integers; numeric strings are accepted
/// on input (see [`crate::serde_helpers::position`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pointer {
    #[serde(with = "crate::serde_helpers::position")]
    pub o: usize,
}

/// An encoded property value: a JSON-representable primitive copied
/// verbatim, or a [`Pointer`] to another record in the series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Encoded {
    Ref(Pointer),
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Encoded {
    /// Creates a pointer to the record at `position`.
    pub fn pointer(position: usize) -> Self {
        Encoded::Ref(Pointer { o: position })
    }

    /// Returns the referenced position, if this value is a pointer.
    pub fn as_pointer(&self) -> Option<usize> {
        match self {
            Encoded::Ref(pointer) => Some(pointer.o),
            _ => None,
        }
    }

    /// Returns true if this value is a pointer.
    pub fn is_pointer(&self) -> bool {
        matches!(self, Encoded::Ref(_))
    }

    /// Encodes a primitive value verbatim. Returns `None` for objects —
    /// those are the flattener's job and always become pointers.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Encoded::Null),
            Value::Bool(b) => Some(Encoded::Bool(*b)),
            Value::Int(i) => Some(Encoded::Int(*i)),
            Value::Float(x) => Some(Encoded::Float(*x)),
            Value::Text(s) => Some(Encoded::Text(s.clone())),
            Value::Object(_) => None,
        }
    }

    /// Decodes back to a primitive value. Returns `None` for pointers —
    /// those are resolved by the restorer against a concrete series.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Encoded::Ref(_) => None,
            Encoded::Null => Some(Value::Null),
            Encoded::Bool(b) => Some(Value::Bool(*b)),
            Encoded::Int(i) => Some(Value::Int(*i)),
            Encoded::Float(x) => Some(Value::Float(*x)),
            Encoded::Text(s) => Some(Value::Text(s.clone())),
        }
    }
}

/// The flat key/value encoding of a single object node.
///
/// Keys mirror the node's flattened property set (post prototype-chain merge,
/// minus computed properties, minus the constructor key when inheritance was
/// present) and keep their order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Encoded>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Encoded) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Encoded> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Encoded)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<IndexMap<String, Encoded>> for Record {
    fn from(map: IndexMap<String, Encoded>) -> Self {
        Record(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Encoded)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Encoded)>>(iter: I) -> Self {
        Record(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The ordered, 0-indexed sequence of records produced by flattening an
/// object graph. Record 0 is always the root; pointer positions index into
/// the series itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<Record>);

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.0.get(position)
    }

    /// Returns the root record, the encoding of the original root node.
    pub fn root(&self) -> Option<&Record> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Record>> for Series {
    fn from(records: Vec<Record>) -> Self {
        Series(records)
    }
}

impl FromIterator<Record> for Series {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Series(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
