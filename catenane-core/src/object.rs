use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// A computed-property getter, invoked with the receiver on every read.
pub type Getter = Rc<dyn Fn(&ObjectRef) -> Value>;

/// A property slot: either directly-stored data or a computed rule.
///
/// Computed slots model accessor properties. They are evaluated on `get` and
/// deliberately excluded from graph flattening — only stored data is captured.
#[derive(Clone)]
pub enum Slot {
    Data(Value),
    Computed(Getter),
}

impl Slot {
    /// Returns true if this slot computes its value on read.
    pub fn is_computed(&self) -> bool {
        matches!(self, Slot::Computed(_))
    }

    /// Returns the stored value, if this is a data slot.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Slot::Data(value) => Some(value),
            Slot::Computed(_) => None,
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Slot::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A property descriptor: the slot plus its access flags.
#[derive(Clone, Debug)]
pub struct Descriptor {
    pub slot: Slot,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Descriptor {
    /// Creates a plain data descriptor with all flags set.
    pub fn data(value: impl Into<Value>) -> Self {
        Descriptor {
            slot: Slot::Data(value.into()),
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Creates a non-writable data descriptor.
    pub fn read_only(value: impl Into<Value>) -> Self {
        Descriptor {
            writable: false,
            ..Descriptor::data(value)
        }
    }

    /// Creates a computed descriptor from a getter closure.
    pub fn computed(getter: impl Fn(&ObjectRef) -> Value + 'static) -> Self {
        Descriptor {
            slot: Slot::Computed(Rc::new(getter)),
            writable: false,
            enumerable: true,
            configurable: true,
        }
    }
}

struct Object {
    slots: IndexMap<String, Descriptor>,
    proto: Option<ObjectRef>,
}

/// The identity of an object node, derived from its allocation address.
///
/// Two handles have the same `NodeId` exactly when they alias the same node.
/// Valid for identity-keyed maps while the node is kept alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(*const ());

/// A shared handle to an object node.
///
/// Nodes are identified by reference: `clone` aliases, and equality of
/// identity is checked with [`ObjectRef::ptr_eq`]. The prototype is fixed at
/// construction, so prototype chains cannot form cycles. Property values can
/// reference other nodes freely, including cyclically — note that a cyclic
/// graph keeps itself alive under reference counting, so callers that build
/// cycles and care about reclaim must break them explicitly.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    /// Creates a new empty object with no prototype.
    pub fn new() -> Self {
        ObjectRef(Rc::new(RefCell::new(Object {
            slots: IndexMap::new(),
            proto: None,
        })))
    }

    /// Creates a new empty object inheriting from `proto`.
    pub fn with_proto(proto: &ObjectRef) -> Self {
        ObjectRef(Rc::new(RefCell::new(Object {
            slots: IndexMap::new(),
            proto: Some(proto.clone()),
        })))
    }

    /// Creates an object from an ordered list of key/value entries.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let obj = ObjectRef::new();
        for (key, value) in entries {
            obj.set(key, value);
        }
        obj
    }

    /// Returns this node's identity.
    pub fn id(&self) -> NodeId {
        NodeId(Rc::as_ptr(&self.0) as *const ())
    }

    /// Returns true if both handles alias the same node.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the prototype, if any.
    pub fn proto(&self) -> Option<ObjectRef> {
        self.0.borrow().proto.clone()
    }

    /// Reads a property, consulting own slots first and then the prototype
    /// chain. Computed slots run their getter with `self` as the receiver.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            if let Some(descriptor) = current.own_descriptor(key) {
                return Some(match descriptor.slot {
                    Slot::Data(value) => value,
                    // The borrow is released before the getter runs, so the
                    // getter may freely read the receiver.
                    Slot::Computed(getter) => getter(self),
                });
            }
            match current.proto() {
                Some(proto) => current = proto,
                None => return None,
            }
        }
    }

    /// Writes an own property. Creates a fresh data slot for new keys;
    /// refuses non-writable and computed existing slots.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        let value = value.into();
        let mut inner = self.0.borrow_mut();
        match inner.slots.get_mut(&key) {
            Some(descriptor) => {
                if !descriptor.writable {
                    return false;
                }
                match &mut descriptor.slot {
                    Slot::Data(slot) => {
                        *slot = value;
                        true
                    }
                    Slot::Computed(_) => false,
                }
            }
            None => {
                inner.slots.insert(key, Descriptor::data(value));
                true
            }
        }
    }

    /// Installs a descriptor under `key`, replacing any existing slot.
    pub fn define(&self, key: impl Into<String>, descriptor: Descriptor) {
        self.0.borrow_mut().slots.insert(key.into(), descriptor);
    }

    /// Removes an own property. Refuses non-configurable slots and returns
    /// false when the key is absent.
    pub fn remove(&self, key: &str) -> bool {
        let mut inner = self.0.borrow_mut();
        let configurable = matches!(inner.slots.get(key), Some(d) if d.configurable);
        if !configurable {
            return false;
        }
        inner.slots.shift_remove(key);
        true
    }

    /// Returns true if `key` is declared on this node or its chain.
    pub fn has(&self, key: &str) -> bool {
        let mut current = self.clone();
        loop {
            if current.has_own(key) {
                return true;
            }
            match current.proto() {
                Some(proto) => current = proto,
                None => return false,
            }
        }
    }

    /// Returns true if `key` is an own property of this node.
    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().slots.contains_key(key)
    }

    /// Returns the own descriptor for `key`, if present.
    pub fn own_descriptor(&self, key: &str) -> Option<Descriptor> {
        self.0.borrow().slots.get(key).cloned()
    }

    /// Returns the own property keys in insertion order.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.borrow().slots.keys().cloned().collect()
    }

    /// Returns the own descriptors in insertion order.
    pub fn own_descriptors(&self) -> Vec<(String, Descriptor)> {
        self.0
            .borrow()
            .slots
            .iter()
            .map(|(k, d)| (k.clone(), d.clone()))
            .collect()
    }
}

impl Default for ObjectRef {
    fn default() -> Self {
        Self::new()
    }
}

// Shallow on purpose: printing property values could recurse into a cycle.
impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("ObjectRef")
            .field("id", &self.id())
            .field("keys", &inner.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let obj = ObjectRef::new();
        assert!(obj.set("name", "ada"));
        assert!(obj.set("age", 36));

        assert_eq!(obj.get("name"), Some(Value::from("ada")));
        assert_eq!(obj.get("age"), Some(Value::Int(36)));
        assert_eq!(obj.get("missing"), None);
    }

    #[test]
    fn identity_semantics() {
        let a = ObjectRef::new();
        let alias = a.clone();
        let b = ObjectRef::new();

        assert!(a.ptr_eq(&alias));
        assert_eq!(a.id(), alias.id());
        assert!(!a.ptr_eq(&b));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn get_walks_prototype_chain() {
        let base = ObjectRef::from_entries([("greet", "hello")]);
        let child = ObjectRef::with_proto(&base);
        child.set("name", "ada");

        assert_eq!(child.get("greet"), Some(Value::from("hello")));
        assert_eq!(child.get("name"), Some(Value::from("ada")));
        assert!(child.has("greet"));
        assert!(!child.has_own("greet"));
    }

    #[test]
    fn own_slot_shadows_prototype() {
        let base = ObjectRef::from_entries([("kind", "base")]);
        let child = ObjectRef::with_proto(&base);
        child.set("kind", "child");

        assert_eq!(child.get("kind"), Some(Value::from("child")));
        assert_eq!(base.get("kind"), Some(Value::from("base")));
    }

    #[test]
    fn computed_slot_runs_getter_with_receiver() {
        let obj = ObjectRef::from_entries([("first", "ada"), ("last", "lovelace")]);
        obj.define(
            "full",
            Descriptor::computed(|this| {
                let first = match this.get("first") {
                    Some(Value::Text(s)) => s,
                    _ => String::new(),
                };
                let last = match this.get("last") {
                    Some(Value::Text(s)) => s,
                    _ => String::new(),
                };
                Value::Text(format!("{first} {last}"))
            }),
        );

        assert_eq!(obj.get("full"), Some(Value::from("ada lovelace")));
    }

    #[test]
    fn computed_slot_inherited_getter_sees_derived_receiver() {
        let base = ObjectRef::new();
        base.define(
            "label",
            Descriptor::computed(|this| this.get("name").unwrap_or(Value::Null)),
        );
        let child = ObjectRef::with_proto(&base);
        child.set("name", "derived");

        assert_eq!(child.get("label"), Some(Value::from("derived")));
    }

    #[test]
    fn set_refuses_read_only_slot() {
        let obj = ObjectRef::new();
        obj.define("constant", Descriptor::read_only(1));

        assert!(!obj.set("constant", 2));
        assert_eq!(obj.get("constant"), Some(Value::Int(1)));
    }

    #[test]
    fn set_refuses_computed_slot() {
        let obj = ObjectRef::new();
        obj.define("computed", Descriptor::computed(|_| Value::Int(7)));

        assert!(!obj.set("computed", 8));
        assert_eq!(obj.get("computed"), Some(Value::Int(7)));
    }

    #[test]
    fn remove_respects_configurable_flag() {
        let obj = ObjectRef::from_entries([("temp", 1)]);
        obj.define(
            "pinned",
            Descriptor {
                configurable: false,
                ..Descriptor::data(2)
            },
        );

        assert!(obj.remove("temp"));
        assert!(!obj.remove("pinned"));
        assert!(!obj.remove("missing"));
        assert_eq!(obj.own_keys(), vec!["pinned"]);
    }

    #[test]
    fn own_keys_preserve_insertion_order() {
        let obj = ObjectRef::from_entries([("z", 1), ("a", 2), ("m", 3)]);
        assert_eq!(obj.own_keys(), vec!["z", "a", "m"]);
    }
}
