use crate::object::ObjectRef;

/// Returns the prototype chain of `obj`, starting with `obj` itself.
///
/// The walk stops at the shared base level common to all plain objects,
/// modelled as the absence of a prototype. A plain object therefore yields
/// the single-element chain `[obj]`. Chains are finite by construction:
/// the prototype is fixed when a node is created, so no cycle can form.
pub fn prototype_chain(obj: &ObjectRef) -> Vec<ObjectRef> {
    let mut chain = vec![obj.clone()];
    let mut current = obj.clone();
    while let Some(proto) = current.proto() {
        chain.push(proto.clone());
        current = proto;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_object_is_its_own_chain() {
        let obj = ObjectRef::new();
        let chain = prototype_chain(&obj);

        assert_eq!(chain.len(), 1);
        assert!(chain[0].ptr_eq(&obj));
    }

    #[test]
    fn chain_is_ordered_most_derived_first() {
        let base = ObjectRef::new();
        let middle = ObjectRef::with_proto(&base);
        let leaf = ObjectRef::with_proto(&middle);

        let chain = prototype_chain(&leaf);
        assert_eq!(chain.len(), 3);
        assert!(chain[0].ptr_eq(&leaf));
        assert!(chain[1].ptr_eq(&middle));
        assert!(chain[2].ptr_eq(&base));
    }

    #[test]
    fn siblings_share_the_base_suffix() {
        let base = ObjectRef::new();
        let left = ObjectRef::with_proto(&base);
        let right = ObjectRef::with_proto(&base);

        let left_chain = prototype_chain(&left);
        let right_chain = prototype_chain(&right);
        assert!(left_chain[1].ptr_eq(&right_chain[1]));
    }
}
