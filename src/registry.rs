//! Ordered field registry for a widget set.
//!
//! The registry tracks every field that takes part in a widget set's form,
//! in creation order. Fields are owned by their widgets; the registry only
//! holds shared handles so the form can be rebuilt on every post.

use std::rc::Rc;

use tracing::trace;

use crate::form::FieldRef;

/// Number of slots a fresh registry reserves.
pub const DEFAULT_CAPACITY: usize = 8;

/// An ordered, growable sequence of field handles.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: Vec<FieldRef>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl FieldRegistry {
    /// Create an empty registry with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Append a field, doubling the capacity when the registry is full.
    pub fn add(&mut self, field: FieldRef) {
        if self.fields.len() == self.fields.capacity() {
            let grow = self.fields.capacity().max(1);
            self.fields.reserve_exact(grow);
            trace!(capacity = self.fields.capacity(), "field registry grown");
        }
        self.fields.push(field);
    }

    /// Remove a field by identity.
    ///
    /// Later fields shift left by one. Returns `false` when the field was
    /// not registered.
    pub fn remove(&mut self, field: &FieldRef) -> bool {
        match self.position(field) {
            Some(idx) => {
                self.fields.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Index of a registered field.
    pub fn position(&self, field: &FieldRef) -> Option<usize> {
        self.fields.iter().position(|f| Rc::ptr_eq(f, field))
    }

    /// Check whether a field is registered.
    pub fn contains(&self, field: &FieldRef) -> bool {
        self.position(field).is_some()
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields the registry can hold before growing.
    pub fn capacity(&self) -> usize {
        self.fields.capacity()
    }

    /// The registered fields, in insertion order.
    pub fn fields(&self) -> &[FieldRef] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::new_field;
    use proptest::prelude::*;

    fn field() -> FieldRef {
        new_field(1, 1, 0, 0).unwrap()
    }

    #[test]
    fn test_initial_capacity() {
        let registry = FieldRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.capacity() >= DEFAULT_CAPACITY);
    }

    #[test]
    fn test_grows_past_capacity() {
        let mut registry = FieldRegistry::with_capacity(2);
        let fields: Vec<_> = (0..5).map(|_| field()).collect();
        for f in &fields {
            registry.add(f.clone());
        }
        assert_eq!(registry.len(), 5);
        assert!(registry.capacity() >= 5);
        for (a, b) in registry.fields().iter().zip(&fields) {
            assert!(Rc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_remove_shifts_left() {
        let mut registry = FieldRegistry::new();
        let fields: Vec<_> = (0..4).map(|_| field()).collect();
        for f in &fields {
            registry.add(f.clone());
        }

        assert!(registry.remove(&fields[1]));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.position(&fields[0]), Some(0));
        assert_eq!(registry.position(&fields[2]), Some(1));
        assert_eq!(registry.position(&fields[3]), Some(2));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = FieldRegistry::new();
        let kept = field();
        registry.add(kept.clone());

        assert!(!registry.remove(&field()));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&kept));
    }

    proptest! {
        #[test]
        fn prop_insertion_order_survives_growth(n in 0usize..64) {
            let mut registry = FieldRegistry::new();
            let fields: Vec<_> = (0..n).map(|_| field()).collect();
            for f in &fields {
                registry.add(f.clone());
            }
            prop_assert_eq!(registry.len(), n);
            for (idx, f) in fields.iter().enumerate() {
                prop_assert_eq!(registry.position(f), Some(idx));
            }
        }

        #[test]
        fn prop_remove_matches_vec_model(
            n in 1usize..32,
            removals in proptest::collection::vec(any::<prop::sample::Index>(), 0..16)
        ) {
            let mut registry = FieldRegistry::new();
            let mut model: Vec<FieldRef> = (0..n).map(|_| field()).collect();
            for f in &model {
                registry.add(f.clone());
            }

            for pick in removals {
                if model.is_empty() {
                    break;
                }
                let victim = model.remove(pick.index(model.len()));
                prop_assert!(registry.remove(&victim));
                prop_assert!(!registry.contains(&victim));
            }

            prop_assert_eq!(registry.len(), model.len());
            for (a, b) in registry.fields().iter().zip(&model) {
                prop_assert!(Rc::ptr_eq(a, b));
            }
        }
    }
}
