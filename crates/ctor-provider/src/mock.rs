//! # Mock Registry
//!
//! [`MockRegistry`] wraps any [`TypeRegistry`] and records every lookup the
//! provider makes through it. Tests use it to observe resolution behavior that
//! is otherwise invisible, for example that the provider looks the type up again
//! on every `get_invoker` call instead of caching.
//!
//! Expectations work like a queue: each [`expect_lookup`](MockRegistry::expect_lookup)
//! pushes a target, each lookup pops one and panics if it is a different type.
//!
//! ```rust
//! use ctor_provider::mock::MockRegistry;
//! use ctor_provider::{signature, ConstructorProvider, ConstructorRegistry, RegistryProvider, TypeKey};
//!
//! #[derive(Debug)]
//! struct Celsius(f64);
//!
//! let mut registry = ConstructorRegistry::new();
//! registry.register("Celsius", Celsius);
//!
//! let mock = MockRegistry::new(registry);
//! mock.expect_lookup(TypeKey::of::<Celsius>())
//!     .expect_lookup(TypeKey::of::<Celsius>());
//!
//! let provider = RegistryProvider::new(&mock);
//! provider.get_invoker::<Celsius>(&signature![f64]).unwrap();
//! provider.get_invoker::<Celsius>(&signature![f64]).unwrap();
//!
//! assert_eq!(mock.lookup_count(), 2);
//! mock.verify();
//! ```

use crate::registry::{ConstructorInfo, TypeRegistry};
use crate::types::TypeKey;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A [`TypeRegistry`] that records lookups and checks them against expectations.
pub struct MockRegistry<R> {
    inner: R,
    lookups: Mutex<Vec<TypeKey>>,
    expectations: Mutex<VecDeque<TypeKey>>,
}

impl<R: TypeRegistry> MockRegistry<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lookups: Mutex::new(Vec::new()),
            expectations: Mutex::new(VecDeque::new()),
        }
    }

    /// Expects the next unmatched lookup to be for `target`.
    pub fn expect_lookup(&self, target: TypeKey) -> &Self {
        self.expectations.lock().unwrap().push_back(target);
        self
    }

    /// Targets looked up so far, in order.
    pub fn lookups(&self) -> Vec<TypeKey> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Panics if some expected lookups never happened.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap();
        if !remaining.is_empty() {
            panic!(
                "Not all expected lookups happened. {} remaining: {:?}",
                remaining.len(),
                remaining
            );
        }
    }
}

impl<R: TypeRegistry> TypeRegistry for MockRegistry<R> {
    fn constructors_of(&self, target: &TypeKey) -> &[ConstructorInfo] {
        self.lookups.lock().unwrap().push(*target);

        let expected = self.expectations.lock().unwrap().pop_front();
        if let Some(expected) = expected {
            if expected != *target {
                panic!("Unexpected lookup: expected {expected}, got {target}");
            }
        }

        self.inner.constructors_of(target)
    }
}
