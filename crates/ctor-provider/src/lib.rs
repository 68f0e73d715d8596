//! # Constructor Provider
//!
//! This crate turns "build a `T` from these loosely-typed arguments" into a fast,
//! reusable function. Given a target type and an ordered list of parameter types,
//! the provider finds the one public constructor with exactly that signature and
//! returns an [`Invoker`]: a callable that takes a `Vec<Value>`, converts each
//! argument to its declared type, and constructs a new instance.
//!
//! It is meant for generic object-building code (deserializers, dependency
//! injectors, object mappers) that learns *what* to build at runtime but builds
//! the same thing many times. Resolution happens once; each call afterwards runs
//! a specialized invocation path with no lookup.
//!
//! ## Architecture Overview
//!
//! 1. **Registry Layer** ([`TypeRegistry`], [`ConstructorRegistry`]) - which
//!    constructors exist, with their parameter signatures. Registering a function
//!    generates its invocation path.
//! 2. **Resolution Layer** ([`ConstructorProvider`], [`RegistryProvider`]) - exact
//!    signature lookup, returning an invoker or a [`ResolveError`].
//! 3. **Invocation Layer** ([`Invoker`], [`Value`]) - arity check, per-argument
//!    conversion, construction. Failures are [`InvokeError`]s.
//!
//! ## Example
//!
//! ```rust
//! use ctor_provider::{
//!     args, signature, ConstructorProvider, ConstructorRegistry, InvokeError, RegistryProvider,
//!     ResolveError, TypeKey,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: f64, y: f64 }
//!
//! let mut registry = ConstructorRegistry::new();
//! registry.register("Point::new", |x: f64, y: f64| Point { x, y });
//! let provider = RegistryProvider::new(registry);
//!
//! // Resolve once...
//! let new_point = provider.get_invoker::<Point>(&signature![f64, f64]).unwrap();
//!
//! // ...construct many times.
//! assert_eq!(new_point.invoke(args![3.0, 4.0]).unwrap(), Point { x: 3.0, y: 4.0 });
//! assert_eq!(new_point.invoke(args![5.0, 12.0]).unwrap(), Point { x: 5.0, y: 12.0 });
//!
//! // Wrong arity or argument types fail at call time.
//! assert!(matches!(
//!     new_point.invoke(args![3.0]),
//!     Err(InvokeError::InvocationArityMismatch { expected: 2, actual: 1 })
//! ));
//! assert!(matches!(
//!     new_point.invoke(args!["a", 4.0]),
//!     Err(InvokeError::ArgumentConversion { position: 0, .. })
//! ));
//!
//! // No constructor with that exact signature: no invoker at all.
//! assert!(matches!(
//!     provider.get_invoker::<Point>(&signature![i32, i32]),
//!     Err(ResolveError::ConstructorNotFound { .. })
//! ));
//! ```
//!
//! ## Concurrency Model
//!
//! - The provider is stateless; `get_invoker` takes `&self` and never locks.
//! - Invokers are `Clone + Send + Sync`. Many threads may call one invoker at once;
//!   each call builds its own instance.
//! - The provider never caches. Keep the invoker, or put a cache keyed by
//!   `(TypeKey, Signature)` in front of the provider.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockRegistry`](mock::MockRegistry), a registry
//! wrapper that records and checks the lookups the provider makes.

pub mod error;
pub mod invoker;
pub mod mock;
pub mod provider;
pub mod registry;
pub mod types;
pub mod value;

// Re-export core types for convenience
pub use error::{InvokeError, ResolveError};
pub use invoker::Invoker;
pub use provider::{ConstructorProvider, RegistryProvider};
pub use registry::{
    ConstructorFn, ConstructorInfo, ConstructorRegistry, InvokeFn, TypeRegistry, Visibility,
};
pub use types::{Signature, TypeKey};
pub use value::{coerce, Value};
