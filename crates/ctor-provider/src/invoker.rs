//! # Invokers
//!
//! An [`Invoker`] is the product of a successful resolution: a cloneable handle to
//! the generated invocation path of one constructor. It holds no mutable state, so
//! one invoker can be shared across threads and called any number of times.

use crate::error::InvokeError;
use crate::registry::InvokeFn;
use crate::types::{Signature, TypeKey};
use crate::value::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Builds `T`s from argument lists matching one constructor signature.
pub struct Invoker<T> {
    target: TypeKey,
    signature: Signature,
    invoke: InvokeFn<T>,
}

impl<T> Invoker<T> {
    pub(crate) fn new(target: TypeKey, signature: Signature, invoke: InvokeFn<T>) -> Self {
        Self {
            target,
            signature,
            invoke,
        }
    }

    /// Constructs one new instance.
    ///
    /// # Errors
    ///
    /// - [`InvokeError::InvocationArityMismatch`] if `args.len()` differs from the arity.
    /// - [`InvokeError::ArgumentConversion`] for the first argument whose runtime
    ///   type is not exactly the declared parameter type.
    ///
    /// The constructor is not called in either case.
    pub fn invoke(&self, args: Vec<Value>) -> Result<T, InvokeError> {
        (self.invoke)(args)
    }

    /// The type the constructor builds.
    pub fn target(&self) -> &TypeKey {
        &self.target
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn arity(&self) -> usize {
        self.signature.arity()
    }
}

impl<T: 'static> Invoker<T> {
    /// Adapts the output, typically to hand out a trait object instead of the
    /// concrete type.
    ///
    /// ```rust
    /// use ctor_provider::{args, signature, ConstructorProvider, ConstructorRegistry, RegistryProvider};
    ///
    /// trait Shape { fn area(&self) -> f64; }
    /// struct Square(f64);
    /// impl Shape for Square { fn area(&self) -> f64 { self.0 * self.0 } }
    ///
    /// let mut registry = ConstructorRegistry::new();
    /// registry.register("Square", Square);
    /// let provider = RegistryProvider::new(registry);
    ///
    /// let shapes = provider
    ///     .get_invoker::<Square>(&signature![f64])
    ///     .unwrap()
    ///     .map(|s| Box::new(s) as Box<dyn Shape>);
    /// assert_eq!(shapes.invoke(args![3.0_f64]).unwrap().area(), 9.0);
    /// ```
    pub fn map<U, G>(self, f: G) -> Invoker<U>
    where
        G: Fn(T) -> U + Send + Sync + 'static,
        U: 'static,
    {
        let inner = self.invoke;
        Invoker {
            target: self.target,
            signature: self.signature,
            invoke: Arc::new(move |args: Vec<Value>| inner(args).map(&f)),
        }
    }
}

impl Invoker<Value> {
    /// Turns a dynamic invoker into a typed one.
    ///
    /// The check happens per call: if the constructed value is not a `T`, the call
    /// fails with [`InvokeError::ResultType`].
    pub fn downcast<T: Any>(self) -> Invoker<T> {
        let inner = self.invoke;
        Invoker {
            target: self.target,
            signature: self.signature,
            invoke: Arc::new(move |args: Vec<Value>| -> Result<T, InvokeError> {
                inner(args)?
                    .downcast::<T>()
                    .map_err(|value| InvokeError::ResultType {
                        expected: TypeKey::of::<T>(),
                        actual: value.type_key(),
                    })
            }),
        }
    }
}

impl<T> Clone for Invoker<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target,
            signature: self.signature.clone(),
            invoke: self.invoke.clone(),
        }
    }
}

impl<T> fmt::Debug for Invoker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("target", &self.target)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
