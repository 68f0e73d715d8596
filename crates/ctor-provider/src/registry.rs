//! # Type Registry
//!
//! The registry is the introspection facility the provider runs over: for a target
//! type it lists the constructors, each with its parameter [`Signature`].
//!
//! ## Registration builds the invocation path
//!
//! Constructors are registered as plain Rust functions or closures. For each one,
//! [`ConstructorFn`] derives the signature from the parameter types and generates
//! a monomorphized invocation path:
//!
//! 1. Check the argument count against the arity.
//! 2. Downcast each argument, left to right, to its exact parameter type.
//! 3. Call the constructor with the converted arguments.
//!
//! That work happens once per registration. Resolving an invoker only clones an
//! `Arc` to the generated path, and invoking it does no lookup at all.
//!
//! ```rust
//! use ctor_provider::{signature, ConstructorRegistry, TypeKey};
//!
//! struct Point { x: f64, y: f64 }
//!
//! let mut registry = ConstructorRegistry::new();
//! registry.register("Point::new", |x: f64, y: f64| Point { x, y });
//!
//! let ctors = registry.constructors(&TypeKey::of::<Point>());
//! assert_eq!(ctors.len(), 1);
//! assert_eq!(ctors[0].signature(), &signature![f64, f64]);
//! ```

use crate::error::InvokeError;
use crate::types::{Signature, TypeKey};
use crate::value::{coerce, Value};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A generated invocation path: arity check, argument conversion, construction.
pub type InvokeFn<T> = Arc<dyn Fn(Vec<Value>) -> Result<T, InvokeError> + Send + Sync>;

/// Whether the provider may select a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    /// Registered for completeness but never resolved by the provider.
    Private,
}

/// A function usable as a constructor of `T`, taking the parameter tuple `Params`.
///
/// Implemented for every `Fn(P1, ..., Pn) -> T` with `n <= 8` whose parameters
/// are `'static`. `Params` only exists to keep the implementations apart and is
/// always inferred.
pub trait ConstructorFn<T, Params>: Send + Sync + 'static {
    /// Parameter types in declaration order.
    fn signature() -> Signature;

    /// Generates the invocation path for this constructor.
    fn into_invoke_fn(self) -> InvokeFn<T>;
}

macro_rules! impl_constructor_fn {
    ($arity:literal; $($param:ident $position:literal),*) => {
        paste::paste! {
            impl<T, F, $($param),*> ConstructorFn<T, ($($param,)*)> for F
            where
                F: Fn($($param),*) -> T + Send + Sync + 'static,
                T: 'static,
                $($param: Any,)*
            {
                fn signature() -> Signature {
                    Signature::new(vec![$(TypeKey::of::<$param>()),*])
                }

                fn into_invoke_fn(self) -> InvokeFn<T> {
                    Arc::new(move |args: Vec<Value>| -> Result<T, InvokeError> {
                        let [$([<$param:lower>]),*]: [Value; $arity] =
                            args.try_into().map_err(|args: Vec<Value>| {
                                InvokeError::InvocationArityMismatch {
                                    expected: $arity,
                                    actual: args.len(),
                                }
                            })?;
                        $(
                            let [<$param:lower>] = coerce::<$param>($position, [<$param:lower>])?;
                        )*
                        Ok((self)($([<$param:lower>]),*))
                    })
                }
            }
        }
    };
}

impl_constructor_fn!(0;);
impl_constructor_fn!(1; A0 0);
impl_constructor_fn!(2; A0 0, A1 1);
impl_constructor_fn!(3; A0 0, A1 1, A2 2);
impl_constructor_fn!(4; A0 0, A1 1, A2 2, A3 3);
impl_constructor_fn!(5; A0 0, A1 1, A2 2, A3 3, A4 4);
impl_constructor_fn!(6; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);
impl_constructor_fn!(7; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6);
impl_constructor_fn!(8; A0 0, A1 1, A2 2, A3 3, A4 4, A5 5, A6 6, A7 7);

/// A registered constructor of one target type.
#[derive(Clone)]
pub struct ConstructorInfo {
    target: TypeKey,
    signature: Signature,
    visibility: Visibility,
    label: String,
    // Holds an `InvokeFn<T>` for `T` = target.
    typed: Arc<dyn Any + Send + Sync>,
    dynamic: InvokeFn<Value>,
}

impl ConstructorInfo {
    pub fn new<T, P, F>(label: impl Into<String>, visibility: Visibility, constructor: F) -> Self
    where
        T: Any + Send,
        F: ConstructorFn<T, P>,
    {
        let signature = F::signature();
        let typed: InvokeFn<T> = constructor.into_invoke_fn();
        let dynamic: InvokeFn<Value> = {
            let typed = typed.clone();
            Arc::new(move |args: Vec<Value>| typed(args).map(Value::new))
        };
        Self {
            target: TypeKey::of::<T>(),
            signature,
            visibility,
            label: label.into(),
            typed: Arc::new(typed),
            dynamic,
        }
    }

    pub fn target(&self) -> &TypeKey {
        &self.target
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// `None` when `T` is not the target type.
    pub(crate) fn typed_invoke_fn<T: Any>(&self) -> Option<InvokeFn<T>> {
        self.typed.downcast_ref::<InvokeFn<T>>().cloned()
    }

    pub(crate) fn dynamic_invoke_fn(&self) -> InvokeFn<Value> {
        self.dynamic.clone()
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("label", &self.label)
            .field("target", &self.target)
            .field("signature", &self.signature)
            .field("visibility", &self.visibility)
            .finish()
    }
}

/// Lists the constructors of a type.
///
/// The provider only reads through this trait, so any source of constructor
/// metadata can back it (a hand-built registry, a generated one, a mock).
pub trait TypeRegistry: Send + Sync {
    /// All constructors of `target`, public or not, in registration order.
    fn constructors_of(&self, target: &TypeKey) -> &[ConstructorInfo];
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for Arc<R> {
    fn constructors_of(&self, target: &TypeKey) -> &[ConstructorInfo] {
        (**self).constructors_of(target)
    }
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &R {
    fn constructors_of(&self, target: &TypeKey) -> &[ConstructorInfo] {
        (**self).constructors_of(target)
    }
}

/// In-memory [`TypeRegistry`]. Built once, then shared read-only (usually behind an `Arc`).
#[derive(Clone, Default)]
pub struct ConstructorRegistry {
    constructors: HashMap<TypeKey, Vec<ConstructorInfo>>,
}

impl ConstructorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a public constructor of `T`.
    ///
    /// Registering the same signature twice is allowed; the provider will then
    /// refuse to pick either and report the lookup as ambiguous.
    pub fn register<T, P, F>(&mut self, label: impl Into<String>, constructor: F) -> &mut Self
    where
        T: Any + Send,
        F: ConstructorFn<T, P>,
    {
        self.insert(ConstructorInfo::new(label, Visibility::Public, constructor))
    }

    /// Registers a constructor that the provider will never select.
    pub fn register_private<T, P, F>(
        &mut self,
        label: impl Into<String>,
        constructor: F,
    ) -> &mut Self
    where
        T: Any + Send,
        F: ConstructorFn<T, P>,
    {
        self.insert(ConstructorInfo::new(label, Visibility::Private, constructor))
    }

    pub fn insert(&mut self, info: ConstructorInfo) -> &mut Self {
        debug!(
            target_type = %info.target(),
            signature = %info.signature(),
            visibility = ?info.visibility(),
            label = info.label(),
            "Registered constructor"
        );
        self.constructors.entry(*info.target()).or_default().push(info);
        self
    }

    pub fn constructors(&self, target: &TypeKey) -> &[ConstructorInfo] {
        self.constructors
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every type with at least one registered constructor.
    pub fn targets(&self) -> impl Iterator<Item = &TypeKey> {
        self.constructors.keys()
    }

    /// Number of registered constructors across all targets.
    pub fn len(&self) -> usize {
        self.constructors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl TypeRegistry for ConstructorRegistry {
    fn constructors_of(&self, target: &TypeKey) -> &[ConstructorInfo] {
        self.constructors(target)
    }
}

impl fmt::Debug for ConstructorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.constructors.values().flatten())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, signature};

    #[derive(Debug, PartialEq)]
    struct Pair(i32, String);

    #[test]
    fn test_signature_from_closure_parameters() {
        let info = ConstructorInfo::new("Pair", Visibility::Public, |a: i32, b: String| {
            Pair(a, b)
        });
        assert_eq!(info.signature(), &signature![i32, String]);
        assert_eq!(info.target(), &TypeKey::of::<Pair>());
        assert!(info.is_public());
    }

    #[test]
    fn test_invoke_fn_converts_in_order() {
        let invoke = (|a: i32, b: String| Pair(a, b)).into_invoke_fn();
        let pair = invoke(args![5, String::from("five")]).unwrap();
        assert_eq!(pair, Pair(5, "five".into()));
    }

    #[test]
    fn test_invoke_fn_checks_arity_first() {
        let invoke = (|a: i32, b: String| Pair(a, b)).into_invoke_fn();
        let err = invoke(args![String::from("wrong type"), 1, 2]).unwrap_err();
        assert_eq!(
            err,
            InvokeError::InvocationArityMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_invoke_fn_stops_at_first_bad_position() {
        let invoke = (|a: i32, b: String| Pair(a, b)).into_invoke_fn();
        let err = invoke(args![String::from("foo"), 5]).unwrap_err();
        assert_eq!(
            err,
            InvokeError::ArgumentConversion {
                position: 0,
                expected: TypeKey::of::<i32>(),
                actual: TypeKey::of::<String>(),
            }
        );
    }

    #[test]
    fn test_zero_arity_constructor() {
        let info = ConstructorInfo::new("Vec::new", Visibility::Public, Vec::<u8>::new);
        assert!(info.signature().is_empty());
        let invoke = info.typed_invoke_fn::<Vec<u8>>().unwrap();
        assert_eq!(invoke(vec![]).unwrap(), Vec::<u8>::new());
        assert!(info.typed_invoke_fn::<String>().is_none());
    }

    #[test]
    fn test_registry_groups_by_target() {
        let mut registry = ConstructorRegistry::new();
        registry
            .register("Pair", |a: i32, b: String| Pair(a, b))
            .register("Pair::zero", || Pair(0, String::new()))
            .register_private("String::new", String::new);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.targets().count(), 2);
        assert_eq!(registry.constructors(&TypeKey::of::<Pair>()).len(), 2);
        assert!(!registry.constructors(&TypeKey::of::<String>())[0].is_public());
        assert!(registry.constructors(&TypeKey::of::<u64>()).is_empty());
    }
}
