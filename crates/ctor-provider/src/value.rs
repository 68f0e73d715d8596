//! # Loosely-Typed Arguments
//!
//! Invokers take their arguments as [`Value`]s: boxed `Any` values tagged with the
//! [`TypeKey`] of what they hold. The tag is what lets a failed conversion report
//! the actual runtime type, which `dyn Any` alone cannot name.

use crate::error::InvokeError;
use crate::types::TypeKey;
use std::any::Any;
use std::fmt;

/// A boxed argument or result of unknown static type.
pub struct Value {
    inner: Box<dyn Any + Send>,
    type_key: TypeKey,
}

impl Value {
    pub fn new<V: Any + Send>(value: V) -> Self {
        Self {
            inner: Box::new(value),
            type_key: TypeKey::of::<V>(),
        }
    }

    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    pub fn is<V: Any>(&self) -> bool {
        self.inner.is::<V>()
    }

    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.inner.downcast_ref::<V>()
    }

    /// Takes the value out if it is exactly a `V`; otherwise hands it back unchanged.
    pub fn downcast<V: Any>(self) -> Result<V, Value> {
        let type_key = self.type_key;
        match self.inner.downcast::<V>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Value { inner, type_key }),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_key)
            .finish_non_exhaustive()
    }
}

/// Converts the argument at `position` to the declared parameter type `P`.
///
/// Only an exact type match converts. There is no numeric widening and no
/// string parsing.
pub fn coerce<P: Any>(position: usize, value: Value) -> Result<P, InvokeError> {
    value
        .downcast::<P>()
        .map_err(|value| InvokeError::ArgumentConversion {
            position,
            expected: TypeKey::of::<P>(),
            actual: value.type_key(),
        })
}

/// Builds a `Vec<Value>` argument list.
///
/// ```rust
/// use ctor_provider::args;
///
/// let args = args![3.0_f64, String::from("origin")];
/// assert_eq!(args.len(), 2);
/// assert!(args[0].is::<f64>());
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::Value::new($value)),*]
    };
}
