//! # Type Identity
//!
//! [`TypeKey`] is the runtime descriptor used for both target types and parameter
//! types. [`Signature`] is the ordered parameter list that identifies one
//! constructor overload.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a type, plus its name for diagnostics.
///
/// Two keys are equal exactly when their `TypeId`s are equal. The name never
/// takes part in comparisons.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified name, e.g. `alloc::string::String`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name with module paths stripped, e.g. `Vec<String>` for
    /// `alloc::vec::Vec<alloc::string::String>`.
    pub fn short_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut segment = String::new();
        for ch in self.name.chars() {
            match ch {
                ':' => segment.clear(),
                c if c.is_alphanumeric() || c == '_' => segment.push(c),
                other => {
                    out.push_str(&segment);
                    segment.clear();
                    out.push(other);
                }
            }
        }
        out.push_str(&segment);
        out
    }

    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Ordered parameter types of a constructor. Order matters and length is the arity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(Vec<TypeKey>);

impl Signature {
    pub fn new(params: Vec<TypeKey>) -> Self {
        Self(params)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Same as [`arity`](Self::arity), paired with [`is_empty`](Self::is_empty).
    pub fn len(&self) -> usize {
        self.arity()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&TypeKey> {
        self.0.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeKey> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TypeKey] {
        &self.0
    }
}

impl From<Vec<TypeKey>> for Signature {
    fn from(params: Vec<TypeKey>) -> Self {
        Self(params)
    }
}

impl FromIterator<TypeKey> for Signature {
    fn from_iter<I: IntoIterator<Item = TypeKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = &'a TypeKey;
    type IntoIter = std::slice::Iter<'a, TypeKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}")?;
        }
        f.write_str(")")
    }
}

/// Builds a [`Signature`] from a list of types.
///
/// ```rust
/// use ctor_provider::{signature, TypeKey};
///
/// let sig = signature![f64, String];
/// assert_eq!(sig.arity(), 2);
/// assert_eq!(sig.get(1), Some(&TypeKey::of::<String>()));
/// assert_eq!(sig.to_string(), "(f64, String)");
/// ```
#[macro_export]
macro_rules! signature {
    ($($ty:ty),* $(,)?) => {
        $crate::Signature::new(vec![$($crate::TypeKey::of::<$ty>()),*])
    };
}
