//! # Constructor Provider
//!
//! Resolves a constructor by exact signature and hands back an [`Invoker`] for it.
//!
//! Resolution rules:
//!
//! - Only public constructors of the exact target type are candidates.
//! - A candidate matches when its parameter types equal the requested signature
//!   position by position. Nothing is widened and there is no closest match.
//! - Exactly one match yields an invoker. Zero matches is
//!   [`ResolveError::ConstructorNotFound`]; more than one is
//!   [`ResolveError::AmbiguousConstructor`].
//!
//! The provider keeps no state between calls. Every call resolves again and
//! returns a fresh invoker, so callers that construct the same type repeatedly
//! should keep the invoker (or cache it by `(target, signature)` themselves).

use crate::error::ResolveError;
use crate::invoker::Invoker;
use crate::registry::{ConstructorInfo, TypeRegistry};
use crate::types::{Signature, TypeKey};
use crate::value::Value;
use std::any::Any;
use tracing::{debug, warn};

/// Produces invokers for constructors identified by their parameter signature.
pub trait ConstructorProvider {
    /// Resolves the public constructor of `T` whose parameters are exactly `signature`.
    fn get_invoker<T: Any>(&self, signature: &Signature) -> Result<Invoker<T>, ResolveError>;

    /// Same as [`get_invoker`](Self::get_invoker) for a target known only at runtime.
    /// The invoker returns the new instance boxed in a [`Value`].
    fn get_dynamic_invoker(
        &self,
        target: TypeKey,
        signature: &Signature,
    ) -> Result<Invoker<Value>, ResolveError>;
}

/// [`ConstructorProvider`] backed by a [`TypeRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryProvider<R> {
    registry: R,
}

impl<R: TypeRegistry> RegistryProvider<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Finds the single public constructor of `target` with exactly `signature`.
    pub fn resolve(
        &self,
        target: &TypeKey,
        signature: &Signature,
    ) -> Result<&ConstructorInfo, ResolveError> {
        let mut matches = self
            .registry
            .constructors_of(target)
            .iter()
            .filter(|info| info.is_public())
            // Other `TypeRegistry` implementations may return entries of another target.
            .filter(|info| info.target() == target && info.signature() == signature);

        match (matches.next(), matches.next()) {
            (Some(info), None) => {
                debug!(
                    target_type = %target,
                    %signature,
                    label = info.label(),
                    "Resolved constructor"
                );
                Ok(info)
            }
            (None, _) => {
                warn!(target_type = %target, %signature, "No matching constructor");
                Err(ResolveError::ConstructorNotFound {
                    target: *target,
                    signature: signature.clone(),
                })
            }
            (Some(_), Some(_)) => {
                let candidates = 2 + matches.count();
                warn!(target_type = %target, %signature, candidates, "Ambiguous constructor");
                Err(ResolveError::AmbiguousConstructor {
                    target: *target,
                    signature: signature.clone(),
                    candidates,
                })
            }
        }
    }
}

impl<R: TypeRegistry> ConstructorProvider for RegistryProvider<R> {
    fn get_invoker<T: Any>(&self, signature: &Signature) -> Result<Invoker<T>, ResolveError> {
        let target = TypeKey::of::<T>();
        let info = self.resolve(&target, signature)?;
        let invoke = info
            .typed_invoke_fn::<T>()
            .ok_or_else(|| ResolveError::ConstructorNotFound {
                target,
                signature: signature.clone(),
            })?;
        Ok(Invoker::new(target, info.signature().clone(), invoke))
    }

    fn get_dynamic_invoker(
        &self,
        target: TypeKey,
        signature: &Signature,
    ) -> Result<Invoker<Value>, ResolveError> {
        let info = self.resolve(&target, signature)?;
        Ok(Invoker::new(
            target,
            info.signature().clone(),
            info.dynamic_invoke_fn(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvokeError;
    use crate::registry::ConstructorRegistry;
    use crate::{args, signature};

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: f64,
        y: f64,
    }

    fn provider() -> RegistryProvider<ConstructorRegistry> {
        let mut registry = ConstructorRegistry::new();
        registry
            .register("Point::new", |x: f64, y: f64| Point { x, y })
            .register("Point::on_x_axis", |x: f64| Point { x, y: 0.0 })
            .register_private("Point::origin", || Point { x: 0.0, y: 0.0 });
        RegistryProvider::new(registry)
    }

    #[test]
    fn test_resolve_exact_signature() {
        let provider = provider();
        let info = provider
            .resolve(&TypeKey::of::<Point>(), &signature![f64])
            .unwrap();
        assert_eq!(info.label(), "Point::on_x_axis");
    }

    #[test]
    fn test_no_widening_during_resolution() {
        let err = provider()
            .get_invoker::<Point>(&signature![f32, f32])
            .unwrap_err();
        assert!(matches!(err, ResolveError::ConstructorNotFound { .. }));
        assert_eq!(err.signature(), &signature![f32, f32]);
    }

    #[test]
    fn test_private_constructor_is_not_resolved() {
        let err = provider()
            .get_invoker::<Point>(&Signature::empty())
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::ConstructorNotFound {
                target: TypeKey::of::<Point>(),
                signature: Signature::empty(),
            }
        );
    }

    #[test]
    fn test_duplicate_signature_is_ambiguous() {
        let mut registry = ConstructorRegistry::new();
        registry
            .register("Point::new", |x: f64, y: f64| Point { x, y })
            .register("Point::swapped", |y: f64, x: f64| Point { x, y })
            .register("Point::mirrored", |x: f64, y: f64| Point { x: -x, y: -y });
        let provider = RegistryProvider::new(registry);

        let err = provider
            .get_invoker::<Point>(&signature![f64, f64])
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::AmbiguousConstructor {
                target: TypeKey::of::<Point>(),
                signature: signature![f64, f64],
                candidates: 3,
            }
        );
    }

    #[test]
    fn test_dynamic_invoker_boxes_result() {
        let invoker = provider()
            .get_dynamic_invoker(TypeKey::of::<Point>(), &signature![f64, f64])
            .unwrap();
        let value = invoker.invoke(args![1.0_f64, 2.0_f64]).unwrap();
        assert_eq!(value.type_key(), TypeKey::of::<Point>());
        assert_eq!(value.downcast::<Point>().unwrap(), Point { x: 1.0, y: 2.0 });
    }

    #[test]
    fn test_dynamic_invoker_downcast_checks_result_type() {
        let provider = provider();
        let sig = signature![f64];

        let typed = provider
            .get_dynamic_invoker(TypeKey::of::<Point>(), &sig)
            .unwrap()
            .downcast::<Point>();
        assert_eq!(typed.invoke(args![4.0_f64]).unwrap(), Point { x: 4.0, y: 0.0 });

        let wrong = provider
            .get_dynamic_invoker(TypeKey::of::<Point>(), &sig)
            .unwrap()
            .downcast::<String>();
        assert_eq!(
            wrong.invoke(args![4.0_f64]).unwrap_err(),
            InvokeError::ResultType {
                expected: TypeKey::of::<String>(),
                actual: TypeKey::of::<Point>(),
            }
        );
    }
}
