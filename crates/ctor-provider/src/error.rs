//! # Provider Errors
//!
//! Errors are split by the moment they can happen. A [`ResolveError`] comes out of
//! [`ConstructorProvider::get_invoker`](crate::ConstructorProvider::get_invoker) and
//! means no invoker was built. An [`InvokeError`] comes out of
//! [`Invoker::invoke`](crate::Invoker::invoke) and means no instance was built.

use crate::types::{Signature, TypeKey};

/// Constructor lookup failed. Raised while building an invoker, never deferred to a call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("No public constructor of {target} matches {signature}")]
    ConstructorNotFound { target: TypeKey, signature: Signature },

    /// More than one public constructor has exactly this signature.
    /// Treated as a lookup failure rather than picking one of them.
    #[error("{candidates} public constructors of {target} match {signature}")]
    AmbiguousConstructor {
        target: TypeKey,
        signature: Signature,
        candidates: usize,
    },
}

impl ResolveError {
    pub fn target(&self) -> &TypeKey {
        match self {
            ResolveError::ConstructorNotFound { target, .. }
            | ResolveError::AmbiguousConstructor { target, .. } => target,
        }
    }

    pub fn signature(&self) -> &Signature {
        match self {
            ResolveError::ConstructorNotFound { signature, .. }
            | ResolveError::AmbiguousConstructor { signature, .. } => signature,
        }
    }
}

/// Invocation failed before the constructor ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    #[error("Expected {expected} arguments, got {actual}")]
    InvocationArityMismatch { expected: usize, actual: usize },

    #[error("Argument {position}: expected {expected}, got {actual}")]
    ArgumentConversion {
        position: usize,
        expected: TypeKey,
        actual: TypeKey,
    },

    /// A dynamic invoker produced a value of a different type than the caller asked for.
    #[error("Constructed {actual}, expected {expected}")]
    ResultType { expected: TypeKey, actual: TypeKey },
}
