//! Graph-construction and traversal error types.

use pf_core::UserCodeError;
use thiserror::Error;

/// Errors raised while building or traversing a graph.
///
/// Apart from [`GraphError::UserCode`] and [`GraphError::UnstableName`], every variant is a
/// structural defect in a transform or in the executor integration. None are retried.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A transform's validation or expansion failed. Propagated unchanged through nested
    /// apply-calls.
    #[error(transparent)]
    UserCode(#[from] UserCodeError),

    #[error(
        "Transform {full_name} does not have a stable unique name. \
         This will prevent reloading of pipelines."
    )]
    UnstableName { full_name: String },

    #[error(
        "Output {artifact} of primitive transform {transform} at {node} is registered \
         as being produced by a different transform: {producer}"
    )]
    PrimitiveOutputMismatch {
        node: String,
        transform: String,
        artifact: String,
        producer: String,
    },

    #[error(
        "Output {artifact} of composite transform {transform} at {node} is registered as \
         being produced by it, but the output of every composite transform should be \
         produced by a primitive transform contained therein"
    )]
    CompositeSelfProduced {
        node: String,
        transform: String,
        artifact: String,
    },

    #[error(
        "Output {artifact} of composite transform {transform} at {node} is registered as \
         being produced by {producer}, which is not a primitive transform"
    )]
    CompositeOutputNotPrimitive {
        node: String,
        transform: String,
        artifact: String,
        producer: String,
    },

    #[error("Cannot attribute {artifact} to {node}: only primitive transforms produce artifacts")]
    ProducerNotPrimitive { artifact: String, node: String },

    #[error("Primitive transform {transform} at {node} applied nested transforms")]
    PrimitiveWithChildren { node: String, transform: String },

    #[error("Artifact {artifact} is already produced by {existing}; cannot attribute it to {attempted}")]
    ArtifactReattributed {
        artifact: String,
        existing: String,
        attempted: String,
    },

    #[error("Inputs of {node} were already recorded")]
    InputsAlreadyRecorded { node: String },

    #[error("Scope mismatch: expected {expected} to be the current scope, found {actual}")]
    ScopeMismatch { expected: String, actual: String },

    #[error("Cannot pop the root scope")]
    ScopeUnderflow,

    #[error("{node} was not issued by this graph")]
    UnknownNode { node: String },

    #[error("{artifact} was not issued by this graph")]
    UnknownArtifact { artifact: String },

    #[error("Graph has already been traversed")]
    AlreadyTraversed,

    #[error("Cannot {action}: graph is frozen once traversal has started")]
    Frozen { action: String },

    #[error(
        "Internal error: traversal visited {visited} of {total} artifacts \
         (first missing: {first_missing})"
    )]
    IncompleteTraversal {
        visited: usize,
        total: usize,
        first_missing: String,
    },

    #[error("Artifact {artifact} is consumed by {consumer} before its producer {producer} is visited")]
    ConsumedBeforeProduced {
        artifact: String,
        consumer: String,
        producer: String,
    },

    #[error("Unknown transform: {transform}")]
    UnknownTransform { transform: String },

    #[error("Transform {transform} was applied {count} times")]
    TransformReused { transform: String, count: usize },
}

impl GraphError {
    /// Wrap an error raised by user code.
    pub fn user(cause: impl Into<pf_core::BoxError>) -> Self {
        GraphError::UserCode(UserCodeError::new(cause))
    }

    /// The user's original error, if this came from user code.
    pub fn user_cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            GraphError::UserCode(err) => Some(err.inner()),
            _ => None,
        }
    }

    /// True for defects in the tree itself, as opposed to user-code or naming failures.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            GraphError::UserCode(_) | GraphError::UnstableName { .. }
        )
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
