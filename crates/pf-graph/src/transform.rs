//! Capability interfaces for transforms and the execution backend.

use std::fmt;
use std::sync::Arc;

use pf_core::BoxError;

use crate::artifact::ArtifactSet;
use crate::error::GraphResult;
use crate::graph::Graph;

/// Whether a transform authors its outputs itself or delegates to nested applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Leaf operation: every output is produced by this application.
    Primitive,
    /// Expands into child applications; authors none of its outputs.
    Composite,
}

/// A named operation consuming input artifacts and producing output artifacts.
///
/// Transforms are shared as `Arc<dyn Transform>`; two applications refer to the same
/// transform only if they hold the same allocation.
pub trait Transform: fmt::Debug + Send + Sync {
    fn kind(&self) -> TransformKind;

    /// Local name used when `apply` is not given one.
    ///
    /// Defaults to the implementing type's name without module path or generics.
    fn default_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_owned()
    }

    /// Reject malformed configuration before anything is expanded.
    fn validate(&self, _input: &ArtifactSet) -> Result<(), BoxError> {
        Ok(())
    }

    /// Produce this transform's output.
    ///
    /// Primitive transforms create their outputs with [`Graph::create_artifact`].
    /// Composite transforms call [`Graph::apply`] for each child and return what the
    /// children produced.
    fn expand(&self, graph: &mut Graph, input: &ArtifactSet) -> GraphResult<ArtifactSet>;
}

/// Strip the module path and generic arguments from a type name.
///
/// `my_app::words::Count<u64>` becomes `Count`.
pub fn short_type_name(full: &str) -> &str {
    let base = match full.find('<') {
        Some(end) => &full[..end],
        None => full,
    };
    match base.rfind("::") {
        Some(start) => &base[start + 2..],
        None => base,
    }
}

/// True if both handles point at the same transform instance.
pub fn same_transform(a: &Arc<dyn Transform>, b: &Arc<dyn Transform>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// The execution backend's apply hook.
///
/// Called synchronously once per apply-call, with the new node already open as the
/// current scope. Composite expansion recurses into [`Graph::apply`] through the graph
/// handed in here.
pub trait Executor: Send + Sync {
    fn apply(
        &self,
        graph: &mut Graph,
        transform: &Arc<dyn Transform>,
        input: &ArtifactSet,
    ) -> GraphResult<ArtifactSet>;
}

/// Executor that expands every transform in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectExecutor;

impl Executor for DirectExecutor {
    fn apply(
        &self,
        graph: &mut Graph,
        transform: &Arc<dyn Transform>,
        input: &ArtifactSet,
    ) -> GraphResult<ArtifactSet> {
        transform.expand(graph, input)
    }
}
