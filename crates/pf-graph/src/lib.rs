//! pf-graph: graph construction and integrity checks for pipeforge.
//!
//! Provides:
//! - Incremental construction of a tree of transform applications via [`Graph::apply`]
//! - Unique `/`-delimited node names with a configurable stable-naming policy
//! - Producer-attribution checks as each application closes
//! - A one-shot forward-topological traversal for execution backends
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pf_graph::{ArtifactSet, ExecutionOrder, Graph, GraphResult, Transform, TransformKind};
//!
//! #[derive(Debug)]
//! struct Read;
//!
//! impl Transform for Read {
//!     fn kind(&self) -> TransformKind {
//!         TransformKind::Primitive
//!     }
//!
//!     fn expand(&self, graph: &mut Graph, _input: &ArtifactSet) -> GraphResult<ArtifactSet> {
//!         Ok(graph.create_artifact()?.into())
//!     }
//! }
//!
//! let mut graph = Graph::default();
//! graph.apply_root(Arc::new(Read)).unwrap();
//! graph.apply_root(Arc::new(Read)).unwrap();
//! assert!(graph.node_by_name("Read2").is_some());
//!
//! let mut order = ExecutionOrder::new();
//! graph.traverse(&mut order).unwrap();
//! assert_eq!(order.primitives().len(), 2);
//! ```

pub mod artifact;
pub mod builder;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod names;
pub mod node;
pub mod options;
pub mod order;
pub mod transform;
pub mod traverse;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use artifact::{Artifact, ArtifactSet};
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::Graph;
pub use names::{AllocatedName, NameAllocator};
pub use node::Node;
pub use options::{GraphOptions, OptionsError, StableNamePolicy};
pub use order::{ExecutionOrder, Step};
pub use pf_core::{ArtifactId, BoxError, NodeId, UserCodeError};
pub use transform::{DirectExecutor, Executor, Transform, TransformKind};
pub use traverse::GraphVisitor;
