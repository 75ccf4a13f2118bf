//! pf-core: stable foundation for pipeforge.
//!
//! Contains:
//! - ids (compact handles for nodes and artifacts of one graph instance)
//! - error (the user-code error carried through graph construction)

pub mod error;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use error::{BoxError, UserCodeError};
pub use ids::*;
