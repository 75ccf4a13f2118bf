use core::fmt;
use core::num::NonZeroU32;

/// Defines a compact, stable handle type.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Handle>` to be pointer-optimized
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create a handle from a 0-based index by storing index+1.
            pub fn from_index(index: u32) -> Self {
                match NonZeroU32::new(index.wrapping_add(1)) {
                    Some(raw) => Self(raw),
                    None => panic!(concat!($tag, " index overflow")),
                }
            }

            /// Recover the 0-based index.
            pub fn index(self) -> u32 {
                self.0.get() - 1
            }

            /// The index as a `usize`, for arena lookups.
            pub fn slot(self) -> usize {
                self.index() as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $tag, self.index())
            }
        }
    };
}

define_id!(
    /// Handle of a transform application (a node in the hierarchy).
    NodeId,
    "node"
);

define_id!(
    /// Handle of a data artifact flowing between nodes.
    ArtifactId,
    "artifact"
);
