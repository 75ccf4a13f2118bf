//! Fully-qualified name allocation.

use std::collections::HashSet;

/// A name issued by [`NameAllocator::allocate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedName {
    pub full_name: String,
    /// True if the requested name was taken and a numeric suffix was applied.
    pub disambiguated: bool,
}

/// Issues fully-qualified names that never repeat within one graph.
#[derive(Debug, Default, Clone)]
pub struct NameAllocator {
    used: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a unique name for `local` under `prefix`.
    ///
    /// Taken names are retried as `local2`, `local3`, ... The returned name is registered.
    pub fn allocate(&mut self, prefix: &str, local: &str) -> AllocatedName {
        let mut suffix = 2_u64;
        let mut candidate = build_name(prefix, local);
        let mut disambiguated = false;
        while self.used.contains(&candidate) {
            candidate = build_name(prefix, &format!("{local}{suffix}"));
            suffix += 1;
            disambiguated = true;
        }
        self.used.insert(candidate.clone());
        AllocatedName {
            full_name: candidate,
            disambiguated,
        }
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.used.contains(full_name)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// Join a `/`-delimited prefix and a local name.
pub fn build_name(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_owned()
    } else {
        format!("{prefix}/{local}")
    }
}
