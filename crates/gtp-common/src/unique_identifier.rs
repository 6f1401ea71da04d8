//! Run-scoped allocation of fresh identifiers.
//!
//! Desugarings introduce temporaries (`$__0`, `$__1`, ...) that must not
//! shadow anything the user wrote or anything generated earlier in the same
//! run. One generator is created per run and threaded through every transform
//! by `&mut`; there is no process-wide counter.

use rustc_hash::FxHashSet;

use crate::limits::DEFAULT_IDENTIFIER_PREFIX;

#[derive(Debug)]
pub struct UniqueIdentifierGenerator {
    prefix: String,
    next_id: u32,
    /// Names from the source tree plus every name handed out so far.
    taken: FxHashSet<String>,
}

impl Default for UniqueIdentifierGenerator {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_IDENTIFIER_PREFIX)
    }
}

impl UniqueIdentifierGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next_id: 0,
            taken: FxHashSet::default(),
        }
    }

    /// Mark `name` as in use so it is never generated.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    pub fn reserve_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taken.extend(names.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Allocate a name distinct from every reserved and previously generated name.
    pub fn generate_unique_identifier(&mut self) -> String {
        loop {
            let candidate = format!("{}{}", self.prefix, self.next_id);
            self.next_id += 1;
            if self.taken.insert(candidate.clone()) {
                tracing::trace!("[ids] allocated {candidate}");
                return candidate;
            }
        }
    }

    /// Number of candidates consumed so far, including skipped collisions.
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.next_id
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
#[path = "../tests/unique_identifier.rs"]
mod tests;
