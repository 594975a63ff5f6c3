//! Case-insensitive duplicate detection on catalog file names.
//!
//! The reconciler never reads shared state: callers hand it an explicit
//! snapshot of the keys already in the catalog, and it remembers every key
//! it has admitted since, so duplicates inside one batch are caught too.

use std::collections::HashSet;

/// Normalizes a file name into its uniqueness key.
pub fn normalize_key(file_name: &str) -> String {
    file_name.trim().to_lowercase()
}

/// Set of normalized keys present in the catalog at decision time.
#[derive(Debug, Clone, Default)]
pub struct KeySnapshot {
    keys: HashSet<String>,
}

impl KeySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.keys.contains(&normalize_key(file_name))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeySnapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(|k| normalize_key(k.as_ref())).collect(),
        }
    }
}

/// Outcome of checking one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Duplicate,
}

#[derive(Debug)]
pub struct Reconciler {
    existing: KeySnapshot,
    accepted: HashSet<String>,
}

impl Reconciler {
    pub fn new(existing: KeySnapshot) -> Self {
        Self {
            existing,
            accepted: HashSet::new(),
        }
    }

    /// Checks `file_name` against the snapshot and everything admitted so
    /// far, recording it when accepted.
    pub fn admit(&mut self, file_name: &str) -> Admission {
        let key = normalize_key(file_name);
        if self.existing.keys.contains(&key) || !self.accepted.insert(key) {
            Admission::Duplicate
        } else {
            Admission::Accepted
        }
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}
