use std::slice;

/// Ordered, duplicate-free collection of repository root paths.
///
/// Entries compare as exact strings: two spellings of the same directory
/// (symlink vs. real path, trailing separator) are distinct entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    entries: Vec<String>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from lines already known to be de-duplicated,
    /// e.g. the contents of the registry store. Duplicates and empty
    /// lines are dropped defensively.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for line in lines {
            let line = line.into();
            if !line.is_empty() {
                set.insert(line);
            }
        }
        set
    }

    pub fn contains(&self, path: &str) -> bool {
        // Linear scan; registries hold tens to low thousands of entries.
        self.entries.iter().any(|e| e == path)
    }

    /// Appends `path` if it is not already present. Returns true if added.
    pub fn insert(&mut self, path: String) -> bool {
        if self.contains(&path) {
            false
        } else {
            self.entries.push(path);
            true
        }
    }

    /// Merges newly discovered paths into the set, in iteration order.
    ///
    /// Existing entries are never removed or reordered; genuinely new
    /// entries are appended after them. Returns how many were added.
    pub fn merge<I>(&mut self, discovered: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for path in discovered {
            if self.insert(path) {
                added += 1;
            }
        }
        added
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut set = PathSet::new();
        assert!(set.insert("/home/u/proj1".to_string()));
        assert!(!set.insert("/home/u/proj1".to_string()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_merge_preserves_existing_order() {
        let mut set = PathSet::from_lines(owned(&["/a", "/b", "/c"]));
        set.merge(owned(&["/d", "/b", "/e"]));

        assert_eq!(set.as_slice(), &["/a", "/b", "/c", "/d", "/e"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut set = PathSet::from_lines(owned(&["/a", "/b"]));
        let discovered = owned(&["/b", "/c"]);

        let first = set.merge(discovered.clone());
        let snapshot = set.clone();
        let second = set.merge(discovered);

        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(set, snapshot);
    }

    #[test]
    fn test_merge_counts_only_new_entries() {
        let mut set = PathSet::new();
        let added = set.merge(owned(&["/x", "/y", "/x"]));
        assert_eq!(added, 2);
        assert_eq!(set.as_slice(), &["/x", "/y"]);
    }

    #[test]
    fn test_from_lines_drops_empty_lines() {
        let set = PathSet::from_lines(owned(&["/a", "", "/b", ""]));
        assert_eq!(set.as_slice(), &["/a", "/b"]);
    }

    #[test]
    fn test_exact_string_membership() {
        let mut set = PathSet::new();
        set.insert("/home/u/proj".to_string());

        // No canonicalization: a trailing separator is a different entry.
        assert!(set.contains("/home/u/proj"));
        assert!(!set.contains("/home/u/proj/"));
    }
}
