use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::scan::{self, ErrorPolicy};
use crate::store::Store;

/// Outcome of one scan run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Roots discovered in the scanned subtree.
    pub found: usize,
    /// Roots that were new to the registry.
    pub added: usize,
    /// Registry size after the merge.
    pub total: usize,
}

/// Scans `folder` for repository roots and merges them into the registry.
///
/// The walker and the store only meet here: discovered roots are merged into
/// the loaded set (existing entries keep their order, new ones are appended)
/// and the whole set is written back.
pub fn scan_folder(folder: &Path, store: &Store, policy: ErrorPolicy) -> Result<ScanSummary> {
    info!("Scanning {} for repositories", folder.display());
    let discovered = scan::find_repos(folder, policy)?;
    let found = discovered.len();

    let mut known = store.load()?;
    let added = known.merge(
        discovered
            .into_iter()
            .map(|path| path.display().to_string()),
    );
    store.save(&known)?;

    info!(found, added, total = known.len(), "Scan complete");
    Ok(ScanSummary {
        found,
        added,
        total: known.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_fake_repo(path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        fs::create_dir(path.join(".git"))?;
        Ok(())
    }

    #[test]
    fn test_scan_populates_empty_store() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let tree = temp_dir.path().join("code");
        create_fake_repo(&tree.join("proj1"))?;
        create_fake_repo(&tree.join("proj2"))?;

        let store = Store::open_at(temp_dir.path().join(".gitlocalstats"))?;
        let summary = scan_folder(&tree, &store, ErrorPolicy::Abort)?;

        assert_eq!(summary.found, 2);
        assert_eq!(summary.added, 2);
        assert_eq!(summary.total, 2);

        let mut saved: Vec<_> = store.load()?.iter().cloned().collect();
        saved.sort();
        assert_eq!(
            saved,
            vec![
                tree.join("proj1").display().to_string(),
                tree.join("proj2").display().to_string(),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_rescan_adds_nothing() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let tree = temp_dir.path().join("code");
        create_fake_repo(&tree.join("proj"))?;

        let store = Store::open_at(temp_dir.path().join(".gitlocalstats"))?;
        scan_folder(&tree, &store, ErrorPolicy::Abort)?;
        let before = store.load()?;

        let summary = scan_folder(&tree, &store, ErrorPolicy::Abort)?;
        assert_eq!(summary.found, 1);
        assert_eq!(summary.added, 0);
        assert_eq!(store.load()?, before);
        Ok(())
    }

    #[test]
    fn test_failed_scan_leaves_store_untouched() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = Store::open_at(temp_dir.path().join(".gitlocalstats"))?;

        let mut seeded = crate::pathset::PathSet::new();
        seeded.insert("/home/u/proj1".to_string());
        store.save(&seeded)?;

        let missing = temp_dir.path().join("gone");
        assert!(scan_folder(&missing, &store, ErrorPolicy::Abort).is_err());
        assert_eq!(store.load()?, seeded);
        Ok(())
    }
}
