use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::pathset::PathSet;

/// File name of the registry under the user's home directory.
const STORE_FILE_NAME: &str = ".gitlocalstats";

/// Newline-delimited registry of known repository roots, one path per line.
///
/// The file lives at a fixed per-user location and is created empty on first
/// access. There is no locking against concurrent writers from separate
/// process invocations; the last writer wins.
pub struct Store {
    store_path: PathBuf,
}

impl Store {
    /// Opens the registry at `<home>/.gitlocalstats`, creating it if absent.
    /// Failing to resolve the home directory or to create the file is fatal.
    pub fn open_default() -> Result<Self> {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Self::open_at(home.join(STORE_FILE_NAME))
    }

    /// Opens the registry at an explicit location. Used by tests and by
    /// callers that manage their own store placement.
    pub fn open_at<P: AsRef<Path>>(store_path: P) -> Result<Self> {
        let store = Self {
            store_path: store_path.as_ref().to_path_buf(),
        };
        store.ensure_exists()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    fn ensure_exists(&self) -> Result<()> {
        if self.store_path.exists() {
            return Ok(());
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            // Private registry file, owner read/write only.
            options.mode(0o600);
        }
        options
            .open(&self.store_path)
            .with_context(|| {
                format!("Failed to create registry file: {}", self.store_path.display())
            })?;
        Ok(())
    }

    /// Reads the registry back as an ordered PathSet of non-empty lines.
    pub fn load(&self) -> Result<PathSet> {
        let file = fs::File::open(&self.store_path)
            .with_context(|| {
                format!("Failed to open registry file: {}", self.store_path.display())
            })?;

        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| {
                format!("Failed to read registry file: {}", self.store_path.display())
            })?;
            lines.push(line);
        }

        Ok(PathSet::from_lines(lines))
    }

    /// Overwrites the registry with the given set, newline-joined. If the
    /// file went missing since open, it is recreated with the same private
    /// mode rather than the umask default.
    pub fn save(&self, paths: &PathSet) -> Result<()> {
        let content = paths.as_slice().join("\n");

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.store_path).with_context(|| {
            format!("Failed to open registry file: {}", self.store_path.display())
        })?;
        file.write_all(content.as_bytes()).with_context(|| {
            format!("Failed to write registry file: {}", self.store_path.display())
        })?;
        Ok(())
    }
}
