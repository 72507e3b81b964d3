use anyhow::Result;
use crossbeam_channel::Sender;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::warn;

/// Directory name marking its parent as a repository root.
pub const MARKER_DIR_NAME: &str = ".git";

/// Directory names never descended into, regardless of content.
const DENYLIST: [&str; 2] = ["vendor", "node_modules"];

/// What to do when a directory cannot be listed mid-traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail the entire scan on the first unreadable directory.
    #[default]
    Abort,
    /// Log the unreadable subtree and keep scanning the rest.
    Skip,
}

#[derive(Debug, Error)]
#[error("Failed to read directory {}", path.display())]
pub struct ReadDirError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug)]
enum ScanEvent {
    RepoDiscovered(PathBuf),
    ReadFailed(ReadDirError),
}

/// Finds every repository root in the subtree under `base`, traversing
/// directories concurrently. Each root appears exactly once in the result;
/// the order is unspecified.
///
/// Every directory level is one task on the rayon pool, so the walk fans out
/// to all subdirectories at once while staying bounded by the pool size. The
/// scope joins only when every spawned task at every depth has finished;
/// discovered roots are drained from the channel after that join, once all
/// senders are gone.
pub fn find_repos<P: AsRef<Path>>(base: P, policy: ErrorPolicy) -> Result<Vec<PathBuf>> {
    // Normalize away a trailing separator so emitted roots are clean.
    let base = base.as_ref().components().as_path().to_path_buf();

    let (tx, rx) = crossbeam_channel::unbounded();
    let cancelled = AtomicBool::new(false);

    rayon::scope(|scope| {
        walk_dir(scope, base, tx, policy, &cancelled);
    });

    let mut repos = Vec::new();
    for event in rx {
        match event {
            ScanEvent::RepoDiscovered(path) => repos.push(path),
            ScanEvent::ReadFailed(err) => match policy {
                ErrorPolicy::Abort => return Err(err.into()),
                ErrorPolicy::Skip => warn!("Skipping unreadable directory: {err}"),
            },
        }
    }

    Ok(repos)
}

/// Handles one directory level: reports the parent as a repository root if a
/// `.git` child is present, and spawns a task per remaining non-denylisted
/// child directory. Spawning registers the task with the scope before it
/// runs, so the global join cannot complete ahead of work created here.
fn walk_dir<'s>(
    scope: &rayon::Scope<'s>,
    dir: PathBuf,
    tx: Sender<ScanEvent>,
    policy: ErrorPolicy,
    cancelled: &'s AtomicBool,
) {
    if cancelled.load(Ordering::Relaxed) {
        return;
    }

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(source) => {
            report_failure(&tx, ReadDirError { path: dir, source }, policy, cancelled);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let err = ReadDirError { path: dir.clone(), source };
                if report_failure(&tx, err, policy, cancelled) {
                    return;
                }
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(source) => {
                let err = ReadDirError { path: entry.path(), source };
                if report_failure(&tx, err, policy, cancelled) {
                    return;
                }
                continue;
            }
        };
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name();
        if name == MARKER_DIR_NAME {
            // The marker's parent is the repository root; the marker
            // directory itself is never descended into.
            let _ = tx.send(ScanEvent::RepoDiscovered(dir.clone()));
        } else if !DENYLIST.iter().any(|denied| name == *denied) {
            let child = entry.path();
            let tx = tx.clone();
            scope.spawn(move |scope| walk_dir(scope, child, tx, policy, cancelled));
        }
    }
}

/// Delivers a read failure to the consumer. Returns true when the walk
/// should stop descending (abort policy); the cancel flag short-circuits
/// tasks that are already queued.
fn report_failure(
    tx: &Sender<ScanEvent>,
    err: ReadDirError,
    policy: ErrorPolicy,
    cancelled: &AtomicBool,
) -> bool {
    let _ = tx.send(ScanEvent::ReadFailed(err));
    match policy {
        ErrorPolicy::Abort => {
            cancelled.store(true, Ordering::Relaxed);
            true
        }
        ErrorPolicy::Skip => false,
    }
}
