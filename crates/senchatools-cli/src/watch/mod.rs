//! Rebuild whenever a watched source file changes.
//!
//! notify delivers events on its own thread. The callback filters them and
//! forwards accepted changes over a channel to a single consumer loop, which
//! awaits each rebuild before looking at the next change.

mod filter;

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use notify::event::{CreateKind, RemoveKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use walkdir::WalkDir;

use crate::error::{CliError, Result};

pub use filter::{Verdict, WatchFilter};

/// An accepted file system change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
    Other(PathBuf),
}

impl FileChange {
    fn from_kind(kind: &EventKind, path: PathBuf) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            EventKind::Any | EventKind::Other => Some(FileChange::Other(path)),
            EventKind::Access(_) => None,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FileChange::Created(p)
            | FileChange::Modified(p)
            | FileChange::Removed(p)
            | FileChange::Other(p) => p,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FileChange::Created(_) => "created",
            FileChange::Modified(_) => "modified",
            FileChange::Removed(_) => "deleted",
            FileChange::Other(_) => "other",
        }
    }
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type={} in {}", self.kind(), self.path().display())
    }
}

/// Directories seen below the watch root.
///
/// A removed or renamed-away directory is gone by the time its event is
/// handled, so `is_dir()` alone cannot tell it apart from a file.
#[derive(Debug, Default)]
struct KnownDirs(HashSet<PathBuf>);

impl KnownDirs {
    fn scan(root: &Path) -> Self {
        Self(
            WalkDir::new(root)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_dir())
                .map(|entry| entry.into_path())
                .collect(),
        )
    }

    /// Whether the event on `path` concerns a directory.
    fn classify(&mut self, kind: &EventKind, path: &Path) -> bool {
        match kind {
            EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => {
                self.0.insert(path.to_path_buf());
                true
            }
            EventKind::Create(CreateKind::File) => {
                self.0.remove(path);
                false
            }
            EventKind::Remove(RemoveKind::File) => false,
            _ if path.is_dir() => {
                self.0.insert(path.to_path_buf());
                true
            }
            _ => self.0.contains(path),
        }
    }
}

/// Watches one directory tree and drives rebuilds.
#[derive(Debug, Clone)]
pub struct WatchSession {
    root: PathBuf,
    filter: WatchFilter,
}

impl WatchSession {
    pub fn new(root: impl Into<PathBuf>, filter: WatchFilter) -> Self {
        Self {
            root: root.into(),
            filter,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Subscribe to changes under the root.
    ///
    /// The returned watcher must be kept alive; dropping it ends the
    /// subscription and closes the channel.
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the root does not exist, `Watch` if notify fails.
    pub fn subscribe(&self) -> Result<(RecommendedWatcher, mpsc::Receiver<FileChange>)> {
        if !self.root.is_dir() {
            return Err(CliError::FileNotFound(self.root.clone()));
        }

        let (tx, rx) = mpsc::channel(100);
        let filter = self.filter.clone();
        let mut dirs = KnownDirs::scan(&self.root);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Watch error: {}", e);
                    return;
                }
            };

            for path in event.paths {
                let is_dir = dirs.classify(&event.kind, &path);
                let verdict = filter.check(&path, is_dir);
                match verdict {
                    Verdict::Accept => {}
                    Verdict::Directory => {
                        tracing::debug!("Ignored {:?}-event on {} because it is a directory", event.kind, path.display());
                        continue;
                    }
                    Verdict::NotIncluded => {
                        tracing::debug!(
                            "Ignored {:?}-event on {} because it does not match any of: {:?}",
                            event.kind,
                            path.display(),
                            filter.include_patterns()
                        );
                        continue;
                    }
                    Verdict::Excluded(pattern) => {
                        tracing::debug!(
                            "Ignored {:?}-event on {} because of the {:?} exclude pattern",
                            event.kind,
                            path.display(),
                            pattern
                        );
                        continue;
                    }
                }

                let Some(change) = FileChange::from_kind(&event.kind, path) else {
                    continue;
                };
                if tx.blocking_send(change).is_err() {
                    return;
                }
            }
        })?;

        watcher.watch(&self.root, RecursiveMode::Recursive)?;
        Ok((watcher, rx))
    }

    /// Watch until Ctrl+C, calling `rebuild` for each accepted change.
    pub async fn run<F, Fut>(&self, rebuild: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        self.run_until(
            async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!("Could not listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            },
            rebuild,
        )
        .await
    }

    /// Watch until `shutdown` completes.
    ///
    /// Changes that pile up while a rebuild is running are folded into the
    /// next rebuild. A failed rebuild is reported and watching continues.
    pub async fn run_until<S, F, Fut>(&self, shutdown: S, mut rebuild: F) -> Result<()>
    where
        S: Future<Output = ()>,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let (watcher, mut rx) = self.subscribe()?;
        tracing::info!("Watching {} for changes (Ctrl+C to stop)", self.root.display());

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Stopped watching {}", self.root.display());
                    break;
                }
                change = rx.recv() => {
                    let Some(change) = change else { break };
                    tracing::info!("Change of {} detected", change);

                    while let Ok(queued) = rx.try_recv() {
                        tracing::debug!("Folding change of {} into the same rebuild", queued);
                    }

                    if let Err(e) = rebuild().await {
                        crate::ui::error(&format!("Rebuild failed: {}", e));
                        tracing::debug!("Rebuild error: {:?}", e);
                    }
                }
            }
        }

        drop(watcher);
        Ok(())
    }
}
