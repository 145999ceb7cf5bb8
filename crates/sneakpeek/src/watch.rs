use anyhow::{Context, Result};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches a deck file for changes on a background thread.
///
/// The parent directory is watched rather than the file itself, since many
/// editors save by writing a new file and renaming it over the old one.
pub struct DeckWatcher {
    path: PathBuf,
    rx: Receiver<DebounceEventResult>,
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl DeckWatcher {
    /// Start watching. `wake` runs on the watcher thread after each batch of
    /// events, so the UI can schedule a repaint.
    pub fn new(path: &Path, wake: impl Fn() + Send + 'static) -> Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(DEBOUNCE, move |res: DebounceEventResult| {
            if tx.send(res).is_ok() {
                wake();
            }
        })
        .context("Failed to start file watcher")?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        tracing::debug!(path = %path.display(), "watching deck");

        Ok(Self {
            path,
            rx,
            _debouncer: debouncer,
        })
    }

    /// Drain pending events; true if any of them touched the deck file.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while let Ok(res) = self.rx.try_recv() {
            match res {
                Ok(events) => {
                    changed |= events.iter().any(|e| e.path == self.path);
                }
                Err(e) => tracing::warn!("file watcher error: {e}"),
            }
        }
        changed
    }
}
