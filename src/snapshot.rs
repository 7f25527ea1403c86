use crate::theme::{flatten_with, FlatThemeTable, ThemeError, ThemeTree};
use arc_swap::ArcSwapOption;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

/// One immutable publication of the flattened table.
#[derive(Debug)]
pub struct Snapshot {
    version: u64,
    table: FlatThemeTable,
}

impl Snapshot {
    pub fn new(version: u64, table: FlatThemeTable) -> Self {
        Self { version, table }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn table(&self) -> &FlatThemeTable {
        &self.table
    }
}

/// Holds the latest published table. Readers grab one `Arc<Snapshot>` per
/// query; publishing swaps the pointer so nobody sees a half-built table.
#[derive(Debug, Default)]
pub struct ThemeProvider {
    current: ArcSwapOption<Snapshot>,
    next_version: AtomicU64,
    stale: AtomicBool,
}

impl ThemeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    pub fn publish(&self, table: FlatThemeTable) -> Arc<Snapshot> {
        let version = self.next_version.fetch_add(1, Ordering::AcqRel) + 1;
        let snapshot = Arc::new(Snapshot::new(version, table));
        // Concurrent publishers may finish out of order; the highest version wins.
        self.current.rcu(|current| match current {
            Some(current) if current.version() > version => Some(Arc::clone(current)),
            _ => Some(Arc::clone(&snapshot)),
        });
        self.stale.store(false, Ordering::Release);
        tracing::debug!(version, paths = snapshot.table().len(), "published theme snapshot");
        snapshot
    }

    /// Flattens `tree` and publishes it. On failure the last good snapshot
    /// stays in place and the provider remains stale.
    pub fn rebuild(&self, tree: &ThemeTree, callable_key: &str) -> Result<Arc<Snapshot>, ThemeError> {
        match flatten_with(tree, callable_key) {
            Ok(table) => Ok(self.publish(table)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    kept_version = self.current().map(|snapshot| snapshot.version()),
                    "theme rebuild rejected"
                );
                Err(err)
            }
        }
    }

    /// Marks the published table as out of date; the next query may rebuild.
    pub fn invalidate(&self) {
        self.stale.store(true, Ordering::Release);
        tracing::trace!("theme snapshot invalidated");
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }
}
