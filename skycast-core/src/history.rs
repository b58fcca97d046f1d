use std::{fs, path::PathBuf};

/// Maximum number of remembered city names.
pub const HISTORY_CAPACITY: usize = 5;

/// Bounded, deduplicated, most-recent-first list of looked-up city names.
///
/// Loaded once at construction and written through on every mutation.
/// Storage problems are never surfaced: a missing or unreadable file means
/// an empty history, and a failed write is logged and forgotten. History is
/// a convenience, not a correctness-critical feature.
#[derive(Debug)]
pub struct RecentSearches {
    path: PathBuf,
    items: Vec<String>,
}

impl RecentSearches {
    pub fn load(path: PathBuf) -> Self {
        let items = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str::<Vec<String>>(&contents).ok())
            .unwrap_or_default();

        Self { path, items }
    }

    /// Insert a city name at the front.
    ///
    /// An already-present name (case-sensitive exact match) moves to the
    /// front instead of duplicating; insertion past capacity evicts the
    /// oldest entry. The result is persisted before returning.
    pub fn record(&mut self, city: &str) {
        self.items.retain(|existing| existing != city);
        self.items.insert(0, city.to_string());
        self.items.truncate(HISTORY_CAPACITY);
        self.persist();
    }

    /// In-memory view, most-recent-first. No storage access.
    pub fn current(&self) -> &[String] {
        &self.items
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::debug!("could not create history directory: {e}");
            return;
        }

        match serde_json::to_string(&self.items) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::debug!("could not persist search history: {e}");
                }
            }
            Err(e) => tracing::debug!("could not serialize search history: {e}"),
        }
    }
}
