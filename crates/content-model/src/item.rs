//! Content records and the processing queue.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ledger::CompletedLedger;

/// One queued content record describing a video to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique item identifier. Also keys the per-item working directory.
    pub id: String,

    /// Video title, drawn onto the title frame.
    pub title: String,

    /// Video description, word-wrapped onto the title frame.
    pub description: String,

    /// Ordered source images; one content frame each, order is load-bearing.
    pub images: Vec<PathBuf>,

    /// Narration text fed to the speech synthesizer.
    pub audio_text: String,
}

/// The content queue (`content.json`): an ordered JSON array of items.
#[derive(Debug, Clone)]
pub struct ContentQueue {
    items: Vec<ContentItem>,
}

impl ContentQueue {
    /// Load the queue from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ContentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let items: Vec<ContentItem> =
            serde_json::from_str(&raw).map_err(|e| ContentError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self { items })
    }

    /// All items in queue order.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Items not yet acknowledged in the ledger, in queue order.
    pub fn pending<'a>(&'a self, ledger: &CompletedLedger) -> Vec<&'a ContentItem> {
        self.items
            .iter()
            .filter(|item| !ledger.contains(&item.id))
            .collect()
    }
}

/// Errors from loading content records.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"[
            {
                "id": "tip-001",
                "title": "Daily Tip",
                "description": "Stay hydrated",
                "images": ["a.jpg", "b.jpg"],
                "audio_text": "Drink water."
            },
            {
                "id": "tip-002",
                "title": "Another Tip",
                "description": "Sleep well",
                "images": ["c.jpg"],
                "audio_text": "Rest is important."
            }
        ]"#
    }

    #[test]
    fn test_item_deserialization() {
        let items: Vec<ContentItem> = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "tip-001");
        assert_eq!(items[0].images, vec![PathBuf::from("a.jpg"), "b.jpg".into()]);
        assert_eq!(items[1].audio_text, "Rest is important.");
    }

    #[test]
    fn test_queue_load_and_pending_filter() {
        let dir = std::env::temp_dir().join("reelsmith_test_queue");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let queue_path = dir.join("content.json");
        std::fs::write(&queue_path, sample_json()).unwrap();

        let mut ledger = CompletedLedger::open(dir.join("completed.txt")).unwrap();
        ledger.mark_completed("tip-001").unwrap();

        let queue = ContentQueue::load(&queue_path).unwrap();
        assert_eq!(queue.items().len(), 2);

        let pending = queue.pending(&ledger);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "tip-002");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_queue_load_reports_missing_file() {
        let missing = std::env::temp_dir().join("reelsmith_no_such_queue.json");
        let err = ContentQueue::load(&missing).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }
}
