//! Per-item working directory and the fixed artifact names inside it.

use std::path::{Path, PathBuf};

use reelsmith_common::{ReelsmithError, ReelsmithResult};

/// The working directory for one content item.
///
/// All intermediate artifacts of a run live here, under names fixed by the
/// pipeline contract. Two items never share a working set, so concurrent
/// runs over different items cannot clobber each other's files.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    dir: PathBuf,
}

impl WorkingSet {
    /// The working set for `item_id` under `work_dir`. Purely path math;
    /// nothing is created until [`WorkingSet::create`].
    ///
    /// The id must be a plain directory name: ids containing path
    /// separators or resolving to `.`/`..` are rejected, since `cleanup`
    /// deletes whatever the joined path points at.
    pub fn for_item(work_dir: &Path, item_id: &str) -> ReelsmithResult<Self> {
        validate_item_id(item_id)?;
        Ok(Self {
            dir: work_dir.join(item_id),
        })
    }

    /// Create the working directory, including missing parents.
    pub fn create(&self) -> ReelsmithResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn title_frame(&self) -> PathBuf {
        self.dir.join("frame_title.png")
    }

    pub fn content_frame(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_content_{index}.png"))
    }

    pub fn silent_video(&self) -> PathBuf {
        self.dir.join("temp_video.avi")
    }

    pub fn narration_audio(&self) -> PathBuf {
        self.dir.join("temp_audio.mp3")
    }

    pub fn final_video(&self) -> PathBuf {
        self.dir.join("final_video.mp4")
    }

    /// Remove every file in the working directory, then the directory
    /// itself.
    ///
    /// Fails open: a file that cannot be removed is logged and skipped, a
    /// missing directory is a no-op, and the return is always `Ok` so a
    /// cleanup hiccup never masks the run's real outcome.
    pub fn cleanup(&self) -> ReelsmithResult<()> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(()),
        };

        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if path.is_file() {
                if let Err(e) = std::fs::remove_file(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove work file");
                }
            }
        }

        // Succeeds only when everything above was removed; leftovers keep
        // the directory around for inspection.
        std::fs::remove_dir(&self.dir).ok();
        Ok(())
    }
}

/// Item ids double as directory names under the working root; anything
/// that could resolve elsewhere is rejected.
fn validate_item_id(item_id: &str) -> ReelsmithResult<()> {
    if item_id.is_empty()
        || item_id == "."
        || item_id == ".."
        || item_id.contains(['/', '\\'])
    {
        return Err(ReelsmithError::content(format!(
            "Item id '{item_id}' is not a valid directory name"
        )));
    }
    Ok(())
}
