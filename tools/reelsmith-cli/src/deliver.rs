//! Delivery boundary for finished videos.

use std::path::{Path, PathBuf};

use reelsmith_common::{ReelsmithError, ReelsmithResult};

/// A destination for a finished video.
///
/// Returns `Ok(true)` when the deliverable was accepted and the item may be
/// marked completed, `Ok(false)` when the destination declined it without
/// anything being wrong (the item stays pending for a later run).
pub trait Deliverer {
    fn name(&self) -> &str;

    fn deliver(
        &self,
        video_path: &Path,
        title: &str,
        description: &str,
        thumbnail_path: &Path,
    ) -> ReelsmithResult<bool>;
}

/// Delivers by copying the video and thumbnail into a local directory,
/// alongside a small metadata file.
pub struct DirectoryDeliverer {
    dir: PathBuf,
}

impl DirectoryDeliverer {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl Deliverer for DirectoryDeliverer {
    fn name(&self) -> &str {
        "directory"
    }

    fn deliver(
        &self,
        video_path: &Path,
        title: &str,
        description: &str,
        thumbnail_path: &Path,
    ) -> ReelsmithResult<bool> {
        std::fs::create_dir_all(&self.dir)?;

        let stem = sanitize_file_stem(title);
        std::fs::copy(video_path, self.dir.join(format!("{stem}.mp4")))?;
        if thumbnail_path.exists() {
            std::fs::copy(thumbnail_path, self.dir.join(format!("{stem}.png")))?;
        }

        let metadata = serde_json::json!({
            "title": title,
            "description": description,
        });
        let json = serde_json::to_string_pretty(&metadata)
            .map_err(|e| ReelsmithError::content(format!("Failed to encode metadata: {e}")))?;
        std::fs::write(self.dir.join(format!("{stem}.json")), json)?;

        tracing::info!(dir = %self.dir.display(), title = title, "Delivered video");
        Ok(true)
    }
}

/// Replace characters that are unsafe in file names, collapsing whitespace
/// runs to single underscores.
fn sanitize_file_stem(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_stem("Plain Title"), "Plain_Title");
        assert_eq!(
            sanitize_file_stem("Ten Facts - August 2026"),
            "Ten_Facts_-_August_2026"
        );
        assert_eq!(sanitize_file_stem("a/b\\c:d"), "a_b_c_d");
    }

    #[test]
    fn test_directory_delivery_copies_artifacts() {
        let root = std::env::temp_dir().join("reelsmith_test_delivery");
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();

        let video = root.join("final_video.mp4");
        let thumbnail = root.join("frame_title.png");
        std::fs::write(&video, b"mp4").unwrap();
        std::fs::write(&thumbnail, b"png").unwrap();

        let out_dir = root.join("delivered");
        let accepted = DirectoryDeliverer::new(out_dir.clone())
            .deliver(&video, "My Video - August 2026", "Description", &thumbnail)
            .unwrap();

        assert!(accepted);
        assert!(out_dir.join("My_Video_-_August_2026.mp4").exists());
        assert!(out_dir.join("My_Video_-_August_2026.png").exists());
        assert!(out_dir.join("My_Video_-_August_2026.json").exists());

        std::fs::remove_dir_all(&root).ok();
    }
}
