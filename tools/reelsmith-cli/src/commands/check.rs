//! Check external tools and assets.

use std::path::Path;

use reelsmith_common::AppConfig;
use reelsmith_content_model::ContentQueue;
use reelsmith_video_pipeline::{ffmpeg, frames};

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    println!("Reelsmith System Check");
    println!("{}", "=".repeat(50));

    let mut all_ok = true;

    // External tools
    if ffmpeg::command_exists("ffmpeg") {
        println!("[OK] ffmpeg found on PATH");
    } else {
        println!("[FAIL] ffmpeg not found; encoding and muxing will fail");
        all_ok = false;
    }
    if ffmpeg::command_exists("ffprobe") {
        println!("[OK] ffprobe found on PATH");
    } else {
        println!("[WARN] ffprobe not found; duration probing is disabled");
    }

    // Font
    if config.paths.font_path.exists() {
        println!("[OK] Font: {}", config.paths.font_path.display());
    } else {
        println!(
            "[FAIL] Font missing: {} (run 'reelsmith init' and install one)",
            config.paths.font_path.display()
        );
        all_ok = false;
    }

    // Backgrounds
    let backgrounds_dir = config.paths.assets_dir.join("backgrounds");
    match count_backgrounds(&backgrounds_dir) {
        Some(count) if count > 0 => {
            println!(
                "[OK] Backgrounds: {count} usable images in {}",
                backgrounds_dir.display()
            );
        }
        Some(_) => {
            println!(
                "[FAIL] No usable background images (jpg/jpeg/png) in {}",
                backgrounds_dir.display()
            );
            all_ok = false;
        }
        None => {
            println!(
                "[FAIL] Backgrounds directory missing: {}",
                backgrounds_dir.display()
            );
            all_ok = false;
        }
    }

    // Queue
    match ContentQueue::load(&config.paths.queue_path) {
        Ok(queue) => println!("[OK] Queue: {} items", queue.items().len()),
        Err(e) => {
            println!("[WARN] Queue not loadable: {e}");
        }
    }

    println!();
    if all_ok {
        println!("All required pieces are in place. Reelsmith is ready.");
    } else {
        println!("Some required pieces are missing. See above for fixes.");
    }
    Ok(())
}

/// Count files the renderer would actually accept as backgrounds; `None`
/// when the directory is unreadable.
fn count_backgrounds(dir: &Path) -> Option<usize> {
    let entries = std::fs::read_dir(dir).ok()?;
    Some(
        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| frames::has_image_extension(&entry.path()))
            .count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_backgrounds_ignores_non_image_files() {
        let dir = std::env::temp_dir().join("reelsmith_test_check_backgrounds");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        std::fs::write(dir.join("notes.txt"), b"not an image").unwrap();
        std::fs::write(dir.join("bg.png"), b"png").unwrap();
        std::fs::write(dir.join("bg.JPG"), b"jpg").unwrap();

        assert_eq!(count_backgrounds(&dir), Some(2));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_count_backgrounds_for_missing_directory_is_none() {
        let dir = std::env::temp_dir().join("reelsmith_test_check_no_dir");
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(count_backgrounds(&dir), None);
    }
}
