//! Frame rendering: title frame and content frames.
//!
//! Every frame is normalized to the fixed canvas so the encoder's
//! dimension invariant holds across the whole sequence.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::imageops::FilterType;
use image::{GenericImageView, Rgb};
use imageproc::drawing::{draw_text_mut, text_size};
use rand::seq::SliceRandom;

use reelsmith_common::{Paths, ReelsmithError, ReelsmithResult, RenderDefaults};

/// Vertical offset of the title text.
const TITLE_TOP_Y: i32 = 75;

/// Vertical offset of the first description line.
const DESCRIPTION_TOP_Y: i32 = 245;

/// Text color for title and description. No outline or shadow is drawn, so
/// legibility against dark backgrounds is not guaranteed.
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Renders title and content frames for one content record.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    assets_dir: PathBuf,
    font_path: PathBuf,
    defaults: RenderDefaults,
}

impl FrameRenderer {
    pub fn new(paths: &Paths, defaults: RenderDefaults) -> Self {
        Self {
            assets_dir: paths.assets_dir.clone(),
            font_path: paths.font_path.clone(),
            defaults,
        }
    }

    /// Render the title frame: a random background with the title and the
    /// word-wrapped description drawn centered.
    pub fn render_title_frame(
        &self,
        title: &str,
        description: &str,
        output_path: &Path,
    ) -> ReelsmithResult<()> {
        let background_path = self.pick_background()?;
        tracing::info!(background = %background_path.display(), "Using background");

        let background = image::open(&background_path).map_err(|e| {
            ReelsmithError::render(format!(
                "Failed to load background {}: {e}",
                background_path.display()
            ))
        })?;
        let mut canvas = self.normalize(background).to_rgb8();

        let font = self.load_font()?;

        let title_scale = PxScale::from(self.defaults.title_font_size);
        let (title_w, _) = text_size(title_scale, &font, title);
        draw_text_mut(
            &mut canvas,
            TEXT_COLOR,
            centered_x(self.defaults.canvas_width, title_w),
            TITLE_TOP_Y,
            title_scale,
            &font,
            title,
        );

        let desc_scale = PxScale::from(self.defaults.description_font_size);
        for (index, line) in wrap_text(description, self.defaults.wrap_width)
            .iter()
            .enumerate()
        {
            let (line_w, _) = text_size(desc_scale, &font, line);
            draw_text_mut(
                &mut canvas,
                TEXT_COLOR,
                centered_x(self.defaults.canvas_width, line_w),
                description_line_y(index, self.defaults.description_font_size),
                desc_scale,
                &font,
                line,
            );
        }

        canvas.save(output_path).map_err(|e| {
            ReelsmithError::render(format!(
                "Failed to save title frame to {}: {e}",
                output_path.display()
            ))
        })?;
        tracing::info!(path = %output_path.display(), "Title frame written");
        Ok(())
    }

    /// Render one content frame: the source image normalized to the canvas.
    pub fn render_content_frame(
        &self,
        image_path: &Path,
        output_path: &Path,
    ) -> ReelsmithResult<()> {
        if !image_path.exists() {
            return Err(ReelsmithError::FileNotFound {
                path: image_path.to_path_buf(),
            });
        }

        let source = image::open(image_path).map_err(|e| {
            ReelsmithError::render(format!(
                "Failed to load source image {}: {e}",
                image_path.display()
            ))
        })?;

        self.normalize(source).to_rgb8().save(output_path).map_err(|e| {
            ReelsmithError::render(format!(
                "Failed to save content frame to {}: {e}",
                output_path.display()
            ))
        })?;
        tracing::debug!(
            source = %image_path.display(),
            path = %output_path.display(),
            "Content frame written"
        );
        Ok(())
    }

    /// Stretch-to-fit resize onto the canvas. Aspect ratio is intentionally
    /// not preserved; images already at canvas size pass through untouched.
    fn normalize(&self, img: image::DynamicImage) -> image::DynamicImage {
        let target = (self.defaults.canvas_width, self.defaults.canvas_height);
        if img.dimensions() == target {
            img
        } else {
            img.resize_exact(target.0, target.1, FilterType::Lanczos3)
        }
    }

    /// Pick a background uniformly at random from the assets directory.
    fn pick_background(&self) -> ReelsmithResult<PathBuf> {
        let backgrounds_dir = self.assets_dir.join("backgrounds");
        let entries = std::fs::read_dir(&backgrounds_dir).map_err(|e| {
            ReelsmithError::asset_missing(format!(
                "Cannot read backgrounds directory {}: {e}",
                backgrounds_dir.display()
            ))
        })?;

        let candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| has_image_extension(path))
            .collect();

        candidates
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| {
                ReelsmithError::asset_missing(format!(
                    "No background images in {}",
                    backgrounds_dir.display()
                ))
            })
    }

    fn load_font(&self) -> ReelsmithResult<FontVec> {
        let bytes = std::fs::read(&self.font_path).map_err(|e| {
            ReelsmithError::asset_missing(format!(
                "Cannot read font {}: {e}",
                self.font_path.display()
            ))
        })?;
        FontVec::try_from_vec(bytes).map_err(|e| {
            ReelsmithError::asset_missing(format!(
                "Invalid font {}: {e}",
                self.font_path.display()
            ))
        })
    }
}

/// Horizontal offset that centers text of width `text_w` on the canvas,
/// with floor division.
pub fn centered_x(canvas_w: u32, text_w: u32) -> i32 {
    (canvas_w as i32 - text_w as i32) / 2
}

/// Vertical offset of description line `index`: lines stack downward from
/// the top margin, advancing by `font_size + 10` per line.
pub fn description_line_y(index: usize, font_size: f32) -> i32 {
    DESCRIPTION_TOP_Y + index as i32 * (font_size as i32 + 10)
}

/// Greedy word-wrap at `width` characters per line. Words longer than the
/// width land on their own line, unbroken.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Whether a path carries one of the recognized background extensions.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use proptest::prelude::*;
    use reelsmith_common::Paths;

    fn test_renderer(root: &Path) -> FrameRenderer {
        let paths = Paths {
            assets_dir: root.join("assets"),
            work_dir: root.join("work"),
            font_path: root.join("assets").join("fonts").join("default.ttf"),
            queue_path: root.join("content.json"),
            ledger_path: root.join("completed.txt"),
        };
        FrameRenderer::new(&paths, RenderDefaults::default())
    }

    #[test]
    fn test_centered_x_floor_semantics() {
        assert_eq!(centered_x(1280, 400), 440);
        assert_eq!(centered_x(1280, 401), 439); // (879) / 2 floors
        assert_eq!(centered_x(100, 99), 0);
    }

    #[test]
    fn test_description_line_y_advances_by_font_size_plus_ten() {
        assert_eq!(description_line_y(0, 25.0), 245);
        assert_eq!(description_line_y(1, 25.0), 280);
        assert_eq!(description_line_y(2, 25.0), 315);
    }

    #[test]
    fn test_wrap_108_chars_into_two_lines_at_width_54() {
        // Five 17-char words plus one 18-char word: 53 + 1 + 54 = 108 chars.
        let description = format!(
            "{a} {b} {c} {d} {e} {f}",
            a = "a".repeat(17),
            b = "b".repeat(17),
            c = "c".repeat(17),
            d = "d".repeat(17),
            e = "e".repeat(17),
            f = "f".repeat(18),
        );
        assert_eq!(description.chars().count(), 108);

        let lines = wrap_text(&description, 54);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.chars().count() <= 54));
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        let long_word = "x".repeat(80);
        let lines = wrap_text(&format!("short {long_word} tail"), 54);
        assert_eq!(lines, vec!["short".to_string(), long_word, "tail".to_string()]);
    }

    #[test]
    fn test_content_frame_is_resized_to_canvas() {
        let dir = std::env::temp_dir().join("reelsmith_test_content_frame");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let source = dir.join("source.png");
        RgbImage::from_pixel(320, 200, Rgb([10, 20, 30]))
            .save(&source)
            .unwrap();

        let output = dir.join("frame_content_0.png");
        test_renderer(&dir)
            .render_content_frame(&source, &output)
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (1280, 720));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_content_frame_at_canvas_size_passes_through() {
        let dir = std::env::temp_dir().join("reelsmith_test_content_noop");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let source = dir.join("source.png");
        RgbImage::from_pixel(1280, 720, Rgb([200, 100, 50]))
            .save(&source)
            .unwrap();

        let output = dir.join("frame_content_0.png");
        test_renderer(&dir)
            .render_content_frame(&source, &output)
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (1280, 720));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_source_image_is_fatal() {
        let dir = std::env::temp_dir().join("reelsmith_test_missing_source");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let err = test_renderer(&dir)
            .render_content_frame(&dir.join("nope.jpg"), &dir.join("out.png"))
            .unwrap_err();
        assert!(matches!(err, ReelsmithError::FileNotFound { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_title_frame_without_backgrounds_is_asset_missing() {
        let dir = std::env::temp_dir().join("reelsmith_test_no_backgrounds");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("assets").join("backgrounds")).unwrap();

        let err = test_renderer(&dir)
            .render_title_frame("Title", "Description", &dir.join("frame_title.png"))
            .unwrap_err();
        assert!(matches!(err, ReelsmithError::AssetMissing { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_background_filter_recognizes_extensions() {
        assert!(has_image_extension(Path::new("bg.jpg")));
        assert!(has_image_extension(Path::new("bg.JPEG")));
        assert!(has_image_extension(Path::new("bg.png")));
        assert!(!has_image_extension(Path::new("bg.gif")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("noext")));
    }

    proptest! {
        #[test]
        fn prop_wrapped_lines_respect_width(words in proptest::collection::vec("[a-z]{1,12}", 1..40)) {
            let text = words.join(" ");
            for line in wrap_text(&text, 54) {
                prop_assert!(line.chars().count() <= 54);
                prop_assert!(!line.is_empty());
            }
        }

        #[test]
        fn prop_wrapping_preserves_words(words in proptest::collection::vec("[a-z]{1,12}", 1..40)) {
            let text = words.join(" ");
            let rejoined = wrap_text(&text, 54).join(" ");
            prop_assert_eq!(rejoined, text);
        }
    }
}
