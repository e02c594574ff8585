//! Silent video encoding from a rendered frame sequence.

use std::path::{Path, PathBuf};

use reelsmith_common::{ReelsmithError, ReelsmithResult};

use crate::ffmpeg;

/// Encodes an ordered frame sequence into a silent AVI via ffmpeg's concat
/// demuxer, holding each frame for a fixed number of seconds at 1 fps.
#[derive(Debug, Clone, Copy)]
pub struct VideoEncoder {
    seconds_per_frame: u32,
}

impl VideoEncoder {
    pub fn new(seconds_per_frame: u32) -> Self {
        Self { seconds_per_frame }
    }

    /// Nominal duration of the encoded video for `frame_count` frames.
    pub fn nominal_duration_secs(&self, frame_count: usize) -> u64 {
        self.seconds_per_frame as u64 * frame_count as u64
    }

    /// Encode `frame_paths`, in order, into `output_path`.
    ///
    /// Every frame must exist and share the first frame's dimensions; the
    /// check runs before ffmpeg is spawned so a bad sequence fails fast
    /// with the offending frame named.
    pub fn encode(&self, frame_paths: &[PathBuf], output_path: &Path) -> ReelsmithResult<()> {
        if frame_paths.is_empty() {
            return Err(ReelsmithError::encode("Frame sequence is empty"));
        }

        let expected = image::image_dimensions(&frame_paths[0]).map_err(|e| {
            ReelsmithError::encode(format!(
                "Cannot read frame {}: {e}",
                frame_paths[0].display()
            ))
        })?;
        for path in &frame_paths[1..] {
            let dims = image::image_dimensions(path).map_err(|e| {
                ReelsmithError::encode(format!("Cannot read frame {}: {e}", path.display()))
            })?;
            if dims != expected {
                return Err(ReelsmithError::encode(format!(
                    "Frame {} is {}x{}, expected {}x{}",
                    path.display(),
                    dims.0,
                    dims.1,
                    expected.0,
                    expected.1
                )));
            }
        }

        let list_path = output_path.with_extension("frames.txt");
        std::fs::write(&list_path, concat_manifest(frame_paths, self.seconds_per_frame))?;

        tracing::info!(
            frames = frame_paths.len(),
            duration_secs = self.nominal_duration_secs(frame_paths.len()),
            output = %output_path.display(),
            "Encoding silent video"
        );

        let args: Vec<String> = vec![
            "-y".into(),
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
            list_path.display().to_string(),
            "-r".into(),
            "1".into(),
            "-fps_mode".into(),
            "cfr".into(),
            "-c:v".into(),
            "mpeg4".into(),
            "-q:v".into(),
            "5".into(),
            "-an".into(),
            output_path.display().to_string(),
        ];
        ffmpeg::run(&args).map_err(ReelsmithError::encode)?;

        std::fs::remove_file(&list_path).ok();
        Ok(())
    }
}

/// Build the concat demuxer manifest for the frame sequence.
///
/// The demuxer ignores the duration of the final entry, so the last frame
/// is listed a second time to make its hold take effect.
pub fn concat_manifest(frame_paths: &[PathBuf], seconds_per_frame: u32) -> String {
    let mut manifest = String::from("ffconcat version 1.0\n");
    for path in frame_paths {
        manifest.push_str(&format!(
            "file '{}'\nduration {}\n",
            path.display(),
            seconds_per_frame
        ));
    }
    if let Some(last) = frame_paths.last() {
        manifest.push_str(&format!("file '{}'\n", last.display()));
    }
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_manifest_lists_every_frame_with_duration() {
        let frames = vec![
            PathBuf::from("/work/frame_title.png"),
            PathBuf::from("/work/frame_content_0.png"),
            PathBuf::from("/work/frame_content_1.png"),
        ];
        let manifest = concat_manifest(&frames, 5);

        assert!(manifest.starts_with("ffconcat version 1.0\n"));
        assert_eq!(manifest.matches("duration 5\n").count(), 3);
        for frame in &frames {
            assert!(manifest.contains(&format!("file '{}'", frame.display())));
        }
        // Trailing repeat of the last frame.
        assert!(manifest.ends_with("file '/work/frame_content_1.png'\n"));
        assert_eq!(
            manifest
                .matches("file '/work/frame_content_1.png'\n")
                .count(),
            2
        );
    }

    #[test]
    fn test_manifest_for_empty_sequence_has_no_entries() {
        assert_eq!(concat_manifest(&[], 5), "ffconcat version 1.0\n");
    }

    #[test]
    fn test_nominal_duration() {
        let encoder = VideoEncoder::new(5);
        assert_eq!(encoder.nominal_duration_secs(0), 0);
        assert_eq!(encoder.nominal_duration_secs(4), 20);
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let encoder = VideoEncoder::new(5);
        let err = encoder
            .encode(&[], Path::new("/tmp/out.avi"))
            .unwrap_err();
        assert!(matches!(err, ReelsmithError::Encode { .. }));
    }

    #[test]
    fn test_dimension_mismatch_is_rejected_before_encoding() {
        let dir = std::env::temp_dir().join("reelsmith_test_encoder_dims");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let a = dir.join("a.png");
        let b = dir.join("b.png");
        RgbImage::from_pixel(64, 48, Rgb([0, 0, 0])).save(&a).unwrap();
        RgbImage::from_pixel(64, 64, Rgb([0, 0, 0])).save(&b).unwrap();

        let err = VideoEncoder::new(5)
            .encode(&[a, b], &dir.join("out.avi"))
            .unwrap_err();
        assert!(matches!(err, ReelsmithError::Encode { .. }));
        assert!(err.to_string().contains("64x64"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unreadable_frame_is_rejected() {
        let encoder = VideoEncoder::new(5);
        let err = encoder
            .encode(
                &[PathBuf::from("/definitely/not/here.png")],
                Path::new("/tmp/out.avi"),
            )
            .unwrap_err();
        assert!(matches!(err, ReelsmithError::Encode { .. }));
    }
}
