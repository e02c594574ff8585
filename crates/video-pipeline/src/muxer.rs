//! Muxing of the silent video and the narration track.

use std::path::Path;

use reelsmith_common::{ReelsmithError, ReelsmithResult};

use crate::ffmpeg;

/// Mux `video_path` and `audio_path` into `output_path`.
///
/// The video stream is copied untouched; audio is re-encoded to AAC. The
/// output is clipped to the shorter of the two inputs so a narration that
/// outruns the slideshow never leaves a frozen final frame.
pub fn mux(video_path: &Path, audio_path: &Path, output_path: &Path) -> ReelsmithResult<()> {
    for input in [video_path, audio_path] {
        if !input.exists() {
            return Err(ReelsmithError::FileNotFound {
                path: input.to_path_buf(),
            });
        }
    }

    tracing::info!(
        video = %video_path.display(),
        audio = %audio_path.display(),
        output = %output_path.display(),
        "Muxing final video"
    );

    ffmpeg::run(&mux_args(video_path, audio_path, output_path)).map_err(ReelsmithError::mux)?;

    if !output_path.exists() {
        return Err(ReelsmithError::mux(format!(
            "ffmpeg reported success but {} was not produced",
            output_path.display()
        )));
    }

    if let Some(duration) = ffmpeg::probe_duration_secs(output_path) {
        tracing::info!(duration_secs = duration, "Final video ready");
    }
    Ok(())
}

fn mux_args(video_path: &Path, audio_path: &Path, output_path: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        video_path.display().to_string(),
        "-i".into(),
        audio_path.display().to_string(),
        "-c:v".into(),
        "copy".into(),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        "192k".into(),
        "-shortest".into(),
        output_path.display().to_string(),
    ]
}
