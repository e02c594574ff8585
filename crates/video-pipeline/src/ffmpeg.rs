//! Thin wrappers around the external ffmpeg/ffprobe tools.

use std::path::Path;
use std::process::Command;

/// Run ffmpeg with the given arguments, capturing output.
///
/// A non-zero exit status is an error carrying the tool's stderr; callers
/// map it into their own stage variant.
pub fn run(args: &[String]) -> Result<(), String> {
    tracing::debug!(args = ?args, "Running ffmpeg");
    let output = Command::new("ffmpeg")
        .args(args)
        .output()
        .map_err(|e| format!("Failed to start ffmpeg: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        ));
    }

    Ok(())
}

/// Whether a binary is resolvable on PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Probe a media file's duration in seconds via ffprobe.
///
/// Best effort: any probe failure (including ffprobe being absent) yields
/// `None` and is never fatal.
pub fn probe_duration_secs(path: &Path) -> Option<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let raw = String::from_utf8(output.stdout).ok()?;
    let duration = raw.trim().parse::<f64>().ok()?;
    if duration.is_finite() && duration >= 0.0 {
        Some(duration)
    } else {
        None
    }
}
