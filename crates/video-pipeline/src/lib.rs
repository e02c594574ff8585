//! Reelsmith Video Pipeline
//!
//! Turns one content record into a finished, narrated video file.
//!
//! # Pipeline Architecture
//!
//! ```text
//! backgrounds/ ──┐
//!                ├── Title Frame ──┐
//! title/desc ────┘                 │
//!                                  ├── Encode (1 fps, 5 s/frame) ── temp_video.avi ──┐
//! images[] ───── Content Frames ───┘                                                 │
//!                                                                                    ├── Mux ── final_video.mp4
//! audio_text ─── Narration Synthesis ─────────────────────────────── temp_audio.mp3 ─┘
//! ```
//!
//! Encoding and narration synthesis have no data dependency and run
//! concurrently; everything else is strictly sequential. All intermediate
//! artifacts live in a per-item working directory and are removed by
//! [`WorkingSet::cleanup`] after the deliverable has been consumed.

pub mod encoder;
pub mod ffmpeg;
pub mod frames;
pub mod muxer;
pub mod narration;
pub mod pipeline;
pub mod working_set;

pub use pipeline::*;
pub use working_set::*;
