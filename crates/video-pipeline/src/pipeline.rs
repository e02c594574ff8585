//! Pipeline coordinator: one content item in, one finished video out.

use std::path::PathBuf;

use reelsmith_common::{AppConfig, ReelsmithError, ReelsmithResult};
use reelsmith_content_model::ContentItem;

use crate::encoder::VideoEncoder;
use crate::frames::FrameRenderer;
use crate::muxer;
use crate::narration::{SynthesisBackend, TranslateTts};
use crate::working_set::WorkingSet;

/// Stage of a pipeline run, for logging and failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    RenderingFrames,
    Encoding,
    Synthesizing,
    Muxing,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::RenderingFrames => "rendering_frames",
            PipelineStage::Encoding => "encoding",
            PipelineStage::Synthesizing => "synthesizing",
            PipelineStage::Muxing => "muxing",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }
}

/// Assembles finished videos from content items.
///
/// Holds the rendering and encoding machinery plus a pluggable synthesis
/// backend; one pipeline instance serves any number of items.
pub struct VideoPipeline {
    renderer: FrameRenderer,
    encoder: VideoEncoder,
    synthesis: Box<dyn SynthesisBackend>,
    work_dir: PathBuf,
    language: String,
}

impl VideoPipeline {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_backend(config, Box::new(TranslateTts::new()))
    }

    pub fn with_backend(config: &AppConfig, synthesis: Box<dyn SynthesisBackend>) -> Self {
        Self {
            renderer: FrameRenderer::new(&config.paths, config.rendering),
            encoder: VideoEncoder::new(config.rendering.seconds_per_frame),
            synthesis,
            work_dir: config.paths.work_dir.clone(),
            language: config.narration.language.clone(),
        }
    }

    /// Run the full pipeline for one item.
    ///
    /// Returns the path of the finished video, or `None` after logging the
    /// failure with its stage; a failure on one item never aborts a batch.
    /// Intermediate artifacts are left in place either way and removed by
    /// [`VideoPipeline::cleanup`].
    pub async fn create_video(&self, item: &ContentItem) -> Option<PathBuf> {
        tracing::info!(item = %item.id, title = %item.title, "Creating video");
        match self.assemble(item).await {
            Ok(path) => {
                tracing::info!(
                    item = %item.id,
                    stage = PipelineStage::Done.as_str(),
                    path = %path.display(),
                    "Video created"
                );
                Some(path)
            }
            Err(e) => {
                tracing::error!(
                    item = %item.id,
                    stage = PipelineStage::Failed.as_str(),
                    failed_stage = e.stage(),
                    error = %e,
                    "Video creation failed"
                );
                None
            }
        }
    }

    async fn assemble(&self, item: &ContentItem) -> ReelsmithResult<PathBuf> {
        let ws = self.working_set(&item.id)?;
        ws.create()?;

        tracing::debug!(
            item = %item.id,
            stage = PipelineStage::RenderingFrames.as_str(),
            frames = item.images.len() + 1,
            "Stage started"
        );
        let frames = frame_sequence(&ws, item.images.len());
        self.renderer
            .render_title_frame(&item.title, &item.description, &frames[0])?;
        for (image, frame) in item.images.iter().zip(&frames[1..]) {
            self.renderer.render_content_frame(image, frame)?;
        }

        tracing::debug!(
            item = %item.id,
            stages = ?[
                PipelineStage::Encoding.as_str(),
                PipelineStage::Synthesizing.as_str(),
            ],
            "Concurrent stages started"
        );
        let encoder = self.encoder;
        let encode_frames = frames.clone();
        let silent_video = ws.silent_video();
        let encode_task = tokio::task::spawn_blocking(move || {
            encoder.encode(&encode_frames, &silent_video)
        });
        let narration_audio = ws.narration_audio();
        let synthesis_task =
            self.synthesis
                .synthesize(&item.audio_text, &self.language, &narration_audio);

        let (encode_result, synthesis_result) = tokio::join!(encode_task, synthesis_task);
        encode_result
            .map_err(|_| ReelsmithError::encode("Encoder task panicked"))??;
        synthesis_result?;

        tracing::debug!(
            item = %item.id,
            stage = PipelineStage::Muxing.as_str(),
            "Stage started"
        );
        muxer::mux(&ws.silent_video(), &ws.narration_audio(), &ws.final_video())?;
        Ok(ws.final_video())
    }

    /// The working set an item's artifacts live in. Fails on ids that are
    /// not valid directory names.
    pub fn working_set(&self, item_id: &str) -> ReelsmithResult<WorkingSet> {
        WorkingSet::for_item(&self.work_dir, item_id)
    }

    /// Remove the item's working directory and everything in it.
    pub fn cleanup(&self, item_id: &str) -> ReelsmithResult<()> {
        self.working_set(item_id)?.cleanup()
    }
}

/// The ordered frame paths for an item with `image_count` content images:
/// the title frame first, then one content frame per image.
pub fn frame_sequence(ws: &WorkingSet, image_count: usize) -> Vec<PathBuf> {
    let mut frames = Vec::with_capacity(image_count + 1);
    frames.push(ws.title_frame());
    for index in 0..image_count {
        frames.push(ws.content_frame(index));
    }
    frames
}
