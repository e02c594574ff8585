//! Render a single item by id, for inspection.

use reelsmith_common::AppConfig;
use reelsmith_content_model::ContentQueue;
use reelsmith_video_pipeline::{ffmpeg, VideoPipeline};

pub async fn run(config: AppConfig, id: String) -> anyhow::Result<()> {
    let queue = ContentQueue::load(&config.paths.queue_path)?;
    let item = queue
        .items()
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| anyhow::anyhow!("No item with id '{id}' in the queue"))?;

    println!("Rendering '{}' ({})", item.title, item.id);

    let pipeline = VideoPipeline::new(&config);
    match pipeline.create_video(item).await {
        Some(video_path) => {
            // Working files are intentionally left in place for inspection.
            println!("Video ready: {}", video_path.display());
            if let Some(duration) = ffmpeg::probe_duration_secs(&video_path) {
                println!("Duration: {duration:.1}s");
            }
            println!(
                "Work directory: {}",
                pipeline.working_set(&item.id)?.dir().display()
            );
            Ok(())
        }
        None => Err(anyhow::anyhow!("Video creation failed, see logs")),
    }
}
