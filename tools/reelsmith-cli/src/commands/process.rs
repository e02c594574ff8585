//! Process all pending queue items end to end.

use std::path::PathBuf;

use reelsmith_common::AppConfig;
use reelsmith_content_model::{CompletedLedger, ContentQueue};
use reelsmith_video_pipeline::VideoPipeline;

use crate::deliver::{Deliverer, DirectoryDeliverer};

pub async fn run(config: AppConfig, output: PathBuf, limit: Option<usize>) -> anyhow::Result<()> {
    let queue = ContentQueue::load(&config.paths.queue_path)?;
    let mut ledger = CompletedLedger::open(&config.paths.ledger_path)?;

    let pending = queue.pending(&ledger);
    let take = limit.unwrap_or(pending.len());
    println!(
        "Queue: {} items, {} pending, processing up to {}",
        queue.items().len(),
        pending.len(),
        take
    );

    let pipeline = VideoPipeline::new(&config);
    let deliverer = DirectoryDeliverer::new(output);

    let mut delivered = 0usize;
    let mut failed = 0usize;

    for item in pending.into_iter().take(take) {
        println!("Processing '{}' ({})", item.title, item.id);

        match pipeline.create_video(item).await {
            Some(video_path) => {
                let delivered_title = format!(
                    "{} - {}",
                    item.title,
                    chrono::Local::now().format("%B %Y")
                );
                let thumbnail = pipeline.working_set(&item.id)?.title_frame();

                match deliverer.deliver(&video_path, &delivered_title, &item.description, &thumbnail)
                {
                    Ok(true) => {
                        ledger.mark_completed(&item.id)?;
                        delivered += 1;
                        println!("  Delivered as '{delivered_title}'");
                    }
                    Ok(false) => {
                        println!("  Delivery declined, item stays pending");
                    }
                    Err(e) => {
                        tracing::error!(item = %item.id, error = %e, "Delivery failed");
                        failed += 1;
                        println!("  Delivery failed: {e}");
                    }
                }
            }
            None => {
                failed += 1;
                println!("  Video creation failed, see logs");
            }
        }

        // Work files go regardless of outcome; a failed item is retried
        // from scratch on the next run.
        pipeline.cleanup(&item.id)?;
    }

    println!();
    println!("Done: {delivered} delivered, {failed} failed");
    Ok(())
}
