//! Show queue items and their completion status.

use reelsmith_common::AppConfig;
use reelsmith_content_model::{CompletedLedger, ContentQueue};

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let queue = ContentQueue::load(&config.paths.queue_path)?;
    let ledger = CompletedLedger::open(&config.paths.ledger_path)?;

    println!("Content queue: {}", config.paths.queue_path.display());
    println!("{}", "=".repeat(50));

    for item in queue.items() {
        let status = if ledger.contains(&item.id) {
            "done"
        } else {
            "pending"
        };
        println!(
            "[{status:>7}] {} - {} ({} images)",
            item.id,
            item.title,
            item.images.len()
        );
    }

    let pending = queue.pending(&ledger).len();
    println!();
    println!(
        "{} items total, {} pending, {} completed",
        queue.items().len(),
        pending,
        queue.items().len() - pending
    );
    Ok(())
}
