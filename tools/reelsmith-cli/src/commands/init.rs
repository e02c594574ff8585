//! Scaffold the data directory and write a default config.

use reelsmith_common::AppConfig;

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let backgrounds_dir = config.paths.assets_dir.join("backgrounds");
    let fonts_dir = config.paths.assets_dir.join("fonts");

    std::fs::create_dir_all(&backgrounds_dir)?;
    std::fs::create_dir_all(&fonts_dir)?;
    std::fs::create_dir_all(&config.paths.work_dir)?;

    if !config.paths.queue_path.exists() {
        std::fs::write(&config.paths.queue_path, "[]\n")?;
    }

    config.save()?;

    println!("Reelsmith initialized:");
    println!("  Assets: {}", config.paths.assets_dir.display());
    println!("  Work: {}", config.paths.work_dir.display());
    println!("  Queue: {}", config.paths.queue_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Put background images in {}", backgrounds_dir.display());
    println!(
        "  2. Install a TrueType font at {}",
        config.paths.font_path.display()
    );
    println!(
        "  3. Add content items to {}",
        config.paths.queue_path.display()
    );
    println!("  4. Run 'reelsmith check', then 'reelsmith process'");
    Ok(())
}
