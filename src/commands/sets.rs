//! Local set listing.

use flashsets::config::FlashsetsConfig;
use flashsets::{Result, SetStore};

/// Executes the sets command.
pub async fn cmd_sets(config: &FlashsetsConfig) -> Result<()> {
    let sets = SetStore::load_from_file(&config.sets_path()).await?.all().await;

    if sets.is_empty() {
        println!("No sets imported yet.");
        return Ok(());
    }

    println!("{:<10} {:<32} LANGUAGES", "ID", "NAME");
    for set in &sets {
        let descriptor = &set.descriptor;
        println!(
            "{:<10} {:<32} {}->{}",
            set.id.as_str(),
            descriptor.name,
            descriptor.default_language,
            descriptor.translation_language
        );
    }
    println!();
    println!("{} set(s)", sets.len());

    Ok(())
}
