//! Initialize a Tiresias audit directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing Tiresias audit...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        Config::default().save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    println!();
    println!("{} Audit initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  {} edit {} to set the attacked feature and its candidates",
        "1.".blue(),
        CONFIG_FILE
    );
    println!("  {} tiresias inspect --model tree.json", "2.".blue());
    println!(
        "  {} tiresias evaluate --model tree.json --data batch.json",
        "3.".blue()
    );

    Ok(())
}
