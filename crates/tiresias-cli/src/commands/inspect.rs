//! Show the white-box statistics an attack will read from a model.

use anyhow::{Context, Result};
use colored::Colorize;

use tiresias::prelude::*;

pub fn run(model: &str) -> Result<()> {
    let tree = DecisionTree::load(model)
        .with_context(|| format!("Failed to load model: {}", model))?;

    println!("{}", "Decision Tree".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Shape".blue().bold());
    println!("  Features:          {}", tree.n_features().to_string().cyan());
    println!("  Classes:           {}", tree.n_classes().to_string().cyan());
    println!("  Nodes:             {}", tree.node_count().to_string().cyan());
    println!("  Leaves:            {}", tree.leaf_count().to_string().cyan());
    println!("  Depth:             {}", tree.depth().to_string().cyan());
    println!();

    let total = tree.total_samples();
    println!("{}", "Leaves".blue().bold());
    println!("  Training samples:  {}", total.to_string().cyan());
    for node in tree.nodes().iter().filter(|n| n.is_leaf()) {
        let share = if total > 0 {
            node.samples as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "  {} {:>8} samples {}",
            format!("{:>6}", NodeId(node.id).to_string()).blue(),
            node.samples,
            format!("({:.1}%)", share).dimmed()
        );
    }

    println!();
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
