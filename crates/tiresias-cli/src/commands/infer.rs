//! Infer the attacked feature for every row of a batch.

use anyhow::Result;
use colored::Colorize;
use tracing::info;

use tiresias::prelude::*;

use super::load_inputs;
use crate::config::OutputFormat;

pub fn run(model: &str, data: &str, attack_feature: Option<i64>, json: bool) -> Result<()> {
    let inputs = load_inputs(model, data, attack_feature, json)?;
    let engine = AttributeInferenceEngine::new(&inputs.tree, inputs.attack);
    let report = engine.infer_detailed(&inputs.batch, &inputs.candidates)?;
    info!(
        "Inferred {} rows ({} by exact match)",
        report.len(),
        report.exact_match_count()
    );

    if inputs.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("{} Batch is empty, nothing to infer", "•".yellow());
        return Ok(());
    }

    println!(
        "{} Inferred feature {} for {} rows:",
        "→".blue(),
        engine.attack_feature().to_string().cyan().bold(),
        report.len()
    );
    println!();

    for (row, (value, source)) in report.rows().enumerate() {
        let source = match source {
            InferenceSource::ExactMatch => source.to_string().green(),
            InferenceSource::Fallback => source.to_string().dimmed(),
        };
        println!(
            "  {} {} {}",
            format!("{:>4}.", row).blue(),
            value.to_string().white().bold(),
            format!("({})", source).dimmed()
        );
    }

    println!();
    println!(
        "{} {} of {} rows settled by exact match",
        "✓".green(),
        report.exact_match_count().to_string().cyan(),
        report.len()
    );

    Ok(())
}
