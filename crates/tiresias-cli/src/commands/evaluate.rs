//! Run an attack and score it against the true attacked values.

use anyhow::{bail, Result};
use colored::Colorize;
use tracing::info;

use tiresias::prelude::*;

use super::load_inputs;
use crate::config::OutputFormat;

pub fn run(model: &str, data: &str, attack_feature: Option<i64>, json: bool) -> Result<()> {
    let inputs = load_inputs(model, data, attack_feature, json)?;
    let Some(truth) = inputs.truth.as_deref() else {
        bail!("{} has no {} column to score against", data, "truth".cyan());
    };

    let engine = AttributeInferenceEngine::new(&inputs.tree, inputs.attack);
    let report = engine.infer_detailed(&inputs.batch, &inputs.candidates)?;
    let scores = score_inference(&report, &inputs.candidates, truth)?;
    info!(
        "Attack accuracy {:.3} against prior baseline {:.3}",
        scores.accuracy, scores.prior_baseline_accuracy
    );

    if inputs.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    println!("{}", "Attribute Inference Audit".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Attack".blue().bold());
    println!("  Model:             {}", engine.model().name().cyan());
    println!(
        "  Attacked feature:  {}",
        engine.attack_feature().to_string().cyan()
    );
    println!("  Rows:              {}", scores.rows.to_string().cyan());
    println!("  Candidates:        {:?}", inputs.candidates.values());
    println!();

    println!("{}", "Accuracy".blue().bold());
    println!("  Overall:           {:.4}", scores.accuracy);
    println!("  Exact match:       {:.4}", scores.exact_match_accuracy);
    println!("  Fallback:          {:.4}", scores.fallback_accuracy);
    println!(
        "  Exact-match rate:  {:.1}%",
        scores.exact_match_rate * 100.0
    );
    println!();

    println!("{}", "Leakage".blue().bold());
    println!("  Prior baseline:    {:.4}", scores.prior_baseline_accuracy);
    let advantage = format!("{:+.4}", scores.advantage);
    let advantage = if scores.advantage > 0.0 {
        advantage.red().bold()
    } else {
        advantage.green()
    };
    println!("  Advantage:         {}", advantage);

    println!();
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
