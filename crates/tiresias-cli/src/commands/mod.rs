//! CLI command implementations.

pub mod evaluate;
pub mod infer;
pub mod init;
pub mod inspect;

use anyhow::{Context, Result};
use std::path::Path;

use tiresias::prelude::*;

use crate::config::{Config, OutputFormat};
use crate::dataset::BatchFile;

/// Everything an attack command needs, loaded and validated.
pub struct AttackInputs {
    pub tree: DecisionTree,
    pub attack: AttackConfig,
    pub candidates: CandidateSet,
    pub batch: ObservationBatch,
    pub truth: Option<Vec<FeatureValue>>,
    pub format: OutputFormat,
}

pub fn load_inputs(
    model: &str,
    data: &str,
    attack_feature: Option<i64>,
    json: bool,
) -> Result<AttackInputs> {
    let config = Config::load()?;
    let attack = config.attack_config(attack_feature)?;
    let candidates = config.candidate_set()?;

    let tree = DecisionTree::load(model)
        .with_context(|| format!("Failed to load model: {}", model))?;
    let (batch, truth) = BatchFile::load(Path::new(data))?.into_batch()?;

    let format = if json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    Ok(AttackInputs {
        tree,
        attack,
        candidates,
        batch,
        truth,
        format,
    })
}
