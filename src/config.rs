use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::search::eval::{EvalKind, Scoring, Score, MAX_HEURISTIC, NEAR_WIN_PERCENT, WIN_SCORE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Minimax,
    Random,
}

/// Engine settings. Every field has a default, so a partial JSON file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: StrategyKind,
    pub depth: u32,
    pub eval: EvalKind,
    pub win_score: Score,
    pub near_win_percent: Score,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Minimax,
            depth: 3,
            eval: EvalKind::Material,
            win_score: WIN_SCORE,
            near_win_percent: NEAR_WIN_PERCENT,
            seed: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).context("parsing engine config")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects scoring settings under which a won position could score below
    /// a material or mobility edge.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.win_score >= WIN_SCORE,
            "win_score must be at least {WIN_SCORE}, got {}", self.win_score
        );
        ensure!(
            (1..=100).contains(&self.near_win_percent),
            "near_win_percent must be within 1..=100, got {}", self.near_win_percent
        );
        let near_win = self.scoring().near_win();
        ensure!(
            near_win > MAX_HEURISTIC,
            "near-win threshold {near_win} must exceed the heuristic bound {MAX_HEURISTIC}"
        );
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn scoring(&self) -> Scoring {
        Scoring { win_score: self.win_score, near_win_percent: self.near_win_percent }
    }
}
