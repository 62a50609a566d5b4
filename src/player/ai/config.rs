use super::agent::{SearchAgent, DEFAULT_TIMEOUT_THRESHOLD};
use super::candidates::{default_schedule, AllLegalMoves, CandidateMoveGenerator, RadiusStage, SurroundStar};
use super::eval::PatternEvaluator;
use super::evaluator::{Evaluator, NullScore};
use super::initial::{CenterInitial, InitialMovePolicy, NoInitialMove, RandomInitial};
use super::search::Algorithm;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "agent_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub version: String,
    pub search: SearchConfig,
    pub evaluation: EvaluationConfig,
    pub candidates: CandidatesConfig,
    pub initial: InitialConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub timeout_threshold_ms: u64,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    Null,
    Pattern,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub kind: EvaluatorKind,
    /// Root of the `m{m}/` table directories; used by `pattern`.
    #[serde(default)]
    pub tables_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatesKind {
    AllLegal,
    ConsiderSelf,
    ConsiderBoth,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesConfig {
    pub kind: CandidatesKind,
    #[serde(default = "default_schedule")]
    pub schedule: Vec<RadiusStage>,
    #[serde(default)]
    pub center_plies: Option<usize>,
    #[serde(default)]
    pub center_radius: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialKind {
    None,
    Random,
    Center,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialConfig {
    pub kind: InitialKind,
    #[serde(default)]
    pub radius: i32,
}

impl AgentConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("reading agent config {}", path.display()))?;
        let config: AgentConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("parsing agent config {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load(Path::new(DEFAULT_CONFIG_PATH)).unwrap_or_else(|_| Self::default())
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing agent config {}", path.display()))?;
        Ok(())
    }

    /// Board win-length is needed to pick the pattern tables.
    pub fn build_agent(&self, name: &str, m: usize) -> anyhow::Result<SearchAgent> {
        let mut agent = SearchAgent::new(name, self.search.algorithm, self.build_evaluator(m)?)
            .with_candidates(self.build_candidates())
            .with_initial(self.build_initial())
            .with_timeout_threshold(Duration::from_millis(self.search.timeout_threshold_ms))
            .with_max_depth(self.search.max_depth);
        if let Some(seed) = self.search.seed {
            agent = agent.with_seed(seed);
        }
        Ok(agent)
    }

    fn build_evaluator(&self, m: usize) -> anyhow::Result<Box<dyn Evaluator>> {
        match self.evaluation.kind {
            EvaluatorKind::Null => Ok(Box::new(NullScore)),
            EvaluatorKind::Pattern => {
                let dir = self
                    .evaluation
                    .tables_dir
                    .as_deref()
                    .context("pattern evaluation needs evaluation.tables_dir")?;
                let evaluator = PatternEvaluator::load(dir, m)
                    .with_context(|| format!("loading score tables for m = {}", m))?;
                Ok(Box::new(evaluator))
            }
        }
    }

    fn build_candidates(&self) -> Box<dyn CandidateMoveGenerator> {
        let config = &self.candidates;
        let surround_star = match config.kind {
            CandidatesKind::AllLegal => return Box::new(AllLegalMoves),
            CandidatesKind::ConsiderSelf => SurroundStar::consider_self(),
            CandidatesKind::ConsiderBoth => SurroundStar::consider_both(),
            CandidatesKind::Advanced => SurroundStar::advanced(),
        };
        let mut generator = surround_star.with_schedule(config.schedule.clone());
        if config.center_plies.is_some() || config.center_radius.is_some() {
            generator = generator.with_center(config.center_plies.unwrap_or(0), config.center_radius.unwrap_or(0));
        }
        Box::new(generator)
    }

    fn build_initial(&self) -> Box<dyn InitialMovePolicy> {
        match self.initial.kind {
            InitialKind::None => Box::new(NoInitialMove),
            InitialKind::Random => Box::new(RandomInitial),
            InitialKind::Center => Box::new(CenterInitial::new(self.initial.radius)),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            version: "1.0".to_string(),
            search: SearchConfig {
                algorithm: Algorithm::AlphaBeta,
                timeout_threshold_ms: DEFAULT_TIMEOUT_THRESHOLD.as_millis() as u64,
                max_depth: None,
                seed: None,
            },
            evaluation: EvaluationConfig {
                kind: EvaluatorKind::Null,
                tables_dir: None,
            },
            candidates: CandidatesConfig {
                kind: CandidatesKind::ConsiderBoth,
                schedule: default_schedule(),
                center_plies: None,
                center_radius: None,
            },
            initial: InitialConfig {
                kind: InitialKind::Center,
                radius: 1,
            },
        }
    }
}
