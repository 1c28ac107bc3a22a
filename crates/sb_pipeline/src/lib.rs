//! sb_pipeline: deterministic pipeline surface (load → aggregate → totals → build → verify)
//! This crate stays I/O-free apart from delegating loading to `sb_io`; aggregation
//! math lives in `sb_algo`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use sb_algo::{AggregationStrategy, RowOrder, RowSet, Totals};
use sb_io::loader::{self, LoadedRound};

pub mod aggregate;
pub mod board;
pub mod build_scoreboard;

pub use board::Scoreboard;
pub use build_scoreboard::{build_scoreboard, verify_scoreboard, InputsDoc, RowDoc, ScoreboardDoc, TotalsDoc};

/// Engine identifiers (baked by the build system in real deployments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

impl EngineMeta {
    /// Compile-time metadata; `SCOREBOARD_ENGINE_*` env vars override the defaults.
    pub fn from_build_env() -> Self {
        EngineMeta {
            vendor: option_env!("SCOREBOARD_ENGINE_VENDOR").unwrap_or("scoreboard").to_string(),
            name: option_env!("SCOREBOARD_ENGINE_NAME").unwrap_or(env!("CARGO_PKG_NAME")).to_string(),
            version: option_env!("SCOREBOARD_ENGINE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")).to_string(),
            build: option_env!("SCOREBOARD_ENGINE_BUILD").unwrap_or("dev").to_string(),
        }
    }
}

/// Knobs that change presentation/algorithm choice but never the row values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub strategy: AggregationStrategy,
    pub order: RowOrder,
}

/// Pipeline context: inputs are already loaded by sb_io.
#[derive(Debug)]
pub struct PipelineCtx {
    pub round: LoadedRound,
    pub engine_meta: EngineMeta,
    pub config: PipelineConfig,
}

/// Top-level pipeline outputs.
#[derive(Debug)]
pub struct PipelineOutputs {
    pub scoreboard: ScoreboardDoc,
    pub rows: RowSet,
    pub totals: Totals,
}

/// Single error surface for the pipeline orchestration.
#[derive(Debug)]
pub enum PipelineError {
    Io(String),
    Validate(String),
    Build(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(m) => write!(f, "io: {m}"),
            PipelineError::Validate(m) => write!(f, "validate: {m}"),
            PipelineError::Build(m) => write!(f, "build: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<sb_io::IoError> for PipelineError {
    fn from(e: sb_io::IoError) -> Self {
        use sb_io::IoError as E;
        match e {
            E::Read(e) => PipelineError::Io(format!("read: {e}")),
            E::Write(e) => PipelineError::Io(format!("write: {e}")),
            E::Path(m) => PipelineError::Io(format!("path: {m}")),
            E::Limit(m) => PipelineError::Io(format!("limit: {m}")),
            E::Json { pointer, msg } => PipelineError::Validate(format!("json {pointer}: {msg}")),
            E::Manifest(m) => PipelineError::Validate(format!("manifest: {m}")),
            E::Expect(m) => PipelineError::Validate(format!("expect: {m}")),
        }
    }
}

/// Run every stage over an already-loaded round.
pub fn run_with_ctx(ctx: PipelineCtx) -> Result<PipelineOutputs, PipelineError> {
    let PipelineCtx { round, engine_meta, config } = ctx;

    let (rows, totals) = aggregate::aggregate_round(&round.catalog, &round.collected, config.strategy);
    let scoreboard = build_scoreboard(&round, &rows, totals, &engine_meta, config)?;
    verify_scoreboard(&scoreboard)?;

    info!(
        id = %scoreboard.id,
        rows = scoreboard.rows.len(),
        total_bonus = totals.total_bonus,
        grand_total = totals.grand_total,
        "scoreboard built"
    );
    Ok(PipelineOutputs { scoreboard, rows, totals })
}

/// Convenience: load from a manifest, then run.
pub fn run_from_manifest(
    manifest: &Path,
    engine_meta: EngineMeta,
    config: PipelineConfig,
) -> Result<PipelineOutputs, PipelineError> {
    let round = loader::load_round_from_manifest(manifest)?;
    run_with_ctx(PipelineCtx { round, engine_meta, config })
}

/// Convenience: load from explicit paths, then run.
pub fn run_from_paths(
    catalog: &Path,
    collected: &Path,
    engine_meta: EngineMeta,
    config: PipelineConfig,
) -> Result<PipelineOutputs, PipelineError> {
    let round = loader::load_round_from_paths(catalog, collected)?;
    run_with_ctx(PipelineCtx { round, engine_meta, config })
}
