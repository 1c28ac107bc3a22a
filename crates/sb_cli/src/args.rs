// crates/sb_cli/src/args.rs
//
// Offline CLI argument surface.
// - No networked paths (reject any scheme:// like http/https/file)
// - Exactly one of: --manifest  XOR  (--catalog + --collected)
// - Output: --out dir, --render [json|html|text]*, --print
// - --validate-only loads inputs without running the engine

use std::{
    env, fs,
    io::Read,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};

use sb_algo::{AggregationStrategy, RowOrder};

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "scoreboard",
    disable_help_subcommand = true,
    about = "Offline, deterministic end-of-round scoreboard"
)]
pub struct Args {
    // --- Mode selection ---
    /// Round manifest JSON (mutually exclusive with --catalog/--collected).
    #[arg(long, conflicts_with_all = ["catalog", "collected"])]
    pub manifest: Option<PathBuf>,

    // --- Explicit mode ---
    /// Catalog JSON path.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Collected-items JSON path.
    #[arg(long)]
    pub collected: Option<PathBuf>,

    // --- Output & rendering ---
    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Report format(s) to write next to scoreboard.json. Repeatable.
    #[arg(long, value_enum)]
    pub render: Vec<RenderFormat>,
    /// Also print the text report to stdout.
    #[arg(long)]
    pub print: bool,

    // --- Engine knobs ---
    #[arg(long, value_enum, default_value_t = StrategyArg::SinglePass)]
    pub strategy: StrategyArg,
    #[arg(long, value_enum, default_value_t = OrderArg::FirstCollected)]
    pub order: OrderArg,

    /// Load and validate inputs only; do not build a scoreboard.
    #[arg(long)]
    pub validate_only: bool,

    /// Only log errors and skip status lines on stderr.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Json,
    Html,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    SinglePass,
    TwoPass,
}

impl From<StrategyArg> for AggregationStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::SinglePass => AggregationStrategy::SinglePass,
            StrategyArg::TwoPass => AggregationStrategy::TwoPass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    FirstCollected,
    ItemId,
    ScoreDesc,
}

impl From<OrderArg> for RowOrder {
    fn from(o: OrderArg) -> Self {
        match o {
            OrderArg::FirstCollected => RowOrder::FirstCollected,
            OrderArg::ItemId => RowOrder::ItemId,
            OrderArg::ScoreDesc => RowOrder::ScoreDesc,
        }
    }
}

/// Errors surfaced by argument validation. Messages stay short and stable.
#[derive(Debug)]
pub enum CliError {
    Missing(&'static str),
    NonLocalPath(String),
    NotFound(String),
    ManifestQuick(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            Missing(s) => write!(f, "missing required flag: {s}"),
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            ManifestQuick(s) => write!(f, "manifest quick-check failed: {s}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

/// Scheme checks, mode checks, then path normalization.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    if args.manifest.is_some() {
        validate_manifest_mode(&args)?;
        args.manifest = args.manifest.take().map(|p| normalize_path(&p));
    } else {
        validate_explicit_mode(&args)?;
        args.catalog = args.catalog.take().map(|p| normalize_path(&p));
        args.collected = args.collected.take().map(|p| normalize_path(&p));
    }

    // --out may not exist yet.
    args.out = normalize_path(&args.out);
    Ok(args)
}

fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [
        args.manifest.as_deref(),
        args.catalog.as_deref(),
        args.collected.as_deref(),
        Some(args.out.as_path()),
    ]
    .into_iter()
    .flatten()
}

fn validate_manifest_mode(a: &Args) -> Result<(), CliError> {
    let path = a.manifest.as_ref().ok_or(CliError::Missing("--manifest"))?;
    ensure_local_exists(path, "--manifest")?;

    // Bounded read; the real parse happens in sb_io.
    const MAX_BYTES: u64 = 1024 * 1024;
    let f = fs::File::open(path).map_err(|_| CliError::NotFound(format!("--manifest {}", path.display())))?;
    let mut buf = Vec::new();
    f.take(MAX_BYTES)
        .read_to_end(&mut buf)
        .map_err(|_| CliError::ManifestQuick("unable to read manifest file"))?;

    quick_check_manifest_bytes(&buf)
}

fn validate_explicit_mode(a: &Args) -> Result<(), CliError> {
    let catalog = a.catalog.as_ref().ok_or(CliError::Missing("--catalog (or --manifest)"))?;
    let collected = a.collected.as_ref().ok_or(CliError::Missing("--collected"))?;
    ensure_local_exists(catalog, "--catalog")?;
    ensure_local_exists(collected, "--collected")?;
    Ok(())
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Absolute path; falls back to CWD-relative when canonicalize fails.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

/// Lightweight manifest quick-check (no JSON parsing):
/// both path keys present, no URL anywhere.
pub fn quick_check_manifest_bytes(bytes: &[u8]) -> Result<(), CliError> {
    let text = std::str::from_utf8(bytes).map_err(|_| CliError::ManifestQuick("manifest must be UTF-8"))?;

    if !text.contains("\"catalog_path\"") {
        return Err(CliError::ManifestQuick("missing catalog_path"));
    }
    if !text.contains("\"collected_path\"") {
        return Err(CliError::ManifestQuick("missing collected_path"));
    }
    if text.contains("http://") || text.contains("https://") || text.contains("file://") {
        return Err(CliError::ManifestQuick("URLs are not allowed (offline only)"));
    }
    Ok(())
}
