// crates/sb_cli/src/main.rs
//
// Exit codes, typed error mapping, CLI parsing, the validate-only
// short-circuit, and the full run path
// (engine meta → load → pipeline → artifacts → optional rendering).

#![forbid(unsafe_code)]

mod args;
mod logging;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const SELF_VERIFY: i32 = 3;
    pub const IO: i32 = 4;
}

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, info};

use args::{parse_and_validate as parse_cli, Args, RenderFormat};
use sb_io::loader::{self, LoadedRound};
use sb_io::{canonical_json, IoError};
use sb_pipeline::{run_with_ctx, EngineMeta, PipelineConfig, PipelineCtx, PipelineError, PipelineOutputs};
use sb_report::{build_model, render_text, ReportError, ReportModel};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// JSON shape / manifest / hash expectation failures
    Validation(String),
    /// Built scoreboard failed its own consistency checks
    SelfVerify(String),
    /// Read/write/path/limit failures
    Io(String),
    /// Report build or output
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::SelfVerify(m) => write!(f, "self-verify: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("scoreboard: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    if let Err(e) = logging::init(args.quiet) {
        eprintln!("scoreboard: error: {e}");
        return ExitCode::from(exitcodes::VALIDATION as u8);
    }

    let outcome = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match outcome {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("scoreboard: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::SelfVerify(_) => SELF_VERIFY,
        MainError::Io(_) | MainError::Render(_) => IO,
    }
}

fn map_io_err(e: IoError) -> MainError {
    use IoError as E;
    match e {
        E::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        E::Manifest(m) => MainError::Validation(format!("manifest: {m}")),
        E::Expect(m) => MainError::Validation(format!("expect: {m}")),

        E::Read(e) => MainError::Io(format!("read: {e}")),
        E::Write(e) => MainError::Io(format!("write: {e}")),
        E::Path(m) => MainError::Io(format!("path: {m}")),
        E::Limit(m) => MainError::Io(format!("limit: {m}")),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Validate(m) => MainError::Validation(m),
        PipelineError::Io(m) => MainError::Io(m),
        PipelineError::Build(m) => MainError::SelfVerify(m),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    match e {
        ReportError::Inconsistent(m) => MainError::SelfVerify(format!("report: {m}")),
        other => MainError::Render(other.to_string()),
    }
}

fn load_round(args: &Args) -> Result<LoadedRound, MainError> {
    let loaded = match (&args.manifest, &args.catalog, &args.collected) {
        (Some(manifest), _, _) => loader::load_round_from_manifest(manifest),
        (None, Some(catalog), Some(collected)) => loader::load_round_from_paths(catalog, collected),
        _ => return Err(MainError::Validation("need --manifest or --catalog with --collected".into())),
    };
    loaded.map_err(map_io_err)
}

/// Load inputs (shape, ids, size limits, digest expectations) and stop.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let round = load_round(args)?;
    debug!(items = round.catalog.len(), pickups = round.collected.len(), "inputs loaded");
    if !args.quiet {
        eprintln!("validate-only: inputs OK");
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let engine_meta = EngineMeta::from_build_env();
    let config = PipelineConfig { strategy: args.strategy.into(), order: args.order.into() };

    let round = load_round(args)?;
    let outs = run_with_ctx(PipelineCtx { round, engine_meta, config }).map_err(map_pipeline_err)?;

    write_artifacts(&args.out, &outs)?;
    maybe_render_reports(args, &outs, &args.out)?;

    if !args.quiet {
        eprintln!("run: artifacts written to {}", args.out.to_string_lossy());
    }
    Ok(())
}

fn write_artifacts(out_dir: &Path, outs: &PipelineOutputs) -> Result<(), MainError> {
    fs::create_dir_all(out_dir).map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.to_string_lossy())))?;

    let path = out_dir.join("scoreboard.json");
    canonical_json::write_canonical_file(&outs.scoreboard, &path)
        .map_err(|e| MainError::Io(format!("write scoreboard.json: {e}")))?;
    info!(path = %path.display(), id = %outs.scoreboard.id, "wrote scoreboard");
    Ok(())
}

fn maybe_render_reports(args: &Args, outs: &PipelineOutputs, out_dir: &Path) -> Result<(), MainError> {
    if args.render.is_empty() && !args.print {
        return Ok(());
    }

    // Reports read the artifact as written, not the in-memory rows.
    let doc = serde_json::to_value(&outs.scoreboard)
        .map_err(|e| MainError::Render(format!("scoreboard to JSON: {e}")))?;
    let model = build_model(&doc).map_err(map_report_err)?;

    for fmt in &args.render {
        match fmt {
            RenderFormat::Json => render_json_report(&model, out_dir)?,
            RenderFormat::Html => render_html_report(&model, out_dir)?,
            RenderFormat::Text => write_report(out_dir, "report.txt", &render_text(&model))?,
        }
    }
    if args.print {
        print!("{}", render_text(&model));
    }
    Ok(())
}

fn write_report(out_dir: &Path, name: &str, body: &str) -> Result<(), MainError> {
    let path = out_dir.join(name);
    canonical_json::write_atomic(&path, body.as_bytes()).map_err(|e| MainError::Io(format!("write {name}: {e}")))?;
    debug!(path = %path.display(), "wrote report");
    Ok(())
}

// Always accept the concrete model type; gate body by feature.
fn render_json_report(model: &ReportModel, out_dir: &Path) -> Result<(), MainError> {
    #[cfg(feature = "report-json")]
    {
        let body = sb_report::render_json(model).map_err(map_report_err)?;
        write_report(out_dir, "report.json", &body)
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = (model, out_dir);
        Err(MainError::Render("json renderer not enabled (build with feature `report-json`)".into()))
    }
}

fn render_html_report(model: &ReportModel, out_dir: &Path) -> Result<(), MainError> {
    #[cfg(feature = "report-html")]
    {
        let body = sb_report::render_html(model).map_err(map_report_err)?;
        write_report(out_dir, "report.html", &body)
    }
    #[cfg(not(feature = "report-html"))]
    {
        let _ = (model, out_dir);
        Err(MainError::Render("html renderer not enabled (build with feature `report-html`)".into()))
    }
}
