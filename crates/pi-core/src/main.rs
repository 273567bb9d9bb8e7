//! Personality Inference Core - CLI
//!
//! The main entry point for pi-core, handling:
//! - Trait collection from flags, files and stdin
//! - Linear classifier inference over the loaded artifacts
//! - Derived analytics (domain averages, coefficient ranking, baseline deltas)
//! - JSON/CSV export
//! - Artifact and configuration diagnostics

use clap::{Args, CommandFactory, Parser, Subcommand};
use pi_common::{
    format_error_human, Domain, Error, LayoutInfo, OutputFormat, Result, SessionId,
    StructuredError, SCHEMA_VERSION, TRAIT_DESCRIPTIONS, TRAIT_MAX, TRAIT_NAMES,
};
use pi_config::{
    resolve_artifacts, resolve_config, ArtifactOverrides, ArtifactPaths, ConfigPaths,
    ConfigSnapshot, ConfigSource, GlobalBaseline, Settings,
};
use pi_core::collect::{parse_score_line, TraitCollector, TraitVector};
use pi_core::exit_codes::ExitCode;
use pi_core::export::{data_uri, to_csv, write_export, ExportKind, ExportPayload};
use pi_core::inference::InferenceEngine;
use pi_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogFormat, Stage,
};
use pi_core::log_event;
use pi_core::output::{
    render_explain_markdown, render_prediction_markdown, render_summary, ExplainReport,
    PredictionReport,
};
use pi_core::schema::{available_schemas, format_schema, generate_all_schemas, generate_schema, SchemaFormat};
use pi_core::session::Session;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Personality Inference Core - classify a 26-trait profile with a fitted linear model
#[derive(Parser)]
#[command(name = "pi-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Directory holding model.json, scaler.json and encoder.json
    #[arg(long, global = true, env = "PI_ARTIFACT_DIR")]
    artifact_dir: Option<PathBuf>,

    /// Path to the model artifact
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Path to the scaler artifact
    #[arg(long, global = true)]
    scaler: Option<PathBuf>,

    /// Path to the label encoder artifact
    #[arg(long, global = true)]
    encoder: Option<PathBuf>,

    /// Population baseline table (JSON, trait name → value)
    #[arg(long, global = true)]
    baseline: Option<PathBuf>,

    /// Path to settings.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one trait profile and show analytics
    Predict(PredictArgs),

    /// Rank the coefficients that push toward a class
    Explain(ExplainArgs),

    /// List the canonical trait layout with domains and baselines
    Traits,

    /// Classify a profile and write the JSON/CSV export documents
    Export(ExportArgs),

    /// Line-oriented session: 26 scores per line, `last` to repeat, `quit` to stop
    Repl,

    /// Validate artifacts and configuration
    Check,

    /// Print JSON Schema for output types
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Where trait scores come from.
#[derive(Args, Debug)]
struct TraitInput {
    /// Trait assignment `NAME=VALUE` (repeatable)
    #[arg(long = "trait", short = 't', value_name = "NAME=VALUE")]
    assignments: Vec<String>,

    /// JSON file with an object of trait name → score
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// 26 whitespace- or comma-separated scores in canonical order
    #[arg(long, value_name = "SCORES", conflicts_with_all = ["assignments", "input"])]
    scores: Option<String>,

    /// Fill traits that were not given with this score
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=TRAIT_MAX as i64))]
    default: Option<u8>,
}

impl TraitInput {
    fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.input.is_none() && self.scores.is_none()
    }
}

#[derive(Args, Debug)]
struct PredictArgs {
    #[command(flatten)]
    input: TraitInput,

    /// Number of ranked coefficients to show (default from settings)
    #[arg(long)]
    top_k: Option<usize>,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    /// Class to explain; defaults to the class predicted for the given traits
    #[arg(long)]
    class: Option<String>,

    /// Number of ranked coefficients to show (default from settings)
    #[arg(long)]
    top_k: Option<usize>,

    #[command(flatten)]
    input: TraitInput,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    input: TraitInput,

    /// Write the JSON payload here
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Write the CSV profile here
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write both documents into this directory under their session file names
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Include base64 data URIs of both documents in the output
    #[arg(long)]
    data_uri: bool,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type to print
    name: Option<String>,

    /// List available types
    #[arg(long, conflicts_with_all = ["name", "all"])]
    list: bool,

    /// Print every schema keyed by type name
    #[arg(long, conflicts_with = "name")]
    all: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

// ============================================================================
// Runtime configuration
// ============================================================================

/// Everything resolved once per invocation before a command runs.
struct Runtime {
    ctx: LogContext,
    settings: Settings,
    settings_error: Option<Error>,
    baseline: GlobalBaseline,
    baseline_error: Option<Error>,
    config_paths: ConfigPaths,
    artifact_paths: ArtifactPaths,
}

impl Runtime {
    fn load(global: &GlobalOpts, ctx: LogContext) -> Self {
        let mut config_paths = resolve_config(global.baseline.as_deref(), global.config.as_deref());

        let mut settings_error: Option<Error> = None;
        let settings = match (&global.config, &config_paths.settings) {
            (Some(path), _) if !path.is_file() => {
                settings_error = Some(Error::Config(format!(
                    "settings file not found: {}",
                    path.display()
                )));
                Settings::default()
            }
            (_, Some(path)) => Settings::from_file(path).unwrap_or_else(|e| {
                settings_error = Some(e.into());
                Settings::default()
            }),
            (_, None) => Settings::default(),
        };

        let explicit_baseline = matches!(
            config_paths.baseline_source,
            ConfigSource::CliArgument | ConfigSource::Environment
        );
        if !explicit_baseline {
            if let Some(path) = &settings.baseline_path {
                config_paths.baseline = Some(path.clone());
                config_paths.baseline_source = ConfigSource::SettingsFile;
            }
        }

        let mut baseline_error: Option<Error> = None;
        let baseline = match (&global.baseline, &config_paths.baseline) {
            (Some(path), _) if !path.is_file() => {
                baseline_error = Some(Error::InvalidBaseline(format!(
                    "baseline file not found: {}",
                    path.display()
                )));
                GlobalBaseline::default()
            }
            (_, Some(path)) => GlobalBaseline::from_file(path).unwrap_or_else(|e| {
                baseline_error = Some(Error::InvalidBaseline(e.to_string()));
                GlobalBaseline::default()
            }),
            (_, None) => GlobalBaseline::default(),
        };

        let artifact_paths = resolve_artifacts(&ArtifactOverrides {
            model: global.model.clone(),
            scaler: global.scaler.clone(),
            encoder: global.encoder.clone(),
            artifact_dir: global.artifact_dir.clone(),
            settings_dir: settings.artifact_dir.clone(),
        });

        Runtime {
            ctx,
            settings,
            settings_error,
            baseline,
            baseline_error,
            config_paths,
            artifact_paths,
        }
    }

    /// Fail on a broken settings file or baseline table.
    fn require_config(&mut self) -> Result<()> {
        if let Some(err) = self.settings_error.take() {
            return Err(err);
        }
        if let Some(err) = self.baseline_error.take() {
            return Err(err);
        }
        Ok(())
    }

    fn engine(&self) -> InferenceEngine {
        InferenceEngine::load(&self.artifact_paths)
    }

    fn top_k(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.settings.top_k)
    }
}

fn main() {
    let cli = Cli::parse();
    let global = &cli.global;

    let run_id = generate_run_id();
    let ctx = LogContext::new(run_id);
    let mut runtime = Runtime::load(global, ctx);

    let log_config = LogConfig::resolve(
        runtime.settings.log_level.as_deref(),
        runtime.settings.log_format.as_deref(),
        LogConfig::level_from_verbosity(global.verbose, global.quiet),
        None::<LogFormat>,
    );
    init_logging(&log_config);

    log_event!(
        runtime.ctx,
        INFO,
        event_names::RUN_STARTED,
        Stage::Init,
        "pi-core started",
        version = env!("CARGO_PKG_VERSION")
    );
    let settings_source = runtime.config_paths.settings_source.to_string();
    let baseline_source = runtime.config_paths.baseline_source.to_string();
    match (&runtime.config_paths.settings, &runtime.config_paths.baseline) {
        (None, None) => log_event!(
            runtime.ctx,
            DEBUG,
            event_names::CONFIG_DEFAULT_USED,
            Stage::Init,
            "No settings or baseline file; using built-in defaults"
        ),
        _ => log_event!(
            runtime.ctx,
            DEBUG,
            event_names::CONFIG_LOADED,
            Stage::Init,
            "Configuration resolved",
            settings_source = settings_source.as_str(),
            baseline_source = baseline_source.as_str()
        ),
    }
    for error in [&runtime.settings_error, &runtime.baseline_error].into_iter().flatten() {
        let reason = error.to_string();
        log_event!(
            runtime.ctx,
            WARN,
            event_names::CONFIG_ERROR,
            Stage::Init,
            "Configuration rejected",
            code = error.code(),
            reason = reason.as_str()
        );
    }

    let exit_code = match cli.command {
        None => {
            let _ = Cli::command().print_help();
            ExitCode::ArgsError
        }
        Some(Commands::Predict(args)) => run_predict(global, &mut runtime, &args),
        Some(Commands::Explain(args)) => run_explain(global, &mut runtime, &args),
        Some(Commands::Traits) => run_traits(global, &mut runtime),
        Some(Commands::Export(args)) => run_export(global, &mut runtime, &args),
        Some(Commands::Repl) => run_repl(global, &mut runtime),
        Some(Commands::Check) => run_check(global, &runtime),
        Some(Commands::Schema(args)) => run_schema(global, &args),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "pi-core", &mut std::io::stdout());
            ExitCode::Clean
        }
        Some(Commands::Version) => {
            print_version(global);
            ExitCode::Clean
        }
    };

    log_event!(
        runtime.ctx,
        INFO,
        event_names::RUN_FINISHED,
        Stage::Init,
        "pi-core finished",
        exit_code = exit_code.as_i32()
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command handlers
// ============================================================================

fn run_predict(global: &GlobalOpts, rt: &mut Runtime, args: &PredictArgs) -> ExitCode {
    finish(global, predict_command(global, rt, args))
}

fn predict_command(global: &GlobalOpts, rt: &mut Runtime, args: &PredictArgs) -> Result<()> {
    rt.require_config()?;
    let traits = collect_traits(&rt.ctx, &args.input)?;
    let engine = rt.engine();
    let artifact = engine.artifact()?.clone();

    let mut session = Session::new();
    let result = session.run(&engine, &traits)?.clone();
    log_event!(
        rt.ctx,
        INFO,
        event_names::INFER_FINISHED,
        Stage::Infer,
        "Prediction ready",
        class = result.predicted_class.as_str(),
        confidence = result.confidence
    );

    let report = PredictionReport::build(
        session.id(),
        &artifact,
        result,
        &rt.baseline,
        rt.top_k(args.top_k),
    )?;
    log_event!(
        rt.ctx,
        DEBUG,
        event_names::ANALYZE_FINISHED,
        Stage::Analyze,
        "Analytics ready",
        top_k = report.top_features.len()
    );

    match global.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Md => print!("{}", render_prediction_markdown(&report)),
        OutputFormat::Summary => {
            println!("{}", render_summary(report.session_id.as_str(), &report.prediction))
        }
    }
    Ok(())
}

fn run_explain(global: &GlobalOpts, rt: &mut Runtime, args: &ExplainArgs) -> ExitCode {
    finish(global, explain_command(global, rt, args))
}

fn explain_command(global: &GlobalOpts, rt: &mut Runtime, args: &ExplainArgs) -> Result<()> {
    rt.require_config()?;
    let engine = rt.engine();
    let artifact = engine.artifact()?.clone();

    let class_index = match (&args.class, args.input.is_empty()) {
        (Some(name), _) => artifact.encoder().encode(name).ok_or_else(|| {
            Error::Config(format!(
                "unknown class '{}'; expected one of: {}",
                name,
                artifact.classes().join(", ")
            ))
        })?,
        (None, false) => {
            let traits = collect_traits(&rt.ctx, &args.input)?;
            engine.predict(&traits)?.class_index
        }
        (None, true) => {
            return Err(Error::Config(
                "pass --class or trait scores to choose the class to explain".to_string(),
            ))
        }
    };

    let report = ExplainReport::build(&artifact, class_index, rt.top_k(args.top_k))?;
    match global.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Md => print!("{}", render_explain_markdown(&report)),
        OutputFormat::Summary => {
            let names: Vec<String> = report
                .features
                .iter()
                .map(|f| format!("{} {:+.3}", f.trait_name, f.weight))
                .collect();
            println!("{}: {}", report.class, names.join(", "));
        }
    }
    Ok(())
}

fn run_traits(global: &GlobalOpts, rt: &mut Runtime) -> ExitCode {
    finish(global, traits_command(global, rt))
}

fn traits_command(global: &GlobalOpts, rt: &mut Runtime) -> Result<()> {
    rt.require_config()?;
    let rows: Vec<(usize, &str, Domain, &str, f64)> = TRAIT_NAMES
        .iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let domain = Domain::of_index(i)?;
            let baseline = rt.baseline.value(i)?;
            Some((i, *name, domain, TRAIT_DESCRIPTIONS[i], baseline))
        })
        .collect();

    match global.format {
        OutputFormat::Json => {
            let traits: Vec<serde_json::Value> = rows
                .iter()
                .map(|(index, name, domain, description, baseline)| {
                    serde_json::json!({
                        "index": index,
                        "name": name,
                        "domain": domain,
                        "description": description,
                        "baseline": baseline,
                    })
                })
                .collect();
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "layout": LayoutInfo::current(),
                "traits": traits,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Md => {
            println!("# Trait layout ({})", LayoutInfo::current().hash);
            println!();
            println!("| # | Trait | Domain | Baseline |");
            println!("|---:|---|---|---:|");
            for (index, name, domain, _, baseline) in &rows {
                println!("| {} | {} | {} | {:.1} |", index, name, domain, baseline);
            }
        }
        OutputFormat::Summary => {
            for domain in Domain::ALL {
                println!("{}: {}", domain, domain.traits().join(", "));
            }
        }
    }
    Ok(())
}

fn run_export(global: &GlobalOpts, rt: &mut Runtime, args: &ExportArgs) -> ExitCode {
    finish(global, export_command(global, rt, args))
}

fn export_command(global: &GlobalOpts, rt: &mut Runtime, args: &ExportArgs) -> Result<()> {
    rt.require_config()?;
    let traits = collect_traits(&rt.ctx, &args.input)?;
    let engine = rt.engine();
    let artifact = engine.artifact()?.clone();

    let mut session = Session::new();
    let result = session.run(&engine, &traits)?.clone();

    let payload = ExportPayload::new(session.id(), &result, artifact.model_architecture());
    let json = payload.to_json()?;
    let csv = to_csv(&result.traits);

    let mut targets: Vec<(ExportKind, PathBuf)> = Vec::new();
    if let Some(path) = &args.json {
        targets.push((ExportKind::Json, path.clone()));
    }
    if let Some(path) = &args.csv {
        targets.push((ExportKind::Csv, path.clone()));
    }
    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)?;
        for kind in [ExportKind::Json, ExportKind::Csv] {
            targets.push((kind, dir.join(kind.file_name(session.id()))));
        }
    }

    let contents = |kind: ExportKind| match kind {
        ExportKind::Json => json.as_str(),
        ExportKind::Csv => csv.as_str(),
    };

    if targets.is_empty() && !args.data_uri {
        println!("{}", json);
        return Ok(());
    }

    let mut files = Vec::new();
    for (kind, path) in &targets {
        write_export(path, *kind, contents(*kind))?;
        files.push(serde_json::json!({
            "mime": kind.mime(),
            "path": path.display().to_string(),
        }));
    }

    match global.format {
        OutputFormat::Json => {
            let mut response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "session_id": session.id(),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "predicted_class": result.predicted_class,
                "confidence": result.confidence,
                "files": files,
            });
            if args.data_uri {
                response["data_uris"] = serde_json::json!({
                    "json": data_uri(ExportKind::Json.mime(), json.as_bytes()),
                    "csv": data_uri(ExportKind::Csv.mime(), csv.as_bytes()),
                });
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Md | OutputFormat::Summary => {
            println!("{}", render_summary(session.id().as_str(), &result));
            for (_, path) in &targets {
                println!("wrote {}", path.display());
            }
            if args.data_uri {
                for kind in [ExportKind::Json, ExportKind::Csv] {
                    println!("{}", data_uri(kind.mime(), contents(kind).as_bytes()));
                }
            }
        }
    }
    Ok(())
}

/// Reads stdin until EOF or `quit`. Errors on a line are reported and the
/// loop keeps going; the exit code only reflects configuration problems.
fn run_repl(global: &GlobalOpts, rt: &mut Runtime) -> ExitCode {
    if let Err(e) = rt.require_config() {
        return output_error(global, &e);
    }
    let engine = rt.engine();
    let mut session = Session::new();
    let session_id = session.id().clone();
    let ctx = rt.ctx.clone().with_session_id(session_id.to_string());
    log_event!(
        ctx,
        INFO,
        event_names::SESSION_STARTED,
        Stage::Init,
        "Session started",
        artifacts_available = engine.is_available()
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => return output_error(global, &Error::Io(e)),
        };
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                let _ = writeln!(
                    stdout,
                    "Enter {} scores (0-{}) in canonical order, `last`, `clear` or `quit`.",
                    TRAIT_NAMES.len(),
                    TRAIT_MAX
                );
            }
            "clear" => {
                session.clear();
            }
            "last" => match session.last() {
                Some(result) => {
                    let _ = writeln!(stdout, "{}", repl_line(global, &session_id, result));
                }
                None => eprintln!("no prediction yet"),
            },
            _ => {
                let outcome = parse_score_line(line).and_then(|traits| {
                    session
                        .run(&engine, &traits)
                        .map(|result| repl_line(global, &session_id, result))
                });
                match outcome {
                    Ok(rendered) => {
                        let _ = writeln!(stdout, "{}", rendered);
                    }
                    Err(e) => {
                        log_event!(
                            ctx,
                            WARN,
                            event_names::INFER_FAILED,
                            Stage::Infer,
                            "Line rejected",
                            code = e.code()
                        );
                        report_error(global, &e);
                    }
                }
            }
        }
        let _ = stdout.flush();
    }
    ExitCode::Clean
}

fn repl_line(
    global: &GlobalOpts,
    session_id: &SessionId,
    result: &pi_core::PredictionResult,
) -> String {
    match global.format {
        OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
        OutputFormat::Md | OutputFormat::Summary => render_summary(session_id.as_str(), result),
    }
}

fn run_check(global: &GlobalOpts, rt: &Runtime) -> ExitCode {
    let session_id = SessionId::new();
    let mut checks: Vec<serde_json::Value> = Vec::new();
    let mut exit_code = ExitCode::Clean;

    let layout = LayoutInfo::current();
    checks.push(serde_json::json!({
        "check": "layout",
        "status": "ok",
        "hash": layout.hash,
        "trait_count": layout.trait_count,
    }));

    for (name, error, path, source) in [
        (
            "settings",
            &rt.settings_error,
            &rt.config_paths.settings,
            &rt.config_paths.settings_source,
        ),
        (
            "baseline",
            &rt.baseline_error,
            &rt.config_paths.baseline,
            &rt.config_paths.baseline_source,
        ),
    ] {
        match error {
            None => checks.push(serde_json::json!({
                "check": name,
                "status": "ok",
                "source": source.to_string(),
                "path": path.as_ref().map(|p| p.display().to_string()),
                "using_defaults": path.is_none(),
            })),
            Some(e) => {
                exit_code = ExitCode::ArgsError;
                checks.push(serde_json::json!({
                    "check": name,
                    "status": "error",
                    "error": e.to_string(),
                }));
            }
        }
    }

    let engine = rt.engine();
    let status = engine.handle().status();
    if status.available {
        checks.push(serde_json::json!({
            "check": "artifacts",
            "status": "ok",
            "model_architecture": status.model_architecture,
            "classes": status.classes,
        }));
    } else {
        if exit_code.is_success() {
            exit_code = ExitCode::from_error_code(status.cause_code.unwrap_or(30));
        }
        checks.push(serde_json::json!({
            "check": "artifacts",
            "status": "error",
            "error": status.reason,
            "missing": status.missing,
        }));
    }

    let snapshot = ConfigSnapshot::new(&rt.artifact_paths, &rt.config_paths);

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "session_id": session_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": if exit_code.is_success() { "ok" } else { "error" },
                "checks": checks,
                "artifacts": status,
                "snapshot": snapshot,
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => println!("{}", text),
                Err(e) => return output_error(global, &Error::Json(e)),
            }
        }
        OutputFormat::Md | OutputFormat::Summary => {
            println!("# pi-core check ({})", snapshot.short_id());
            for check in &checks {
                let mark = if check["status"] == "ok" { "✓" } else { "✗" };
                let name = check["check"].as_str().unwrap_or_default();
                match check["error"].as_str() {
                    Some(error) => println!("{} {}: {}", mark, name, error),
                    None => println!("{} {}", mark, name),
                }
            }
        }
    }
    exit_code
}

fn run_schema(global: &GlobalOpts, args: &SchemaArgs) -> ExitCode {
    let format = if args.compact {
        SchemaFormat::JsonCompact
    } else {
        SchemaFormat::Json
    };

    if args.list {
        match global.format {
            OutputFormat::Json => {
                let list: Vec<serde_json::Value> = available_schemas()
                    .into_iter()
                    .map(|(name, description)| {
                        serde_json::json!({"name": name, "description": description})
                    })
                    .collect();
                println!("{}", format_schema(&serde_json::Value::Array(list), format));
            }
            OutputFormat::Md | OutputFormat::Summary => {
                for (name, description) in available_schemas() {
                    println!("{:<20} {}", name, description);
                }
            }
        }
        return ExitCode::Clean;
    }

    if args.all {
        let all = generate_all_schemas();
        match serde_json::to_value(all) {
            Ok(value) => println!("{}", format_schema(&value, format)),
            Err(e) => return output_error(global, &Error::Json(e)),
        }
        return ExitCode::Clean;
    }

    let Some(name) = &args.name else {
        return output_error(
            global,
            &Error::Config("pass a type name, --list or --all".to_string()),
        );
    };
    match generate_schema(name) {
        Some(schema) => {
            println!("{}", format_schema(&schema, format));
            ExitCode::Clean
        }
        None => output_error(
            global,
            &Error::Config(format!("unknown schema type '{}'; see `schema --list`", name)),
        ),
    }
}

fn print_version(global: &GlobalOpts) {
    let version_info = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "pi_core_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
        "layout": LayoutInfo::current(),
    });

    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&version_info) {
            Ok(text) => println!("{}", text),
            Err(_) => println!("{}", version_info),
        },
        _ => {
            println!("pi-core {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Build a trait vector from flags, a JSON file or a score line.
fn collect_traits(ctx: &LogContext, input: &TraitInput) -> Result<TraitVector> {
    let outcome = gather_traits(input);
    match &outcome {
        Ok(_) => log_event!(
            ctx,
            DEBUG,
            event_names::COLLECT_FINISHED,
            Stage::Collect,
            "Trait vector collected"
        ),
        Err(e) => log_event!(
            ctx,
            WARN,
            event_names::COLLECT_REJECTED,
            Stage::Collect,
            "Trait input rejected",
            code = e.code()
        ),
    }
    outcome
}

fn gather_traits(input: &TraitInput) -> Result<TraitVector> {
    if let Some(line) = &input.scores {
        return parse_score_line(line);
    }

    let mut collector = match &input.input {
        Some(path) => read_trait_file(path)?,
        None => TraitCollector::new(),
    };
    for assignment in &input.assignments {
        collector.apply(assignment)?;
    }
    if let Some(fill) = input.default {
        if collector.filled() < TRAIT_NAMES.len() {
            tracing::info!(
                event = event_names::COLLECT_DEFAULT_APPLIED,
                missing = collector.missing().len(),
                fill,
                "Filling unset traits with default"
            );
        }
        collector = collector.with_default(fill);
    }
    collector.collect()
}

fn read_trait_file(path: &Path) -> Result<TraitCollector> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    match value {
        serde_json::Value::Object(map) => TraitCollector::from_json_map(&map),
        serde_json::Value::Array(items) => {
            let mut collector = TraitCollector::new();
            if items.len() != TRAIT_NAMES.len() {
                return Err(Error::shape(TRAIT_NAMES.len(), items.len()));
            }
            for (i, item) in items.iter().enumerate() {
                let score = item.as_i64().ok_or_else(|| Error::InvalidInput {
                    trait_name: TRAIT_NAMES[i].to_string(),
                    message: format!("expected an integer, got {}", item),
                })?;
                collector.set_index(i, score)?;
            }
            Ok(collector)
        }
        other => Err(Error::InvalidInput {
            trait_name: path.display().to_string(),
            message: format!("expected a JSON object or array, got {}", other),
        }),
    }
}

fn finish(global: &GlobalOpts, outcome: Result<()>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::Clean,
        Err(e) => output_error(global, &e),
    }
}

/// Print an error to stderr and map it to an exit code.
fn output_error(global: &GlobalOpts, error: &Error) -> ExitCode {
    report_error(global, error);
    ExitCode::from(error)
}

fn report_error(global: &GlobalOpts, error: &Error) {
    match global.format {
        OutputFormat::Json => {
            let exit_code = ExitCode::from(error);
            let structured =
                StructuredError::from(error).with_context("exit_code", exit_code.code_name());
            eprintln!("{}", structured.to_json());
        }
        OutputFormat::Md | OutputFormat::Summary => {
            let use_color = !global.no_color && std::io::stderr().is_terminal();
            eprintln!("{}", format_error_human(error, use_color));
        }
    }
}
