//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → settings file →
//! XDG paths → defaults.
//!
//! Config files (baseline, settings) resolve to `None` when nothing is found
//! and the built-in values apply. Artifact files always resolve to a path,
//! even one that does not exist, so the loader can name what is missing.

use std::path::{Path, PathBuf};

/// Where a configuration or artifact file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Taken from `artifact_dir` in settings.toml.
    SettingsFile,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/personality-inference/.
    SystemConfig,

    /// Using built-in defaults (or, for artifacts, the working directory).
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::SettingsFile => write!(f, "settings file"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
const ENV_MODEL_PATH: &str = "PI_MODEL_PATH";
const ENV_SCALER_PATH: &str = "PI_SCALER_PATH";
const ENV_ENCODER_PATH: &str = "PI_ENCODER_PATH";
const ENV_ARTIFACT_DIR: &str = "PI_ARTIFACT_DIR";
const ENV_BASELINE_PATH: &str = "PI_BASELINE";
const ENV_SETTINGS_PATH: &str = "PI_SETTINGS";
const ENV_CONFIG_DIR: &str = "PI_CONFIG_DIR";

/// Standard config file names.
const BASELINE_FILENAME: &str = "baseline.json";
const SETTINGS_FILENAME: &str = "settings.toml";

/// Application name for XDG directories.
const APP_NAME: &str = "personality-inference";

/// One of the three classifier artifact files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Model,
    Scaler,
    Encoder,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Model,
        ArtifactKind::Scaler,
        ArtifactKind::Encoder,
    ];

    /// File name looked up inside an artifact directory.
    pub fn default_filename(self) -> &'static str {
        match self {
            ArtifactKind::Model => "model.json",
            ArtifactKind::Scaler => "scaler.json",
            ArtifactKind::Encoder => "encoder.json",
        }
    }

    /// Environment variable holding a direct path to this file.
    pub fn env_var(self) -> &'static str {
        match self {
            ArtifactKind::Model => ENV_MODEL_PATH,
            ArtifactKind::Scaler => ENV_SCALER_PATH,
            ArtifactKind::Encoder => ENV_ENCODER_PATH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::Encoder => "encoder",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Explicit artifact locations from the command line and settings file.
#[derive(Debug, Clone, Default)]
pub struct ArtifactOverrides {
    pub model: Option<PathBuf>,
    pub scaler: Option<PathBuf>,
    pub encoder: Option<PathBuf>,
    /// `--artifact-dir`.
    pub artifact_dir: Option<PathBuf>,
    /// `artifact_dir` from settings.toml; ranks below the environment.
    pub settings_dir: Option<PathBuf>,
}

impl ArtifactOverrides {
    fn file(&self, kind: ArtifactKind) -> Option<&Path> {
        match kind {
            ArtifactKind::Model => self.model.as_deref(),
            ArtifactKind::Scaler => self.scaler.as_deref(),
            ArtifactKind::Encoder => self.encoder.as_deref(),
        }
    }
}

/// A resolved artifact location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub source: ConfigSource,
}

impl ResolvedArtifact {
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Resolved locations of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: ResolvedArtifact,
    pub scaler: ResolvedArtifact,
    pub encoder: ResolvedArtifact,
}

impl ArtifactPaths {
    /// All three files expected in one directory.
    pub fn in_dir(dir: &Path) -> Self {
        let at = |kind: ArtifactKind| ResolvedArtifact {
            kind,
            path: dir.join(kind.default_filename()),
            source: ConfigSource::CliArgument,
        };
        ArtifactPaths {
            model: at(ArtifactKind::Model),
            scaler: at(ArtifactKind::Scaler),
            encoder: at(ArtifactKind::Encoder),
        }
    }

    pub fn get(&self, kind: ArtifactKind) -> &ResolvedArtifact {
        match kind {
            ArtifactKind::Model => &self.model,
            ArtifactKind::Scaler => &self.scaler,
            ArtifactKind::Encoder => &self.encoder,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedArtifact> {
        [&self.model, &self.scaler, &self.encoder].into_iter()
    }

    /// Kinds whose resolved path is not a readable file.
    pub fn missing(&self) -> Vec<ArtifactKind> {
        self.iter().filter(|a| !a.exists()).map(|a| a.kind).collect()
    }
}

/// Resolve artifact paths.
///
/// Resolution order for each file:
/// 1. Explicit CLI file path (`--model`, `--scaler`, `--encoder`)
/// 2. CLI `--artifact-dir` + filename
/// 3. Environment variable (PI_MODEL_PATH, PI_SCALER_PATH, PI_ENCODER_PATH)
/// 4. PI_ARTIFACT_DIR environment variable + filename
/// 5. `artifact_dir` from settings.toml + filename
/// 6. XDG config directory (~/.config/personality-inference/), if the file exists
/// 7. Working directory + filename
///
/// Steps 1-5 are authoritative: a named location that does not exist is
/// reported as missing instead of falling through.
pub fn resolve_artifacts(overrides: &ArtifactOverrides) -> ArtifactPaths {
    ArtifactPaths {
        model: resolve_single_artifact(ArtifactKind::Model, overrides),
        scaler: resolve_single_artifact(ArtifactKind::Scaler, overrides),
        encoder: resolve_single_artifact(ArtifactKind::Encoder, overrides),
    }
}

fn resolve_single_artifact(kind: ArtifactKind, overrides: &ArtifactOverrides) -> ResolvedArtifact {
    let filename = kind.default_filename();
    let found = |path: PathBuf, source: ConfigSource| ResolvedArtifact { kind, path, source };

    if let Some(path) = overrides.file(kind) {
        return found(path.to_path_buf(), ConfigSource::CliArgument);
    }

    if let Some(dir) = &overrides.artifact_dir {
        return found(dir.join(filename), ConfigSource::CliArgument);
    }

    if let Some(path) = env_path(kind.env_var()) {
        return found(path, ConfigSource::Environment);
    }

    if let Some(dir) = env_path(ENV_ARTIFACT_DIR) {
        return found(dir.join(filename), ConfigSource::Environment);
    }

    if let Some(dir) = &overrides.settings_dir {
        return found(dir.join(filename), ConfigSource::SettingsFile);
    }

    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(filename);
        if path.is_file() {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    found(PathBuf::from(filename), ConfigSource::BuiltinDefault)
}

/// Discovered configuration file paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to baseline.json (or None if not found).
    pub baseline: Option<PathBuf>,

    /// Path to settings.toml (or None if not found).
    pub settings: Option<PathBuf>,

    /// Source of the baseline table (for diagnostics).
    pub baseline_source: ConfigSource,

    /// Source of the settings file (for diagnostics).
    pub settings_source: ConfigSource,
}

/// Resolve configuration file paths using the standard resolution order.
///
/// Resolution order for each config file:
/// 1. Explicit CLI path (if provided and present)
/// 2. Environment variable (PI_BASELINE, PI_SETTINGS)
/// 3. PI_CONFIG_DIR environment variable + filename
/// 4. XDG config directory (~/.config/personality-inference/)
/// 5. System config (/etc/personality-inference/)
/// 6. Built-in defaults (None)
pub fn resolve_config(cli_baseline: Option<&Path>, cli_settings: Option<&Path>) -> ConfigPaths {
    let mut paths = ConfigPaths::default();

    paths.baseline = resolve_single_config(
        cli_baseline,
        ENV_BASELINE_PATH,
        BASELINE_FILENAME,
        &mut paths.baseline_source,
    );

    paths.settings = resolve_single_config(
        cli_settings,
        ENV_SETTINGS_PATH,
        SETTINGS_FILENAME,
        &mut paths.settings_source,
    );

    paths
}

/// Resolve a single configuration file path.
fn resolve_single_config(
    cli_path: Option<&Path>,
    env_var: &str,
    filename: &str,
    source: &mut ConfigSource,
) -> Option<PathBuf> {
    // 1. CLI argument
    if let Some(path) = cli_path {
        if path.exists() {
            *source = ConfigSource::CliArgument;
            return Some(path.to_path_buf());
        }
    }

    // 2. Environment variable (direct path)
    if let Some(path) = env_path(env_var) {
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 3. Environment variable (config dir)
    if let Some(config_dir) = env_path(ENV_CONFIG_DIR) {
        let path = config_dir.join(filename);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(filename);
        if path.exists() {
            *source = ConfigSource::XdgConfig;
            return Some(path);
        }
    }

    // 5. System config
    let system_path = system_config_dir().join(filename);
    if system_path.exists() {
        *source = ConfigSource::SystemConfig;
        return Some(system_path);
    }

    // 6. Built-in default (None)
    *source = ConfigSource::BuiltinDefault;
    None
}

fn env_path(var: &str) -> Option<PathBuf> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

/// Get the XDG config directory for personality-inference.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
