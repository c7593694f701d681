//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.voyage/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::catalog::{Catalog, CatalogError};
use crate::core::gesture::{DEFAULT_DISTANCE_THRESHOLD, DEFAULT_HOLD_THRESHOLD_MS, GestureSettings};
use crate::core::screen::Screen;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VoyageConfig {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub tui: TuiConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GestureConfig {
    pub distance_threshold: Option<f32>,
    pub hold_threshold_ms: Option<u64>,
    pub bare_flick_navigates: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub state_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TuiConfig {
    pub units_per_column: Option<f32>,
}

/// Replacement item lists. Screens left out keep the bundled content.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContentConfig {
    pub destination: Option<Vec<String>>,
    pub crew: Option<Vec<String>>,
    pub technology: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_UNITS_PER_COLUMN: f32 = 8.0;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Where navigation state is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageTarget {
    File(PathBuf),
    /// Nothing survives the process.
    Memory,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub gesture: GestureSettings,
    pub storage: StorageTarget,
    pub units_per_column: f32,
    pub catalog: Catalog,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub state_file: Option<PathBuf>,
    pub ephemeral: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Content(CatalogError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Content(e) => write!(f, "config content error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.voyage/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".voyage").join("config.toml"))
}

/// Load config from `~/.voyage/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `VoyageConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<VoyageConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(VoyageConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(VoyageConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: VoyageConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Voyage Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [gesture]
# distance_threshold = 50.0          # Or set VOYAGE_SWIPE_DISTANCE
# hold_threshold_ms = 500            # Or set VOYAGE_HOLD_MS
# bare_flick_navigates = false       # Quick flicks on home change screen

# [storage]
# state_file = "~/.voyage/state.json" # Or set VOYAGE_STATE_FILE / --state-file

# [tui]
# units_per_column = 8.0             # Touch units per terminal column

# [content]
# destination = ["Moon", "Mars", "Europa", "Titan"]
# crew = ["Douglas Hurley", "Mark Shuttleworth", "Victor Glover", "Anousheh Ansari"]
# technology = ["Launch vehicle", "Spaceport", "Space capsule"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &VoyageConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    // Gesture thresholds: env → config → default
    let distance = env_parse::<f32>("VOYAGE_SWIPE_DISTANCE")
        .and_then(valid_distance)
        .or_else(|| config.gesture.distance_threshold.and_then(valid_distance))
        .unwrap_or(DEFAULT_DISTANCE_THRESHOLD);
    let hold_ms = env_parse::<u64>("VOYAGE_HOLD_MS")
        .or(config.gesture.hold_threshold_ms)
        .unwrap_or(DEFAULT_HOLD_THRESHOLD_MS);

    // Storage: --ephemeral → --state-file → env → config → default
    let storage = if cli.ephemeral {
        StorageTarget::Memory
    } else {
        let path = cli
            .state_file
            .clone()
            .or_else(|| std::env::var("VOYAGE_STATE_FILE").ok().map(|p| expand_home(&p)))
            .or_else(|| config.storage.state_file.as_deref().map(expand_home))
            .or_else(crate::persistence::FileStore::default_path);
        match path {
            Some(path) => StorageTarget::File(path),
            None => {
                warn!("No home directory for the state file, keeping state in memory");
                StorageTarget::Memory
            }
        }
    };

    Ok(ResolvedConfig {
        gesture: GestureSettings {
            distance,
            hold_ms,
            bare_flick_navigates: config.gesture.bare_flick_navigates.unwrap_or(false),
        },
        storage,
        units_per_column: config
            .tui
            .units_per_column
            .filter(|units| *units > 0.0)
            .unwrap_or(DEFAULT_UNITS_PER_COLUMN),
        catalog: resolve_catalog(&config.content).map_err(ConfigError::Content)?,
    })
}

/// Overlays configured item lists on the bundled catalog.
fn resolve_catalog(content: &ContentConfig) -> Result<Catalog, CatalogError> {
    if content.destination.is_none() && content.crew.is_none() && content.technology.is_none() {
        return Ok(Catalog::bundled());
    }
    let bundled = Catalog::bundled();
    let pick = |screen: Screen, configured: &Option<Vec<String>>| {
        let items = configured
            .clone()
            .unwrap_or_else(|| bundled.items(screen).to_vec());
        (screen, items)
    };
    Catalog::new([
        pick(Screen::Destination, &content.destination),
        pick(Screen::Crew, &content.crew),
        pick(Screen::Technology, &content.technology),
    ])
}

/// Swipe distance must be a finite, non-negative number of units.
fn valid_distance(distance: f32) -> Option<f32> {
    if distance.is_finite() && distance >= 0.0 {
        Some(distance)
    } else {
        warn!("Ignoring swipe distance {distance}");
        None
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}", name, raw);
            None
        }
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
