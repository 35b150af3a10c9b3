use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::PathBuf;

/// Path length trackers accept for a file inside a release, in bytes.
pub const DEFAULT_MAX_PATH_BYTES: usize = 180;
/// Longest single path component common filesystems allow, in bytes.
pub const DEFAULT_SEGMENT_BYTES: usize = 255;

// --- Public config types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Budget for `release_dir/relative/file.ext`, measured from the release directory.
    pub max_path_bytes: usize,
    /// Cap on any single name produced.
    pub segment_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_path_bytes: DEFAULT_MAX_PATH_BYTES,
            segment_bytes: DEFAULT_SEGMENT_BYTES,
        }
    }
}

pub struct Config {
    pub limits: Limits,
}

// --- TOML deserialization types ---

#[derive(Deserialize, Default)]
struct FileConfig {
    limits: Option<LimitsFileSection>,
}

#[derive(Deserialize)]
struct LimitsFileSection {
    max_path_bytes: Option<usize>,
    segment_bytes: Option<usize>,
}

// --- Resolution ---

fn resolve_limits_from_file(fc: &FileConfig) -> Limits {
    let defaults = Limits::default();
    let section = fc.limits.as_ref();
    Limits {
        max_path_bytes: section
            .and_then(|l| l.max_path_bytes)
            .unwrap_or(defaults.max_path_bytes),
        segment_bytes: section
            .and_then(|l| l.segment_bytes)
            .unwrap_or(defaults.segment_bytes),
    }
}

fn env_usize(env: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<usize>> {
    let Some(value) = env(name).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let parsed = value
        .trim()
        .parse()
        .with_context(|| format!("{name} must be a byte count, got {value:?}"))?;
    Ok(Some(parsed))
}

fn resolve_limits(fc: &FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Limits> {
    let from_file = resolve_limits_from_file(fc);
    Ok(Limits {
        max_path_bytes: env_usize(&env, "TRANSNAME_MAX_PATH_BYTES")?
            .unwrap_or(from_file.max_path_bytes),
        segment_bytes: env_usize(&env, "TRANSNAME_SEGMENT_BYTES")?
            .unwrap_or(from_file.segment_bytes),
    })
}

fn validate(limits: Limits) -> Result<Limits> {
    if limits.max_path_bytes == 0 {
        bail!("max_path_bytes must be greater than zero");
    }
    if limits.segment_bytes == 0 {
        bail!("segment_bytes must be greater than zero");
    }
    Ok(limits)
}

// --- Public API ---

fn config_path() -> PathBuf {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let home = std::env::var_os("HOME").unwrap_or_default();
            PathBuf::from(home).join(".config")
        });
    config_dir.join("transname").join("config.toml")
}

/// Parse config from TOML content only (no env vars).
/// Exposed for testing.
pub fn parse_toml_config(content: &str) -> Result<Config> {
    let fc: FileConfig = toml::from_str(content).context("Failed to parse config")?;
    Ok(Config {
        limits: validate(resolve_limits_from_file(&fc))?,
    })
}

/// Parse config from TOML content, with overrides looked up through `env`
/// instead of the process environment. Exposed for testing.
pub fn parse_config_with_env(
    content: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let fc: FileConfig = toml::from_str(content).context("Failed to parse config")?;
    Ok(Config {
        limits: validate(resolve_limits(&fc, env)?)?,
    })
}

/// Load config from file and env vars.
///
/// Precedence for each limit:
/// 1. Environment variables (TRANSNAME_MAX_PATH_BYTES, TRANSNAME_SEGMENT_BYTES)
/// 2. Config file [limits] section
/// 3. Built-in defaults
pub fn load_config() -> Result<Config> {
    let path = config_path();
    let file_contents = std::fs::read_to_string(&path).unwrap_or_default();
    parse_config_with_env(&file_contents, |name| std::env::var(name).ok())
        .with_context(|| format!("Invalid config {}", path.display()))
}
