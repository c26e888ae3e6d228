//! Tool configuration: TOML file plus environment and CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// On-disk configuration (TOML), by default at `~/.github-todotxt.toml`.
///
/// Both fields are optional; anything missing must come from the CLI or the
/// environment. A missing config file yields the empty default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// GitHub OAuth token.
    pub token: Option<String>,
    /// Path of the todo.txt file to reconcile.
    pub file: Option<PathBuf>,
}

/// Environment overrides, read once at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub token: Option<String>,
    pub file: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_process() -> Self {
        Self {
            token: std::env::var("GITHUB_TODOTXT_TOKEN").ok(),
            file: std::env::var_os("GITHUB_TODOTXT_FILE").map(PathBuf::from),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: String,
    pub file: PathBuf,
}

impl Settings {
    /// Resolve each setting with precedence CLI flag, then environment, then
    /// config file. Fails with a clear message when either setting is still
    /// missing, before any network or file access happens.
    pub fn resolve(
        cli_token: Option<String>,
        cli_file: Option<PathBuf>,
        env: EnvOverrides,
        config: Config,
    ) -> Result<Self> {
        let token = cli_token
            .or(env.token)
            .or(config.token)
            .ok_or_else(|| {
                anyhow!("no github token: pass --token, set GITHUB_TODOTXT_TOKEN, or add `token` to the config file")
            })?;
        let file = cli_file
            .or(env.file)
            .or(config.file)
            .ok_or_else(|| {
                anyhow!("no todo file: pass --file, set GITHUB_TODOTXT_FILE, or add `file` to the config file")
            })?;
        Ok(Self { token, file })
    }
}

/// Default config file location, `$HOME/.github-todotxt.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".github-todotxt.toml"))
}

/// Load config from a TOML file. A missing file returns `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_parses_partial_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "token = \"abc123\"\n").expect("write");

        let config = load_config(&path).expect("load");
        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert_eq!(config.file, None);
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "token = [not toml").expect("write");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn resolve_prefers_cli_over_env_over_config() {
        let env = EnvOverrides {
            token: Some("env-token".to_string()),
            file: Some(PathBuf::from("env.txt")),
        };
        let config = Config {
            token: Some("cfg-token".to_string()),
            file: Some(PathBuf::from("cfg.txt")),
        };

        let settings =
            Settings::resolve(Some("cli-token".to_string()), None, env, config).expect("resolve");
        assert_eq!(settings.token, "cli-token");
        assert_eq!(settings.file, PathBuf::from("env.txt"));
    }

    #[test]
    fn resolve_fails_without_token() {
        let err = Settings::resolve(
            None,
            Some(PathBuf::from("todo.txt")),
            EnvOverrides::default(),
            Config::default(),
        )
        .expect_err("should fail");
        assert!(err.to_string().contains("no github token"));
    }

    #[test]
    fn resolve_fails_without_file() {
        let err = Settings::resolve(
            Some("t".to_string()),
            None,
            EnvOverrides::default(),
            Config::default(),
        )
        .expect_err("should fail");
        assert!(err.to_string().contains("no todo file"));
    }
}
