// Configuration for the setup run: CLI flags, optional JSON config file, env vars

use crate::error::{SetupError, SetupResult};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.zcombinator.io/molt";
pub const DEFAULT_MEMORY_DIR: &str = "memory";
pub const DEFAULT_CONFIG_FILE: &str = "moltmarkets-setup.json";
/// Credentials location relative to `$HOME`
pub const CREDENTIALS_RELATIVE_PATH: &str = ".config/moltmarkets/credentials.json";

pub const ENV_API_URL: &str = "MOLTMARKETS_API_URL";
pub const ENV_CREDENTIALS: &str = "MOLTMARKETS_CREDENTIALS";

/// CLI Configuration
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "moltmarkets-setup")]
#[command(about = "Create MoltMarkets agent memory files and validate API credentials")]
pub struct CliConfig {
    /// Path to credentials.json (default: ~/.config/moltmarkets/credentials.json)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Directory where memory files are created
    #[arg(long)]
    pub memory_dir: Option<PathBuf>,

    /// MoltMarkets API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Configuration file path (JSON format, ignored if missing)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// JSON configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonConfig {
    pub setup: Option<SetupSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetupSection {
    pub credentials_path: Option<PathBuf>,
    pub memory_dir: Option<PathBuf>,
    pub api_url: Option<String>,
}

/// Fully resolved settings, passed explicitly to each setup step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    pub credentials_path: PathBuf,
    pub memory_dir: PathBuf,
    pub api_url: String,
}

impl CliConfig {
    /// Load configuration from JSON file. A missing file is not an error.
    pub fn load_json_config(&self) -> SetupResult<JsonConfig> {
        let config_path = &self.config;

        if !config_path.exists() {
            return Ok(JsonConfig::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            SetupError::Config(format!("Failed to read config file {}: {}", config_path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            SetupError::Config(format!("Failed to parse config file {}: {}", config_path.display(), e))
        })
    }

    /// Resolve every setting from CLI, config file, then environment (in that order)
    pub fn resolve(&self) -> SetupResult<SetupConfig> {
        let section = self.load_json_config()?.setup.unwrap_or_default();
        self.resolve_with(section, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        &self,
        section: SetupSection,
        env: impl Fn(&str) -> Option<String>,
    ) -> SetupResult<SetupConfig> {
        let credentials_path = match self
            .credentials
            .clone()
            .or(section.credentials_path)
            .or_else(|| env(ENV_CREDENTIALS).map(PathBuf::from))
        {
            Some(path) => path,
            None => {
                let home = env("HOME").ok_or_else(|| {
                    SetupError::Config(format!(
                        "HOME is not set; pass --credentials or set {}",
                        ENV_CREDENTIALS
                    ))
                })?;
                default_credentials_path(Path::new(&home))
            }
        };

        let memory_dir = self
            .memory_dir
            .clone()
            .or(section.memory_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEMORY_DIR));

        let api_url = self
            .api_url
            .clone()
            .or(section.api_url)
            .or_else(|| env(ENV_API_URL))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(SetupConfig {
            credentials_path,
            memory_dir,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

pub fn default_credentials_path(home: &Path) -> PathBuf {
    home.join(CREDENTIALS_RELATIVE_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_use_home_and_cwd_memory() {
        let cli = CliConfig::default();
        let cfg = cli
            .resolve_with(SetupSection::default(), env_from(&[("HOME", "/home/alice")]))
            .unwrap();
        assert_eq!(
            cfg.credentials_path,
            PathBuf::from("/home/alice/.config/moltmarkets/credentials.json")
        );
        assert_eq!(cfg.memory_dir, PathBuf::from("memory"));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn cli_beats_config_file_beats_env() {
        let cli = CliConfig {
            api_url: Some("http://cli.example/".to_string()),
            ..CliConfig::default()
        };
        let section = SetupSection {
            credentials_path: Some(PathBuf::from("/etc/mm/creds.json")),
            memory_dir: Some(PathBuf::from("state")),
            api_url: Some("http://file.example".to_string()),
        };
        let env = env_from(&[
            ("HOME", "/home/alice"),
            (ENV_API_URL, "http://env.example"),
            (ENV_CREDENTIALS, "/env/creds.json"),
        ]);
        let cfg = cli.resolve_with(section, env).unwrap();
        assert_eq!(cfg.api_url, "http://cli.example");
        assert_eq!(cfg.credentials_path, PathBuf::from("/etc/mm/creds.json"));
        assert_eq!(cfg.memory_dir, PathBuf::from("state"));
    }

    #[test]
    fn env_used_when_nothing_else_set() {
        let cfg = CliConfig::default()
            .resolve_with(
                SetupSection::default(),
                env_from(&[(ENV_API_URL, "http://env.example"), (ENV_CREDENTIALS, "/env/creds.json")]),
            )
            .unwrap();
        assert_eq!(cfg.api_url, "http://env.example");
        assert_eq!(cfg.credentials_path, PathBuf::from("/env/creds.json"));
    }

    #[test]
    fn missing_home_is_config_error() {
        let err = CliConfig::default()
            .resolve_with(SetupSection::default(), env_from(&[]))
            .unwrap_err();
        assert!(matches!(err, SetupError::Config(_)));
    }

    #[test]
    fn config_file_is_optional_but_must_parse() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CliConfig {
            config: dir.path().join("absent.json"),
            ..CliConfig::default()
        };
        assert!(cli.load_json_config().unwrap().setup.is_none());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        let cli = CliConfig { config: bad, ..CliConfig::default() };
        assert!(matches!(cli.load_json_config(), Err(SetupError::Config(_))));

        let good = dir.path().join("good.json");
        fs::write(&good, r#"{"setup":{"memory_dir":"agent-memory"}}"#).unwrap();
        let cli = CliConfig { config: good, ..CliConfig::default() };
        let section = cli.load_json_config().unwrap().setup.unwrap();
        assert_eq!(section.memory_dir, Some(PathBuf::from("agent-memory")));
    }
}
