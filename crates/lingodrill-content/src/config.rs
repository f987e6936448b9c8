//! Configuration file loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lingodrill_core::generator::TestRatios;
use lingodrill_core::traits::PoolLimits;

/// Written by `lingodrill init`.
pub const SAMPLE_CONFIG: &str = r#"# lingodrill configuration

[api]
base_url = "http://localhost:5000/api"
# token = "${LINGODRILL_API_TOKEN}"
timeout_secs = 30

[test]
count = 50
duration_secs = 1200
vocab_ratio = 0.4
sentence_ratio = 0.3
reading_ratio = 0.3

[speed_round]
deadline_secs = 2.0

[fetch]
vocab_limit = 10000
sentence_limit = 10000
questions_per_unit = 100
# source_tags = ["HSK1", "HSK2"]
"#;

/// Where the Content API lives and how to authenticate.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Composite test settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    /// Session length of the paced modes.
    #[serde(default = "default_duration")]
    pub duration_secs: u64,
    #[serde(default = "default_vocab_ratio")]
    pub vocab_ratio: f64,
    #[serde(default = "default_other_ratio")]
    pub sentence_ratio: f64,
    #[serde(default = "default_other_ratio")]
    pub reading_ratio: f64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            duration_secs: default_duration(),
            vocab_ratio: default_vocab_ratio(),
            sentence_ratio: default_other_ratio(),
            reading_ratio: default_other_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedRoundConfig {
    #[serde(default = "default_deadline")]
    pub deadline_secs: f64,
}

impl Default for SpeedRoundConfig {
    fn default() -> Self {
        Self {
            deadline_secs: default_deadline(),
        }
    }
}

/// How much content to pull when loading pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_limit")]
    pub vocab_limit: usize,
    #[serde(default = "default_limit")]
    pub sentence_limit: usize,
    #[serde(default = "default_questions_per_unit")]
    pub questions_per_unit: usize,
    #[serde(default)]
    pub source_tags: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            vocab_limit: default_limit(),
            sentence_limit: default_limit(),
            questions_per_unit: default_questions_per_unit(),
            source_tags: Vec::new(),
        }
    }
}

/// Top-level lingodrill configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LingodrillConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub test: TestConfig,
    #[serde(default)]
    pub speed_round: SpeedRoundConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_count() -> usize {
    50
}
fn default_duration() -> u64 {
    20 * 60
}
fn default_vocab_ratio() -> f64 {
    0.4
}
fn default_other_ratio() -> f64 {
    0.3
}
fn default_deadline() -> f64 {
    2.0
}
fn default_limit() -> usize {
    10_000
}
fn default_questions_per_unit() -> usize {
    100
}

impl LingodrillConfig {
    pub fn ratios(&self) -> TestRatios {
        TestRatios {
            vocab: self.test.vocab_ratio,
            sentence: self.test.sentence_ratio,
            reading: self.test.reading_ratio,
        }
    }

    pub fn pool_limits(&self) -> PoolLimits {
        PoolLimits {
            vocab_limit: self.fetch.vocab_limit,
            sentence_limit: self.fetch.sentence_limit,
            questions_per_unit: self.fetch.questions_per_unit,
            source_tags: self.fetch.source_tags.clone(),
        }
    }

    pub fn session_duration(&self) -> Duration {
        Duration::from_secs(self.test.duration_secs)
    }

    /// Speed-round deadline. Negative or non-finite values fall back to 2s.
    pub fn deadline(&self) -> Duration {
        Duration::try_from_secs_f64(self.speed_round.deadline_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(default_deadline()))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Apply `LINGODRILL_API_URL` / `LINGODRILL_API_TOKEN` overrides, then
/// resolve `${VAR}` references in the API section.
fn apply_env(config: &mut LingodrillConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("LINGODRILL_API_URL") {
        config.api.base_url = url;
    }
    if let Some(token) = var("LINGODRILL_API_TOKEN") {
        config.api.token = Some(token);
    }

    config.api.base_url = resolve_env_vars(&config.api.base_url);
    config.api.token = config
        .api
        .token
        .as_deref()
        .map(resolve_env_vars)
        .filter(|t| !t.is_empty());
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lingodrill.toml` in the current directory
/// 2. `~/.config/lingodrill/config.toml`
///
/// Environment variable overrides: `LINGODRILL_API_URL`, `LINGODRILL_API_TOKEN`.
pub fn load_config() -> Result<LingodrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LingodrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lingodrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LingodrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LingodrillConfig::default(),
    };

    apply_env(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lingodrill"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_LINGODRILL_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_LINGODRILL_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_LINGODRILL_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_LINGODRILL_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = LingodrillConfig::default();
        assert_eq!(config.test.count, 50);
        assert_eq!(config.session_duration(), Duration::from_secs(1200));
        assert_eq!(config.deadline(), Duration::from_secs(2));
        assert_eq!(config.fetch.questions_per_unit, 100);
        assert_eq!(config.ratios(), TestRatios::default());
    }

    #[test]
    fn sample_config_parses() {
        let config: LingodrillConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert!(config.api.token.is_none());
        assert_eq!(config.pool_limits(), PoolLimits::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
[api]
token = "secret"

[test]
count = 10
vocab_ratio = 1.0
sentence_ratio = 0.0
reading_ratio = 0.0

[speed_round]
deadline_secs = 1.5
"#;
        let config: LingodrillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.test.count, 10);
        assert_eq!(config.test.duration_secs, 1200);
        assert_eq!(config.ratios().vocab, 1.0);
        assert_eq!(config.deadline(), Duration::from_millis(1500));
    }

    #[test]
    fn bad_deadline_falls_back() {
        let mut config = LingodrillConfig::default();
        config.speed_round.deadline_secs = -1.0;
        assert_eq!(config.deadline(), Duration::from_secs(2));
    }

    #[test]
    fn debug_masks_token() {
        let api = ApiConfig {
            token: Some("super-secret".into()),
            ..Default::default()
        };
        let debug = format!("{api:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = LingodrillConfig::default();
        config.api.token = Some("from-file".into());
        apply_env(&mut config, |name| match name {
            "LINGODRILL_API_URL" => Some("https://learn.example.com/api".into()),
            "LINGODRILL_API_TOKEN" => Some("from-env".into()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://learn.example.com/api");
        assert_eq!(config.api.token.as_deref(), Some("from-env"));
    }

    #[test]
    fn unresolved_token_reads_as_none() {
        let mut config = LingodrillConfig::default();
        config.api.token = Some("${_LINGODRILL_UNSET_TOKEN}".into());
        apply_env(&mut config, |_| None);
        assert!(config.api.token.is_none());
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[fetch]\nvocab_limit = 25\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.fetch.vocab_limit, 25);
        assert_eq!(config.fetch.sentence_limit, 10_000);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[test\ncount = ").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }
}
