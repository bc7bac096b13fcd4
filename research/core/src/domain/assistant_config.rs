// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Assistant Configuration Types
//
// Defines the configuration schema for a research assistant process, including:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Paper datastore connection and pool sizing
// - Embedding and generation provider selection
// - Retrieval and timeout settings
// - Server and observability settings
//
// The manifest is loaded once at startup and passed by reference to the
// components that need it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::paper::DistanceMetric;

pub const API_VERSION: &str = "scholar.research/v1";
pub const KIND: &str = "AssistantConfig";

/// Provider types understood by the provider registry
pub const SUPPORTED_PROVIDER_TYPES: &[&str] = &["gemini", "openai", "openai-compatible", "ollama"];

/// Top-level Kubernetes-style assistant configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfigManifest {
    /// API version (must be "scholar.research/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "AssistantConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: AssistantConfigSpec,
}

/// Manifest metadata (Kubernetes-style)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Human-readable deployment name
    pub name: String,

    /// Optional: Configuration version for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Optional: Labels for categorization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

/// Assistant configuration (content under spec:)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfigSpec {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub embedding: EmbeddingProviderConfig,

    #[serde(default)]
    pub generation: GenerationProviderConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observability: Option<ObservabilityConfig>,
}

/// Paper datastore (PostgreSQL + pgvector)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_db_user")]
    pub user: String,

    /// Password (supports "env:VAR_NAME" for environment variables)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Upper bound of the shared connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a search waits for a free pooled connection
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,

    /// "disable", "prefer" or "require". Defaults to "disable": TLS is
    /// terminated by the database proxy in front of the store.
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            user: default_db_user(),
            password: None,
            max_connections: default_max_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            ssl_mode: default_ssl_mode(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingProviderConfig {
    /// Provider type: "gemini", "openai", "openai-compatible", "ollama"
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// API endpoint URL
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,

    /// API key (supports "env:VAR_NAME" for environment variables)
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Dimension of the stored `abstract_embedding` column
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,
}

impl Default for EmbeddingProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            endpoint: default_gemini_endpoint(),
            api_key: default_api_key(),
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProviderConfig {
    /// Provider type: "gemini", "openai", "openai-compatible", "ollama"
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,

    /// API key (supports "env:VAR_NAME" for environment variables)
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_generation_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GenerationProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            endpoint: default_gemini_endpoint(),
            api_key: default_api_key(),
            model: default_generation_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of papers placed in the prompt
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Table holding the papers and their `abstract_embedding` column
    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default)]
    pub metric: DistanceMetric,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            table: default_table(),
            metric: DistanceMetric::default(),
        }
    }
}

/// Per-stage time limits in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_embedding_timeout")]
    pub embedding_ms: u64,

    #[serde(default = "default_search_timeout")]
    pub search_ms: u64,

    #[serde(default = "default_generation_timeout")]
    pub generation_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            embedding_ms: default_embedding_timeout(),
            search_ms: default_search_timeout(),
            generation_ms: default_generation_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Network bind address (e.g. "0.0.0.0" or "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP API port
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_api_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("json" or "text")
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus exposition
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint port
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_db_host() -> String {
    "127.0.0.1".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "research".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_ms() -> u64 {
    5_000
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key() -> Option<String> {
    Some("env:GEMINI_API_KEY".to_string())
}

fn default_embedding_model() -> String {
    "text-embedding-004".to_string()
}

fn default_embedding_dimension() -> usize {
    768
}

fn default_generation_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    crate::domain::llm::GROUNDED_TEMPERATURE
}

fn default_max_output_tokens() -> u32 {
    crate::domain::llm::GROUNDED_MAX_OUTPUT_TOKENS
}

fn default_top_k() -> usize {
    5
}

fn default_table() -> String {
    "paper".to_string()
}

fn default_embedding_timeout() -> u64 {
    15_000
}

fn default_search_timeout() -> u64 {
    10_000
}

fn default_generation_timeout() -> u64 {
    120_000
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_metrics_port() -> u16 {
    9090
}

impl Default for AssistantConfigManifest {
    fn default() -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "scholar".to_string());

        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: hostname,
                version: Some("1.0.0".to_string()),
                labels: None,
            },
            spec: AssistantConfigSpec::default(),
        }
    }
}

/// Resolve a secret from config (supports "env:VAR_NAME" syntax)
pub fn resolve_secret(value: &Option<String>) -> anyhow::Result<String> {
    match value {
        Some(v) => match v.strip_prefix("env:") {
            Some(var_name) => std::env::var(var_name)
                .map_err(|_| anyhow::anyhow!("Environment variable not set: {}", var_name)),
            None => Ok(v.clone()),
        },
        None => Ok(String::new()), // For local providers without auth
    }
}

/// True for names usable unquoted as a Postgres table identifier
pub(crate) fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl AssistantConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. SCHOLAR_CONFIG_PATH environment variable
    /// 2. ./scholar-config.yaml (working directory)
    /// 3. ~/.scholar/config.yaml (user home)
    /// 4. /etc/scholar/config.yaml (system, Unix) or C:\ProgramData\Scholar\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("SCHOLAR_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./scholar-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".scholar").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/scholar/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\Scholar\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path (fail if missing/invalid)
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    /// This allows container deployments to inject datastore credentials
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let database = &mut self.spec.database;

        if let Some(val) = lookup("SCHOLAR_DB_HOST") {
            tracing::info!("Environment override: SCHOLAR_DB_HOST={}", val);
            database.host = val;
        }

        if let Some(val) = lookup("SCHOLAR_DB_PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: SCHOLAR_DB_PORT={}", port);
                    database.port = port;
                }
                Err(_) => tracing::warn!(
                    "Invalid value for SCHOLAR_DB_PORT: '{}'. Expected a port number. Ignoring.",
                    val
                ),
            }
        }

        if let Some(val) = lookup("SCHOLAR_DB_NAME") {
            tracing::info!("Environment override: SCHOLAR_DB_NAME={}", val);
            database.name = val;
        }

        if let Some(val) = lookup("SCHOLAR_DB_USER") {
            tracing::info!("Environment override: SCHOLAR_DB_USER={}", val);
            database.user = val;
        }

        if let Some(val) = lookup("SCHOLAR_DB_PASSWORD") {
            tracing::info!("Environment override: SCHOLAR_DB_PASSWORD (length {})", val.len());
            database.password = Some(val);
        }

        if let Some(val) = lookup("SCHOLAR_TOP_K") {
            match val.parse::<usize>() {
                Ok(top_k) => {
                    tracing::info!("Environment override: SCHOLAR_TOP_K={}", top_k);
                    self.spec.retrieval.top_k = top_k;
                }
                Err(_) => tracing::warn!(
                    "Invalid value for SCHOLAR_TOP_K: '{}'. Expected a positive integer. Ignoring.",
                    val
                ),
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let spec = &self.spec;

        if spec.database.host.is_empty() {
            anyhow::bail!("spec.database.host cannot be empty");
        }
        if spec.database.name.is_empty() {
            anyhow::bail!("spec.database.name cannot be empty");
        }
        if spec.database.user.is_empty() {
            anyhow::bail!("spec.database.user cannot be empty");
        }
        if spec.database.max_connections == 0 {
            anyhow::bail!("spec.database.max_connections must be at least 1");
        }
        if !["disable", "prefer", "require"].contains(&spec.database.ssl_mode.as_str()) {
            anyhow::bail!(
                "Invalid spec.database.ssl_mode: '{}'. Expected disable, prefer or require",
                spec.database.ssl_mode
            );
        }

        for (section, provider_type, endpoint, model) in [
            (
                "embedding",
                &spec.embedding.provider_type,
                &spec.embedding.endpoint,
                &spec.embedding.model,
            ),
            (
                "generation",
                &spec.generation.provider_type,
                &spec.generation.endpoint,
                &spec.generation.model,
            ),
        ] {
            if !SUPPORTED_PROVIDER_TYPES.contains(&provider_type.as_str()) {
                anyhow::bail!(
                    "Unsupported {} provider type: '{}'. Expected one of {:?}",
                    section,
                    provider_type,
                    SUPPORTED_PROVIDER_TYPES
                );
            }
            if endpoint.is_empty() {
                anyhow::bail!("spec.{}.endpoint cannot be empty", section);
            }
            if model.is_empty() {
                anyhow::bail!("spec.{}.model cannot be empty", section);
            }
        }

        if spec.embedding.dimension == 0 {
            anyhow::bail!("spec.embedding.dimension must be at least 1");
        }

        if !(0.0..=2.0).contains(&spec.generation.temperature) {
            anyhow::bail!(
                "spec.generation.temperature must be between 0.0 and 2.0, got {}",
                spec.generation.temperature
            );
        }
        if spec.generation.max_output_tokens == 0 {
            anyhow::bail!("spec.generation.max_output_tokens must be at least 1");
        }

        if spec.retrieval.top_k == 0 {
            anyhow::bail!("spec.retrieval.top_k must be at least 1");
        }
        if !is_sql_identifier(&spec.retrieval.table) {
            anyhow::bail!(
                "spec.retrieval.table '{}' is not a valid table identifier",
                spec.retrieval.table
            );
        }

        if spec.timeouts.embedding_ms == 0
            || spec.timeouts.search_ms == 0
            || spec.timeouts.generation_ms == 0
        {
            anyhow::bail!("spec.timeouts values must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = AssistantConfigManifest::default();
        assert_eq!(manifest.api_version, "scholar.research/v1");
        assert_eq!(manifest.kind, "AssistantConfig");
        assert!(!manifest.metadata.name.is_empty());
        assert_eq!(manifest.spec.retrieval.top_k, 5);
        assert_eq!(manifest.spec.retrieval.table, "paper");
        assert_eq!(manifest.spec.generation.temperature, 0.2);
        assert_eq!(manifest.spec.generation.max_output_tokens, 5000);
        assert_eq!(manifest.spec.database.ssl_mode, "disable");
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
apiVersion: scholar.research/v1
kind: AssistantConfig
metadata:
  name: research-assistant
spec:
  database:
    host: 10.0.0.5
    name: papers
    user: reader
    password: env:DB_PASSWORD
  retrieval:
    metric: l2
"#;
        let manifest = AssistantConfigManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.spec.database.host, "10.0.0.5");
        assert_eq!(manifest.spec.database.port, 5432);
        assert_eq!(manifest.spec.database.password.as_deref(), Some("env:DB_PASSWORD"));
        assert_eq!(manifest.spec.retrieval.metric, DistanceMetric::L2);
        assert_eq!(manifest.spec.retrieval.top_k, 5);
        assert_eq!(manifest.spec.embedding.provider_type, "gemini");
        assert_eq!(manifest.spec.embedding.model, "text-embedding-004");
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scholar-config.yaml");

        let mut manifest = AssistantConfigManifest::default();
        manifest.metadata.name = "test-assistant".to_string();
        manifest.spec.generation.provider_type = "ollama".to_string();
        manifest.spec.generation.endpoint = "http://localhost:11434".to_string();
        manifest.spec.generation.api_key = None;
        manifest.spec.generation.model = "llama3.2".to_string();
        manifest.to_yaml_file(&path).unwrap();

        let parsed = AssistantConfigManifest::from_yaml_file(&path).unwrap();
        assert_eq!(parsed.metadata.name, "test-assistant");
        assert_eq!(parsed.spec.generation.provider_type, "ollama");
        assert_eq!(parsed.spec.generation.model, "llama3.2");
        assert!(parsed.spec.generation.api_key.is_none());
    }

    #[test]
    fn test_load_or_default_with_missing_explicit_path_fails() {
        let result = AssistantConfigManifest::load_or_default(Some(PathBuf::from(
            "/nonexistent/scholar-config.yaml",
        )));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut manifest = AssistantConfigManifest::default();
        let env: HashMap<&str, &str> = HashMap::from([
            ("SCHOLAR_DB_HOST", "db.internal"),
            ("SCHOLAR_DB_PORT", "6543"),
            ("SCHOLAR_DB_PASSWORD", "hunter2"),
            ("SCHOLAR_TOP_K", "not-a-number"),
        ]);
        manifest.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(manifest.spec.database.host, "db.internal");
        assert_eq!(manifest.spec.database.port, 6543);
        assert_eq!(manifest.spec.database.password.as_deref(), Some("hunter2"));
        assert_eq!(manifest.spec.database.name, "research");
        assert_eq!(manifest.spec.retrieval.top_k, 5);
    }

    #[test]
    fn test_validation() {
        let mut manifest = AssistantConfigManifest::default();
        assert!(manifest.validate().is_ok());

        manifest.api_version = "wrong/v1".to_string();
        assert!(manifest.validate().is_err());
        manifest.api_version = API_VERSION.to_string();

        manifest.kind = "NodeConfig".to_string();
        assert!(manifest.validate().is_err());
        manifest.kind = KIND.to_string();

        manifest.spec.retrieval.top_k = 0;
        assert!(manifest.validate().is_err());
        manifest.spec.retrieval.top_k = 5;

        manifest.spec.retrieval.table = "paper; DROP TABLE paper".to_string();
        assert!(manifest.validate().is_err());
        manifest.spec.retrieval.table = "paper_v2".to_string();
        assert!(manifest.validate().is_ok());

        manifest.spec.embedding.provider_type = "unknown".to_string();
        assert!(manifest.validate().is_err());
        manifest.spec.embedding.provider_type = "ollama".to_string();

        manifest.spec.generation.temperature = 3.5;
        assert!(manifest.validate().is_err());
        manifest.spec.generation.temperature = 0.2;

        manifest.spec.database.ssl_mode = "verify-full".to_string();
        assert!(manifest.validate().is_err());
        manifest.spec.database.ssl_mode = "require".to_string();

        manifest.spec.timeouts.search_ms = 0;
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_resolve_secret() {
        assert_eq!(resolve_secret(&None).unwrap(), "");
        assert_eq!(resolve_secret(&Some("plain-key".to_string())).unwrap(), "plain-key");
        assert!(resolve_secret(&Some("env:SCHOLAR_TEST_UNSET_VARIABLE_91".to_string())).is_err());
    }

    #[test]
    fn test_sql_identifier() {
        assert!(is_sql_identifier("paper"));
        assert!(is_sql_identifier("_papers2"));
        assert!(!is_sql_identifier("2papers"));
        assert!(!is_sql_identifier("public.paper"));
        assert!(!is_sql_identifier(""));
    }
}
