// src/config/mod.rs

//! Layered configuration for the admin panel
//!
//! Layers are merged in priority order (lowest first):
//! - built-in defaults
//! - configuration files (YAML, JSON, TOML, chosen by extension)
//! - in-memory overrides
//! - environment variables (`STOREFRONT_SECTION__KEY=value`)
//!
//! The merged tree is deserialized into [`AppConfig`] and validated.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, ErrorKind, Result};

/// Default prefix for environment overrides
pub const ENV_PREFIX: &str = "STOREFRONT";

/// Separator between nested keys in environment variable names
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error for '{}': {}", self.key, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn parse(self, content: &str) -> Result<Value> {
        match self {
            Self::Json => serde_json::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse JSON config: {}", e))),
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse YAML config: {}", e))),
            Self::Toml => toml::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse TOML config: {}", e))),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigSource {
    File { path: PathBuf, format: ConfigFormat },
    Environment { prefix: String },
    Memory { data: Value },
}

#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub name: String,
    pub source: ConfigSource,
    pub priority: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub catalog: CatalogConfig,
    pub orders: OrdersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub debug: bool,
    /// Role a signed-in user needs to reach the admin routes
    pub required_role: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "Storefront Admin".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
            debug: cfg!(debug_assertions),
            required_role: "admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<FileLogConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileLogConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./logs"),
            file_prefix: "storefront-admin.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Send the session cookie with every request
    pub with_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
            with_credentials: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UploadConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub max_file_size: u64,
    pub accepted_mime_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            upload_preset: String::new(),
            max_file_size: 1_500_000,
            accepted_mime_prefix: "image/".to_string(),
        }
    }
}

impl UploadConfig {
    pub fn endpoint(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload/",
            self.cloud_name
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub sizes: Vec<String>,
    pub page_size: usize,
    pub low_stock_threshold: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sizes: ["S", "M", "L", "XL", "XXL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            page_size: 6,
            low_stock_threshold: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrdersConfig {
    pub default_limit: u32,
    pub limit_options: Vec<u32>,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            limit_options: vec![5, 10, 25, 50],
        }
    }
}

impl AppConfig {
    /// Checks every section and reports all problems at once
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut push = |key: &str, message: &str| {
            errors.push(ValidationError {
                key: key.to_string(),
                message: message.to_string(),
            })
        };

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            push("api.base_url", "must be an http(s) URL");
        }
        if self.api.timeout_secs == 0 {
            push("api.timeout_secs", "must be greater than zero");
        }
        if self.upload.max_file_size == 0 {
            push("upload.max_file_size", "must be greater than zero");
        }
        if self.catalog.sizes.is_empty() {
            push("catalog.sizes", "at least one size option is required");
        }
        if self.catalog.page_size == 0 {
            push("catalog.page_size", "must be greater than zero");
        }
        if self.orders.default_limit == 0 {
            push("orders.default_limit", "must be greater than zero");
        }
        if tracing_level_is_unknown(&self.logging.level) {
            push("logging.level", "unknown log level");
        }

        errors
    }

    /// Returns the config or a configuration error listing every failed rule
    pub fn validated(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(Error::config_invalid(
                errors.iter().map(ToString::to_string).collect(),
            ))
        }
    }
}

fn tracing_level_is_unknown(level: &str) -> bool {
    !matches!(
        level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

/// Builds an [`AppConfig`] from prioritized layers
#[derive(Debug, Default)]
pub struct ConfigLoader {
    layers: Vec<ConfigLayer>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Loader with the optional file layer and the standard environment layer
    pub fn standard(config_path: Option<&Path>) -> Result<Self> {
        let mut loader = Self::new();
        if let Some(path) = config_path {
            loader.add_file_layer("file", path, 10)?;
        }
        loader.add_env_layer("environment", ENV_PREFIX, 1000);
        Ok(loader)
    }

    pub fn add_file_layer<P: AsRef<Path>>(
        &mut self,
        name: impl Into<String>,
        path: P,
        priority: u32,
    ) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let format = ConfigFormat::from_extension(&path)
            .ok_or_else(|| Error::config("Unsupported configuration file format"))?;

        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::File { path, format },
            priority,
        });
        Ok(())
    }

    pub fn add_env_layer(&mut self, name: impl Into<String>, prefix: impl Into<String>, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Environment {
                prefix: prefix.into(),
            },
            priority,
        });
    }

    pub fn add_memory_layer(&mut self, name: impl Into<String>, data: Value, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Memory { data },
            priority,
        });
    }

    fn push_layer(&mut self, layer: ConfigLayer) {
        self.layers.push(layer);
        self.layers.sort_by_key(|l| l.priority);
    }

    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    /// Merges every layer over the defaults, then validates
    pub fn load(&self) -> Result<AppConfig> {
        let mut merged = serde_json::to_value(AppConfig::default())?;

        for layer in &self.layers {
            let layer_config = load_layer_config(layer)?;
            tracing::debug!(layer = %layer.name, priority = layer.priority, "merging config layer");
            merge_values(&mut merged, layer_config);
        }

        let config: AppConfig = serde_json::from_value(merged).map_err(|e| {
            Error::new(
                ErrorKind::Configuration {
                    key: None,
                    validation_errors: vec![e.to_string()],
                },
                format!("Failed to deserialize configuration: {}", e),
            )
        })?;

        config.validated()
    }
}

fn load_layer_config(layer: &ConfigLayer) -> Result<Value> {
    match &layer.source {
        #[cfg(not(target_arch = "wasm32"))]
        ConfigSource::File { path, format } => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;
            format.parse(&content)
        }

        #[cfg(target_arch = "wasm32")]
        ConfigSource::File { .. } => Err(Error::config("File loading not supported in web platform")),

        #[cfg(not(target_arch = "wasm32"))]
        ConfigSource::Environment { prefix } => Ok(env_to_value(prefix, std::env::vars())),

        #[cfg(target_arch = "wasm32")]
        ConfigSource::Environment { .. } => Ok(Value::Object(Map::new())),

        ConfigSource::Memory { data } => Ok(data.clone()),
    }
}

/// Turns `PREFIX_SECTION__KEY=value` pairs into a nested JSON tree
pub fn env_to_value<I>(prefix: &str, vars: I) -> Value
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env_config = Map::new();
    let lead = format!("{}_", prefix);

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&lead) else {
            continue;
        };
        let config_key = rest.to_lowercase();
        let nested_keys: Vec<&str> = config_key.split(ENV_SEPARATOR).filter(|k| !k.is_empty()).collect();
        set_nested_env_value(&mut env_config, &nested_keys, value);
    }

    Value::Object(env_config)
}

fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(target_value) => merge_values(target_value, source_value),
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

fn set_nested_env_value(config: &mut Map<String, Value>, keys: &[&str], value: String) {
    let Some((first_key, rest)) = keys.split_first() else {
        return;
    };

    if rest.is_empty() {
        config.insert(first_key.to_string(), parse_env_scalar(value));
        return;
    }

    let entry = config
        .entry(first_key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(nested_map) = entry {
        set_nested_env_value(nested_map, rest, value);
    }
}

fn parse_env_scalar(value: String) -> Value {
    if let Ok(bool_val) = value.parse::<bool>() {
        Value::Bool(bool_val)
    } else if let Ok(int_val) = value.parse::<i64>() {
        Value::Number(Number::from(int_val))
    } else if let Some(float_val) = value.parse::<f64>().ok().and_then(Number::from_f64) {
        Value::Number(float_val)
    } else if value.contains(',') {
        Value::Array(
            value
                .split(',')
                .map(|item| Value::String(item.trim().to_string()))
                .collect(),
        )
    } else {
        Value::String(value)
    }
}

/// Default location of the user's config file
#[cfg(not(target_arch = "wasm32"))]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("storefront-admin").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.catalog.page_size, 6);
        assert_eq!(config.upload.max_file_size, 1_500_000);
        assert_eq!(config.orders.default_limit, 5);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension(Path::new("a.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_extension(Path::new("a.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(ConfigFormat::from_extension(Path::new("a.ini")), None);
    }

    #[test]
    fn test_yaml_file_layer_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "api:\n  base_url: https://shop.example.com/api\ncatalog:\n  page_size: 10").unwrap();

        let mut loader = ConfigLoader::new();
        loader.add_file_layer("file", &path, 10).unwrap();
        let config = loader.load().unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.catalog.page_size, 10);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_toml_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\nformat = \"json\"\n").unwrap();

        let mut loader = ConfigLoader::new();
        loader.add_file_layer("file", &path, 10).unwrap();
        let config = loader.load().unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_to_value_nests_sections() {
        let vars = vec![
            ("STOREFRONT_API__BASE_URL".to_string(), "https://x.test/api".to_string()),
            ("STOREFRONT_API__TIMEOUT_SECS".to_string(), "5".to_string()),
            ("STOREFRONT_CATALOG__SIZES".to_string(), "S,M".to_string()),
            ("OTHER_VALUE".to_string(), "ignored".to_string()),
        ];
        let value = env_to_value("STOREFRONT", vars);

        assert_eq!(value["api"]["base_url"], "https://x.test/api");
        assert_eq!(value["api"]["timeout_secs"], 5);
        assert_eq!(value["catalog"]["sizes"], serde_json::json!(["S", "M"]));
        assert!(value.get("other").is_none());
    }

    #[test]
    fn test_memory_layer_priority() {
        let mut loader = ConfigLoader::new();
        loader.add_memory_layer("high", serde_json::json!({"app": {"name": "High"}}), 50);
        loader.add_memory_layer("low", serde_json::json!({"app": {"name": "Low"}}), 5);

        let config = loader.load().unwrap();
        assert_eq!(config.app.name, "High");
    }

    #[test]
    fn test_invalid_config_reports_every_problem() {
        let mut loader = ConfigLoader::new();
        loader.add_memory_layer(
            "bad",
            serde_json::json!({"api": {"base_url": "ftp://nope", "timeout_secs": 0}}),
            1,
        );

        let err = loader.load().unwrap_err();
        match err.kind {
            ErrorKind::Configuration { validation_errors, .. } => {
                assert_eq!(validation_errors.len(), 2);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_file_extension() {
        let mut loader = ConfigLoader::new();
        assert!(loader.add_file_layer("file", "config.ini", 1).is_err());
    }
}
