use crate::core::ConfigProvider;
use crate::domain::model::{LexiconShape, OutputFormat};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// `[[sources]]`：一個詞頻表檔案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub shape: LexiconShape,
    pub path: String,
    pub header_lines: Option<usize>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<OutputFormat>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub system_stats: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEXICON_DATA})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        if self.enabled_sources().next().is_none() {
            return Err(EtlError::MissingConfigError {
                field: "sources".to_string(),
            });
        }

        validation::validate_unique_names(
            "sources.name",
            self.sources.iter().map(|source| source.name.as_str()),
        )?;
        for source in self.enabled_sources() {
            validation::validate_path(&format!("sources.{}.path", source.name), &source.path)?;
        }

        Ok(())
    }

    pub fn enabled_sources(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(|source| source.enabled)
    }

    /// 每個啟用的來源各自一份獨立的設定
    pub fn jobs(&self) -> Vec<SourceJob> {
        self.enabled_sources()
            .map(|source| SourceJob {
                source: source.clone(),
                load: self.load.clone(),
            })
            .collect()
    }

    pub fn output_path(&self) -> &str {
        &self.load.output_path
    }

    pub fn compression_enabled(&self) -> bool {
        self.load.compression.as_ref().is_some_and(|c| c.enabled)
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring
            .as_ref()
            .is_some_and(|m| m.enabled && m.system_stats.unwrap_or(true))
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// 批次執行中的單一來源
#[derive(Debug, Clone)]
pub struct SourceJob {
    pub source: SourceConfig,
    pub load: LoadConfig,
}

impl ConfigProvider for SourceJob {
    fn source_name(&self) -> String {
        self.source.name.clone()
    }

    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn shape(&self) -> LexiconShape {
        self.source.shape
    }

    fn header_lines(&self) -> Option<usize> {
        self.source.header_lines
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.load.output_formats
    }

    fn compress(&self) -> bool {
        self.load.compression.as_ref().is_some_and(|c| c.enabled)
    }
}
