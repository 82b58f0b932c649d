//! 基于配置文件的外部描述符来源
//!
//! 支持 TOML、JSON、YAML 三种格式，按文件扩展名区分：
//!
//! ```toml
//! [[db_provider_factories]]
//! name = "My Data Provider"
//! invariant = "My.Provider"
//! description = "示例提供者"
//! type = "My.Provider.Factory, My.Provider"
//! ```

use data_abstractions::{ExternalDescriptorSource, RawProviderRow};
use infrastructure_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 指定提供者配置文件路径的环境变量
pub const PROVIDER_FILE_ENV: &str = "ADSP_DB_PROVIDER_FACTORIES";

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// 根据文件扩展名判断格式
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }
}

/// 提供者配置节
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderFactoriesSection {
    /// 按声明顺序排列的外部描述符
    #[serde(default)]
    pub db_provider_factories: Vec<RawProviderRow>,
}

/// 从文本解析提供者配置节
pub fn parse_provider_section(
    text: &str,
    format: ConfigFormat,
) -> ConfigResult<Vec<RawProviderRow>> {
    let section: ProviderFactoriesSection = match format {
        ConfigFormat::Toml => toml::from_str(text).map_err(ConfigError::parse)?,
        ConfigFormat::Json => serde_json::from_str(text).map_err(ConfigError::parse)?,
        ConfigFormat::Yaml => serde_yaml::from_str(text).map_err(ConfigError::parse)?,
    };
    Ok(section.db_provider_factories)
}

/// 配置文件描述符来源
///
/// 每次加载都会重新读取文件，文件暂时缺失时后续建表可以重试成功。
#[derive(Debug, Clone, Default)]
pub struct FileDescriptorSource {
    path: Option<PathBuf>,
}

impl FileDescriptorSource {
    /// 从指定文件加载
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// 从 [`PROVIDER_FILE_ENV`] 指定的文件加载；变量不存在时没有外部描述符
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(PROVIDER_FILE_ENV).map(PathBuf::from),
        }
    }

    /// 配置文件路径
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ExternalDescriptorSource for FileDescriptorSource {
    fn load_descriptors(&self) -> Result<Vec<RawProviderRow>, ConfigError> {
        let Some(path) = self.path.as_deref() else {
            debug!("未配置提供者配置文件");
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载提供者配置文件: {}", path.display());
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let rows = parse_provider_section(&content, format)?;
        debug!("提供者配置文件加载完成, {} 行", rows.len());
        Ok(rows)
    }

    fn name(&self) -> &str {
        "file"
    }
}
