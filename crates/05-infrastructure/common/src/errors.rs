//! 错误类型定义

use std::sync::Arc;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("不支持的配置文件格式: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("配置源不可用: {message}")]
    SourceUnavailable { message: String },
}

impl ConfigError {
    /// 将任意解析错误包装为 [`ConfigError::ParseError`]
    pub fn parse(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::ParseError {
            source: Box::new(source),
        }
    }
}

/// 数据库提供者工厂错误类型
///
/// `ProviderNotFound`、`ProviderNotInstalled`、`ProviderInvalid` 与
/// `ProviderMissing` 分别对应不同的运维诊断，调用方不应将其合并处理。
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("参数无效: {argument} 不能为空")]
    ArgumentInvalid { argument: &'static str },

    #[error("未找到请求的数据库提供者: {invariant_name}")]
    ProviderNotFound { invariant_name: String },

    #[error("数据库提供者未安装: {type_locator}")]
    ProviderNotInstalled { type_locator: String },

    #[error("数据库提供者无效: {type_locator}, 原因: {reason}")]
    ProviderInvalid { type_locator: String, reason: String },

    #[error("数据库提供者缺少类型定位信息: {invariant_name}")]
    ProviderMissing { invariant_name: String },

    #[error("提供者表初始化失败: {source}")]
    InitializationFailed {
        #[source]
        source: Arc<ConfigError>,
    },

    #[error("提供者表正在初始化中，检测到递归调用")]
    RecursiveInitialization,

    #[error("类型已注册: {type_locator}")]
    TypeAlreadyRegistered { type_locator: String },

    #[error("提供者注册表已初始化，无法再更换外部配置源")]
    AlreadyInitialized,
}

impl From<ConfigError> for ProviderError {
    fn from(source: ConfigError) -> Self {
        Self::InitializationFailed {
            source: Arc::new(source),
        }
    }
}

impl ProviderError {
    /// 创建提供者无效错误
    pub fn invalid(type_locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProviderInvalid {
            type_locator: type_locator.into(),
            reason: reason.into(),
        }
    }

    /// 是否属于"已配置但环境中不可用"一类的错误
    pub fn is_installation_problem(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotInstalled { .. } | Self::ProviderInvalid { .. }
        )
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("数据库提供者错误: {source}")]
    ProviderError {
        #[from]
        source: ProviderError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ProviderResult<T> = Result<T, ProviderError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
