//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn ADSP 平台基础设施层的公共错误类型和日志初始化。
//!
//! ## 核心内容
//!
//! - [`ProviderError`] - 数据库提供者工厂解析错误
//! - [`ConfigError`] - 配置加载错误
//! - [`LoggingConfig`] - 日志配置与 [`init_logging`]

pub mod errors;
pub mod logging;

pub use errors::*;
pub use logging::*;
