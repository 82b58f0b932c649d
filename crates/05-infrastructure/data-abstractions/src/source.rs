//! 外部描述符来源抽象接口

use crate::descriptor::RawProviderRow;
use infrastructure_common::ConfigError;

/// 外部描述符来源 trait
///
/// 每次建表尝试调用一次；失败会使本次建表失败，注册表回到未初始化状态。
pub trait ExternalDescriptorSource: Send + Sync {
    /// 加载外部描述符行（保持输入顺序）
    fn load_descriptors(&self) -> Result<Vec<RawProviderRow>, ConfigError>;

    /// 获取来源名称
    fn name(&self) -> &str {
        "external"
    }
}

/// 没有外部描述符
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExternalDescriptors;

impl ExternalDescriptorSource for NoExternalDescriptors {
    fn load_descriptors(&self) -> Result<Vec<RawProviderRow>, ConfigError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// 固定的内存描述符列表
#[derive(Debug, Default, Clone)]
pub struct StaticDescriptorSource {
    rows: Vec<RawProviderRow>,
}

impl StaticDescriptorSource {
    pub fn new(rows: Vec<RawProviderRow>) -> Self {
        Self { rows }
    }
}

impl ExternalDescriptorSource for StaticDescriptorSource {
    fn load_descriptors(&self) -> Result<Vec<RawProviderRow>, ConfigError> {
        Ok(self.rows.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
