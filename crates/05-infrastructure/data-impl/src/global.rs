//! 进程级默认注册表
//!
//! 外部描述符默认来自 [`crate::PROVIDER_FILE_ENV`] 指定的配置文件。
//! 插件类型与外部来源必须在第一次解析之前完成设置，表就绪后二者都不再接受修改。

use crate::config::FileDescriptorSource;
use crate::registry::ProviderFactoryRegistry;
use crate::type_registry::InMemoryTypeRegistry;
use data_abstractions::{
    ExternalDescriptorSource, ProviderDescriptor, ProviderType, RawProviderRow, SharedFactory,
    TypeResolver,
};
use infrastructure_common::{ConfigError, ProviderResult};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// 全局类型注册表
static GLOBAL_TYPE_REGISTRY: Lazy<Arc<InMemoryTypeRegistry>> =
    Lazy::new(|| Arc::new(InMemoryTypeRegistry::with_built_ins()));

/// 全局外部描述符来源
static GLOBAL_EXTERNAL_SOURCE: Lazy<RwLock<Arc<dyn ExternalDescriptorSource>>> =
    Lazy::new(|| {
        RwLock::new(Arc::new(FileDescriptorSource::from_env()) as Arc<dyn ExternalDescriptorSource>)
    });

/// 全局注册表
static GLOBAL_REGISTRY: Lazy<ProviderFactoryRegistry> = Lazy::new(|| {
    ProviderFactoryRegistry::new(
        Arc::clone(&*GLOBAL_TYPE_REGISTRY) as Arc<dyn TypeResolver>,
        Arc::new(GlobalDescriptorSource),
    )
});

/// 建表时读取当前设置的全局外部来源
struct GlobalDescriptorSource;

impl ExternalDescriptorSource for GlobalDescriptorSource {
    fn load_descriptors(&self) -> Result<Vec<RawProviderRow>, ConfigError> {
        let source = Arc::clone(&*GLOBAL_EXTERNAL_SOURCE.read());
        source.load_descriptors()
    }

    fn name(&self) -> &str {
        "global"
    }
}

/// 获取全局注册表
pub fn global_registry() -> &'static ProviderFactoryRegistry {
    &GLOBAL_REGISTRY
}

/// 根据不变名称解析全局工厂单例
pub fn resolve_factory(invariant_name: &str) -> ProviderResult<SharedFactory> {
    GLOBAL_REGISTRY.resolve_factory(invariant_name)
}

/// 获取全局描述符表的拷贝
pub fn list_providers() -> ProviderResult<Vec<ProviderDescriptor>> {
    GLOBAL_REGISTRY.list_providers()
}

/// 注册插件提供者类型
pub fn register_provider_type(provider_type: ProviderType) -> ProviderResult<()> {
    GLOBAL_REGISTRY.before_initialization(|| GLOBAL_TYPE_REGISTRY.register(provider_type))?
}

/// 替换全局外部描述符来源
pub fn set_external_descriptor_source(
    source: Arc<dyn ExternalDescriptorSource>,
) -> ProviderResult<()> {
    GLOBAL_REGISTRY.before_initialization(|| {
        *GLOBAL_EXTERNAL_SOURCE.write() = source;
    })
}
