//! 内存类型注册表
//!
//! 内置类型在构造时静态注册，外部插件通过 [`InMemoryTypeRegistry::register`] 注册。

use crate::builtins::built_in_types;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use data_abstractions::{ProviderType, TypeResolver};
use infrastructure_common::{ProviderError, ProviderResult};
use std::sync::Arc;
use tracing::{debug, info};

/// 类型定位器到提供者类型的注册表
#[derive(Debug, Default)]
pub struct InMemoryTypeRegistry {
    types: DashMap<String, Arc<ProviderType>>,
}

impl InMemoryTypeRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建已注册全部内置类型的注册表
    pub fn with_built_ins() -> Self {
        let registry = Self::new();
        for provider_type in built_in_types() {
            let locator = provider_type.type_locator().trim().to_string();
            registry.types.insert(locator, Arc::new(provider_type));
        }
        registry
    }

    /// 注册提供者类型
    ///
    /// 每个类型定位器只能绑定一个类型，重复注册返回
    /// [`ProviderError::TypeAlreadyRegistered`]。
    pub fn register(&self, provider_type: ProviderType) -> ProviderResult<()> {
        let locator = provider_type.type_locator().trim().to_string();
        match self.types.entry(locator) {
            Entry::Occupied(entry) => Err(ProviderError::TypeAlreadyRegistered {
                type_locator: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                info!("注册提供者类型: {}", entry.key());
                entry.insert(Arc::new(provider_type));
                Ok(())
            }
        }
    }

    /// 检查类型定位器是否已注册
    pub fn contains(&self, type_locator: &str) -> bool {
        self.types.contains_key(type_locator.trim())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for InMemoryTypeRegistry {
    fn resolve_type(&self, type_locator: &str) -> Option<Arc<ProviderType>> {
        let found = self
            .types
            .get(type_locator.trim())
            .map(|entry| Arc::clone(entry.value()));
        if found.is_none() {
            debug!("类型定位器未解析到任何类型: {}", type_locator);
        }
        found
    }
}
