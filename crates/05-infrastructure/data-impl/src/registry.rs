//! 数据库提供者工厂注册表
//!
//! 描述符表在第一次请求时构建一次，之后在整个进程生命周期内缓存。
//! 初始化状态机 `Uninitialized -> Building -> Ready` 只在持有注册表唯一的锁时迁移；
//! 观察到 `Ready` 的调用方不需要加锁。构建失败（或 panic）时状态回到
//! `Uninitialized`，后续调用可以重试。
//!
//! 每个类型定位器的发现结果（工厂单例或失败原因）在第一次解析时记下，
//! 此后同一注册表对该定位器总是给出相同的回答。

use crate::discovery;
use crate::table_builder::DescriptorTableBuilder;
use data_abstractions::{
    BuildDiagnostic, DescriptorTable, ExternalDescriptorSource, ProviderDescriptor, SharedFactory,
    TypeResolver,
};
use dashmap::DashMap;
use infrastructure_common::{ProviderError, ProviderResult};
use once_cell::sync::OnceCell;
use parking_lot::ReentrantMutex;
use std::cell::Cell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 注册表初始化状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// 尚未构建描述符表
    Uninitialized,
    /// 正在构建
    Building,
    /// 已构建并缓存
    Ready,
}

/// 构建期间持有；除非状态已进入 `Ready`，否则在离开作用域时复位
struct BuildingGuard<'a> {
    state: &'a Cell<InitState>,
}

impl Drop for BuildingGuard<'_> {
    fn drop(&mut self) {
        if self.state.get() == InitState::Building {
            self.state.set(InitState::Uninitialized);
        }
    }
}

/// 数据库提供者工厂注册表
pub struct ProviderFactoryRegistry {
    gate: ReentrantMutex<Cell<InitState>>,
    table: OnceCell<DescriptorTable>,
    table_builder: DescriptorTableBuilder,
    resolver: Arc<dyn TypeResolver>,
    source: Arc<dyn ExternalDescriptorSource>,
    resolved: DashMap<String, Arc<OnceCell<ProviderResult<SharedFactory>>>>,
}

impl ProviderFactoryRegistry {
    /// 使用默认内置提供者创建注册表
    pub fn new(resolver: Arc<dyn TypeResolver>, source: Arc<dyn ExternalDescriptorSource>) -> Self {
        Self {
            gate: ReentrantMutex::new(Cell::new(InitState::Uninitialized)),
            table: OnceCell::new(),
            table_builder: DescriptorTableBuilder::default(),
            resolver,
            source,
            resolved: DashMap::new(),
        }
    }

    /// 替换描述符表构建器
    pub fn with_table_builder(mut self, table_builder: DescriptorTableBuilder) -> Self {
        self.table_builder = table_builder;
        self
    }

    /// 当前初始化状态
    pub fn state(&self) -> InitState {
        if self.table.get().is_some() {
            return InitState::Ready;
        }
        self.gate.lock().get()
    }

    /// 根据不变名称解析工厂单例
    ///
    /// 同一名称在进程内总是返回同一个实例。
    pub fn resolve_factory(&self, invariant_name: &str) -> ProviderResult<SharedFactory> {
        if invariant_name.trim().is_empty() {
            return Err(ProviderError::ArgumentInvalid {
                argument: "invariant_name",
            });
        }

        let table = self.provider_table()?;
        let descriptor =
            table
                .find(invariant_name)
                .ok_or_else(|| ProviderError::ProviderNotFound {
                    invariant_name: invariant_name.to_string(),
                })?;

        debug!(
            "解析提供者: {} -> {}",
            descriptor.invariant_name, descriptor.type_locator
        );
        self.resolve_descriptor(descriptor)
    }

    /// 直接根据描述符行解析工厂单例
    ///
    /// 同一类型定位器只执行一次发现流程。
    pub fn resolve_descriptor(
        &self,
        descriptor: &ProviderDescriptor,
    ) -> ProviderResult<SharedFactory> {
        let type_locator = discovery::descriptor_locator(descriptor)?;
        let outcome = match self.resolved.get(type_locator) {
            Some(known) => Arc::clone(&known),
            None => Arc::clone(&self.resolved.entry(type_locator.to_string()).or_default()),
        };
        outcome
            .get_or_init(|| {
                let result = discovery::locate_instance(self.resolver.as_ref(), type_locator);
                match &result {
                    Err(e) if e.is_installation_problem() => {
                        warn!("提供者在当前环境中不可用: {}", e);
                    }
                    _ => debug!("类型定位器发现完成: {}", type_locator),
                }
                result
            })
            .clone()
    }

    /// 在描述符表构建之前执行配置操作
    ///
    /// 与建表使用同一把锁。表已就绪或正在构建时返回 [`ProviderError::AlreadyInitialized`]。
    pub fn before_initialization<T>(&self, configure: impl FnOnce() -> T) -> ProviderResult<T> {
        let gate = self.gate.lock();
        if self.table.get().is_some() || gate.get() != InitState::Uninitialized {
            return Err(ProviderError::AlreadyInitialized);
        }
        Ok(configure())
    }

    /// 获取描述符表的防御性拷贝
    pub fn list_providers(&self) -> ProviderResult<Vec<ProviderDescriptor>> {
        Ok(self.provider_table()?.snapshot())
    }

    /// 获取建表时记录的诊断
    pub fn build_diagnostics(&self) -> ProviderResult<Vec<BuildDiagnostic>> {
        Ok(self.provider_table()?.diagnostics().to_vec())
    }

    fn provider_table(&self) -> ProviderResult<&DescriptorTable> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let gate = self.gate.lock();
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        if gate.get() == InitState::Building {
            // 同一线程在构建过程中再次进入
            return Err(ProviderError::RecursiveInitialization);
        }

        gate.set(InitState::Building);
        let _guard = BuildingGuard { state: &gate };
        info!("开始构建数据库提供者表, 外部来源: {}", self.source.name());

        let external = self.source.load_descriptors().map_err(|e| {
            warn!("加载外部提供者描述符失败，注册表回到未初始化状态: {}", e);
            ProviderError::from(e)
        })?;
        let built = self.table_builder.build(self.resolver.as_ref(), &external);
        let table = self.table.get_or_init(move || built);
        gate.set(InitState::Ready);

        info!("数据库提供者表已就绪, 共 {} 个提供者", table.len());
        Ok(table)
    }
}

impl fmt::Debug for ProviderFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderFactoryRegistry")
            .field("state", &self.state())
            .field("table", &self.table.get())
            .field("table_builder", &self.table_builder)
            .field("source", &self.source.name())
            .field("resolved_locators", &self.resolved.len())
            .finish()
    }
}
