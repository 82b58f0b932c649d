//! 提供者工厂能力接口

use std::fmt::Debug;
use std::sync::Arc;

/// 数据库提供者工厂 trait
///
/// 每个提供者在进程内只有一个共享实例，由 [`crate::INSTANCE_MEMBER`] 暴露。
/// 连接、命令等对象的创建由具体后端实现，不属于本层。
pub trait DbProviderFactory: Send + Sync + Debug {
    /// 获取提供者的不变名称
    fn invariant_name(&self) -> &str;

    /// 是否能够创建数据源枚举器
    fn can_create_data_source_enumerator(&self) -> bool {
        false
    }
}

/// 共享的工厂单例引用
pub type SharedFactory = Arc<dyn DbProviderFactory>;

/// 判断两个工厂引用是否指向同一个单例
pub fn same_factory(a: &SharedFactory, b: &SharedFactory) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}
