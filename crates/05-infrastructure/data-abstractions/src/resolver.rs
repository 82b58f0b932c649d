//! 类型定位器解析抽象接口
//!
//! 以显式注册表代替运行时反射：类型定位器字符串映射到 [`ProviderType`]，
//! 其静态成员表中名为 [`INSTANCE_MEMBER`] 的成员即为工厂单例的暴露点。

use crate::factory::SharedFactory;
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 工厂单例暴露点的成员名称
pub const INSTANCE_MEMBER: &str = "Instance";

/// 静态成员读取函数类型
pub type MemberReader = Arc<dyn Fn() -> Option<Arc<dyn Any + Send + Sync>> + Send + Sync>;

/// 类型的公共静态成员
///
/// 声明类型在注册时确定，与读取到的值分开检查。
#[derive(Clone)]
pub struct StaticMember {
    declared_type: TypeId,
    declared_type_name: &'static str,
    reader: MemberReader,
}

impl StaticMember {
    /// 预先构造的成员值
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        let stored: Arc<dyn Any + Send + Sync> = Arc::new(value);
        Self::with_reader::<T>(Arc::new(move || Some(Arc::clone(&stored))))
    }

    /// 首次读取时构造、之后始终返回同一实例的成员值
    pub fn lazy<T, F>(init: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let cell: OnceCell<Arc<dyn Any + Send + Sync>> = OnceCell::new();
        Self::with_reader::<T>(Arc::new(move || {
            Some(Arc::clone(
                cell.get_or_init(|| Arc::new(init()) as Arc<dyn Any + Send + Sync>),
            ))
        }))
    }

    /// 声明为 `T` 但值为空的成员
    pub fn absent<T: Any>() -> Self {
        Self::with_reader::<T>(Arc::new(|| None))
    }

    /// 预先构造的工厂单例
    pub fn factory(factory: SharedFactory) -> Self {
        Self::value::<SharedFactory>(factory)
    }

    /// 延迟构造的工厂单例
    pub fn lazy_factory<F>(init: F) -> Self
    where
        F: Fn() -> SharedFactory + Send + Sync + 'static,
    {
        Self::lazy::<SharedFactory, F>(init)
    }

    /// 使用自定义读取函数创建成员
    pub fn with_reader<T: Any>(reader: MemberReader) -> Self {
        Self {
            declared_type: TypeId::of::<T>(),
            declared_type_name: std::any::type_name::<T>(),
            reader,
        }
    }

    /// 成员声明类型是否为 `T`
    pub fn declares<T: Any>(&self) -> bool {
        self.declared_type == TypeId::of::<T>()
    }

    /// 成员声明类型名称
    pub fn declared_type_name(&self) -> &'static str {
        self.declared_type_name
    }

    /// 读取成员值
    pub fn read(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        (self.reader)()
    }
}

impl fmt::Debug for StaticMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMember")
            .field("declared_type", &self.declared_type_name)
            .field("reader", &"<function>")
            .finish()
    }
}

/// 可加载的提供者类型
#[derive(Debug, Clone)]
pub struct ProviderType {
    type_locator: String,
    members: HashMap<String, StaticMember>,
}

impl ProviderType {
    /// 创建没有任何静态成员的类型
    pub fn new(type_locator: impl Into<String>) -> Self {
        Self {
            type_locator: type_locator.into(),
            members: HashMap::new(),
        }
    }

    /// 添加静态成员
    pub fn with_member(mut self, name: impl Into<String>, member: StaticMember) -> Self {
        self.members.insert(name.into(), member);
        self
    }

    /// 以 [`INSTANCE_MEMBER`] 暴露预先构造的工厂单例
    pub fn with_instance(self, factory: SharedFactory) -> Self {
        self.with_member(INSTANCE_MEMBER, StaticMember::factory(factory))
    }

    /// 以 [`INSTANCE_MEMBER`] 暴露延迟构造的工厂单例
    pub fn with_lazy_instance<F>(self, init: F) -> Self
    where
        F: Fn() -> SharedFactory + Send + Sync + 'static,
    {
        self.with_member(INSTANCE_MEMBER, StaticMember::lazy_factory(init))
    }

    /// 类型定位器
    pub fn type_locator(&self) -> &str {
        &self.type_locator
    }

    /// 查找静态成员
    pub fn member(&self, name: &str) -> Option<&StaticMember> {
        self.members.get(name)
    }
}

/// 类型解析器 trait
///
/// 根据类型定位器返回可加载的类型；未知定位器返回 `None`。
pub trait TypeResolver: Send + Sync {
    /// 解析类型定位器
    fn resolve_type(&self, type_locator: &str) -> Option<Arc<ProviderType>>;
}
