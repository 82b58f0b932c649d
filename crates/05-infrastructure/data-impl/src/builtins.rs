//! 内置提供者
//!
//! 内置描述符总是排在外部配置的描述符之前。可选的内置提供者带有可用性探测，
//! 探测失败时不进入描述符表，也不会中断建表。

use crate::discovery::probe_availability;
use data_abstractions::{
    DbProviderFactory, ProviderDescriptor, ProviderType, SharedFactory, TypeResolver,
};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

pub const SQL_CLIENT_PROVIDER_NAME: &str = "SqlClient Data Provider";
pub const SQL_CLIENT_INVARIANT_NAME: &str = "System.Data.SqlClient";
pub const SQL_CLIENT_PROVIDER_DESCRIPTION: &str = ".Net Framework Data Provider for SqlServer";
pub const SQL_CLIENT_TYPE_LOCATOR: &str =
    "Microsoft.Data.SqlClient.SqlClientFactory, Microsoft.Data.SqlClient";

pub const ORACLE_CLIENT_PROVIDER_NAME: &str = "OracleClient Data Provider";
pub const ORACLE_CLIENT_INVARIANT_NAME: &str = "Oracle.ManagedDataAccess.Client";
pub const ORACLE_CLIENT_PROVIDER_DESCRIPTION: &str = ".Net Framework Data Provider for Oracle";
pub const ORACLE_CLIENT_TYPE_LOCATOR: &str =
    "Oracle.ManagedDataAccess.Client.OracleClientFactory, Oracle.ManagedDataAccess.Client";

/// 需要先探测再纳入的提供者命名空间
pub const ORACLE_CLIENT_NAMESPACE: &str = "Oracle.ManagedDataAccess.Client";

static SQL_CLIENT_FACTORY: Lazy<SharedFactory> =
    Lazy::new(|| Arc::new(SqlClientFactory { _private: () }) as SharedFactory);

/// 默认 SQL Server 客户端提供者工厂
#[derive(Debug)]
pub struct SqlClientFactory {
    _private: (),
}

impl SqlClientFactory {
    /// 获取进程内唯一实例
    pub fn instance() -> SharedFactory {
        Arc::clone(&SQL_CLIENT_FACTORY)
    }
}

impl DbProviderFactory for SqlClientFactory {
    fn invariant_name(&self) -> &str {
        SQL_CLIENT_INVARIANT_NAME
    }

    fn can_create_data_source_enumerator(&self) -> bool {
        true
    }
}

/// 可用性探测函数类型
pub type AvailabilityProbe = Arc<dyn Fn(&dyn TypeResolver) -> bool + Send + Sync>;

/// 内置提供者条目
#[derive(Clone)]
pub struct BuiltInProvider {
    /// 描述符
    pub descriptor: ProviderDescriptor,
    probe: Option<AvailabilityProbe>,
}

impl BuiltInProvider {
    /// 总是纳入描述符表的内置提供者
    pub fn always(descriptor: ProviderDescriptor) -> Self {
        Self {
            descriptor,
            probe: None,
        }
    }

    /// 仅当其类型定位器可以解析到工厂单例时才纳入
    pub fn optional(descriptor: ProviderDescriptor) -> Self {
        let type_locator = descriptor.type_locator.clone();
        let probe: AvailabilityProbe = Arc::new(move |resolver: &dyn TypeResolver| {
            probe_availability(resolver, &type_locator)
        });
        Self::with_probe(descriptor, probe)
    }

    /// 使用自定义探测函数
    pub fn with_probe(descriptor: ProviderDescriptor, probe: AvailabilityProbe) -> Self {
        Self {
            descriptor,
            probe: Some(probe),
        }
    }

    /// 在给定环境中是否可用
    pub fn is_available(&self, resolver: &dyn TypeResolver) -> bool {
        self.probe.as_ref().map_or(true, |probe| probe(resolver))
    }
}

impl fmt::Debug for BuiltInProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltInProvider")
            .field("descriptor", &self.descriptor)
            .field("probe", &self.probe.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// 固定的内置提供者列表（按显示顺序）
pub fn built_in_providers() -> Vec<BuiltInProvider> {
    vec![
        BuiltInProvider::always(ProviderDescriptor::new(
            SQL_CLIENT_PROVIDER_NAME,
            SQL_CLIENT_INVARIANT_NAME,
            SQL_CLIENT_PROVIDER_DESCRIPTION,
            SQL_CLIENT_TYPE_LOCATOR,
        )),
        BuiltInProvider::optional(ProviderDescriptor::new(
            ORACLE_CLIENT_PROVIDER_NAME,
            ORACLE_CLIENT_INVARIANT_NAME,
            ORACLE_CLIENT_PROVIDER_DESCRIPTION,
            ORACLE_CLIENT_TYPE_LOCATOR,
        )),
    ]
}

/// 随本系统一起注册的提供者类型
pub fn built_in_types() -> Vec<ProviderType> {
    vec![ProviderType::new(SQL_CLIENT_TYPE_LOCATOR).with_lazy_instance(SqlClientFactory::instance)]
}

/// 构建当前环境下可用的内置描述符
pub fn build_built_in_descriptors(resolver: &dyn TypeResolver) -> Vec<ProviderDescriptor> {
    built_in_providers()
        .into_iter()
        .filter(|provider| provider.is_available(resolver))
        .map(|provider| provider.descriptor)
        .collect()
}
