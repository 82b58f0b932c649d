//! 工厂单例发现协议
//!
//! 解析与可用性探测共用同一套步骤：
//! 类型定位器 → 类型 → 公共静态成员 `Instance` → 声明类型检查 → 值非空。

use data_abstractions::{ProviderDescriptor, SharedFactory, TypeResolver, INSTANCE_MEMBER};
use infrastructure_common::{ProviderError, ProviderResult};
use tracing::debug;

/// 根据描述符行解析工厂单例
///
/// 类型定位器为空时返回 [`ProviderError::ProviderMissing`]，不会尝试解析。
pub fn resolve_descriptor(
    resolver: &dyn TypeResolver,
    descriptor: &ProviderDescriptor,
) -> ProviderResult<SharedFactory> {
    locate_instance(resolver, descriptor_locator(descriptor)?)
}

/// 取出描述符行中去除首尾空白的类型定位器
pub fn descriptor_locator(descriptor: &ProviderDescriptor) -> ProviderResult<&str> {
    let type_locator = descriptor.type_locator.trim();
    if type_locator.is_empty() {
        return Err(ProviderError::ProviderMissing {
            invariant_name: descriptor.invariant_name.clone(),
        });
    }
    Ok(type_locator)
}

/// 根据类型定位器定位工厂单例
pub fn locate_instance(
    resolver: &dyn TypeResolver,
    type_locator: &str,
) -> ProviderResult<SharedFactory> {
    let provider_type =
        resolver
            .resolve_type(type_locator)
            .ok_or_else(|| ProviderError::ProviderNotInstalled {
                type_locator: type_locator.to_string(),
            })?;

    let member = provider_type.member(INSTANCE_MEMBER).ok_or_else(|| {
        ProviderError::invalid(
            type_locator,
            format!("类型未暴露公共静态成员 {}", INSTANCE_MEMBER),
        )
    })?;

    if !member.declares::<SharedFactory>() {
        return Err(ProviderError::invalid(
            type_locator,
            format!(
                "成员 {} 的类型 {} 不是数据库提供者工厂",
                INSTANCE_MEMBER,
                member.declared_type_name()
            ),
        ));
    }

    let value = member.read().ok_or_else(|| {
        ProviderError::invalid(type_locator, format!("成员 {} 的值为空", INSTANCE_MEMBER))
    })?;

    value.downcast_ref::<SharedFactory>().cloned().ok_or_else(|| {
        ProviderError::invalid(
            type_locator,
            format!("成员 {} 的值与声明类型不符", INSTANCE_MEMBER),
        )
    })
}

/// 探测类型定位器在当前环境中是否可用
pub fn probe_availability(resolver: &dyn TypeResolver, type_locator: &str) -> bool {
    match locate_instance(resolver, type_locator) {
        Ok(_) => true,
        Err(e) => {
            debug!("可用性探测失败: {}", e);
            false
        }
    }
}
