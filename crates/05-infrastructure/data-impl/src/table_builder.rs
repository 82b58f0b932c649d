//! 描述符表构建器
//!
//! 先放入可用的内置提供者，再按输入顺序追加外部描述符。不变名称重复的行被跳过，
//! 先写入者优先；缺少必需字段的行同样跳过，并在表上留下诊断记录。

use crate::builtins::{built_in_providers, BuiltInProvider, ORACLE_CLIENT_NAMESPACE};
use crate::discovery::probe_availability;
use data_abstractions::{
    BuildDiagnostic, DescriptorTable, DiagnosticKind, ProviderDescriptor, RawProviderRow,
    TypeResolver,
};
use tracing::{debug, info, warn};

/// 描述符表构建器
///
/// 构建过程是确定性的：相同的内置列表和相同顺序的外部输入总是得到相同的表。
/// 构建器本身不做缓存。
#[derive(Debug, Clone)]
pub struct DescriptorTableBuilder {
    built_ins: Vec<BuiltInProvider>,
    probe_patterns: Vec<String>,
}

impl Default for DescriptorTableBuilder {
    fn default() -> Self {
        Self::new(built_in_providers())
    }
}

impl DescriptorTableBuilder {
    /// 使用指定的内置提供者列表创建构建器
    pub fn new(built_ins: Vec<BuiltInProvider>) -> Self {
        Self {
            built_ins,
            probe_patterns: vec![ORACLE_CLIENT_NAMESPACE.to_lowercase()],
        }
    }

    /// 添加需要先探测再纳入的类型定位器模式（不区分大小写的子串）
    pub fn with_probe_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.probe_patterns.push(pattern.into().to_lowercase());
        self
    }

    /// 清空探测模式
    pub fn without_probe_patterns(mut self) -> Self {
        self.probe_patterns.clear();
        self
    }

    /// 类型定位器是否需要先探测
    pub fn requires_probe(&self, type_locator: &str) -> bool {
        let locator = type_locator.to_lowercase();
        self.probe_patterns
            .iter()
            .any(|pattern| locator.contains(pattern.as_str()))
    }

    /// 构建描述符表
    pub fn build(
        &self,
        resolver: &dyn TypeResolver,
        external: &[RawProviderRow],
    ) -> DescriptorTable {
        let mut table = DescriptorTable::new();

        for provider in &self.built_ins {
            let invariant_name = &provider.descriptor.invariant_name;
            if !provider.is_available(resolver) {
                debug!("可选内置提供者不可用，跳过: {}", invariant_name);
                table.record(BuildDiagnostic::new(
                    None,
                    Some(invariant_name.clone()),
                    DiagnosticKind::ProviderUnavailable,
                ));
                continue;
            }
            if !table.insert_if_absent(provider.descriptor.clone()) {
                warn!("内置提供者不变名称重复，跳过: {}", invariant_name);
                table.record(BuildDiagnostic::new(
                    None,
                    Some(invariant_name.clone()),
                    DiagnosticKind::DuplicateInvariantName,
                ));
            }
        }
        let built_in_count = table.len();

        for (row_index, row) in external.iter().enumerate() {
            let descriptor = match normalize_row(row) {
                Ok(descriptor) => descriptor,
                Err(kind) => {
                    warn!("外部描述符第 {} 行无效 ({:?})，跳过", row_index, kind);
                    table.record(BuildDiagnostic::new(
                        Some(row_index),
                        row.invariant_name.clone(),
                        kind,
                    ));
                    continue;
                }
            };

            if table.contains(&descriptor.invariant_name) {
                debug!(
                    "外部描述符第 {} 行的不变名称已存在，跳过: {}",
                    row_index, descriptor.invariant_name
                );
                table.record(BuildDiagnostic::new(
                    Some(row_index),
                    Some(descriptor.invariant_name),
                    DiagnosticKind::DuplicateInvariantName,
                ));
                continue;
            }

            if self.requires_probe(&descriptor.type_locator)
                && !probe_availability(resolver, &descriptor.type_locator)
            {
                debug!(
                    "外部描述符第 {} 行的提供者未安装，跳过: {}",
                    row_index, descriptor.invariant_name
                );
                table.record(BuildDiagnostic::new(
                    Some(row_index),
                    Some(descriptor.invariant_name),
                    DiagnosticKind::ProviderUnavailable,
                ));
                continue;
            }

            table.insert_if_absent(descriptor);
        }

        info!(
            "描述符表构建完成: {} 个内置, {} 个外部, {} 条诊断",
            built_in_count,
            table.len() - built_in_count,
            table.diagnostics().len()
        );
        table
    }
}

/// 校验外部行并转换为描述符
///
/// 类型定位器字段存在但为空时保留该行，解析时报告 `ProviderMissing`。
fn normalize_row(row: &RawProviderRow) -> Result<ProviderDescriptor, DiagnosticKind> {
    let invariant_name = row
        .invariant_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or(DiagnosticKind::MissingInvariantName)?;
    let type_locator = row
        .type_locator
        .as_deref()
        .ok_or(DiagnosticKind::MissingTypeLocator)?;

    Ok(ProviderDescriptor::new(
        row.name.clone().unwrap_or_default(),
        invariant_name,
        row.description.clone().unwrap_or_default(),
        type_locator,
    ))
}
