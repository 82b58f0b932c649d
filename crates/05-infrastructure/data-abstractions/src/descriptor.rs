//! 提供者描述符与描述符表

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 提供者描述符
///
/// 一行不可变的提供者描述信息，`invariant_name` 为表内唯一主键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// 显示名称（不要求唯一）
    pub name: String,
    /// 不变名称，用于查找
    pub invariant_name: String,
    /// 描述信息
    pub description: String,
    /// 类型定位器
    pub type_locator: String,
}

impl ProviderDescriptor {
    /// 创建新的提供者描述符
    pub fn new(
        name: impl Into<String>,
        invariant_name: impl Into<String>,
        description: impl Into<String>,
        type_locator: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            invariant_name: invariant_name.into(),
            description: description.into(),
            type_locator: type_locator.into(),
        }
    }
}

/// 外部配置的原始描述符行
///
/// 字段均为可选，缺失必需字段的行在建表时被跳过并记录诊断。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProviderRow {
    /// 显示名称
    #[serde(default)]
    pub name: Option<String>,
    /// 不变名称
    #[serde(default, rename = "invariant", alias = "invariant_name")]
    pub invariant_name: Option<String>,
    /// 描述信息
    #[serde(default)]
    pub description: Option<String>,
    /// 类型定位器
    #[serde(default, rename = "type", alias = "type_locator")]
    pub type_locator: Option<String>,
}

impl RawProviderRow {
    /// 使用必需字段创建原始行
    pub fn new(invariant_name: impl Into<String>, type_locator: impl Into<String>) -> Self {
        Self {
            name: None,
            invariant_name: Some(invariant_name.into()),
            description: None,
            type_locator: Some(type_locator.into()),
        }
    }

    /// 设置显示名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// 建表诊断类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// 缺少不变名称或为空
    MissingInvariantName,
    /// 缺少类型定位器字段
    MissingTypeLocator,
    /// 不变名称已存在，先写入者优先
    DuplicateInvariantName,
    /// 需要探测的提供者在当前环境中不可用
    ProviderUnavailable,
}

/// 建表诊断记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDiagnostic {
    /// 在外部输入中的行号；内置提供者为 `None`
    pub row_index: Option<usize>,
    /// 行中的不变名称（如果有）
    pub invariant_name: Option<String>,
    /// 诊断类型
    pub kind: DiagnosticKind,
    /// 记录时间
    pub recorded_at: DateTime<Utc>,
}

impl BuildDiagnostic {
    /// 创建新的诊断记录
    pub fn new(
        row_index: Option<usize>,
        invariant_name: Option<String>,
        kind: DiagnosticKind,
    ) -> Self {
        Self {
            row_index,
            invariant_name,
            kind,
            recorded_at: Utc::now(),
        }
    }
}

/// 有序描述符表
///
/// 只能追加，不能覆盖或删除；交给注册表缓存后仅以只读方式共享。
#[derive(Debug, Clone, Default)]
pub struct DescriptorTable {
    rows: Vec<ProviderDescriptor>,
    index: HashMap<String, usize>,
    diagnostics: Vec<BuildDiagnostic>,
}

impl DescriptorTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 在不变名称未出现时追加描述符，返回是否已追加
    pub fn insert_if_absent(&mut self, descriptor: ProviderDescriptor) -> bool {
        if self.index.contains_key(&descriptor.invariant_name) {
            return false;
        }
        self.index
            .insert(descriptor.invariant_name.clone(), self.rows.len());
        self.rows.push(descriptor);
        true
    }

    /// 记录建表诊断
    pub fn record(&mut self, diagnostic: BuildDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 按不变名称精确查找
    pub fn find(&self, invariant_name: &str) -> Option<&ProviderDescriptor> {
        self.index.get(invariant_name).map(|&i| &self.rows[i])
    }

    /// 是否包含指定不变名称
    pub fn contains(&self, invariant_name: &str) -> bool {
        self.index.contains_key(invariant_name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按显示顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.rows.iter()
    }

    /// 防御性拷贝
    pub fn snapshot(&self) -> Vec<ProviderDescriptor> {
        self.rows.clone()
    }

    /// 建表期间记录的诊断
    pub fn diagnostics(&self) -> &[BuildDiagnostic] {
        &self.diagnostics
    }
}
