//! # Data Provider Abstractions
//!
//! 数据库提供者抽象层，定义提供者描述符、工厂能力以及类型解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ProviderDescriptor`] - 提供者描述符
//! - [`DescriptorTable`] - 不可变的有序描述符表
//! - [`DbProviderFactory`] - 提供者工厂能力
//! - [`TypeResolver`] - 类型定位器解析接口
//! - [`ExternalDescriptorSource`] - 外部描述符来源

pub mod descriptor;
pub mod factory;
pub mod resolver;
pub mod source;

pub use descriptor::*;
pub use factory::*;
pub use resolver::*;
pub use source::*;
