//! # 数据库提供者工厂注册表实现
//!
//! 根据提供者不变名称（如 `System.Data.SqlClient`）解析进程内唯一的工厂单例。
//!
//! - [`ProviderFactoryRegistry`] - 一次性延迟建表并缓存的注册表
//! - [`DescriptorTableBuilder`] - 合并内置与外部描述符
//! - [`InMemoryTypeRegistry`] - 类型定位器到工厂单例的注册表
//! - [`FileDescriptorSource`] - 基于配置文件的外部描述符来源
//! - [`global`] - 进程级默认注册表

pub mod builtins;
pub mod config;
pub mod discovery;
pub mod global;
pub mod registry;
pub mod table_builder;
pub mod type_registry;

pub use builtins::*;
pub use config::*;
pub use discovery::*;
pub use registry::*;
pub use table_builder::*;
pub use type_registry::*;
