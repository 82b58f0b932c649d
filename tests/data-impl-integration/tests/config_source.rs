//! 配置文件来源与注册表的集成测试

use data_impl::builtins::SQL_CLIENT_INVARIANT_NAME;
use data_impl::{FileDescriptorSource, InitState, ProviderFactoryRegistry};
use data_impl_integration_tests::{init_test_logger, test_type_registry, VALID_TYPE};
use infrastructure_common::{ConfigError, ProviderError};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn providers_toml() -> String {
    format!(
        r#"
[[db_provider_factories]]
name = "My Data Provider"
invariant = "My.Provider"
description = "示例提供者"
type = "{VALID_TYPE}"

[[db_provider_factories]]
invariant = "{SQL_CLIENT_INVARIANT_NAME}"
type = "Shadow.Type"

[[db_provider_factories]]
name = "No Invariant"
type = "{VALID_TYPE}"
"#
    )
}

fn file_registry(path: &Path) -> ProviderFactoryRegistry {
    ProviderFactoryRegistry::new(test_type_registry(), Arc::new(FileDescriptorSource::new(path)))
}

#[test]
fn test_registry_loads_toml_file() {
    init_test_logger();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("providers.toml");
    fs::write(&path, providers_toml()).unwrap();

    let registry = file_registry(&path);

    let providers = registry.list_providers().unwrap();
    let names: Vec<_> = providers.iter().map(|d| d.invariant_name.as_str()).collect();
    assert_eq!(names, vec![SQL_CLIENT_INVARIANT_NAME, "My.Provider"]);
    assert_eq!(providers[1].name, "My Data Provider");
    assert_eq!(providers[1].description, "示例提供者");

    let factory = registry.resolve_factory("My.Provider").unwrap();
    assert_eq!(factory.invariant_name(), "My.Provider");
}

#[test]
fn test_registry_loads_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("providers.yaml");
    let yaml = format!(
        "db_provider_factories:\n  - invariant_name: Yaml.Provider\n    type_locator: \"{}\"\n",
        VALID_TYPE
    );
    fs::write(&path, yaml).unwrap();

    let registry = file_registry(&path);
    assert!(registry.resolve_factory("Yaml.Provider").is_ok());
}

#[test]
fn test_missing_file_fails_then_recovers() {
    init_test_logger();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("providers.json");
    let registry = file_registry(&path);

    let err = registry.resolve_factory("Json.Provider").unwrap_err();
    assert!(matches!(
        &err,
        ProviderError::InitializationFailed { source }
            if matches!(source.as_ref(), ConfigError::FileNotFound { .. })
    ));
    assert_eq!(registry.state(), InitState::Uninitialized);

    let json = format!(
        r#"{{"db_provider_factories": [{{"invariant": "Json.Provider", "type": "{}"}}]}}"#,
        VALID_TYPE
    );
    fs::write(&path, json).unwrap();

    assert!(registry.resolve_factory("Json.Provider").is_ok());
    assert_eq!(registry.state(), InitState::Ready);

    // 表就绪后不再读取文件
    fs::remove_file(&path).unwrap();
    assert!(registry.resolve_factory("Json.Provider").is_ok());
}

#[test]
fn test_unparseable_file_is_initialization_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("providers.toml");
    fs::write(&path, "[[db_provider_factories]\n").unwrap();

    let registry = file_registry(&path);
    assert!(matches!(
        registry.list_providers(),
        Err(ProviderError::InitializationFailed { source })
            if matches!(source.as_ref(), ConfigError::ParseError { .. })
    ));
}
