//! 集成测试共用的测试提供者与描述符来源

use data_abstractions::{
    DbProviderFactory, ExternalDescriptorSource, ProviderType, RawProviderRow, SharedFactory,
    StaticMember, INSTANCE_MEMBER,
};
use data_impl::{InMemoryTypeRegistry, ProviderFactoryRegistry};
use infrastructure_common::{init_logging, ConfigError, LoggingConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::thread;
use std::time::Duration;

pub const VALID_TYPE: &str = "Valid.Type, ExposesSingleton";
pub const NO_SINGLETON_TYPE: &str = "Valid.Type.NoSingletonField";
pub const WRONG_SHAPE_TYPE: &str = "Valid.Type.WrongShape";
pub const NULL_INSTANCE_TYPE: &str = "Valid.Type.NullInstance";
pub const MISSING_TYPE: &str = "Missing.Type";

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
pub fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        init_logging(&LoggingConfig::development()).ok();
    });
}

/// 测试用工厂
#[derive(Debug)]
pub struct TestFactory {
    pub invariant_name: String,
}

impl DbProviderFactory for TestFactory {
    fn invariant_name(&self) -> &str {
        &self.invariant_name
    }
}

/// 注册了内置类型以及各种测试类型的类型注册表
pub fn test_type_registry() -> Arc<InMemoryTypeRegistry> {
    let registry = InMemoryTypeRegistry::with_built_ins();
    let types = vec![
        ProviderType::new(VALID_TYPE).with_lazy_instance(|| {
            Arc::new(TestFactory {
                invariant_name: "My.Provider".to_string(),
            }) as SharedFactory
        }),
        ProviderType::new(NO_SINGLETON_TYPE),
        ProviderType::new(WRONG_SHAPE_TYPE)
            .with_member(INSTANCE_MEMBER, StaticMember::value(String::from("factory"))),
        ProviderType::new(NULL_INSTANCE_TYPE)
            .with_member(INSTANCE_MEMBER, StaticMember::absent::<SharedFactory>()),
    ];
    for provider_type in types {
        registry
            .register(provider_type)
            .expect("测试类型不应重复注册");
    }
    Arc::new(registry)
}

/// 记录加载次数的描述符来源，可选地在每次加载时停顿以放大并发窗口
pub struct CountingSource {
    rows: Vec<RawProviderRow>,
    delay: Duration,
    loads: AtomicUsize,
}

impl CountingSource {
    pub fn new(rows: Vec<RawProviderRow>) -> Self {
        Self {
            rows,
            delay: Duration::ZERO,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ExternalDescriptorSource for CountingSource {
    fn load_descriptors(&self) -> Result<Vec<RawProviderRow>, ConfigError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(self.rows.clone())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// 使用测试类型注册表和给定外部行创建注册表
pub fn registry_with_rows(
    rows: Vec<RawProviderRow>,
) -> (ProviderFactoryRegistry, Arc<CountingSource>) {
    let source = Arc::new(CountingSource::new(rows));
    let registry = ProviderFactoryRegistry::new(test_type_registry(), source.clone());
    (registry, source)
}
