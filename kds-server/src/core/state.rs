use std::sync::Arc;

use crate::core::Config;
use crate::kitchen::KitchenService;
use crate::live::DisplayHub;
use crate::store::{MemoryOrderStore, OrderStore};
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。axum 的每个请求处理器都会
/// 克隆一份。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<dyn OrderStore> | 订单/菜品存储适配器 |
/// | hub | DisplayHub | 显示终端广播中心 |
/// | kitchen | KitchenService | 厨房状态机与读取门面 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn OrderStore>,
    pub hub: DisplayHub,
    pub kitchen: KitchenService,
}

impl ServerState {
    /// 手动构造 (测试和嵌入场景使用，通常用 [`ServerState::initialize`])
    pub fn new(config: Config, store: Arc<dyn OrderStore>) -> Self {
        let hub = DisplayHub::new(config.channel_capacity);
        let kitchen = KitchenService::new(store.clone(), hub.clone());
        Self {
            config,
            store,
            hub,
            kitchen,
        }
    }

    /// 初始化服务器状态
    ///
    /// 根据配置选择存储：设置了 `CATALOG_FILE` 时从 JSON 文件加载菜品
    /// 主数据，否则以空目录启动 (菜品通过订单提交前的外部流程注入)。
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let store: Arc<dyn OrderStore> = match &config.catalog_file {
            Some(path) => {
                tracing::info!(path, "Loading catalog master data");
                Arc::new(MemoryOrderStore::from_catalog_file(path)?)
            }
            None => Arc::new(MemoryOrderStore::new()),
        };
        Ok(Self::new(config.clone(), store))
    }
}
