//! Kitchen display coordination server
//!
//! 把餐厅下单流和后厨备餐流连接起来的协调服务：订单项经过
//! Pending → Cooking → Done 的备餐状态机，三种投影视图
//! (按桌 / 按菜 / 按工位) 直接从当前订单状态推导，变更通过
//! WebSocket 实时通知所有显示终端。
//!
//! # 模块结构
//!
//! ```text
//! kds-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── kitchen/       # 状态机、聚合引擎、优先级
//! ├── live/          # 显示终端广播中心
//! ├── store/         # 存储适配器 (内存实现)
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod core;
pub mod kitchen;
pub mod live;
pub mod store;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use kitchen::KitchenService;
pub use live::DisplayHub;
pub use store::{MemoryOrderStore, OrderStore};
pub use utils::{AppError, AppResult};
