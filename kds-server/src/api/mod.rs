//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查接口
//! - [`kitchen`] - 厨房显示读取与操作接口
//! - [`live`] - WebSocket 实时通知接口

pub mod health;
pub mod kitchen;
pub mod live;

use axum::Router;

use crate::core::ServerState;

/// 组装完整路由表
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(kitchen::router())
        .merge(live::router())
}
