//! 显示终端广播中心
//!
//! # 消息流
//!
//! ```text
//! KitchenService ──▶ publish() ──▶ broadcast::Sender<DisplayMessage>
//!                                            │
//!                          ┌─────────────────┼─────────────────┐
//!                          ▼                 ▼                 ▼
//!                     expeditor ws      station ws        table ws
//! ```
//!
//! The hub performs no filtering: every subscriber receives every frame and
//! decides locally (by event kind) whether to re-fetch its projection. There
//! is no backlog and no replay — a reconnecting client starts from the
//! current state via its polling backstop.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use shared::message::{DisplayMessage, KitchenEvent};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。每种资源类型维护独立的版本号，
/// 支持原子递增。客户端通过版本号缺口判断是否错过了通知。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 递增指定资源的版本号并返回新值
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号 (不存在返回 0)
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }

    /// 所有资源的当前版本快照 (用于 Welcome 帧)
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.versions
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }
}

/// A connected display client, as tracked by the hub registry
#[derive(Debug, Clone, Serialize)]
pub struct ConnectedDisplay {
    pub id: String,
    /// Client-chosen name (e.g. "grill-station", "expeditor-1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub connected_at: i64,
}

/// 广播中心 - 负责把变更通知推送到所有已连接的显示终端
///
/// Cloneable handle; all clones share the channel, the registry and the
/// version counters. Injected into [`crate::kitchen::KitchenService`] so
/// tests can subscribe directly without a WebSocket.
#[derive(Debug, Clone)]
pub struct DisplayHub {
    tx: broadcast::Sender<DisplayMessage>,
    versions: Arc<ResourceVersions>,
    clients: Arc<DashMap<String, ConnectedDisplay>>,
    shutdown_token: CancellationToken,
}

impl DisplayHub {
    /// 创建指定通道容量的广播中心
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            versions: Arc::new(ResourceVersions::new()),
            clients: Arc::new(DashMap::new()),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 发布变更通知到所有订阅者
    ///
    /// Stamps the per-resource version and sends. Publish failures are
    /// swallowed: no subscribers is normal operation, and the command's own
    /// persistence succeeding is the operation's source of truth.
    pub fn publish(&self, event: KitchenEvent) {
        let resource = event.resource();
        let version = self.versions.increment(resource);
        let frame = DisplayMessage::Event {
            resource: resource.to_string(),
            version,
            event,
        };
        if let Err(e) = self.tx.send(frame) {
            tracing::debug!(resource, version, "No display subscribers: {e}");
        }
    }

    /// 订阅广播帧 (ws 处理器和测试使用)
    pub fn subscribe(&self) -> broadcast::Receiver<DisplayMessage> {
        self.tx.subscribe()
    }

    /// 注册已连接的显示终端
    pub fn register(&self, client: ConnectedDisplay) {
        tracing::info!(client_id = %client.id, name = ?client.name, "Display connected");
        self.clients.insert(client.id.clone(), client);
    }

    /// 注销显示终端 (断开连接时静默移除)
    pub fn unregister(&self, client_id: &str) {
        if self.clients.remove(client_id).is_some() {
            tracing::info!(client_id, "Display disconnected");
        }
    }

    /// 当前已连接的显示终端列表
    pub fn connected_displays(&self) -> Vec<ConnectedDisplay> {
        self.clients.iter().map(|e| e.value().clone()).collect()
    }

    /// 每资源版本快照 (Welcome 帧携带)
    pub fn version_snapshot(&self) -> HashMap<String, u64> {
        self.versions.snapshot()
    }

    /// 获取关闭令牌 (ws 处理器监听)
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 优雅关闭：通知所有 ws 会话退出
    pub fn shutdown(&self) {
        tracing::info!("Shutting down display hub");
        self.shutdown_token.cancel();
    }
}

impl Default for DisplayHub {
    fn default() -> Self {
        Self::new(1024)
    }
}
