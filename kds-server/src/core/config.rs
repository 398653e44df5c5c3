/// 服务器配置 - 厨房显示服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP/WebSocket 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | CHANNEL_CAPACITY | 1024 | 广播通道容量 |
/// | CATALOG_FILE | (无) | 菜品/分类主数据 JSON 文件 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 CATALOG_FILE=./catalog.json cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 广播通道容量 (滞后的订阅者会丢帧，由轮询兜底)
    pub channel_capacity: usize,
    /// 菜品/分类主数据文件 (内存存储适配器使用)
    pub catalog_file: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            channel_capacity: std::env::var("CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1024),
            catalog_file: std::env::var("CATALOG_FILE").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
