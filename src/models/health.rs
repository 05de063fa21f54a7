use serde::Serialize;
use std::collections::BTreeMap;

/// 服务进程内存使用（字节）
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    /// 常驻内存，作为堆使用量上报
    pub heap_used: u64,
    /// 系统总内存中可供本进程使用的上限
    pub heap_total: u64,
    pub rss: u64,
    #[serde(rename = "virtual")]
    pub virtual_memory: u64,
}

/// `/api/health-enhanced` 的响应体
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedHealth {
    pub status: &'static str,
    pub port: u16,
    pub database: String,
    /// 启动以来的秒数
    pub uptime: f64,
    pub memory: MemoryUsage,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}
