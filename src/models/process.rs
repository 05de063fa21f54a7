use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 进程注册表中的一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// 进程类型（例如 "server"）
    #[serde(rename = "type")]
    pub kind: String,
    /// 监听端口
    pub port: u16,
    /// 进程 ID
    pub pid: u32,
    /// 启动该进程的可执行文件
    pub file: String,
    /// 记录时间（ISO-8601）
    pub timestamp: DateTime<Utc>,
}

impl ProcessRecord {
    /// 为当前进程创建一条记录
    pub fn current(kind: &str, port: u16) -> Self {
        let file = std::env::current_exe()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            kind: kind.to_string(),
            port,
            pid: std::process::id(),
            file,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_name() {
        let record = ProcessRecord::current("server", 5000);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["type"], "server");
        assert_eq!(value["port"], 5000);
        assert_eq!(value["pid"], std::process::id());
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_parse_node_written_record() {
        let raw = r#"{
            "type": "server",
            "port": 5001,
            "pid": 4242,
            "file": "/srv/app/server.js",
            "timestamp": "2024-03-01T10:15:30.123Z"
        }"#;

        let record: ProcessRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.kind, "server");
        assert_eq!(record.port, 5001);
        assert_eq!(record.pid, 4242);
        assert_eq!(record.timestamp.timestamp_millis(), 1_709_288_130_123);
    }
}
