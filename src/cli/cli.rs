use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::services::probe::DEFAULT_PROBE_TIMEOUT;
use crate::services::registry::DEFAULT_REGISTRY_FILE;

/// HVI-Continuity 开发服务器与运维工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 API 服务
    Serve(ServeArgs),
    /// 探测正在运行的服务的健康接口
    Probe(ProbeArgs),
    /// 查看或清空进程注册表
    Processes {
        #[command(subcommand)]
        command: ProcessesCommand,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// 监听端口
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// 监听地址
    #[arg(short = 'a', long, env = "ADDRESS", default_value = "0.0.0.0")]
    pub address: String,

    /// MongoDB 连接串
    #[arg(long, env = "MONGODB_URI")]
    pub database_uri: Option<String>,

    /// 运行环境
    #[arg(long, env = "NODE_ENV", default_value = "development")]
    pub environment: String,

    /// 写入注册表的进程类型
    #[arg(long, env = "SERVER_PROCESS", default_value = "server")]
    pub process_type: String,

    /// 进程注册表文件
    #[arg(long, env = "REGISTRY_FILE", default_value = DEFAULT_REGISTRY_FILE)]
    pub registry: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// 要探测的接口路径
    #[arg(default_values_t = [String::from("/api/health")])]
    pub endpoints: Vec<String>,

    /// 服务地址，默认 http://localhost:$PORT
    #[arg(long)]
    pub base_url: Option<String>,

    /// 端口（未指定 base-url 时使用）
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// 超时时间（秒）
    #[arg(short, long, default_value_t = DEFAULT_PROBE_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl ProbeArgs {
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

#[derive(Subcommand, Debug)]
pub enum ProcessesCommand {
    /// 列出已记录的进程
    List {
        #[arg(long, env = "REGISTRY_FILE", default_value = DEFAULT_REGISTRY_FILE)]
        registry: PathBuf,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
    /// 删除注册表文件
    Clear {
        #[arg(long, env = "REGISTRY_FILE", default_value = DEFAULT_REGISTRY_FILE)]
        registry: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let args = CommandArgs::try_parse_from(["continuity", "serve", "--port", "5001"]).unwrap();
        match args.command {
            Commands::Serve(serve) => {
                assert_eq!(serve.port, 5001);
                assert_eq!(serve.registry, PathBuf::from(DEFAULT_REGISTRY_FILE));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_probe_endpoints() {
        let args = CommandArgs::try_parse_from([
            "continuity",
            "probe",
            "/api/health",
            "/api/health-enhanced",
            "--base-url",
            "http://127.0.0.1:5001",
            "--timeout",
            "10",
        ])
        .unwrap();

        match args.command {
            Commands::Probe(probe) => {
                assert_eq!(probe.endpoints, vec!["/api/health", "/api/health-enhanced"]);
                assert_eq!(probe.resolved_base_url(), "http://127.0.0.1:5001");
                assert_eq!(probe.timeout, 10);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_probe_timeout_default() {
        let args = CommandArgs::try_parse_from(["continuity", "probe"]).unwrap();
        match args.command {
            Commands::Probe(probe) => {
                assert_eq!(probe.timeout, DEFAULT_PROBE_TIMEOUT.as_secs());
                assert_eq!(probe.endpoints, vec!["/api/health"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_processes_clear() {
        let args =
            CommandArgs::try_parse_from(["continuity", "processes", "clear", "--registry", "/tmp/r.json"])
                .unwrap();
        assert!(matches!(
            args.command,
            Commands::Processes { command: ProcessesCommand::Clear { .. } }
        ));
    }
}
