use crate::cli::ServeArgs;
use crate::models::ProcessRecord;
use crate::services::{HealthProbe, ProcessRegistry};

/// 把当前服务进程写入注册表，失败只记录警告，不影响启动
pub fn register_self(args: &ServeArgs, registry: &ProcessRegistry) -> bool {
    let record = ProcessRecord::current(&args.process_type, args.port);
    match registry.save_process(record) {
        Ok(()) => {
            log::info!(
                "📝 Recorded PID {} in {}",
                std::process::id(),
                registry.path().display()
            );
            true
        }
        Err(e) => {
            log::warn!("Failed to record process: {}", e);
            false
        }
    }
}

/// 依次探测每个接口，全部成功时返回成功数量
pub async fn run_probes(probe: &HealthProbe, endpoints: &[String]) -> anyhow::Result<usize> {
    let mut failed = 0;
    for endpoint in endpoints {
        match probe.probe(endpoint).await {
            Ok(report) => {
                println!("✅ {} -> HTTP {} ({} ms)", report.url, report.status, report.elapsed.as_millis());
                println!("{}", serde_json::to_string_pretty(&report.body)?);
            }
            Err(e) => {
                failed += 1;
                log::debug!("Probe of {} failed: {:?}", endpoint, e);
                println!("❌ {}", e);
                println!("💡 {}", e.hint());
            }
        }
        println!();
    }

    if failed > 0 {
        anyhow::bail!("{} of {} probes failed", failed, endpoints.len());
    }

    println!("🎉 All {} probes passed", endpoints.len());
    Ok(endpoints.len())
}
