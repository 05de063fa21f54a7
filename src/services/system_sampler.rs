use crate::models::MemoryUsage;
use std::sync::Mutex;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

/// 采样本进程的内存使用
pub struct SystemSampler {
    system: Mutex<System>,
    pid: Pid,
}

impl SystemSampler {
    pub fn new() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing().with_memory()),
        );

        Self {
            system: Mutex::new(system),
            pid: Pid::from_u32(std::process::id()),
        }
    }

    pub fn memory_usage(&self) -> Option<MemoryUsage> {
        let mut sys = self.system.lock().ok()?;

        sys.refresh_memory();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        let process = sys.process(self.pid)?;
        let total_memory = sys.total_memory();

        Some(MemoryUsage {
            heap_used: process.memory(),
            heap_total: total_memory,
            rss: process.memory(),
            virtual_memory: process.virtual_memory(),
        })
    }
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}
