use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::ProcessRecord;

pub const DEFAULT_REGISTRY_FILE: &str = "running-processes.json";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("registry I/O failed on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode registry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 基于单个 JSON 文件的进程注册表
///
/// 文件内容是按追加顺序排列的记录数组。读取时文件不存在或无法解析都视为空表。
/// 没有跨进程锁，两个进程同时追加可能丢失其中一条。
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    path: PathBuf,
}

impl ProcessRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加一条记录，首次调用时创建文件
    ///
    /// 已有条目按原样保留，即使其结构无法识别。文件存在但无法读取时返回错误，不覆盖。
    pub fn save_process(&self, record: ProcessRecord) -> Result<(), RegistryError> {
        let mut entries = self.read_entries()?;
        entries.push(serde_json::to_value(record)?);
        self.write_all(&entries)?;

        log::debug!(
            "Recorded process in {} ({} entries)",
            self.path.display(),
            entries.len()
        );
        Ok(())
    }

    /// 读取全部记录
    ///
    /// 无法解码的单条记录会被跳过，其余记录照常返回。
    pub fn get_processes(&self) -> Vec<ProcessRecord> {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{}", e);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!(
                        "Skipping entry {} of {}: {}",
                        i,
                        self.path.display(),
                        e
                    );
                    None
                }
            })
            .collect()
    }

    /// 删除注册表文件
    pub fn clear_processes(&self) -> Result<(), RegistryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Cleared process registry {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(RegistryError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// 读取原始数组；文件不存在或内容不是 JSON 数组时视为空
    fn read_entries(&self) -> Result<Vec<Value>, RegistryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable registry {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, entries: &[Value]) -> Result<(), RegistryError> {
        let json = serde_json::to_string_pretty(entries)?;

        // 每个写者使用独立的临时文件，再 rename 覆盖
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| RegistryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if let Err(source) = tmp.write_all(json.as_bytes()) {
            return Err(RegistryError::Io {
                path: tmp.path().to_path_buf(),
                source,
            });
        }
        tmp.persist(&self.path).map_err(|e| RegistryError::Io {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_FILE)
    }
}
