//! 持久化键值槽
//! 以字符串键读写字符串值，模拟浏览器本地存储

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

use crate::error::{ScorerError, ScorerResult};

/// 键值槽接口
pub trait KvSlot {
    /// 读取键值，不存在时返回 None
    fn get(&self, key: &str) -> ScorerResult<Option<String>>;

    /// 写入键值（整体覆盖）
    fn set(&self, key: &str, value: &str) -> ScorerResult<()>;

    /// 删除键
    fn remove(&self, key: &str) -> ScorerResult<()>;
}

/// 内存键值槽，克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvSlot for MemorySlot {
    fn get(&self, key: &str) -> ScorerResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ScorerResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ScorerResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// 文件键值槽：单个 JSON 对象文件保存全部键值
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ScorerResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            ScorerError::Persistence(format!("存储文件 {} 解析失败：{}", self.path.display(), e))
        })
    }

    /// 先写临时文件再重命名，避免写入中断损坏原文件
    fn write_all(&self, entries: &BTreeMap<String, String>) -> ScorerResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, &data)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!("存储文件已写入：{}，大小：{} 字节", self.path.display(), data.len());
        Ok(())
    }
}

impl KvSlot for FileSlot {
    fn get(&self, key: &str) -> ScorerResult<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ScorerResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> ScorerResult<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
