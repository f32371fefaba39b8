//! 界面偏好（主题）持久化

use tracing::{debug, warn};

use super::slot::KvSlot;
use crate::error::ScorerResult;

/// 主题偏好，以 "true"/"false" 字符串保存
pub struct Preferences<S: KvSlot> {
    slot: S,
    theme_key: String,
}

impl<S: KvSlot> Preferences<S> {
    pub fn new(slot: S, theme_key: impl Into<String>) -> Self {
        Self {
            slot,
            theme_key: theme_key.into(),
        }
    }

    /// 是否为深色模式，读取失败时按浅色处理
    pub fn dark_mode(&self) -> bool {
        match self.slot.get(&self.theme_key) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!("读取主题偏好失败：{}", e);
                false
            }
        }
    }

    pub fn set_dark_mode(&self, enabled: bool) -> ScorerResult<()> {
        self.slot
            .set(&self.theme_key, if enabled { "true" } else { "false" })?;
        debug!("主题偏好已保存：dark_mode={}", enabled);
        Ok(())
    }

    /// 切换主题，返回切换后的状态
    pub fn toggle(&self) -> ScorerResult<bool> {
        let enabled = !self.dark_mode();
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}
