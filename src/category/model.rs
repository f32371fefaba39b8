//! 分类数据模型定义
//! 仅存储分类数据与基础校验，支持序列化/反序列化

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::error::{ScorerError, ScorerResult};
use crate::utils::parse_keywords;

/// 关键词分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(rename = "minRequired", alias = "min_required")]
    pub min_required: usize,
}

impl Category {
    /// 创建分类（名称去空白，关键词统一小写并剔除空项）
    pub fn new<S: AsRef<str>>(name: &str, keywords: &[S], min_required: usize) -> Self {
        Self {
            name: name.trim().to_string(),
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            min_required,
        }
    }

    /// 从原始输入创建（关键词以空白或逗号分隔）
    pub fn from_input(name: &str, keywords_input: &str, min_required: usize) -> Self {
        Self {
            name: name.trim().to_string(),
            keywords: parse_keywords(keywords_input),
            min_required,
        }
    }

    /// 校验顺序：名称 → 关键词 → 最小命中数
    pub fn validate(&self) -> ScorerResult<()> {
        if self.name.trim().is_empty() {
            return Err(ScorerError::validation("分类名称不能为空"));
        }
        if self.keywords.is_empty() || self.keywords.iter().any(|k| k.is_empty()) {
            return Err(ScorerError::validation("至少需要一个关键词"));
        }
        if self.min_required < 1 || self.min_required > self.keywords.len() {
            return Err(ScorerError::Validation(format!(
                "最小命中数必须在 1 到 {} 之间",
                self.keywords.len()
            )));
        }
        Ok(())
    }

    /// 名称是否相同（忽略大小写）
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] Min: {}",
            self.name,
            self.keywords.join(", "),
            self.min_required
        )
    }
}
