//! 编译后模式模型
//! 关键词编译为整词、忽略大小写的正则

use regex::Regex;

use crate::error::ScorerResult;

/// 编译后的关键词模式
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    pub keyword: String,
    pub regex: Regex,
}

impl KeywordPattern {
    /// 编译单个关键词（元字符按字面量转义）
    pub fn new(keyword: &str) -> ScorerResult<Self> {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
        Ok(Self {
            keyword: keyword.to_string(),
            regex: Regex::new(&pattern)?,
        })
    }

    /// 统计不重叠的命中次数
    pub fn count(&self, code: &str) -> usize {
        if self.keyword.is_empty() {
            return 0;
        }
        self.regex.find_iter(code).count()
    }

    /// 规则描述
    pub fn describe(&self) -> &str {
        self.regex.as_str()
    }
}

/// 分类编译后的规则
#[derive(Debug, Clone)]
pub struct CompiledCategory {
    pub name: String,
    pub patterns: Vec<KeywordPattern>,
    pub keyword_count: usize,
    pub min_required: usize,
}

impl CompiledCategory {
    /// 分类内所有关键词命中数之和（不同关键词重复命中均计数）
    pub fn matched(&self, code: &str) -> usize {
        self.patterns.iter().map(|p| p.count(code)).sum()
    }
}

/// 编译后的分类集（保持分类顺序）
#[derive(Debug, Clone, Default)]
pub struct CompiledCategorySet {
    pub categories: Vec<CompiledCategory>,
}

impl CompiledCategorySet {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
