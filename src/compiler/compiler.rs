//! 关键词编译器核心
//! 仅负责将分类关键词编译为可执行的正则模式

use std::time::Instant;
use tracing::{debug, warn};

use super::pattern::{CompiledCategory, CompiledCategorySet, KeywordPattern};
use crate::category::Category;
use crate::error::ScorerResult;

/// 关键词编译器
pub struct KeywordCompiler;

impl KeywordCompiler {
    /// 编译分类集
    pub fn compile(categories: &[Category]) -> ScorerResult<CompiledCategorySet> {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        let compiled = categories
            .iter()
            .map(|category| Self::compile_category(category, &mut stats))
            .collect::<ScorerResult<Vec<_>>>()?;

        debug!("✅ 关键词编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "📊 编译统计：分类{}个、关键词{}个",
            stats.category_count, stats.keyword_count
        );

        Ok(CompiledCategorySet { categories: compiled })
    }

    /// 编译单个分类
    fn compile_category(category: &Category, stats: &mut CompileStats) -> ScorerResult<CompiledCategory> {
        let patterns = category
            .keywords
            .iter()
            .map(|keyword| KeywordPattern::new(keyword))
            .collect::<ScorerResult<Vec<_>>>()?;

        stats.category_count += 1;
        stats.keyword_count += patterns.len();

        Ok(CompiledCategory {
            name: category.name.clone(),
            keyword_count: category.keywords.len(),
            min_required: category.min_required,
            patterns,
        })
    }
}

/// 统计关键词在代码中的整词命中次数（忽略大小写、不重叠）
pub fn count(code: &str, keyword: &str) -> usize {
    match KeywordPattern::new(keyword) {
        Ok(pattern) => pattern.count(code),
        Err(e) => {
            warn!("关键词 [{}] 编译失败：{}", keyword, e);
            0
        }
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    category_count: usize,
    keyword_count: usize,
}
