//! 评分引擎：对全部分类执行关键词统计，输出逐分类通过情况与总分

use tracing::debug;

use super::report::{CategoryResult, CategoryScore, ScoreReport};
use crate::category::Category;
use crate::compiler::{CompiledCategorySet, KeywordCompiler};
use crate::error::{ScorerError, ScorerResult};

/// 评分引擎（无状态，纯函数）
pub struct ScoringEngine;

impl ScoringEngine {
    /// 对代码执行评分
    pub fn evaluate(code: &str, categories: &[Category]) -> ScorerResult<ScoreReport> {
        Self::validate_inputs(code, categories)?;
        let compiled = KeywordCompiler::compile(categories)?;
        Ok(Self::evaluate_compiled(code, &compiled))
    }

    /// 带检查关键词列表校验的评分（检查关键词为空时拒绝执行）
    pub fn evaluate_checked(
        code: &str,
        check_keywords: &[String],
        categories: &[Category],
    ) -> ScorerResult<ScoreReport> {
        if check_keywords.is_empty() {
            return Err(ScorerError::validation("请输入需要检查的关键词"));
        }
        Self::evaluate(code, categories)
    }

    /// 使用已编译的分类集评分
    pub fn evaluate_compiled(code: &str, compiled: &CompiledCategorySet) -> ScoreReport {
        let mut report = ScoreReport::default();

        for category in &compiled.categories {
            let matched = category.matched(code);
            let score = CategoryScore::new(matched, category.min_required);
            debug!(
                "分类评分：分类={}，命中={}，最小命中={}，结果={}",
                category.name,
                matched,
                category.min_required,
                score.status()
            );

            report.total_category_score += score.score;
            report.total_matched += matched;
            report.results.push(CategoryResult {
                name: category.name.clone(),
                keyword_count: category.keyword_count,
                score,
            });
        }

        report
    }

    fn validate_inputs(code: &str, categories: &[Category]) -> ScorerResult<()> {
        if categories.is_empty() {
            return Err(ScorerError::validation("请先添加分类"));
        }
        if code.trim().is_empty() {
            return Err(ScorerError::validation("请粘贴需要检查的代码"));
        }
        Ok(())
    }
}
