//! 评分结果模型
//! 仅存储评分数据与展示辅助，支持序列化

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// 分类通过时的固定得分
pub const PASS_REWARD: u32 = 3;

/// 单个分类的评分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub matched: usize,
    #[serde(rename = "minRequired")]
    pub min_required: usize,
    pub passed: bool,
    pub score: u32,
}

impl CategoryScore {
    /// 根据命中数与最小命中数计算
    pub fn new(matched: usize, min_required: usize) -> Self {
        let passed = matched >= min_required;
        Self {
            matched,
            min_required,
            passed,
            score: if passed { PASS_REWARD } else { 0 },
        }
    }

    pub fn status(&self) -> &'static str {
        if self.passed { "PASSED" } else { "FAILED" }
    }

    pub fn badge(&self) -> &'static str {
        if self.passed { "✓ PASSED" } else { "✗ FAILED" }
    }
}

/// 分类评分条目（保留关键词数量用于展示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub name: String,
    pub keyword_count: usize,
    pub score: CategoryScore,
}

impl fmt::Display for CategoryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 命中数不封顶，可能大于关键词数
        write!(
            f,
            "{} [{}] Matched: {} / Keywords: {} | Min Required: {} | Score: +{}",
            self.name,
            self.score.status(),
            self.score.matched,
            self.keyword_count,
            self.score.min_required,
            self.score.score
        )
    }
}

impl CategoryResult {
    /// 统计视图中的命中摘要
    pub fn match_summary(&self) -> String {
        format!("{}: {} matches {}", self.name, self.score.matched, self.score.badge())
    }
}

/// 完整评分报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub results: Vec<CategoryResult>,
    pub total_category_score: u32,
    pub total_matched: usize,
}

impl ScoreReport {
    /// 按分类名获取评分
    pub fn get(&self, name: &str) -> Option<&CategoryScore> {
        self.results.iter().find(|r| r.name == name).map(|r| &r.score)
    }

    /// 分类名 -> 评分
    pub fn scores(&self) -> HashMap<String, CategoryScore> {
        self.results
            .iter()
            .map(|r| (r.name.clone(), r.score))
            .collect()
    }

    /// 按分类名过滤展示条目（None 表示全部）
    pub fn filter(&self, name: Option<&str>) -> Vec<&CategoryResult> {
        self.results
            .iter()
            .filter(|r| name.is_none_or(|n| r.name == n))
            .collect()
    }

    /// 最终得分 = 分类得分 + 手动加减分（溢出时饱和）
    pub fn final_score(&self, manual_score: i64) -> i64 {
        i64::from(self.total_category_score).saturating_add(manual_score)
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.score.passed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// 解析手动加减分，无效输入按 0 处理
///
/// 与 `parseInt` 一致：忽略首尾空白，取开头的整数部分（如 `"12abc"` 解析为 12）
pub fn parse_manual_score(input: &str) -> i64 {
    let trimmed = input.trim();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|value| sign * value)
        .unwrap_or(0)
}

/// 格式化手动分（正数带 + 号）
pub fn format_manual_score(manual_score: i64) -> String {
    if manual_score >= 0 {
        format!("+{}", manual_score)
    } else {
        manual_score.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_boundary() {
        let passed = CategoryScore::new(3, 3);
        assert!(passed.passed);
        assert_eq!(passed.score, 3);

        let failed = CategoryScore::new(2, 3);
        assert!(!failed.passed);
        assert_eq!(failed.score, 0);
    }

    #[test]
    fn test_parse_manual_score() {
        assert_eq!(parse_manual_score("5"), 5);
        assert_eq!(parse_manual_score(" -3 "), -3);
        assert_eq!(parse_manual_score("+7"), 7);
        assert_eq!(parse_manual_score("12abc"), 12);
        assert_eq!(parse_manual_score("abc"), 0);
        assert_eq!(parse_manual_score(""), 0);
        assert_eq!(parse_manual_score("-"), 0);
        assert_eq!(parse_manual_score("99999999999999999999999"), 0);
    }

    #[test]
    fn test_final_score_and_filter() {
        let report = ScoreReport {
            results: vec![
                CategoryResult {
                    name: "A".to_string(),
                    keyword_count: 2,
                    score: CategoryScore::new(5, 1),
                },
                CategoryResult {
                    name: "B".to_string(),
                    keyword_count: 2,
                    score: CategoryScore::new(0, 1),
                },
            ],
            total_category_score: 3,
            total_matched: 5,
        };

        assert_eq!(report.final_score(-4), -1);
        assert_eq!(report.filter(Some("B")).len(), 1);
        assert_eq!(report.filter(None).len(), 2);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(
            report.results[0].to_string(),
            "A [PASSED] Matched: 5 / Keywords: 2 | Min Required: 1 | Score: +3"
        );
        assert_eq!(format_manual_score(0), "+0");
        assert_eq!(format_manual_score(-2), "-2");
    }

    #[test]
    fn test_final_score_saturates_on_extreme_manual() {
        let report = ScoreReport {
            total_category_score: 3,
            ..Default::default()
        };
        let manual = parse_manual_score("9223372036854775807");
        assert_eq!(manual, i64::MAX);
        assert_eq!(report.final_score(manual), i64::MAX);
        assert_eq!(report.final_score(i64::MIN), i64::MIN + 3);
    }

    #[test]
    fn test_match_summary() {
        let passed = CategoryResult {
            name: "Loops".to_string(),
            keyword_count: 2,
            score: CategoryScore::new(4, 2),
        };
        let failed = CategoryResult {
            name: "OOP".to_string(),
            keyword_count: 8,
            score: CategoryScore::new(1, 4),
        };
        assert_eq!(passed.match_summary(), "Loops: 4 matches ✓ PASSED");
        assert_eq!(failed.match_summary(), "OOP: 1 matches ✗ FAILED");
    }
}
