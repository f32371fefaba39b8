//! 成绩检索：按姓名搜索与排序

use std::fmt;
use std::str::FromStr;

use super::result_store::Record;
use crate::error::ScorerError;

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    Name,
    ScoreDesc,
    ScoreAsc,
}

impl SortOrder {
    pub fn key(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::Name => "name",
            SortOrder::ScoreDesc => "score-desc",
            SortOrder::ScoreAsc => "score-asc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ScorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" | "" => Ok(SortOrder::DateDesc),
            "date-asc" => Ok(SortOrder::DateAsc),
            "name" => Ok(SortOrder::Name),
            "score-desc" => Ok(SortOrder::ScoreDesc),
            "score-asc" => Ok(SortOrder::ScoreAsc),
            other => Err(ScorerError::Validation(format!("未知排序方式：{}", other))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 检索条件
#[derive(Debug, Clone, Default)]
pub struct ResultQuery {
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl ResultQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// 姓名包含搜索词（忽略大小写）后按指定方式排序
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let term = self
            .search
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());

        let mut filtered: Vec<Record> = match term {
            Some(term) => records
                .into_iter()
                .filter(|r| r.name.to_lowercase().contains(&term))
                .collect(),
            None => records,
        };

        match self.sort {
            SortOrder::DateDesc => filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortOrder::DateAsc => filtered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            SortOrder::Name => filtered.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            }),
            SortOrder::ScoreDesc => filtered.sort_by(|a, b| b.total_score.cmp(&a.total_score)),
            SortOrder::ScoreAsc => filtered.sort_by(|a, b| a.total_score.cmp(&b.total_score)),
        }
        filtered
    }
}
