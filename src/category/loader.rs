//! 分类集加载器
//! 负责从 JSON 文件导入分类集、将当前分类集导出为 JSON

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::model::Category;
use super::store::CategoryStore;
use crate::error::ScorerResult;

/// 分类集文件格式（兼容裸数组与带 categories 字段的对象）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CategoryFile {
    Wrapped { categories: Vec<Category> },
    Bare(Vec<Category>),
}

impl CategoryFile {
    fn into_categories(self) -> Vec<Category> {
        match self {
            CategoryFile::Wrapped { categories } | CategoryFile::Bare(categories) => categories,
        }
    }
}

/// 导入统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub added: usize,
    pub skipped: usize,
}

/// 分类集加载器
pub struct CategoryLoader;

impl CategoryLoader {
    /// 解析 JSON 文本
    pub fn parse(json: &str) -> ScorerResult<Vec<Category>> {
        let file: CategoryFile = serde_json::from_str(json)?;
        let categories: Vec<Category> = file
            .into_categories()
            .into_iter()
            .map(|c| Category::new(&c.name, c.keywords.as_slice(), c.min_required))
            .collect();
        debug!("分类集解析成功，分类数：{}", categories.len());
        Ok(categories)
    }

    /// 从文件读取分类集
    pub fn load_file(path: &Path) -> ScorerResult<Vec<Category>> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// 逐个加入存储，无效或重名的分类跳过并记录警告
    pub fn import_into(store: &mut CategoryStore, categories: Vec<Category>) -> ImportStats {
        let mut stats = ImportStats::default();
        for category in categories {
            let name = category.name.clone();
            match store.add(category) {
                Ok(()) => stats.added += 1,
                Err(e) => {
                    warn!("跳过分类 [{}]：{}", name, e);
                    stats.skipped += 1;
                }
            }
        }
        stats
    }

    /// 导出为格式化 JSON
    pub fn to_json(categories: &[Category]) -> ScorerResult<String> {
        let file = CategoryFile::Wrapped {
            categories: categories.to_vec(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// 导出到文件
    pub fn save_file(path: &Path, categories: &[Category]) -> ScorerResult<()> {
        fs::write(path, Self::to_json(categories)?)?;
        Ok(())
    }
}
