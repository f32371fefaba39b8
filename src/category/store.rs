//! 分类存储：维护当前分类列表，所有修改都经过历史记录

use tracing::{debug, info};

use super::history::History;
use super::model::Category;
use super::template::TemplatePreset;
use crate::error::{ScorerError, ScorerResult};

/// 分类存储
#[derive(Debug, Clone)]
pub struct CategoryStore {
    categories: Vec<Category>,
    history: History,
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryStore {
    /// 创建空存储，历史以空列表快照作为起点
    pub fn new() -> Self {
        let mut history = History::new();
        history.record(&[]);
        Self {
            categories: Vec::new(),
            history,
        }
    }

    /// 添加分类
    pub fn add(&mut self, category: Category) -> ScorerResult<()> {
        category.validate()?;
        self.ensure_unique(&category.name)?;

        debug!("添加分类：{}", category);
        self.categories.push(category);
        self.history.record(&self.categories);
        Ok(())
    }

    /// 按索引删除分类
    pub fn remove(&mut self, index: usize) -> ScorerResult<Category> {
        if index >= self.categories.len() {
            return Err(ScorerError::Index {
                index,
                len: self.categories.len(),
            });
        }

        let removed = self.categories.remove(index);
        debug!("删除分类：{}", removed.name);
        self.history.record(&self.categories);
        Ok(removed)
    }

    /// 清空分类，同时清空历史（不可撤销）
    pub fn clear(&mut self) {
        self.categories.clear();
        self.history.reset();
        self.history.record(&[]);
        info!("分类与历史已清空");
    }

    /// 加载预置模板
    pub fn load_template(&mut self, preset: TemplatePreset) -> ScorerResult<()> {
        self.ensure_unique(preset.name())?;

        self.categories.push(preset.to_category());
        self.history.record(&self.categories);
        debug!("已加载模板：{}", preset);
        Ok(())
    }

    /// 撤销，返回状态是否发生变化
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.categories = snapshot;
                true
            }
            None => false,
        }
    }

    /// 重做，返回状态是否发生变化
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.categories = snapshot;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.same_name(name))
    }

    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn ensure_unique(&self, name: &str) -> ScorerResult<()> {
        if self.categories.iter().any(|c| c.same_name(name)) {
            return Err(ScorerError::DuplicateName(name.trim().to_string()));
        }
        Ok(())
    }
}
