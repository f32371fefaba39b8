//! 分类历史（撤销/重做）
//! 线性历史：新的修改会丢弃当前游标之后的所有重做快照

use tracing::debug;

use super::model::Category;

/// 分类列表快照（深拷贝）
pub type CategorySnapshot = Vec<Category>;

/// 撤销/重做历史
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<CategorySnapshot>,
    // 取值范围 [-1, snapshots.len() - 1]
    cursor: isize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// 空历史，游标为 -1
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: -1,
        }
    }

    /// 截断游标之后的快照并追加当前列表
    pub fn record(&mut self, current: &[Category]) {
        let keep = (self.cursor + 1) as usize;
        self.snapshots.truncate(keep);
        self.snapshots.push(current.to_vec());
        self.cursor += 1;
        debug!("记录分类快照：游标={}，快照数={}", self.cursor, self.snapshots.len());
    }

    /// 撤销，游标 <= 0 时返回 None
    pub fn undo(&mut self) -> Option<CategorySnapshot> {
        if self.cursor <= 0 {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// 重做，游标已在末尾时返回 None
    pub fn redo(&mut self) -> Option<CategorySnapshot> {
        if self.cursor >= self.snapshots.len() as isize - 1 {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    /// 清空历史
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.cursor = -1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.snapshots.len() as isize - 1
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn current(&self) -> Option<CategorySnapshot> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|idx| self.snapshots.get(idx))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(names: &[&str]) -> CategorySnapshot {
        names.iter().map(|n| Category::new(n, &["k"], 1)).collect()
    }

    #[test]
    fn test_initial_state() {
        let history = History::new();
        assert_eq!(history.cursor(), -1);
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_stops_at_first_snapshot() {
        let mut history = History::new();
        history.record(&snapshot(&["A"]));
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), 0);

        history.record(&snapshot(&["A", "B"]));
        assert_eq!(history.undo(), Some(snapshot(&["A"])));
        assert_eq!(history.redo(), Some(snapshot(&["A", "B"])));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_truncates_redo_branch() {
        let mut history = History::new();
        history.record(&snapshot(&[]));
        history.record(&snapshot(&["A"]));
        history.record(&snapshot(&["A", "B"]));
        history.undo();
        history.undo();
        assert!(history.can_redo());

        history.record(&snapshot(&["C"]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_reset() {
        let mut history = History::new();
        history.record(&snapshot(&["A"]));
        history.reset();
        assert_eq!(history.cursor(), -1);
        assert!(history.is_empty());
    }
}
