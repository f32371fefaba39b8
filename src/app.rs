//! 应用控制器：持有分类、代码缓冲、评分结果与成绩库，对外暴露命令接口
//!
//! 所有用户输入类错误在此转换为提示信息，不会向上传播

use std::fmt;
use std::path::Path;
use tracing::{debug, info, info_span, warn};

use crate::category::{Category, CategoryLoader, CategoryStore, ImportStats, TemplatePreset};
use crate::config::GlobalConfig;
use crate::error::{ScorerError, ScorerResult};
use crate::scoring::{ScoreReport, ScoringEngine, format_manual_score, parse_manual_score};
use crate::storage::{Clock, FileSlot, KvSlot, Preferences, Record, ResultQuery, ResultStore, SystemClock};
use crate::utils::{CodeStats, parse_keywords, read_code_file, records_to_csv};

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// 一次性提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

impl From<ScorerError> for Notice {
    fn from(err: ScorerError) -> Self {
        let message = match &err {
            ScorerError::Validation(msg) => msg.clone(),
            ScorerError::DuplicateName(name) => format!("分类 \"{}\" 已存在", name),
            _ => err.to_string(),
        };
        if err.is_user_error() {
            Notice::warning(message)
        } else {
            Notice::error(message)
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Info => "ℹ",
            NoticeLevel::Warning => "⚠",
            NoticeLevel::Error => "✗",
        };
        write!(f, "{} {}", tag, self.message)
    }
}

/// 应用状态
pub struct App<S: KvSlot + Clone> {
    config: GlobalConfig,
    categories: CategoryStore,
    code: String,
    check_keywords: String,
    manual_input: String,
    last_report: Option<ScoreReport>,
    results: ResultStore<S>,
    preferences: Preferences<S>,
    loading: bool,
}

impl App<FileSlot> {
    /// 按配置打开文件存储
    pub fn open(config: GlobalConfig) -> Self {
        let slot = FileSlot::new(config.data_path.clone());
        Self::new(config, slot)
    }
}

impl<S: KvSlot + Clone> App<S> {
    pub fn new(config: GlobalConfig, slot: S) -> Self {
        Self::with_clock(config, slot, Box::new(SystemClock))
    }

    pub fn with_clock(config: GlobalConfig, slot: S, clock: Box<dyn Clock>) -> Self {
        let results = ResultStore::init_with_clock(slot.clone(), config.db_key.clone(), clock);
        if !results.is_initialized() {
            warn!("成绩库不可用，保存与查询功能将被禁用");
        }
        let preferences = Preferences::new(slot, config.theme_key.clone());

        Self {
            config,
            categories: CategoryStore::new(),
            code: String::new(),
            check_keywords: String::new(),
            manual_input: "0".to_string(),
            last_report: None,
            results,
            preferences,
            loading: false,
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    // ===== 分类命令 =====

    /// 添加分类，最小命中数无效时按 1 处理
    pub fn on_add_category(&mut self, name: &str, keywords_input: &str, min_input: &str) -> Notice {
        let min_required = match parse_manual_score(min_input) {
            0 => 1,
            n => usize::try_from(n).unwrap_or(0),
        };
        let category = Category::from_input(name, keywords_input, min_required);

        match self.categories.add(category) {
            Ok(()) => Notice::success("分类添加成功"),
            Err(e) => e.into(),
        }
    }

    pub fn on_remove_category(&mut self, index: usize) -> Notice {
        match self.categories.remove(index) {
            Ok(removed) => Notice::success(format!("已删除分类：{}", removed.name)),
            Err(e) => e.into(),
        }
    }

    pub fn on_clear_categories(&mut self) -> Notice {
        self.categories.clear();
        Notice::success("分类已清空")
    }

    pub fn on_load_template(&mut self, key: &str) -> Notice {
        let result = key
            .parse::<TemplatePreset>()
            .and_then(|preset| self.categories.load_template(preset).map(|()| preset));

        match result {
            Ok(preset) => Notice::success(format!("已加载模板：{}", preset.name())),
            Err(ScorerError::DuplicateName(name)) => {
                Notice::warning(format!("模板 \"{}\" 已存在", name))
            }
            Err(e) => e.into(),
        }
    }

    pub fn on_undo(&mut self) -> Notice {
        if self.categories.undo() {
            Notice::success("↶ 撤销成功")
        } else {
            Notice::info("没有可撤销的操作")
        }
    }

    pub fn on_redo(&mut self) -> Notice {
        if self.categories.redo() {
            Notice::success("↷ 重做成功")
        } else {
            Notice::info("没有可重做的操作")
        }
    }

    /// 从 JSON 文件导入分类集
    pub fn on_import_categories(&mut self, path: &Path) -> Notice {
        match CategoryLoader::load_file(path) {
            Ok(categories) => {
                let ImportStats { added, skipped } =
                    CategoryLoader::import_into(&mut self.categories, categories);
                if skipped > 0 {
                    Notice::warning(format!("导入 {} 个分类，跳过 {} 个", added, skipped))
                } else {
                    Notice::success(format!("导入 {} 个分类", added))
                }
            }
            Err(e) => e.into(),
        }
    }

    /// 将当前分类集导出为 JSON 文件
    pub fn on_export_categories(&self, path: &Path) -> Notice {
        let categories = self.categories.categories();
        if categories.is_empty() {
            return Notice::warning("没有可导出的分类");
        }
        match CategoryLoader::save_file(path, categories) {
            Ok(()) => Notice::success(format!("已导出 {} 个分类", categories.len())),
            Err(e) => e.into(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.categories()
    }

    pub fn category_store(&self) -> &CategoryStore {
        &self.categories
    }

    // ===== 代码与评分 =====

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn code_stats(&self) -> CodeStats {
        CodeStats::measure(&self.code)
    }

    pub fn set_check_keywords(&mut self, input: impl Into<String>) {
        self.check_keywords = input.into();
    }

    pub fn set_manual_score(&mut self, input: impl Into<String>) {
        self.manual_input = input.into();
    }

    pub fn manual_score(&self) -> i64 {
        parse_manual_score(&self.manual_input)
    }

    /// 导入代码文件，替换当前代码；已有分类与检查关键词时自动评分
    pub fn on_import_file(&mut self, path: &Path) -> Notice {
        let code = match read_code_file(path) {
            Ok(code) => code,
            Err(e) => return e.into(),
        };
        self.code = code;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("已加载代码文件：{}", file_name);

        if !self.categories.is_empty() && !parse_keywords(&self.check_keywords).is_empty() {
            return self.on_check_code();
        }
        Notice::success(format!("\"{}\" 加载成功", file_name))
    }

    /// 执行评分
    pub fn on_check_code(&mut self) -> Notice {
        match self.check_code() {
            Ok(_) => Notice::success("代码分析完成"),
            Err(e) => e.into(),
        }
    }

    /// 执行评分并返回报告；评分期间处于加载状态
    pub fn check_code(&mut self) -> ScorerResult<&ScoreReport> {
        let check_keywords = parse_keywords(&self.check_keywords);
        let span = info_span!("check_code", categories = self.categories.len());
        let _guard = span.enter();

        self.loading = true;
        let result =
            ScoringEngine::evaluate_checked(&self.code, &check_keywords, self.categories.categories());
        self.loading = false;

        let report = result?;
        debug!(
            "评分完成：分类得分={}，总命中={}",
            report.total_category_score, report.total_matched
        );
        self.manual_input = "0".to_string();
        Ok(self.last_report.insert(report))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_report(&self) -> Option<&ScoreReport> {
        self.last_report.as_ref()
    }

    /// 当前最终得分（未评分时分类得分按 0 计）
    pub fn final_score(&self) -> i64 {
        let manual = self.manual_score();
        match &self.last_report {
            Some(report) => report.final_score(manual),
            None => manual,
        }
    }

    /// 评分结果展示行，可按分类名过滤
    pub fn report_lines(&self, filter: Option<&str>) -> Vec<String> {
        let Some(report) = &self.last_report else {
            return Vec::new();
        };

        let mut lines: Vec<String> = report
            .filter(filter)
            .into_iter()
            .map(|result| result.to_string())
            .collect();
        let manual = self.manual_score();
        lines.push(format!(
            "Final Score: {} (Category: {} + Manual: {})",
            report.final_score(manual),
            report.total_category_score,
            format_manual_score(manual)
        ));
        lines
    }

    /// 统计视图：代码指标，评分后追加总命中数与逐分类命中
    pub fn stats_lines(&self) -> Vec<String> {
        let mut lines = vec![self.code_stats().to_string()];
        if let Some(report) = &self.last_report {
            lines.push(format!("Total matches: {}", report.total_matched));
            lines.extend(report.results.iter().map(|result| result.match_summary()));
        }
        lines
    }

    // ===== 成绩库 =====

    /// 保存当前成绩
    pub fn on_save_result(&mut self, name: &str) -> Notice {
        let name = name.trim();
        if name.is_empty() {
            return Notice::warning("请先输入姓名");
        }

        if self.results.insert(name, self.final_score()) {
            self.manual_input = "0".to_string();
            Notice::success("成绩保存成功")
        } else {
            Notice::error("保存成绩失败")
        }
    }

    pub fn results(&self, query: &ResultQuery) -> Vec<Record> {
        self.results.query(query)
    }

    pub fn all_results(&self) -> Vec<Record> {
        self.results.list_all()
    }

    pub fn on_delete_all_results(&mut self) -> Notice {
        let count = self.results.len();
        if count == 0 {
            return Notice::warning("没有可删除的记录");
        }
        if self.results.delete_all() {
            Notice::success(format!("已删除全部 {} 条记录", count))
        } else {
            Notice::error("删除记录失败")
        }
    }

    /// 导出 CSV，无记录时返回校验错误
    pub fn export_csv(&self) -> ScorerResult<String> {
        let records = self.results.list_all();
        if records.is_empty() {
            return Err(ScorerError::validation("没有可导出的记录"));
        }
        Ok(records_to_csv(&records))
    }

    // ===== 界面偏好 =====

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode()
    }

    pub fn on_toggle_theme(&mut self) -> Notice {
        match self.preferences.toggle() {
            Ok(true) => Notice::success("已启用深色模式"),
            Ok(false) => Notice::success("已启用浅色模式"),
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;

    fn app() -> App<MemorySlot> {
        App::new(GlobalConfig::default(), MemorySlot::new())
    }

    #[test]
    fn test_add_category_notices() {
        let mut app = app();
        assert!(app.on_add_category("Loops", "for, while", "1").is_success());

        let dup = app.on_add_category("LOOPS", "do", "1");
        assert_eq!(dup.level, NoticeLevel::Warning);

        let empty = app.on_add_category("X", "  ", "1");
        assert_eq!(empty.level, NoticeLevel::Warning);

        let too_many = app.on_add_category("Y", "if else", "3");
        assert_eq!(too_many.level, NoticeLevel::Warning);
        assert_eq!(app.categories().len(), 1);
    }

    #[test]
    fn test_invalid_min_input_defaults_to_one() {
        let mut app = app();
        assert!(app.on_add_category("Loops", "for while", "abc").is_success());
        assert_eq!(app.categories()[0].min_required, 1);
    }

    #[test]
    fn test_check_requires_inputs() {
        let mut app = app();
        app.set_code("for (;;) {}");
        assert_eq!(app.on_check_code().level, NoticeLevel::Warning);

        app.set_check_keywords("for");
        assert_eq!(app.on_check_code().level, NoticeLevel::Warning);

        app.on_load_template("control");
        assert!(app.on_check_code().is_success());
        assert!(!app.is_loading());
    }

    #[test]
    fn test_check_resets_manual_score() {
        let mut app = app();
        app.on_add_category("Loops", "for", "1");
        app.set_check_keywords("for");
        app.set_code("for (;;) {}");
        app.set_manual_score("5");

        app.check_code().unwrap();
        assert_eq!(app.manual_score(), 0);
        app.set_manual_score("-1");
        assert_eq!(app.final_score(), 2);

        let lines = app.report_lines(None);
        assert_eq!(lines.last().unwrap(), "Final Score: 2 (Category: 3 + Manual: -1)");
    }

    #[test]
    fn test_undo_redo_notices() {
        let mut app = app();
        assert_eq!(app.on_undo().level, NoticeLevel::Info);
        app.on_load_template("oop");
        assert!(app.on_undo().is_success());
        assert!(app.categories().is_empty());
        assert!(app.on_redo().is_success());
        assert_eq!(app.on_redo().level, NoticeLevel::Info);
    }

    #[test]
    fn test_duplicate_template_warning() {
        let mut app = app();
        app.on_load_template("oop");
        let notice = app.on_load_template("OOP");
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("OOP"));
        assert_eq!(app.on_load_template("nope").level, NoticeLevel::Warning);
    }

    #[test]
    fn test_save_requires_name() {
        let mut app = app();
        assert_eq!(app.on_save_result("   ").level, NoticeLevel::Warning);
        assert!(app.all_results().is_empty());

        app.set_manual_score("4");
        assert!(app.on_save_result(" Alice ").is_success());
        let records = app.all_results();
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[0].total_score, 4);
        assert_eq!(app.manual_score(), 0);
    }

    #[test]
    fn test_delete_and_export_empty() {
        let mut app = app();
        assert_eq!(app.on_delete_all_results().level, NoticeLevel::Warning);
        assert!(matches!(app.export_csv(), Err(ScorerError::Validation(_))));

        app.on_save_result("Bob");
        assert!(app.export_csv().unwrap().starts_with("ID,Name,Score,Date\n1,\"Bob\",0,"));
        assert!(app.on_delete_all_results().is_success());
    }

    #[test]
    fn test_extreme_manual_score_does_not_overflow() {
        let mut app = app();
        app.on_add_category("Loops", "for", "1");
        app.set_check_keywords("for");
        app.set_code("for (;;) {}");
        app.check_code().unwrap();

        app.set_manual_score("9223372036854775807");
        assert_eq!(app.final_score(), i64::MAX);
        assert_eq!(
            app.report_lines(None).last().unwrap(),
            &format!("Final Score: {} (Category: 3 + Manual: +{})", i64::MAX, i64::MAX)
        );

        assert!(app.on_save_result("Max").is_success());
        assert_eq!(app.all_results()[0].total_score, i64::MAX);
    }

    #[test]
    fn test_stats_lines() {
        let mut app = app();
        app.set_code("for (;;) {}\nwhile (x) {}");
        assert_eq!(app.stats_lines(), vec!["Lines: 2 | Words: 6 | Characters: 24"]);

        app.on_add_category("Loops", "for while", "2");
        app.on_add_category("OOP", "class", "1");
        app.set_check_keywords("for");
        app.check_code().unwrap();

        let lines = app.stats_lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Total matches: 2");
        assert_eq!(lines[2], "Loops: 2 matches ✓ PASSED");
        assert_eq!(lines[3], "OOP: 0 matches ✗ FAILED");
    }

    #[test]
    fn test_export_categories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");

        let mut app = app();
        assert_eq!(app.on_export_categories(&path).level, NoticeLevel::Warning);
        assert!(!path.exists());

        app.on_load_template("oop");
        app.on_add_category("Loops", "for while", "1");
        assert!(app.on_export_categories(&path).is_success());

        let mut other = self::app();
        assert!(other.on_import_categories(&path).is_success());
        assert_eq!(other.categories(), app.categories());
    }

    #[test]
    fn test_toggle_theme() {
        let mut app = app();
        assert!(!app.dark_mode());
        app.on_toggle_theme();
        assert!(app.dark_mode());
    }
}
