//! rskeycat - 基于关键词分类的代码评分工具

// 导出全局错误类型
pub use self::error::{ScorerError, ScorerResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigBuilder};

// 导出分类模块核心接口
pub use self::category::{
    Category, CategorySnapshot, History, TemplatePreset, CategoryStore, CategoryLoader,
    ImportStats
};

// 导出编译模块核心接口
pub use self::compiler::{
    KeywordCompiler, KeywordPattern, CompiledCategory, CompiledCategorySet
};

// 导出评分模块核心接口
pub use self::scoring::{
    ScoringEngine, ScoreReport, CategoryResult, CategoryScore, PASS_REWARD,
    parse_manual_score
};

// 导出存储模块核心接口
pub use self::storage::{
    KvSlot, MemorySlot, FileSlot, Clock, SystemClock, FixedClock, Record, ResultStore,
    ResultQuery, SortOrder, Preferences
};

// 导出工具模块核心接口
pub use self::utils::{
    parse_keywords, CodeStats, records_to_csv, export_file_name, read_code_file
};

// 导出应用控制器
pub use self::app::{App, Notice, NoticeLevel};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod category;
pub mod compiler;
pub mod scoring;
pub mod storage;
pub mod utils;
pub mod app;
