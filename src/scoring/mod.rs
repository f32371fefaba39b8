//! 评分模块：评分引擎与评分结果模型
pub mod engine;
pub mod report;

// 导出核心接口
pub use self::engine::ScoringEngine;
pub use self::report::{
    CategoryResult, CategoryScore, ScoreReport, PASS_REWARD, format_manual_score,
    parse_manual_score,
};
