//! 分类模块：负责分类数据模型、撤销/重做历史、模板与分类集导入导出
pub mod model;
pub mod history;
pub mod template;
pub mod store;
pub mod loader;

// 导出核心接口
pub use self::model::Category;
pub use self::history::{CategorySnapshot, History};
pub use self::template::TemplatePreset;
pub use self::store::CategoryStore;
pub use self::loader::{CategoryLoader, ImportStats};
