//! 编译模块：将分类关键词编译为可执行的整词正则
pub mod pattern;
pub mod compiler;

pub use self::pattern::{CompiledCategory, CompiledCategorySet, KeywordPattern};
pub use self::compiler::{KeywordCompiler, count};
