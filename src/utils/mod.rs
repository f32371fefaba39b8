//! 工具模块：关键词解析、代码统计、CSV 导出、文件导入
pub mod keyword_parser;
pub mod code_stats;
pub mod csv_export;
pub mod file_import;

pub use self::keyword_parser::parse_keywords;
pub use self::code_stats::CodeStats;
pub use self::csv_export::{export_file_name, records_to_csv};
pub use self::file_import::{is_supported_file, read_code_file};
