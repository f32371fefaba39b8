//! 关键词输入解析工具
//! 负责将用户输入的关键词文本拆分为统一小写的关键词列表

use once_cell::sync::Lazy;
use regex::Regex;

static KEYWORD_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,]+").expect("关键词分隔正则无效"));

/// 解析关键词输入
///
/// # 参数
/// - `input`: 原始输入，关键词之间以空白、换行或逗号分隔
///
/// # 返回值
/// 去除空项并统一转为小写的关键词列表（保持输入顺序，不去重）
pub fn parse_keywords(input: &str) -> Vec<String> {
    KEYWORD_SEPARATOR
        .split(input.trim())
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| keyword.to_lowercase())
        .collect()
}
