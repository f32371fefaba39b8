//! 代码文件导入工具
//! 仅接受 `.dart` 与 `.txt` 文件，按文本读取

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{ScorerError, ScorerResult};

/// 支持导入的文件后缀
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".dart", ".txt"];

/// 文件名是否为支持的类型（区分大小写）
pub fn is_supported_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| SUPPORTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

/// 读取代码文件内容（非 UTF-8 字节按替换字符处理）
pub fn read_code_file(path: &Path) -> ScorerResult<String> {
    if !is_supported_file(path) {
        return Err(ScorerError::validation("仅支持 .dart 或 .txt 文件"));
    }

    let bytes = fs::read(path)?;
    debug!("已读取代码文件：{}，大小：{} 字节", path.display(), bytes.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
