//! 代码统计工具（行数/单词数/字符数）

use std::fmt;
use serde::Serialize;

/// 代码统计结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CodeStats {
    pub lines: usize,
    pub words: usize,
    pub chars: usize,
}

impl CodeStats {
    /// 统计代码文本，空文本也计为 1 行
    pub fn measure(code: &str) -> Self {
        Self {
            lines: code.split('\n').count(),
            words: code.split_whitespace().count(),
            chars: code.chars().count(),
        }
    }
}

impl fmt::Display for CodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lines: {} | Words: {} | Characters: {}",
            self.lines, self.words, self.chars
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure() {
        let stats = CodeStats::measure("void main() {\n  print('hi');\n}");
        assert_eq!(stats, CodeStats { lines: 3, words: 5, chars: 30 });
    }

    #[test]
    fn test_measure_empty() {
        assert_eq!(CodeStats::measure(""), CodeStats { lines: 1, words: 0, chars: 0 });
    }
}
