//! 内置分类模板

use std::fmt;
use std::str::FromStr;

use super::model::Category;
use crate::error::ScorerError;

/// 预置模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplatePreset {
    Oop,
    Control,
    Types,
    Functions,
}

impl TemplatePreset {
    pub const ALL: [TemplatePreset; 4] = [
        TemplatePreset::Oop,
        TemplatePreset::Control,
        TemplatePreset::Types,
        TemplatePreset::Functions,
    ];

    /// 模板键
    pub fn key(self) -> &'static str {
        match self {
            TemplatePreset::Oop => "oop",
            TemplatePreset::Control => "control",
            TemplatePreset::Types => "types",
            TemplatePreset::Functions => "functions",
        }
    }

    /// 分类名称
    pub fn name(self) -> &'static str {
        match self {
            TemplatePreset::Oop => "OOP",
            TemplatePreset::Control => "Control Flow",
            TemplatePreset::Types => "Types",
            TemplatePreset::Functions => "Functions",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            TemplatePreset::Oop => &[
                "class", "extends", "implements", "interface", "abstract", "override", "super", "this",
            ],
            TemplatePreset::Control => &[
                "if", "else", "switch", "case", "for", "while", "do", "break", "continue", "return",
            ],
            TemplatePreset::Types => &[
                "int", "string", "bool", "double", "list", "map", "set", "dynamic", "var", "final",
                "const",
            ],
            TemplatePreset::Functions => &[
                "void", "function", "async", "await", "yield", "late", "required", "optional",
            ],
        }
    }

    /// 生成分类，最小命中数取关键词数的一半（向上取整）
    pub fn to_category(self) -> Category {
        let keywords = self.keywords();
        Category::new(self.name(), keywords, keywords.len().div_ceil(2))
    }
}

impl FromStr for TemplatePreset {
    type Err = ScorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        TemplatePreset::ALL
            .into_iter()
            .find(|preset| preset.key() == key)
            .ok_or_else(|| ScorerError::Validation(format!("未知模板：{}", s)))
    }
}

impl fmt::Display for TemplatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.key())
    }
}
