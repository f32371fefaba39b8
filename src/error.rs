//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use base64::DecodeError as Base64DecodeError;

#[derive(Error, Debug)]
pub enum ScorerError {
    // 用户输入相关错误
    #[error("输入校验失败：{0}")]
    Validation(String),
    #[error("分类已存在：{0}")]
    DuplicateName(String),
    #[error("索引 {index} 超出范围（共 {len} 个分类）")]
    Index { index: usize, len: usize },

    // 持久化相关错误
    #[error("持久化失败：{0}")]
    Persistence(String),
    #[error("成绩库未初始化")]
    StoreUninitialized,

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("MessagePack序列化/反序列化失败：{0}")]
    MsgPackError(String),
    #[error("Base64解码失败：{0}")]
    Base64Error(#[from] Base64DecodeError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

impl ScorerError {
    /// 构造输入校验错误
    pub fn validation(msg: impl Into<String>) -> Self {
        ScorerError::Validation(msg.into())
    }

    /// 是否属于用户输入类错误（仅提示，不影响后续操作）
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ScorerError::Validation(_) | ScorerError::DuplicateName(_) | ScorerError::Index { .. }
        )
    }
}

// 全局Result类型
pub type ScorerResult<T> = Result<T, ScorerError>;
