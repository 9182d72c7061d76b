//! 全局错误类型定义
use thiserror::Error;

use regex::Error as RegexError;
use rsrecog_engine::CoreError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum RsrecogError {
    // 目录相关错误
    #[error("Catalogue load failed: {0}")]
    CatalogLoadError(String),
    #[error("Catalogue parse failed: {0}")]
    CatalogParseError(String),

    // 编译相关错误
    #[error("Regex compilation failed: {0}")]
    RegexCompileError(#[from] RegexError),

    // 内核错误透传
    #[error("Engine error: {0}")]
    CoreError(#[from] CoreError),

    // 序列化/反序列化错误
    #[error("JSON parse failed: {0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO operation failed: {0}")]
    IoError(#[from] IoError),
}

/// 业务层全局Result类型别名
pub type RsResult<T> = Result<T, RsrecogError>;
