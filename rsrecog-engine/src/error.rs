//! rsrecog-engine 内核错误定义
//! 封装内核层所有核心错误，与业务层错误解耦，基于thiserror实现类型安全处理
use std::path::PathBuf;

use thiserror::Error;

use regex::Error as RegexError;

/// 内核核心错误枚举
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================== 编译相关错误 =====================
    /// 正则表达式编译失败（正则语法错误/不支持的特性）
    #[error("Regex compilation failed: {0}")]
    RegexCompileError(#[from] RegexError),

    // ===================== 指纹构造错误 =====================
    /// 位置参数组号非法（组号从1开始，0保留给常量参数）
    #[error("The group position '{0}' must be a positive integer")]
    InvalidParamPosition(usize),

    /// 模式中不存在指定命名捕获组
    #[error("No capture group named '{0}' in pattern")]
    NoSuchNamedGroup(String),

    // ===================== 示例相关错误 =====================
    /// 示例文本base64解码失败
    #[error("Example text base64 decode failed: {0}")]
    ExampleDecodeError(#[from] base64::DecodeError),

    /// 外部示例文件读取失败
    #[error("Unable to process fingerprint example file '{path}': {source}")]
    ExampleFileError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// 内核层全局Result类型别名
pub type CoreResult<T> = Result<T, CoreError>;
