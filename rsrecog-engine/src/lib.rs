// 核心公共结构体+trait（指纹/模式/插值/集合）
pub mod core;
// 内核错误定义
pub mod error;

// 顶层导出常用类型
pub use self::core::{
    interpolate, Fingerprint, FingerprintExample, Matchers, ParamMap, PatternFlags,
    PatternMatch, RecogMatch, RecogPattern, RegexRecogPattern, VerifyStatus, CPE_SUFFIX,
    ENCODING_KEY, FILENAME_KEY,
};
pub use self::error::{CoreError, CoreResult};
