use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// 单个指纹目录文件（serde_json文档）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// 目录键；缺失或为空时由加载方用文件名兜底
    #[serde(default)]
    pub matches: String,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub database_type: Option<String>,
    #[serde(default)]
    pub preference: f32,
    #[serde(default)]
    pub fingerprints: Vec<FingerprintSpec>,
}

/// 单条指纹定义
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FingerprintSpec {
    /// 正则模式（必填）
    pub pattern: String,
    /// 标志词表，如 "REG_ICASE|REG_DOT_NEWLINE"，未识别词忽略
    #[serde(default)]
    pub flags: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub examples: Vec<ExampleSpec>,
}

/// 参数定义
/// - pos缺失 → 命名参数（绑定同名命名捕获组）
/// - pos为0 → 常量参数（value必填）
/// - pos大于0 → 位置参数（不允许携带value）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(default)]
    pub pos: Option<usize>,
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// 示例定义：样本文本+期望属性表（含`_encoding`/`_filename`保留键）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExampleSpec {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub attributes: FxHashMap<String, String>,
}
