//! 目录模块：指纹目录文件的数据模型定义与加载
mod format;
mod loader;

pub use format::{CatalogFile, ExampleSpec, FingerprintSpec, ParamSpec};
pub use loader::{parse_flags, CatalogLoader, PatternFactory};
