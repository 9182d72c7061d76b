//! 提供器模块：目录集合的索引查询与多源聚合
mod composite;
mod dir_provider;

pub use composite::CompositeMatchersProvider;
pub use dir_provider::DirMatchersProvider;

use std::sync::Arc;

use rsrecog_engine::Matchers;

/// 目录提供器trait：按名字/类型检索指纹目录
///
/// 加载在构造期一次性完成，之后全部查询只读，可跨线程并发调用。
pub trait MatchersProvider: Send + Sync {
    /// 按名字检索单个目录；提供器配置类型与请求类型不符时返回None
    fn matchers_by_name(&self, name: &str, kind: &str) -> Option<Arc<Matchers>>;

    /// 检索指定类型的全部目录
    fn matchers_of_type(&self, kind: &str) -> Option<Vec<Arc<Matchers>>>;
}
