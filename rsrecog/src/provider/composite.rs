use std::sync::Arc;

use rustc_hash::FxHashSet;

use rsrecog_engine::Matchers;

use super::MatchersProvider;

/// 组合提供器：按优先级顺序组合多个子提供器
///
/// 按名字查询时逐个询问全部子提供器：无结果返回None；单一结果原样返回；
/// 多个结果按模式文本去重合并，先到先得（子提供器优先级在前，同一结果内
/// 部按声明顺序），合并产物保持该解析顺序。
#[derive(Default)]
pub struct CompositeMatchersProvider {
    /// 子提供器，列表顺序即优先级
    providers: Vec<Arc<dyn MatchersProvider>>,
}

impl CompositeMatchersProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_providers(providers: Vec<Arc<dyn MatchersProvider>>) -> Self {
        CompositeMatchersProvider { providers }
    }

    /// 追加子提供器，排在现有子提供器之后（优先级更低）
    pub fn add_provider(&mut self, provider: Arc<dyn MatchersProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }
}

impl MatchersProvider for CompositeMatchersProvider {
    fn matchers_by_name(&self, name: &str, kind: &str) -> Option<Arc<Matchers>> {
        let mut results: Vec<Arc<Matchers>> = self
            .providers
            .iter()
            .filter_map(|provider| provider.matchers_by_name(name, kind))
            .collect();

        if results.len() <= 1 {
            return results.pop();
        }

        // 多源合并：按模式文本唯一化，首个出现的指纹胜出
        let mut merged = Matchers::new(name);
        let mut seen_patterns = FxHashSet::default();
        for result in &results {
            for fingerprint in result.iter() {
                if seen_patterns.insert(fingerprint.pattern_str().to_string()) {
                    merged.push(fingerprint.clone());
                }
            }
        }

        Some(Arc::new(merged))
    }

    fn matchers_of_type(&self, _kind: &str) -> Option<Vec<Arc<Matchers>>> {
        // TODO: 跨子提供器的类型级聚合尚未定义合并语义，待按目录键做并集后开放
        None
    }
}
