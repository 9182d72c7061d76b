use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use walkdir::WalkDir;

use rsrecog_engine::Matchers;

use super::MatchersProvider;
use crate::catalog::CatalogLoader;

/// 目录树提供器：从文件系统根目录递归收集指纹目录文件
///
/// 构造期一次性建立两套索引（按文件名、按目录键），之后只读。单个目录
/// 文件加载失败仅告警并跳过，不影响其余文件（宽松策略）。
pub struct DirMatchersProvider {
    kind: String,
    by_file_name: FxHashMap<String, Arc<Matchers>>,
    by_key: FxHashMap<String, Arc<Matchers>>,
}

impl DirMatchersProvider {
    /// 用默认加载器构造
    pub fn new(kind: impl Into<String>, root: &Path) -> Self {
        Self::with_loader(kind, root, &CatalogLoader::new())
    }

    /// 注入加载器构造（便于测试）
    pub fn with_loader(kind: impl Into<String>, root: &Path, loader: &CatalogLoader) -> Self {
        let mut provider = DirMatchersProvider {
            kind: kind.into(),
            by_file_name: FxHashMap::default(),
            by_key: FxHashMap::default(),
        };

        if !root.is_dir() {
            log::warn!(
                "Path {} does not exist or is not walkable; fingerprinting may be inaccurate.",
                root.display()
            );
            return provider;
        }

        for entry in WalkDir::new(root).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    log::warn!("I/O error while walking {}: {}", root.display(), error);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map(|ext| ext != "json").unwrap_or(true)
            {
                continue;
            }

            match loader.load_file(path) {
                Ok(matchers) => {
                    let matchers = Arc::new(matchers);
                    if let Some(file_name) = path.file_name() {
                        provider
                            .by_file_name
                            .insert(file_name.to_string_lossy().into_owned(), matchers.clone());
                    }
                    provider
                        .by_key
                        .insert(matchers.key().to_string(), matchers);
                }
                Err(error) => {
                    log::warn!("Failed to parse catalogue {}: {}", path.display(), error);
                }
            }
        }

        // 仅按文件名计数，按键的目录数可能因键冲突而更少
        log::info!(
            "Loaded {} fingerprint catalogues from {}.",
            provider.by_file_name.len(),
            root.display()
        );

        provider
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.by_file_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file_name.is_empty()
    }
}

impl MatchersProvider for DirMatchersProvider {
    fn matchers_by_name(&self, name: &str, kind: &str) -> Option<Arc<Matchers>> {
        if self.kind != kind {
            return None;
        }

        // 先按文件名查，再按目录键兜底
        self.by_file_name
            .get(name)
            .or_else(|| self.by_key.get(name))
            .cloned()
    }

    fn matchers_of_type(&self, kind: &str) -> Option<Vec<Arc<Matchers>>> {
        if self.kind != kind {
            return None;
        }
        Some(self.by_key.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const APACHE: &str = r#"{
        "matches": "apache_http",
        "fingerprints": [ { "pattern": "^Apache HTTPD (.*)$" } ]
    }"#;

    const NGINX: &str = r#"{
        "matches": "nginx_banner",
        "fingerprints": [ { "pattern": "^nginx/([\\d.]+)$" } ]
    }"#;

    fn provider_with_files() -> (tempfile::TempDir, DirMatchersProvider) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("apache.json"), APACHE).unwrap();
        // 嵌套目录也应被递归收集
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("nginx.json"), NGINX).unwrap();
        // 非目录文件忽略
        fs::write(dir.path().join("README.txt"), "not a catalogue").unwrap();

        let provider = DirMatchersProvider::new("service", dir.path());
        (dir, provider)
    }

    #[test]
    fn test_loads_catalogues_recursively() {
        let (_dir, provider) = provider_with_files();
        assert_eq!(provider.len(), 2);
    }

    #[test]
    fn test_lookup_by_file_name_then_key() {
        let (_dir, provider) = provider_with_files();

        // 文件名命中
        let by_file = provider.matchers_by_name("apache.json", "service").unwrap();
        assert_eq!(by_file.key(), "apache_http");

        // 目录键兜底
        let by_key = provider.matchers_by_name("nginx_banner", "service").unwrap();
        assert_eq!(by_key.key(), "nginx_banner");
    }

    #[test]
    fn test_type_mismatch_returns_none() {
        let (_dir, provider) = provider_with_files();
        assert!(provider.matchers_by_name("apache.json", "other").is_none());
        assert!(provider.matchers_of_type("other").is_none());
    }

    #[test]
    fn test_matchers_of_type_returns_all() {
        let (_dir, provider) = provider_with_files();
        let all = provider.matchers_of_type("service").unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_broken_catalogue_skipped() {
        // 测试场景：单个文件损坏，其余目录正常加载
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("apache.json"), APACHE).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let provider = DirMatchersProvider::new("service", dir.path());
        assert_eq!(provider.len(), 1);
        assert!(provider.matchers_by_name("apache.json", "service").is_some());
    }

    #[test]
    fn test_missing_root_yields_empty_provider() {
        let provider = DirMatchersProvider::new("service", Path::new("/nonexistent/rsrecog"));
        assert!(provider.is_empty());
        assert!(provider.matchers_by_name("apache.json", "service").is_none());
    }
}
