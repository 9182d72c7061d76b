use super::fingerprint::Fingerprint;
use super::interpolate::ParamMap;

/// 一次命中记录：命中的指纹+该输入解析出的参数表
/// 每次查询新建，不做缓存
#[derive(Debug, Clone)]
pub struct RecogMatch<'a> {
    fingerprint: &'a Fingerprint,
    parameters: ParamMap,
}

impl<'a> RecogMatch<'a> {
    pub fn fingerprint(&self) -> &'a Fingerprint {
        self.fingerprint
    }

    pub fn parameters(&self) -> &ParamMap {
        &self.parameters
    }

    pub fn into_parameters(self) -> ParamMap {
        self.parameters
    }
}

/// 指纹目录：同一目录文件内的有序指纹集合+目录级元数据
///
/// 指纹顺序即声明顺序，首个命中语义依赖该顺序，目录作者以此控制优先级。
/// key构造后恒非空（来源省略时由调用方传入的名字兜底）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matchers {
    key: String,
    protocol: Option<String>,
    database_type: Option<String>,
    preference: f32,
    fingerprints: Vec<Fingerprint>,
}

impl Matchers {
    pub fn new(key: impl Into<String>) -> Self {
        Matchers {
            key: key.into(),
            ..Matchers::default()
        }
    }

    pub fn with_metadata(
        key: impl Into<String>,
        protocol: Option<String>,
        database_type: Option<String>,
        preference: f32,
    ) -> Self {
        Matchers {
            key: key.into(),
            protocol,
            database_type,
            preference,
            fingerprints: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    pub fn database_type(&self) -> Option<&str> {
        self.database_type.as_deref()
    }

    pub fn preference(&self) -> f32 {
        self.preference
    }

    /// 追加指纹，保持声明顺序
    pub fn push(&mut self, fingerprint: Fingerprint) {
        self.fingerprints.push(fingerprint);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fingerprint> {
        self.fingerprints.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Fingerprint> {
        self.fingerprints.get(index)
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// 按声明顺序匹配全部指纹，返回所有命中
    /// 单条输入可合法命中同一目录中的多条指纹；输入缺失返回空
    pub fn get_matches(&self, input: Option<&str>) -> Vec<RecogMatch<'_>> {
        let text = match input {
            Some(text) => text,
            None => return Vec::new(),
        };

        self.fingerprints
            .iter()
            .filter_map(|fingerprint| {
                fingerprint.extract(Some(text)).map(|parameters| RecogMatch {
                    fingerprint,
                    parameters,
                })
            })
            .collect()
    }

    /// 按声明顺序返回首个命中，命中即短路
    pub fn get_first_match(&self, input: &str) -> Option<RecogMatch<'_>> {
        self.fingerprints.iter().find_map(|fingerprint| {
            fingerprint.extract(Some(input)).map(|parameters| RecogMatch {
                fingerprint,
                parameters,
            })
        })
    }
}

impl<'a> IntoIterator for &'a Matchers {
    type Item = &'a Fingerprint;
    type IntoIter = std::slice::Iter<'a, Fingerprint>;

    fn into_iter(self) -> Self::IntoIter {
        self.fingerprints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pattern::PatternFlags;

    fn fingerprint(pattern: &str) -> Fingerprint {
        Fingerprint::from_regex(pattern, PatternFlags::NONE).unwrap()
    }

    #[test]
    fn test_get_matches_absent_input_is_empty() {
        let matchers = Matchers::new("test");
        assert!(matchers.get_matches(None).is_empty());
    }

    #[test]
    fn test_get_matches_no_fingerprints() {
        let matchers = Matchers::new("test");
        assert!(matchers.get_matches(Some("anything")).is_empty());
    }

    #[test]
    fn test_get_matches_no_hits() {
        let mut matchers = Matchers::new("test");
        matchers.push(fingerprint("foo"));
        matchers.push(fingerprint("bar"));
        assert!(matchers.get_matches(Some("unrelated")).is_empty());
    }

    #[test]
    fn test_get_matches_single_hit_with_parameters() {
        let mut matchers = Matchers::new("test");
        matchers.push(fingerprint("Apache HTTPD (.*)"));
        let mut tomcat = fingerprint("Apache Tomcat (.*)");
        tomcat.add_positional(1, "version").unwrap();
        matchers.push(tomcat);
        matchers.push(fingerprint("Microsoft IIS (.*)"));

        let matches = matchers.get_matches(Some("Apache Tomcat 8.3"));
        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches[0].parameters().get("version"),
            Some(&Some("8.3".to_string()))
        );
    }

    #[test]
    fn test_get_matches_returns_all_hits() {
        // 测试场景：单条输入命中多条指纹，全部返回且保持声明顺序
        let mut matchers = Matchers::new("test");
        let mut first = fingerprint("Apache Tomcat (.*)");
        first.add_positional(1, "version").unwrap();
        matchers.push(first);
        let mut second = fingerprint(r"Apache Tomcat (.*)\.(.*)");
        second.add_positional(1, "major.version").unwrap();
        second.add_positional(2, "minor.version").unwrap();
        matchers.push(second);

        let matches = matchers.get_matches(Some("Apache Tomcat 8.3"));
        assert_eq!(matches.len(), 2);
        assert_eq!(
            matches[0].parameters().get("version"),
            Some(&Some("8.3".to_string()))
        );
        assert_eq!(
            matches[1].parameters().get("major.version"),
            Some(&Some("8".to_string()))
        );
        assert_eq!(
            matches[1].parameters().get("minor.version"),
            Some(&Some("3".to_string()))
        );
    }

    #[test]
    fn test_get_first_match_declaration_order() {
        // 两条指纹均命中时返回先声明的那条
        let mut matchers = Matchers::new("test");
        let mut first = fingerprint("^Apache");
        first.add_value("which", Some("first".to_string()));
        matchers.push(first);
        let mut second = fingerprint(r"^Apache/[\d.]+$");
        second.add_value("which", Some("second".to_string()));
        matchers.push(second);

        let hit = matchers.get_first_match("Apache/2.2.3").unwrap();
        assert_eq!(
            hit.parameters().get("which"),
            Some(&Some("first".to_string()))
        );
    }

    #[test]
    fn test_get_first_match_none() {
        let mut matchers = Matchers::new("test");
        matchers.push(fingerprint("^Apache$"));
        assert!(matchers.get_first_match("nginx").is_none());
    }

    #[test]
    fn test_metadata_accessors() {
        let matchers = Matchers::with_metadata(
            "apache_os",
            Some("tcp".to_string()),
            Some("util.os".to_string()),
            0.9,
        );
        assert_eq!(matchers.key(), "apache_os");
        assert_eq!(matchers.protocol(), Some("tcp"));
        assert_eq!(matchers.database_type(), Some("util.os"));
        assert_eq!(matchers.preference(), 0.9);
    }
}
