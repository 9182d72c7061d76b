use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use rsrecog_engine::{
    CoreResult, Fingerprint, FingerprintExample, Matchers, PatternFlags, RecogPattern,
    RegexRecogPattern,
};

use super::format::{CatalogFile, FingerprintSpec, ParamSpec};
use crate::error::{RsResult, RsrecogError};

/// 模式后端工厂（可注入，测试可替换为mock后端）
pub type PatternFactory =
    Arc<dyn Fn(&str, PatternFlags) -> CoreResult<Arc<dyn RecogPattern>> + Send + Sync>;

/// 预编译空白正则，描述文本统一归一化
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 把目录文件的标志词表解析为标志位集合
/// 词表来自目录格式的固定词汇，未识别词静默忽略（宽松解析）
pub fn parse_flags(flags: Option<&str>) -> PatternFlags {
    let mut parsed = PatternFlags::NONE;
    if let Some(raw) = flags {
        for token in raw.split(['|', ',', ';', ' ', '\t']) {
            match token {
                "REG_ICASE" | "IGNORECASE" => {
                    parsed = parsed | PatternFlags::CASE_INSENSITIVE;
                }
                // 两个词等价，均同时启用dotall与多行锚定
                "REG_DOT_NEWLINE" | "REG_MULTILINE" => {
                    parsed =
                        parsed | PatternFlags::DOT_MATCHES_NEWLINE | PatternFlags::MULTI_LINE;
                }
                _ => {}
            }
        }
    }
    parsed
}

/// 指纹目录加载器
///
/// 严格/宽松两种模式：宽松模式下单条指纹解析失败仅告警并跳过，尽量多产出
/// 合法指纹；严格模式下任何错误立即中止并上抛。
pub struct CatalogLoader {
    strict: bool,
    pattern_factory: PatternFactory,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLoader {
    /// 默认宽松模式，regex后端
    pub fn new() -> Self {
        CatalogLoader {
            strict: false,
            pattern_factory: Arc::new(|pattern: &str, flags: PatternFlags| {
                Ok(Arc::new(RegexRecogPattern::compile(pattern, flags)?) as Arc<dyn RecogPattern>)
            }),
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 注入自定义模式后端工厂
    pub fn with_pattern_factory(mut self, factory: PatternFactory) -> Self {
        self.pattern_factory = factory;
        self
    }

    /// 从文件加载目录
    /// 外部示例文件相对 `<目录文件父目录>/<文件名去扩展名>/` 解析
    pub fn load_file(&self, path: &Path) -> RsResult<Matchers> {
        let content = fs::read_to_string(path)?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let example_dir = path.parent().map(|parent| parent.join(&name));

        self.parse(&content, &name, example_dir.as_deref())
    }

    /// 从字符串加载目录，name用作key兜底
    pub fn load_str(&self, content: &str, name: &str) -> RsResult<Matchers> {
        self.parse(content, name, None)
    }

    fn parse(
        &self,
        content: &str,
        name: &str,
        example_dir: Option<&Path>,
    ) -> RsResult<Matchers> {
        let file: CatalogFile = serde_json::from_str(content)?;

        let key = if file.matches.is_empty() {
            log::debug!("Catalogue key is empty, falling back to name '{}'", name);
            name.to_string()
        } else {
            file.matches
        };

        let mut matchers =
            Matchers::with_metadata(key, file.protocol, file.database_type, file.preference);

        for spec in file.fingerprints {
            match self.build_fingerprint(spec, example_dir) {
                Ok(fingerprint) => matchers.push(fingerprint),
                Err(error) => {
                    if self.strict {
                        return Err(error);
                    }
                    log::warn!("Failed to parse fingerprint: {}", error);
                }
            }
        }

        Ok(matchers)
    }

    fn build_fingerprint(
        &self,
        spec: FingerprintSpec,
        example_dir: Option<&Path>,
    ) -> RsResult<Fingerprint> {
        if spec.pattern.is_empty() {
            return Err(RsrecogError::CatalogParseError(
                "Attribute \"pattern\" does not exist.".to_string(),
            ));
        }

        let flags = parse_flags(spec.flags.as_deref());
        let pattern = (self.pattern_factory)(&spec.pattern, flags)?;

        let mut fingerprint = Fingerprint::new(pattern);

        if let Some(description) = spec.description {
            let normalized = WHITESPACE.replace_all(&description, " ");
            fingerprint.set_description(normalized.trim());
        }

        for param in spec.params {
            self.add_param(&mut fingerprint, param)?;
        }

        for example in spec.examples {
            fingerprint
                .add_example(FingerprintExample::new(example.text, example.attributes, example_dir)?);
        }

        Ok(fingerprint)
    }

    fn add_param(&self, fingerprint: &mut Fingerprint, param: ParamSpec) -> RsResult<()> {
        match param.pos {
            // 0号位表示常量参数，value必填
            Some(0) => {
                let value = param.value.filter(|value| !value.is_empty()).ok_or_else(|| {
                    RsrecogError::CatalogParseError(format!(
                        "Attribute \"value\" does not exist for constant parameter \"{}\"",
                        param.name
                    ))
                })?;
                fingerprint.add_value(param.name, Some(value));
            }
            // 非0号位绑定捕获组，不允许携带value
            Some(position) => {
                if param.value.as_deref().is_some_and(|value| !value.is_empty()) {
                    return Err(RsrecogError::CatalogParseError(format!(
                        "Attribute \"{}\" has a non-zero position but specifies a value",
                        param.name
                    )));
                }
                fingerprint.add_positional(position, param.name)?;
            }
            // 无位置表示命名参数
            None => {
                if param.value.as_deref().is_some_and(|value| !value.is_empty()) {
                    return Err(RsrecogError::CatalogParseError(format!(
                        "Attribute \"{}\" is a named parameter but specifies a value",
                        param.name
                    )));
                }
                fingerprint.add_named(param.name);
            }
        }
        Ok(())
    }
}
