use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::example::{FingerprintExample, ENCODING_KEY, FILENAME_KEY};
use super::interpolate::{interpolate, ParamMap, CPE_SUFFIX};
use super::pattern::{PatternFlags, RecogPattern, RegexRecogPattern};
use super::verify::VerifyStatus;
use crate::error::{CoreError, CoreResult};

/// 单条指纹定义：一个模式后端+参数提取规则+示例
///
/// 参数分三类：
/// - 常量值：匹配成功时恒定输出
/// - 位置参数：绑定1开始编号的捕获组，组号越界时静默省略
/// - 命名参数：绑定同名命名捕获组，模式未声明该组时静默省略
///
/// 构造期通过`add_*`链式填充，加载完成后不再修改；匹配操作均为`&self`，
/// 可跨线程并发调用。
#[derive(Debug, Clone)]
pub struct Fingerprint {
    pattern: Arc<dyn RecogPattern>,
    /// 常量参数（值可为None）
    values: FxHashMap<String, Option<String>>,
    /// 位置参数：参数名 → 捕获组号（1开始）
    positional_params: FxHashMap<String, usize>,
    /// 命名参数：参数名即命名捕获组名
    named_params: FxHashSet<String>,
    description: Option<String>,
    examples: Vec<FingerprintExample>,
}

impl Fingerprint {
    /// 基于注入的模式后端构造
    pub fn new(pattern: Arc<dyn RecogPattern>) -> Self {
        Fingerprint {
            pattern,
            values: FxHashMap::default(),
            positional_params: FxHashMap::default(),
            named_params: FxHashSet::default(),
            description: None,
            examples: Vec::new(),
        }
    }

    /// 便捷构造：按默认regex后端编译模式
    pub fn from_regex(pattern: &str, flags: PatternFlags) -> CoreResult<Self> {
        Ok(Self::new(Arc::new(RegexRecogPattern::compile(
            pattern, flags,
        )?)))
    }

    /// 添加常量参数，匹配成功时恒定出现在结果表中
    pub fn add_value(
        &mut self,
        name: impl Into<String>,
        value: Option<String>,
    ) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    /// 添加位置参数，绑定指定编号的捕获组
    /// 组号从1开始，0保留给常量参数，传0为构造错误
    pub fn add_positional(
        &mut self,
        group: usize,
        name: impl Into<String>,
    ) -> CoreResult<&mut Self> {
        if group == 0 {
            return Err(CoreError::InvalidParamPosition(group));
        }
        self.positional_params.insert(name.into(), group);
        Ok(self)
    }

    /// 添加命名参数，参数名同时是模式中命名捕获组的名字
    pub fn add_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.named_params.insert(name.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_example(&mut self, example: FingerprintExample) -> &mut Self {
        self.examples.push(example);
        self
    }

    pub fn pattern_str(&self) -> &str {
        self.pattern.pattern()
    }

    pub fn flags(&self) -> PatternFlags {
        self.pattern.flags()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn examples(&self) -> &[FingerprintExample] {
        &self.examples
    }

    /// 部分匹配判定
    /// 与`extract`严格一致：本方法返回true当且仅当`extract`返回Some
    pub fn matches(&self, input: Option<&str>) -> bool {
        input.map_or(false, |text| self.pattern.is_match(text))
    }

    /// 匹配并提取参数表
    ///
    /// 输入缺失或模式不匹配返回None；否则从常量值出发，依次并入位置参数
    /// 与命名参数，最后对`.cpe23`后缀键做插值展开。未参与匹配的组以None
    /// 值保留在结果中，组号越界或命名组未声明的参数整体省略。
    pub fn extract(&self, input: Option<&str>) -> Option<ParamMap> {
        let result = self.pattern.find(input?)?;

        let mut params: ParamMap = self.values.clone();

        for (name, group) in &self.positional_params {
            if *group <= result.group_count() {
                params.insert(name.clone(), result.group(*group).map(str::to_string));
            }
        }

        for name in &self.named_params {
            match result.named_group(name) {
                Ok(value) => {
                    params.insert(name.clone(), value.map(str::to_string));
                }
                Err(_) => {
                    // 模式未声明该命名组，参数静默省略
                    log::trace!(
                        "Named group '{}' not declared in pattern '{}', parameter skipped",
                        name,
                        self.pattern.pattern()
                    );
                }
            }
        }

        interpolate(Some(CPE_SUFFIX), &mut params);
        Some(params)
    }

    /// 用内嵌示例自检本指纹，结果逐条回调给consumer
    ///
    /// - 无示例：Warn
    /// - 示例不匹配，或期望属性在结果中缺失/不符：Fail
    /// - 由捕获组派生的参数未被任何示例断言：Warn（覆盖率检查）
    pub fn verify_examples<F>(&self, mut consumer: F)
    where
        F: FnMut(VerifyStatus, String),
    {
        let description = self.description.as_deref().unwrap_or("");

        if self.examples.is_empty() {
            consumer(
                VerifyStatus::Warn,
                format!("'{}' has no test cases", description),
            );
        }

        for example in &self.examples {
            let result = match self.extract(Some(example.text())) {
                Some(result) => result,
                None => {
                    consumer(
                        VerifyStatus::Fail,
                        format!(
                            "'{}' failed to match \"{}\" with '{}'",
                            description,
                            example.text(),
                            self.pattern.pattern()
                        ),
                    );
                    continue;
                }
            };

            let mut status = VerifyStatus::Success;
            let mut message = example.text().to_string();
            for (key, expected) in example.attributes() {
                if key == ENCODING_KEY || key == FILENAME_KEY {
                    continue;
                }

                let actual = result.get(key).and_then(|value| value.as_deref());
                if actual != Some(expected.as_str()) {
                    status = VerifyStatus::Fail;
                    message = format!(
                        "'{}' failed to find expected capture group {} '{}'. Result was {}",
                        description,
                        key,
                        expected,
                        actual.unwrap_or("None")
                    );
                    break;
                }
            }
            consumer(status, message);
        }

        self.verify_capture_group_coverage(&mut consumer);
    }

    /// 捕获组覆盖率检查：每个位置参数至少应被一个示例属性断言过
    fn verify_capture_group_coverage<F>(&self, consumer: &mut F)
    where
        F: FnMut(VerifyStatus, String),
    {
        let mut covered: FxHashMap<&str, bool> = self
            .positional_params
            .keys()
            .filter(|name| !name.is_empty())
            .map(|name| (name.as_str(), false))
            .collect();

        for example in &self.examples {
            for key in example.attributes().keys() {
                if let Some(flag) = covered.get_mut(key.as_str()) {
                    *flag = true;
                }
            }
        }

        let description = self.description.as_deref().unwrap_or("");
        for (name, used) in covered {
            if !used {
                consumer(
                    VerifyStatus::Warn,
                    format!(
                        "'{}' is missing an example that checks for parameter '{}' \
                         which is derived from a capture group",
                        description, name
                    ),
                );
            }
        }
    }
}

/// 相等性按模式文本、标志位与三类参数规格判定，描述与示例不参与
impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.pattern() == other.pattern.pattern()
            && self.pattern.flags() == other.pattern.flags()
            && self.values == other.values
            && self.positional_params == other.positional_params
            && self.named_params == other.named_params
    }
}

impl Eq for Fingerprint {}
