use std::fmt;
use std::ops::BitOr;

use regex::RegexBuilder;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 正则编译标志位集合（不透明bitset）
/// 由加载层从目录文件的标志词表解析得到，匹配器在编译期一次性应用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternFlags(u8);

impl PatternFlags {
    pub const NONE: PatternFlags = PatternFlags(0);
    /// 忽略大小写
    pub const CASE_INSENSITIVE: PatternFlags = PatternFlags(1);
    /// `.` 匹配换行符
    pub const DOT_MATCHES_NEWLINE: PatternFlags = PatternFlags(1 << 1);
    /// `^`/`$` 逐行锚定
    pub const MULTI_LINE: PatternFlags = PatternFlags(1 << 2);

    #[inline]
    pub fn contains(self, other: PatternFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for PatternFlags {
    type Output = PatternFlags;

    fn bitor(self, rhs: PatternFlags) -> PatternFlags {
        PatternFlags(self.0 | rhs.0)
    }
}

/// 单次模式匹配的自持结果
/// 捕获组按1开始编号，0号为整体匹配；组计数不含整体匹配
/// 未参与匹配的组保留为None（与空串匹配区分）
#[derive(Debug, Clone)]
pub struct PatternMatch {
    /// 按位置索引的组值（0号为整体匹配）
    groups: Vec<Option<String>>,
    /// 模式中声明的全部命名组（键存在即组已声明，值None即未参与匹配）
    named: FxHashMap<String, Option<String>>,
}

impl PatternMatch {
    pub fn new(groups: Vec<Option<String>>, named: FxHashMap<String, Option<String>>) -> Self {
        PatternMatch { groups, named }
    }

    /// 捕获组数量，不含0号整体匹配
    pub fn group_count(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// 按位置取组值（1开始编号）
    /// 返回None表示该组未参与匹配或编号越界
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|value| value.as_deref())
    }

    /// 按名称取组值
    /// 模式中未声明该命名组时返回错误，与“组未参与匹配”（Ok(None)）严格区分
    pub fn named_group(&self, name: &str) -> CoreResult<Option<&str>> {
        match self.named.get(name) {
            Some(value) => Ok(value.as_deref()),
            None => Err(CoreError::NoSuchNamedGroup(name.to_string())),
        }
    }
}

/// 模式后端trait（可注入策略）
/// 匹配语义为部分匹配（子串查找），不要求模式消费完整输入
pub trait RecogPattern: fmt::Debug + Send + Sync {
    /// 原始模式文本
    fn pattern(&self) -> &str;

    /// 编译期应用的标志位
    fn flags(&self) -> PatternFlags;

    /// 部分匹配判定
    fn is_match(&self, input: &str) -> bool;

    /// 部分匹配并导出捕获组，无匹配返回None
    fn find(&self, input: &str) -> Option<PatternMatch>;
}

/// 默认模式后端，基于regex crate实现
/// 相等性/哈希按（模式文本，标志位）判定
#[derive(Debug, Clone)]
pub struct RegexRecogPattern {
    source: String,
    flags: PatternFlags,
    regex: regex::Regex,
}

impl RegexRecogPattern {
    /// 按标志位编译模式
    pub fn compile(pattern: &str, flags: PatternFlags) -> CoreResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.contains(PatternFlags::CASE_INSENSITIVE))
            .dot_matches_new_line(flags.contains(PatternFlags::DOT_MATCHES_NEWLINE))
            .multi_line(flags.contains(PatternFlags::MULTI_LINE))
            .build()?;

        Ok(RegexRecogPattern {
            source: pattern.to_string(),
            flags,
            regex,
        })
    }
}

impl RecogPattern for RegexRecogPattern {
    fn pattern(&self) -> &str {
        &self.source
    }

    fn flags(&self) -> PatternFlags {
        self.flags
    }

    fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    fn find(&self, input: &str) -> Option<PatternMatch> {
        let captures = self.regex.captures(input)?;

        let groups = (0..captures.len())
            .map(|index| captures.get(index).map(|m| m.as_str().to_string()))
            .collect();

        // 收集模式中声明的全部命名组，未参与匹配的记为None
        let named = self
            .regex
            .capture_names()
            .flatten()
            .map(|name| {
                (
                    name.to_string(),
                    captures.name(name).map(|m| m.as_str().to_string()),
                )
            })
            .collect();

        Some(PatternMatch::new(groups, named))
    }
}

impl PartialEq for RegexRecogPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for RegexRecogPattern {}

impl std::hash::Hash for RegexRecogPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.flags.hash(state);
    }
}
