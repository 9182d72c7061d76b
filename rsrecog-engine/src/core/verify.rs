/// 示例自检结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStatus {
    /// 示例匹配且全部期望属性命中
    Success,
    /// 非致命问题（无示例/捕获组参数未被示例覆盖）
    Warn,
    /// 示例不匹配或期望属性缺失/不符
    Fail,
}
